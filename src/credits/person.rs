use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::cast::CastMember;
use super::crew::CrewMember;
use crate::normalization::Department;

/// A cast or crew entry, tagged at ingestion so callers never have to guess
/// which fields are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Person {
    Cast(CastMember),
    Crew(CrewMember),
}

impl Person {
    pub fn id(&self) -> &str {
        match self {
            Person::Cast(c) => &c.id,
            Person::Crew(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Person::Cast(c) => &c.name,
            Person::Crew(c) => &c.name,
        }
    }

    /// "as Cobb" for cast, the job title for crew.
    pub fn role_label(&self) -> String {
        match self {
            Person::Cast(c) => format!("as {}", c.character),
            Person::Crew(c) => c.job.clone(),
        }
    }

    pub fn initials(&self) -> String {
        person_initials(self.name())
    }

    pub fn role(&self) -> PersonRole {
        match self {
            Person::Cast(_) => PersonRole::Cast,
            Person::Crew(_) => PersonRole::Crew,
        }
    }

    /// Canonical department for crew; cast has none.
    pub fn department(&self) -> Option<Department> {
        match self {
            Person::Cast(_) => None,
            Person::Crew(c) => Some(c.canonical_department()),
        }
    }
}

/// Which side of the credits a search is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PersonRole {
    #[default]
    All,
    Cast,
    Crew,
}

impl PersonRole {
    pub fn admits(self, role: PersonRole) -> bool {
        self == PersonRole::All || self == role
    }
}

/// Search box state: free-text query plus optional role and department
/// restrictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonFilter {
    pub query: String,
    /// Only crew resolving to this department pass; cast never does.
    pub department: Option<Department>,
    pub role: PersonRole,
}

impl PersonFilter {
    pub fn new(query: impl Into<String>) -> Self {
        PersonFilter {
            query: query.into(),
            ..PersonFilter::default()
        }
    }

    pub fn with_role(mut self, role: PersonRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    fn admits(&self, person: &Person) -> bool {
        let in_department = match self.department {
            Some(dept) => person.department() == Some(dept),
            None => true,
        };
        self.role.admits(person.role()) && in_department
    }
}

impl From<CastMember> for Person {
    fn from(member: CastMember) -> Self {
        Person::Cast(member)
    }
}

impl From<CrewMember> for Person {
    fn from(member: CrewMember) -> Self {
        Person::Crew(member)
    }
}

/// Records that can be matched by the people search box.
pub trait Searchable {
    /// `needle` is already trimmed and lowercased.
    fn matches_query(&self, needle: &str) -> bool;
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Searchable for CastMember {
    fn matches_query(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle) || contains_folded(&self.character, needle)
    }
}

impl Searchable for CrewMember {
    fn matches_query(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle)
            || contains_folded(&self.job, needle)
            || contains_folded(&self.department, needle)
    }
}

impl Searchable for Person {
    fn matches_query(&self, needle: &str) -> bool {
        match self {
            Person::Cast(c) => c.matches_query(needle),
            Person::Crew(c) => c.matches_query(needle),
        }
    }
}

/// Case-insensitive substring search over people, preserving input order.
///
/// A blank query matches everyone.
pub fn filter_people<'a, T: Searchable>(people: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return people.iter().collect();
    }
    people.iter().filter(|p| p.matches_query(&needle)).collect()
}

/// [`filter_people`] over tagged people, after applying the role and
/// department restrictions of `filter`.
pub fn apply_person_filter<'a>(people: &'a [Person], filter: &PersonFilter) -> Vec<&'a Person> {
    filter_people(people, &filter.query)
        .into_iter()
        .filter(|p| filter.admits(p))
        .collect()
}

/// Up to two uppercase initials for an avatar placeholder.
///
/// Only the first two space-separated parts are considered.
pub fn person_initials(name: &str) -> String {
    name.split(' ')
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(name: &str, character: &str) -> Person {
        Person::Cast(CastMember {
            id: name.to_string(),
            name: name.to_string(),
            character: character.to_string(),
            billing_order: 0,
            profile_image: None,
        })
    }

    fn crew(name: &str, job: &str, department: &str) -> Person {
        Person::Crew(CrewMember {
            id: name.to_string(),
            name: name.to_string(),
            job: job.to_string(),
            department: department.to_string(),
            profile_image: None,
        })
    }

    fn sample() -> Vec<Person> {
        vec![
            cast("Leonardo DiCaprio", "Cobb"),
            cast("Jane Doe", "Tommy"),
            crew("Christopher Nolan", "Director", "Directing"),
            crew("Hans Zimmer", "Original Music Composer", "Sound"),
        ]
    }

    fn names<'a>(people: &[&'a Person]) -> Vec<&'a str> {
        people.iter().map(|&p| p.name()).collect()
    }

    #[test]
    fn blank_query_returns_everyone_in_order() {
        let people = sample();
        for query in ["", "   ", "\t"] {
            let out = filter_people(&people, query);
            assert_eq!(out.len(), people.len());
            assert!(out.iter().zip(&people).all(|(a, b)| std::ptr::eq(*a, b)));
        }
    }

    #[test]
    fn matches_character_for_cast() {
        let people = sample();
        assert_eq!(names(&filter_people(&people, "tom")), vec!["Jane Doe"]);
    }

    #[test]
    fn matches_job_and_department_for_crew() {
        let people = sample();
        assert_eq!(names(&filter_people(&people, "  COMPOSER ")), vec!["Hans Zimmer"]);
        assert_eq!(names(&filter_people(&people, "directing")), vec!["Christopher Nolan"]);
        assert_eq!(
            names(&filter_people(&people, "o")),
            vec!["Leonardo DiCaprio", "Jane Doe", "Christopher Nolan", "Hans Zimmer"]
        );
        assert!(filter_people(&people, "xyz").is_empty());
    }

    #[test]
    fn cast_fields_are_not_searched_as_crew_fields() {
        // "Director" appears only as a crew job.
        let people = vec![cast("Director Person", "Someone"), crew("X", "Gaffer", "Lighting")];
        assert_eq!(names(&filter_people(&people, "gaffer")), vec!["X"]);
        assert_eq!(names(&filter_people(&people, "director")), vec!["Director Person"]);
    }

    #[test]
    fn works_on_untagged_slices() {
        let cast_only = vec![CastMember {
            id: "1".into(),
            name: "Tom Hardy".into(),
            character: "Eames".into(),
            billing_order: 3,
            profile_image: None,
        }];
        assert_eq!(filter_people(&cast_only, "eames").len(), 1);
    }

    #[test]
    fn role_restriction() {
        let people = sample();
        let crew_only = PersonFilter::new("").with_role(PersonRole::Crew);
        assert_eq!(
            names(&apply_person_filter(&people, &crew_only)),
            vec!["Christopher Nolan", "Hans Zimmer"]
        );

        let cast_o = PersonFilter::new("o").with_role(PersonRole::Cast);
        assert_eq!(
            names(&apply_person_filter(&people, &cast_o)),
            vec!["Leonardo DiCaprio", "Jane Doe"]
        );

        let everyone = PersonFilter::new("  ");
        assert_eq!(apply_person_filter(&people, &everyone).len(), people.len());
    }

    #[test]
    fn department_restriction_uses_canonical_department() {
        let mut people = sample();
        people.push(crew("Wally Pfister", "Director of Photography", "Camera"));

        let camera = PersonFilter::new("").with_department(Department::Cinematography);
        assert_eq!(names(&apply_person_filter(&people, &camera)), vec!["Wally Pfister"]);

        // Hans Zimmer is listed under "Sound" by the provider.
        let music = PersonFilter::new("zimmer").with_department(Department::Music);
        assert!(apply_person_filter(&people, &music).is_empty());

        let cast_in_dept = PersonFilter::new("")
            .with_role(PersonRole::Cast)
            .with_department(Department::Directing);
        assert!(apply_person_filter(&people, &cast_in_dept).is_empty());
    }

    #[test]
    fn filter_deserializes_from_search_state() {
        let filter: PersonFilter = serde_json::from_value(serde_json::json!({
            "query": "nolan",
            "department": "Directing",
            "role": "crew"
        }))
        .unwrap();
        assert_eq!(filter.role, PersonRole::Crew);
        assert_eq!(filter.department, Some(Department::Directing));
        assert_eq!(names(&apply_person_filter(&sample(), &filter)), vec!["Christopher Nolan"]);

        let bare: PersonFilter = serde_json::from_value(serde_json::json!({"query": "x"})).unwrap();
        assert_eq!(bare.role, PersonRole::All);
        assert_eq!(PersonRole::from_str("Crew", true), Ok(PersonRole::Crew));
        assert!(PersonRole::from_str("director", true).is_err());
    }

    #[test]
    fn initials_and_roles() {
        assert_eq!(person_initials("Leonardo DiCaprio"), "LD");
        assert_eq!(person_initials("cher"), "C");
        assert_eq!(person_initials("Mary Elizabeth Winstead"), "ME");
        assert_eq!(person_initials(" Madonna"), "M");
        assert_eq!(person_initials("  Madonna"), "");
        assert_eq!(person_initials(""), "");
        assert_eq!(cast("A", "Cobb").role_label(), "as Cobb");
        assert_eq!(crew("B", "Editor", "Editing").role_label(), "Editor");
        assert_eq!(crew("Hans Zimmer", "x", "y").initials(), "HZ");
    }

    #[test]
    fn tagged_json_round_trip() {
        let json = serde_json::json!({
            "kind": "crew",
            "id": 525,
            "name": "Christopher Nolan",
            "job": "Director",
            "department": "Directing"
        });
        let person: Person = serde_json::from_value(json).unwrap();
        assert!(matches!(person, Person::Crew(_)));
        assert_eq!(person.id(), "525");
        assert_eq!(serde_json::to_value(&person).unwrap()["kind"], "crew");
    }
}
