//! Cast and crew shaping: department grouping, billing tiers and search.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

pub mod cast;
pub mod crew;
pub mod person;

pub use cast::{group_cast_by_importance, CastGroups, CastMember};
pub use crew::{organize_crew, CrewMember, OrganizedCrew};
pub use person::{
    apply_person_filter, filter_people, person_initials, Person, PersonFilter, PersonRole,
    Searchable,
};

/// Credits payload as returned by the metadata provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("credits payload is not valid JSON of the expected shape")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read credits file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("while loading {}", path.display()))
    }

    /// Cast followed by crew, each tagged with its kind.
    pub fn people(&self) -> Vec<Person> {
        self.cast
            .iter()
            .cloned()
            .map(Person::from)
            .chain(self.crew.iter().cloned().map(Person::from))
            .collect()
    }

    pub fn organized_crew(&self) -> OrganizedCrew {
        organize_crew(&self.crew)
    }

    pub fn cast_groups(&self) -> CastGroups {
        group_cast_by_importance(&self.cast)
    }
}

/// Provider ids arrive as either numbers or strings; keep them as text.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::Department;

    const SAMPLE: &str = r#"{
        "id": 27205,
        "cast": [
            {"id": 24045, "name": "Joseph Gordon-Levitt", "character": "Arthur", "order": 1},
            {"id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb", "order": 0}
        ],
        "crew": [
            {"id": 947, "name": "Hans Zimmer", "job": "Original Music Composer",
             "department": "Sound"},
            {"id": 525, "name": "Christopher Nolan", "job": "Director",
             "department": "Directing"},
            {"id": "w1", "name": "Christopher Nolan", "job": "Screenplay",
             "department": "Writing"}
        ]
    }"#;

    #[test]
    fn parses_provider_credits() {
        let credits = Credits::from_json(SAMPLE).unwrap();
        assert_eq!(credits.cast.len(), 2);
        assert_eq!(credits.crew[2].id, "w1");

        let groups = credits.cast_groups();
        assert_eq!(groups.main[0].name, "Leonardo DiCaprio");

        let organized = credits.organized_crew();
        assert_eq!(organized.len(), 3);
        assert_eq!(organized.get(Department::Sound).unwrap()[0].name, "Hans Zimmer");
    }

    #[test]
    fn people_are_tagged_cast_then_crew() {
        let credits = Credits::from_json(SAMPLE).unwrap();
        let people = credits.people();
        assert_eq!(people.len(), 5);
        assert!(matches!(people[0], Person::Cast(_)));
        assert!(matches!(people[4], Person::Crew(_)));
        assert_eq!(filter_people(&people, "cobb").len(), 1);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let credits = Credits::from_json("{}").unwrap();
        assert!(credits.people().is_empty());
        assert!(credits.organized_crew().is_empty());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = Credits::from_json("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("credits payload"));
        assert!(Credits::from_path("/nonexistent/credits.json").is_err());
    }
}
