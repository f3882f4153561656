use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::credits::{
    apply_person_filter, CastGroups, CastMember, Credits, OrganizedCrew, Person, PersonFilter,
};

#[derive(Debug, Clone)]
pub struct PeopleConfig {
    pub path: PathBuf,
    pub json: bool,
    /// 0 means no cap.
    pub max_per_department: usize,
    /// 0 means no cap.
    pub max_cast_visible: usize,
}

fn load(cfg: &PeopleConfig) -> Result<Credits> {
    let credits = Credits::from_path(&cfg.path)?;
    info!(
        target = "cli",
        path = %cfg.path.display(),
        cast = credits.cast.len(),
        crew = credits.crew.len(),
        "loaded credits"
    );
    Ok(credits)
}

pub fn render_crew(organized: &OrganizedCrew) -> String {
    let mut out = String::new();
    if organized.is_empty() {
        writeln!(out, "No crew information available").ok();
        return out;
    }
    for (department, members) in organized.departments() {
        let display = department.display();
        writeln!(out, "{} {} ({})", display.icon, display.name, members.len()).ok();
        for member in members {
            writeln!(out, "    {:<32} {}", member.name, member.job).ok();
        }
    }
    out
}

fn render_tier(out: &mut String, label: &str, members: &[CastMember]) {
    if members.is_empty() {
        return;
    }
    writeln!(out, "{label} ({})", members.len()).ok();
    for member in members {
        writeln!(
            out,
            "  {:>3}. {:<32} as {}",
            member.billing_order, member.name, member.character
        )
        .ok();
    }
}

pub fn render_cast(groups: &CastGroups) -> String {
    let mut out = String::new();
    if groups.is_empty() {
        writeln!(out, "No cast information available").ok();
        return out;
    }
    render_tier(&mut out, "Main Cast", &groups.main);
    render_tier(&mut out, "Supporting Cast", &groups.supporting);
    render_tier(&mut out, "Other Cast", &groups.other);
    out
}

pub fn render_matches(matches: &[&Person]) -> String {
    let mut out = String::new();
    if matches.is_empty() {
        writeln!(out, "No matching cast or crew").ok();
        return out;
    }
    for person in matches {
        let kind = match person {
            Person::Cast(_) => "cast",
            Person::Crew(_) => "crew",
        };
        writeln!(
            out,
            "[{:<2}] {:<32} {:<5} {}",
            person.initials(),
            person.name(),
            kind,
            person.role_label()
        )
        .ok();
    }
    out
}

pub fn run_crew(cfg: &PeopleConfig) -> Result<()> {
    let credits = load(cfg)?;
    let mut organized = credits.organized_crew();
    if cfg.max_per_department > 0 {
        organized = organized.truncated(cfg.max_per_department);
    }
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&organized)?);
    } else {
        print!("{}", render_crew(&organized));
    }
    Ok(())
}

pub fn run_cast(cfg: &PeopleConfig) -> Result<()> {
    let mut groups = load(cfg)?.cast_groups();
    if cfg.max_cast_visible > 0 {
        groups = groups.limited(cfg.max_cast_visible);
    }
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        print!("{}", render_cast(&groups));
    }
    Ok(())
}

pub fn run_search(cfg: &PeopleConfig, filter: &PersonFilter) -> Result<()> {
    let people = load(cfg)?.people();
    let matches = apply_person_filter(&people, filter);
    info!(
        target = "cli",
        query = %filter.query,
        role = ?filter.role,
        department = ?filter.department,
        matches = matches.len(),
        "searched people"
    );
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print!("{}", render_matches(&matches));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credits::{filter_people, PersonRole};

    fn credits() -> Credits {
        Credits::from_json(
            r#"{
                "cast": [
                    {"id": 1, "name": "Leonardo DiCaprio", "character": "Cobb", "order": 0},
                    {"id": 2, "name": "Tom Hardy", "character": "Eames", "order": 3}
                ],
                "crew": [
                    {"id": 3, "name": "Wally Pfister", "job": "Director of Photography",
                     "department": "Camera"},
                    {"id": 4, "name": "Christopher Nolan", "job": "Director",
                     "department": "Directing"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn crew_renders_department_headings_in_order() {
        let text = render_crew(&credits().organized_crew());
        let directing = text.find("🎬 Directing (1)").unwrap();
        let camera = text.find("📹 Cinematography (1)").unwrap();
        assert!(directing < camera);
        assert!(text.contains("Wally Pfister"));
        assert_eq!(render_crew(&OrganizedCrew::default()), "No crew information available\n");
    }

    #[test]
    fn cast_renders_only_populated_tiers() {
        let text = render_cast(&credits().cast_groups());
        assert!(text.contains("Main Cast (2)"));
        assert!(!text.contains("Supporting Cast"));
        assert!(text.contains("as Eames"));
    }

    #[test]
    fn matches_show_initials_and_roles() {
        let people = credits().people();
        let text = render_matches(&filter_people(&people, "tom"));
        assert!(text.contains("[TH] Tom Hardy"));
        assert!(text.contains("as Eames"));
        assert_eq!(render_matches(&[]), "No matching cast or crew\n");
    }

    #[test]
    fn role_filtered_matches_only_list_that_side() {
        let people = credits().people();
        let filter = PersonFilter::new("o").with_role(PersonRole::Crew);
        let text = render_matches(&apply_person_filter(&people, &filter));
        assert!(text.contains("Christopher Nolan"));
        assert!(text.contains("Wally Pfister"));
        assert!(!text.contains("Tom Hardy"));
    }

    #[test]
    fn capped_cast_renders_fewer_rows() {
        let text = render_cast(&credits().cast_groups().limited(1));
        assert!(text.contains("Main Cast (1)"));
        assert!(!text.contains("Tom Hardy"));
    }
}
