use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::id_string;
use crate::normalization::Department;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub job: String,
    /// Free-text department as reported by the provider.
    pub department: String,
    #[serde(default, alias = "profile_path", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl CrewMember {
    pub fn canonical_department(&self) -> Department {
        Department::classify(&self.department)
    }

    /// Lower ranks are listed first within a department.
    pub fn job_priority(&self) -> u8 {
        job_priority(&self.job)
    }
}

/// A job-title rule: the job must contain one of `any_of` and none of `none_of`.
struct JobRule {
    any_of: &'static [&'static str],
    none_of: &'static [&'static str],
    rank: u8,
}

/// Checked in order against the lowercased job title; first hit wins.
static JOB_PRIORITY_RULES: &[JobRule] = &[
    JobRule {
        any_of: &["director"],
        none_of: &["assistant"],
        rank: 1,
    },
    JobRule {
        any_of: &["producer"],
        none_of: &["associate"],
        rank: 2,
    },
    JobRule {
        any_of: &["executive producer"],
        none_of: &[],
        rank: 3,
    },
    JobRule {
        any_of: &["writer", "screenplay"],
        none_of: &[],
        rank: 4,
    },
    JobRule {
        any_of: &["cinematographer", "director of photography"],
        none_of: &[],
        rank: 5,
    },
    JobRule {
        any_of: &["editor"],
        none_of: &[],
        rank: 6,
    },
    JobRule {
        any_of: &["composer"],
        none_of: &[],
        rank: 7,
    },
];

pub const DEFAULT_JOB_PRIORITY: u8 = 10;

pub fn job_priority(job: &str) -> u8 {
    let lower = job.to_lowercase();
    JOB_PRIORITY_RULES
        .iter()
        .find(|rule| {
            rule.any_of.iter().any(|k| lower.contains(k))
                && !rule.none_of.iter().any(|k| lower.contains(k))
        })
        .map(|rule| rule.rank)
        .unwrap_or(DEFAULT_JOB_PRIORITY)
}

/// Locale-style name ordering, compared in three passes:
/// 1. base letters, ignoring accents and case ("Émile" and "emile" tie here)
/// 2. accents, unaccented first
/// 3. case, lowercase first
pub fn collate_names(a: &str, b: &str) -> Ordering {
    let (a, b) = (CollationKey::new(a), CollationKey::new(b));
    a.base
        .cmp(&b.base)
        .then_with(|| a.marks.cmp(&b.marks))
        .then_with(|| a.upper.cmp(&b.upper))
}

struct CollationKey {
    base: Vec<char>,
    /// Combining marks attached to each base letter.
    marks: Vec<Vec<char>>,
    upper: Vec<bool>,
}

impl CollationKey {
    fn new(name: &str) -> Self {
        let mut key = CollationKey {
            base: Vec::new(),
            marks: Vec::new(),
            upper: Vec::new(),
        };
        for c in name.nfd() {
            if is_combining_mark(c) {
                match key.marks.last_mut() {
                    Some(marks) => marks.push(c),
                    None => key.marks.push(vec![c]),
                }
                continue;
            }
            key.base.extend(c.to_lowercase());
            key.marks.push(Vec::new());
            key.upper.push(c.is_uppercase());
        }
        key
    }
}

/// Crew grouped by canonical department. Only departments with at least one
/// member are present; iteration follows [`Department::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrganizedCrew {
    departments: BTreeMap<Department, Vec<CrewMember>>,
}

impl OrganizedCrew {
    pub fn get(&self, department: Department) -> Option<&[CrewMember]> {
        self.departments.get(&department).map(Vec::as_slice)
    }

    pub fn departments(&self) -> impl Iterator<Item = (Department, &[CrewMember])> + '_ {
        self.departments
            .iter()
            .map(|(dept, members)| (*dept, members.as_slice()))
    }

    /// Number of non-empty departments.
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.departments.values().map(Vec::len).sum()
    }

    /// Keep at most `max` members per department, preserving order.
    pub fn truncated(&self, max: usize) -> OrganizedCrew {
        let departments = self
            .departments
            .iter()
            .filter(|(_, members)| max > 0 && !members.is_empty())
            .map(|(dept, members)| (*dept, members.iter().take(max).cloned().collect()))
            .collect();
        OrganizedCrew { departments }
    }
}

/// Group crew by department and order each group by job priority, then name.
pub fn organize_crew(crew: &[CrewMember]) -> OrganizedCrew {
    let mut departments: BTreeMap<Department, Vec<CrewMember>> = BTreeMap::new();
    for member in crew {
        departments
            .entry(member.canonical_department())
            .or_default()
            .push(member.clone());
    }

    for members in departments.values_mut() {
        members.sort_by(|a, b| {
            a.job_priority()
                .cmp(&b.job_priority())
                .then_with(|| collate_names(&a.name, &b.name))
        });
    }

    debug!(
        target = "credits",
        crew = crew.len(),
        departments = departments.len(),
        "organized crew"
    );
    OrganizedCrew { departments }
}
