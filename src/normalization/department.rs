use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Canonical crew department.
///
/// Variant order is the display order used when crew is listed by department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Directing,
    Writing,
    Production,
    Cinematography,
    Editing,
    Music,
    Sound,
    #[serde(rename = "Visual Effects")]
    VisualEffects,
    Art,
    #[serde(rename = "Costume & Make-Up")]
    CostumeAndMakeUp,
    Other,
}

impl Department {
    pub const ALL: [Department; 11] = [
        Department::Directing,
        Department::Writing,
        Department::Production,
        Department::Cinematography,
        Department::Editing,
        Department::Music,
        Department::Sound,
        Department::VisualEffects,
        Department::Art,
        Department::CostumeAndMakeUp,
        Department::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Directing => "Directing",
            Department::Writing => "Writing",
            Department::Production => "Production",
            Department::Cinematography => "Cinematography",
            Department::Editing => "Editing",
            Department::Music => "Music",
            Department::Sound => "Sound",
            Department::VisualEffects => "Visual Effects",
            Department::Art => "Art",
            Department::CostumeAndMakeUp => "Costume & Make-Up",
            Department::Other => "Other",
        }
    }

    /// Heading and icon shown above a department's crew list.
    pub fn display(&self) -> DepartmentDisplay {
        let (name, icon) = match self {
            Department::Directing => ("Directing", "🎬"),
            Department::Writing => ("Writing", "✍️"),
            Department::Production => ("Production", "🎭"),
            Department::Cinematography => ("Cinematography", "📹"),
            Department::Editing => ("Editing", "✂️"),
            Department::Music => ("Music", "🎵"),
            Department::Sound => ("Sound", "🔊"),
            Department::VisualEffects => ("Visual Effects", "✨"),
            Department::Art => ("Art Direction", "🎨"),
            Department::CostumeAndMakeUp => ("Costume & Make-Up", "👗"),
            Department::Other => ("Other", "🛠️"),
        };
        DepartmentDisplay { name, icon }
    }

    /// Resolve a free-text department label from the provider.
    ///
    /// Resolution order:
    /// 1. exact, case-sensitive lookup in [`DEPARTMENT_ALIASES`]
    /// 2. case-insensitive substring match against [`DEPARTMENT_KEYWORDS`],
    ///    first group wins
    /// 3. [`Department::Other`]
    pub fn classify(raw: &str) -> Department {
        if let Some((_, dept)) = DEPARTMENT_ALIASES.iter().find(|(alias, _)| *alias == raw) {
            trace!(
                target = "normalization",
                raw,
                department = dept.as_str(),
                "exact department alias"
            );
            return *dept;
        }

        let lower = raw.to_lowercase();
        for (keywords, dept) in DEPARTMENT_KEYWORDS {
            if keywords.iter().any(|k| lower.contains(k)) {
                debug!(
                    target = "normalization",
                    raw,
                    department = dept.as_str(),
                    "fuzzy department match"
                );
                return *dept;
            }
        }

        debug!(target = "normalization", raw, "unrecognized department; filing under Other");
        Department::Other
    }
}

/// Parses a canonical department name, ignoring ASCII case.
impl FromStr for Department {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Department::ALL
            .into_iter()
            .find(|dept| dept.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow!("unknown department {wanted:?}"))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepartmentDisplay {
    pub name: &'static str,
    pub icon: &'static str,
}

/// Provider labels that map directly onto a canonical department.
pub static DEPARTMENT_ALIASES: &[(&str, Department)] = &[
    ("Directing", Department::Directing),
    ("Writing", Department::Writing),
    ("Production", Department::Production),
    ("Camera", Department::Cinematography),
    ("Cinematography", Department::Cinematography),
    ("Editing", Department::Editing),
    ("Music", Department::Music),
    ("Sound", Department::Sound),
    ("Visual Effects", Department::VisualEffects),
    ("Art", Department::Art),
    ("Costume", Department::CostumeAndMakeUp),
    ("Make-Up", Department::CostumeAndMakeUp),
    ("Hair", Department::CostumeAndMakeUp),
    ("Makeup", Department::CostumeAndMakeUp),
];

/// Lowercase keyword groups tried in order when no alias matches.
pub static DEPARTMENT_KEYWORDS: &[(&[&str], Department)] = &[
    (&["director", "directing"], Department::Directing),
    (&["writer", "writing", "screenplay"], Department::Writing),
    (&["producer", "production"], Department::Production),
    (&["camera", "cinematography", "photography"], Department::Cinematography),
    (&["edit"], Department::Editing),
    (&["music", "composer", "score"], Department::Music),
    (&["sound", "audio"], Department::Sound),
    (&["visual", "vfx", "effects"], Department::VisualEffects),
    (&["art", "design", "decoration"], Department::Art),
    (&["costume", "makeup", "hair"], Department::CostumeAndMakeUp),
];
