use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::Serialize;
use tracing::warn;

use crate::util::env;

pub const DEFAULT_APP_NAME: &str = "cinedex";

/// Default crew rows shown per department by the CLI (0 = unlimited).
pub const DEFAULT_MAX_CREW_PER_DEPARTMENT: usize = 0;

/// Default cast members shown by the CLI (0 = unlimited).
pub const DEFAULT_MAX_CAST_VISIBLE: usize = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => bail!("unknown environment {other:?}"),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub environment: Environment,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub max_crew_per_department: usize,
    pub max_cast_visible: usize,
    /// Emit JSON from every subcommand without passing `--json`.
    pub json_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::default(),
            log_filter: "info".to_string(),
            max_crew_per_department: DEFAULT_MAX_CREW_PER_DEPARTMENT,
            max_cast_visible: DEFAULT_MAX_CAST_VISIBLE,
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Read `APP_NAME`, `APP_ENV`, `CINEDEX_LOG`, `CINEDEX_MAX_CREW_PER_DEPT`,
    /// `CINEDEX_MAX_CAST_VISIBLE` and `CINEDEX_JSON`.
    /// An unknown `APP_ENV` falls back to development.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = match env::env_opt("APP_ENV") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(target = "config", error = %err, "falling back to development");
                Environment::Development
            }),
            None => defaults.environment,
        };
        Self {
            name: env::env_opt("APP_NAME").unwrap_or(defaults.name),
            version: defaults.version,
            environment,
            log_filter: env::env_opt("CINEDEX_LOG").unwrap_or(defaults.log_filter),
            max_crew_per_department: env::env_parse(
                "CINEDEX_MAX_CREW_PER_DEPT",
                defaults.max_crew_per_department,
            ),
            max_cast_visible: env::env_parse("CINEDEX_MAX_CAST_VISIBLE", defaults.max_cast_visible),
            json_output: env::env_flag("CINEDEX_JSON", defaults.json_output),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing() {
        assert_eq!("Production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" dev ".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn defaults_describe_a_development_build() {
        let config = AppConfig::default();
        assert_eq!(config.name, "cinedex");
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.max_crew_per_department, 0);
        assert_eq!(config.max_cast_visible, 0);
        assert!(!config.json_output);
    }

    #[test]
    fn from_env_reads_display_overrides() {
        std::env::set_var("CINEDEX_JSON", "yes");
        std::env::set_var("CINEDEX_MAX_CAST_VISIBLE", "8");
        let config = AppConfig::from_env();
        assert!(config.json_output);
        assert_eq!(config.max_cast_visible, 8);
    }
}
