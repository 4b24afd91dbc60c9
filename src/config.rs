//! Settings for a game session.
//!
//! Settings come from an optional `detective-quest.toml` in the working
//! directory. Environment variables override the file:
//! - `DETECTIVE_SCENARIO` -- path to a scenario TOML file
//! - `DETECTIVE_LOG_FILE` -- where to write logs
//! - `DETECTIVE_LOG_LEVEL` -- default log filter when `RUST_LOG` is unset

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::data::Scenario;

/// File looked up in the working directory
pub const SETTINGS_FILE: &str = "detective-quest.toml";

/// Errors that can occur when loading settings or scenarios.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The scenario file does not exist.
    #[error("scenario file not found: {}", .path.display())]
    ScenarioNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The scenario file exists but could not be read.
    #[error("failed to read scenario file {}: {source}", .path.display())]
    Scenario {
        /// Path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse TOML: {source}")]
    Toml {
        /// The underlying TOML parse error.
        #[from]
        source: toml::de::Error,
    },
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scenario file to play instead of the built-in manor.
    pub scenario: Option<PathBuf>,

    /// Log destination. Without one, logs go to stderr and only when
    /// `RUST_LOG` asks for them, since the TUI owns the terminal.
    pub log_file: Option<PathBuf>,

    /// Default filter directive for the log file.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scenario: None,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the string is not valid TOML.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if the content is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from [`SETTINGS_FILE`] if present, then apply the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(SETTINGS_FILE);
        let mut settings = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Override fields from a variable lookup (the process environment in
    /// production). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(path) = var("DETECTIVE_SCENARIO") {
            self.scenario = Some(PathBuf::from(path));
        }
        if let Some(path) = var("DETECTIVE_LOG_FILE") {
            self.log_file = Some(PathBuf::from(path));
        }
        if let Some(level) = var("DETECTIVE_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    /// The scenario to play
    pub fn scenario(&self) -> Result<Scenario, ConfigError> {
        match &self.scenario {
            Some(path) => Scenario::from_file(path),
            None => Ok(Scenario::manor()),
        }
    }

    /// Install the global tracing subscriber.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        match &self.log_file {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new(&self.log_level)),
                    )
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            None => {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
                    )
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn parses_fields() {
        let settings = Settings::parse(
            r#"
scenario = "cases/lighthouse.toml"
log_file = "detective.log"
log_level = "debug"
"#,
        )
        .expect("settings");
        assert_eq!(settings.scenario, Some(PathBuf::from("cases/lighthouse.toml")));
        assert_eq!(settings.log_file, Some(PathBuf::from("detective.log")));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            Settings::parse("scenario = ["),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("DETECTIVE_SCENARIO", "other.toml"),
            ("DETECTIVE_LOG_LEVEL", ""),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::parse(r#"scenario = "manor.toml""#).expect("settings");
        settings.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.scenario, Some(PathBuf::from("other.toml")));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn default_scenario_is_the_manor() {
        let scenario = Settings::default().scenario().expect("scenario");
        assert_eq!(scenario, Scenario::manor());
    }
}
