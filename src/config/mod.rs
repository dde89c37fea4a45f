//! Configuration management for jira-agile.
//!
//! This module handles loading, saving, and managing user configuration
//! including profiles and application settings. The file lives at
//! `{config_dir}/jira-agile/config.toml`; passwords and API tokens are kept
//! out of it (see [`crate::api::store_token`]).

mod profile;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use profile::{Profile, ENV_URL, ENV_USER};
pub use settings::Settings;

/// Name of the configuration directory under the platform config dir.
const APP_DIR: &str = "jira-agile";

/// Name of the configuration file.
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory is unknown.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    #[error("Failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The configuration is well-formed but not usable.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub profiles: Vec<Profile>,
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration from its default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        debug!(path = %path.display(), profiles = config.profiles.len(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to its default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)?;

        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate every profile and the profile references.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` for an invalid profile, a
    /// duplicate profile name, or a default profile that does not exist.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;

        for (i, profile) in self.profiles.iter().enumerate() {
            profile.validate()?;
            if self.profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(name) = &self.settings.default_profile {
            if self.profile(name).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "default profile '{}' does not exist",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Resolve the profile to use.
    ///
    /// An explicit `name` wins; otherwise the default profile, otherwise the
    /// only profile when there is exactly one.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<&Profile> {
        let name = name.or(self.settings.default_profile.as_deref());

        match name {
            Some(name) => self
                .profile(name)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string())),
            None => match self.profiles.as_slice() {
                [only] => Ok(only),
                [] => Err(ConfigError::ValidationError(
                    "no profiles configured".to_string(),
                )),
                _ => Err(ConfigError::ValidationError(
                    "several profiles configured; pass --profile or set default_profile"
                        .to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile(name: &str) -> Profile {
        Profile::new(
            name.to_string(),
            "https://company.atlassian.net".to_string(),
            "jdoe".to_string(),
        )
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.settings.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profiles.push(profile("work"));
        config.settings.default_profile = Some("work".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[settings]
default_profile = "work"
timeout_secs = 10

[[profiles]]
name = "work"
url = "https://company.atlassian.net"
username = "jdoe"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.timeout_secs, 10);
        assert_eq!(config.profile("work").unwrap().username, "jdoe");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "profiles = 3 = 4").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_duplicate_profiles_rejected() {
        let config = Config {
            settings: Settings::default(),
            profiles: vec![profile("work"), profile("work")],
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate profile name 'work'"));
    }

    #[test]
    fn test_unknown_default_profile_rejected() {
        let mut config = Config::default();
        config.profiles.push(profile("work"));
        config.settings.default_profile = Some("home".to_string());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'home' does not exist"));
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            settings: Settings::default(),
            profiles: vec![profile("work"), profile("work")],
        };

        assert!(config.save_to(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_resolve_profile() {
        let mut config = Config::default();
        assert!(config.resolve_profile(None).is_err());

        config.profiles.push(profile("work"));
        assert_eq!(config.resolve_profile(None).unwrap().name, "work");

        config.profiles.push(profile("home"));
        assert!(config.resolve_profile(None).is_err());
        assert_eq!(config.resolve_profile(Some("home")).unwrap().name, "home");

        config.settings.default_profile = Some("work".to_string());
        assert_eq!(config.resolve_profile(None).unwrap().name, "work");

        let err = config.resolve_profile(Some("other")).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound(name) if name == "other"));
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("jira-agile/config.toml"));
        }
    }
}
