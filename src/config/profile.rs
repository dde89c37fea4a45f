//! JIRA profile configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Path of the Agile REST API below the instance URL.
const AGILE_API_PATH: &str = "rest/agile/1.0/";

/// Environment variable holding the instance URL.
pub const ENV_URL: &str = "JIRA_URL";

/// Environment variable holding the username.
pub const ENV_USER: &str = "JIRA_USER";

/// Connection details for a JIRA instance.
///
/// The password or API token is not part of the profile; it comes from the
/// OS keyring or the `JIRA_PASS` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The JIRA instance URL, e.g. "https://company.atlassian.net".
    pub url: String,

    /// The username (or account email on JIRA Cloud).
    pub username: String,
}

impl Profile {
    /// Create a new profile.
    pub fn new(name: String, url: String, username: String) -> Self {
        Self {
            name,
            url,
            username,
        }
    }

    /// Build an unnamed profile from `JIRA_URL` and `JIRA_USER`.
    ///
    /// Returns `None` unless both variables are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_URL).ok().filter(|v| !v.is_empty())?;
        let username = std::env::var(ENV_USER).ok().filter(|v| !v.is_empty())?;
        Some(Self::new("env".to_string(), url, username))
    }

    /// Validate this profile.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL cannot be empty",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        if self.username.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': username cannot be empty",
                self.name
            )));
        }

        Ok(())
    }

    /// The base URL of the Agile REST API for this instance.
    ///
    /// Always ends with a slash.
    pub fn api_base_url(&self) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), AGILE_API_PATH)
    }
}
