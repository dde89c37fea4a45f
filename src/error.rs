//! Centralized error types for the jira-agile binary.
//!
//! Library callers deal with [`ApiError`] and [`ConfigError`] directly; the
//! command-line front end folds them into [`AppError`] to print a message a
//! user can act on.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::ProfileNotFound(name) => format!("Profile '{}' not found.", name),
            },
            AppError::Api(e) => api_message(e),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error comes from setup rather than from a single call.
    ///
    /// Critical errors mean no request can succeed until the user fixes
    /// their configuration or credentials.
    pub fn is_critical(&self) -> bool {
        match self {
            AppError::Config(_) => true,
            AppError::Api(e) => matches!(
                e,
                ApiError::InvalidBaseUrl(_)
                    | ApiError::InvalidUrl(_)
                    | ApiError::InvalidCredentials(_)
                    | ApiError::Keyring(_)
            ) || matches!(
                e.status(),
                Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            ),
            _ => false,
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ProfileNotFound(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Check the profiles in your config.toml, or pass --url and --user.")
            }
            AppError::Api(ApiError::Keyring(_)) => {
                Some("Run 'jira-agile login' or set JIRA_PASS.")
            }
            AppError::Api(ApiError::Network(_)) => {
                Some("Check your internet connection and JIRA URL.")
            }
            AppError::Api(e) if e.is_unauthorized() => Some(
                "Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens",
            ),
            _ => None,
        }
    }
}

fn api_message(e: &ApiError) -> String {
    match e {
        ApiError::InvalidBaseUrl(_) | ApiError::InvalidUrl(_) => {
            "Invalid JIRA URL in configuration.".to_string()
        }
        ApiError::InvalidCredentials(_) => {
            "The username or password cannot be used for authentication.".to_string()
        }
        ApiError::Keyring(_) => {
            "Could not access secure storage. Please log in again.".to_string()
        }
        ApiError::Encode(_) => "Could not encode the request. Internal error.".to_string(),
        ApiError::Network(_) => {
            "Connection failed. Please check your internet connection.".to_string()
        }
        ApiError::Cancelled => "Request cancelled.".to_string(),
        ApiError::Remote(remote) => match remote.response.status {
            StatusCode::UNAUTHORIZED => {
                "Authentication failed. Please check your username and API token.".to_string()
            }
            StatusCode::FORBIDDEN => {
                "Access denied. You don't have permission to access this resource.".to_string()
            }
            StatusCode::NOT_FOUND => "The requested resource was not found.".to_string(),
            StatusCode::TOO_MANY_REQUESTS => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            status if status.is_server_error() => {
                "JIRA server error. Please try again later.".to_string()
            }
            _ => match remote.messages.first() {
                Some(message) => format!("JIRA rejected the request: {}", message),
                None => format!(
                    "JIRA rejected the request ({}).",
                    remote.response.status.as_u16()
                ),
            },
        },
        ApiError::Decode(_) => "Unexpected response from JIRA. Please try again.".to_string(),
        ApiError::Io(_) => "Could not write the response. Check file permissions.".to_string(),
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
