//! API error types for the JIRA Agile client.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use super::client::Response;

/// Errors that can occur when interacting with the JIRA Agile API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client's base URL cannot be used to resolve request paths.
    #[error("BaseURL must have a trailing slash, but {0:?} does not")]
    InvalidBaseUrl(String),

    /// A URL could not be parsed or joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Credentials cannot be turned into an authorization header.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// The server answered with a non-2xx status.
    #[error("{0}")]
    Remote(Box<ErrorResponse>),

    /// A successful response carried a body that is not the expected JSON.
    #[error("Invalid API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Writing a raw response body failed.
    #[error("Failed to write response body: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The HTTP status of a remote error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        self.error_response().map(|e| e.response.status)
    }

    /// The structured error payload of a remote error, if this is one.
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            ApiError::Remote(e) => Some(e),
            _ => None,
        }
    }

    /// Check if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Check if the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Check if the caller cancelled the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// A non-2xx answer from JIRA.
///
/// JIRA reports failures as `{"errorMessages": [...], "errors": {...}}`.
/// When the body does not have that shape both collections stay empty.
#[derive(Debug)]
pub struct ErrorResponse {
    /// Metadata of the failed response.
    pub response: Response,
    /// Human-readable error messages.
    pub messages: Vec<String>,
    /// Field name to error message.
    pub errors: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub(crate) fn new(response: Response) -> Self {
        Self {
            response,
            messages: Vec::new(),
            errors: BTreeMap::new(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {:?} {:?}",
            self.response.method,
            self.response.url,
            self.response.status.as_u16(),
            self.messages,
            self.errors
        )
    }
}

/// Wire shape of a JIRA error body.
///
/// Each part decodes on its own: a malformed `errors` map does not cost the
/// `errorMessages` list, and the other way round.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct ErrorPayload {
    #[serde(rename = "errorMessages", deserialize_with = "lenient_messages")]
    pub messages: Vec<String>,
    #[serde(deserialize_with = "lenient_errors")]
    pub errors: BTreeMap<String, String>,
}

/// Keep the string entries of a message list.
fn lenient_messages<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(message) => Some(message),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Keep the string entries of a field-error map; `null` reads as empty.
fn lenient_errors<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(fields) => fields
            .into_iter()
            .filter_map(|(field, message)| match message {
                Value::String(message) => Some((field, message)),
                Value::Null => Some((field, String::new())),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}
