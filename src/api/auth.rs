//! Authentication handling for the JIRA Agile API.
//!
//! Requests are authenticated by a decorating [`Transport`] that attaches
//! HTTP Basic credentials (username + password or API token). API tokens can
//! be kept in the OS keyring, keyed by profile name.

use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;

use super::error::{ApiError, Result};

/// The keyring service name for stored tokens.
const KEYRING_SERVICE: &str = "jira-agile";

/// Sends a prepared request and returns the raw HTTP response.
///
/// Implemented for `reqwest::Client`; decorators such as
/// [`BasicAuthTransport`] wrap another transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a single HTTP exchange.
    async fn round_trip(&self, request: Request) -> reqwest::Result<reqwest::Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn round_trip(&self, request: Request) -> reqwest::Result<reqwest::Response> {
        self.execute(request).await
    }
}

/// The process-wide transport used when none is configured.
pub(crate) fn default_transport() -> &'static reqwest::Client {
    static DEFAULT: OnceLock<reqwest::Client> = OnceLock::new();
    DEFAULT.get_or_init(reqwest::Client::new)
}

/// A transport that authenticates every request with HTTP Basic Auth.
///
/// The raw password is not stored; only the encoded header value is kept,
/// and it is marked sensitive so it never shows up in debug output.
#[derive(Clone)]
pub struct BasicAuthTransport {
    /// The wrapped transport. `None` means the default transport.
    inner: Option<Arc<dyn Transport>>,
    /// The username the credentials belong to.
    username: String,
    /// The complete `Basic ...` header value.
    auth_header: HeaderValue,
}

impl BasicAuthTransport {
    /// Create a transport authenticating as `username` with `password`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidCredentials` if the header value cannot be built.
    pub fn new(username: &str, password: &str) -> Result<Self> {
        let mut auth_header = HeaderValue::from_str(&build_auth_header(username, password))
            .map_err(|e| ApiError::InvalidCredentials(e.to_string()))?;
        auth_header.set_sensitive(true);

        Ok(Self {
            inner: None,
            username: username.to_string(),
            auth_header,
        })
    }

    /// Wrap `transport` instead of the default transport.
    pub fn with_inner(mut self, transport: Arc<dyn Transport>) -> Self {
        self.inner = Some(transport);
        self
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &HeaderValue {
        &self.auth_header
    }

    /// Return an authorized copy of `request`.
    ///
    /// The caller's request is left untouched. Returns `None` when the
    /// request has a streaming body that cannot be copied.
    pub fn authorize(&self, request: &Request) -> Option<Request> {
        let mut copy = request.try_clone()?;
        self.stamp(&mut copy);
        Some(copy)
    }

    fn stamp(&self, request: &mut Request) {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.auth_header.clone());
    }

    fn inner(&self) -> &dyn Transport {
        match &self.inner {
            Some(transport) => transport.as_ref(),
            None => default_transport(),
        }
    }
}

#[async_trait]
impl Transport for BasicAuthTransport {
    async fn round_trip(&self, request: Request) -> reqwest::Result<reqwest::Response> {
        let request = match self.authorize(&request) {
            Some(copy) => copy,
            // Streaming bodies can't be cloned; the request is ours to modify.
            None => {
                let mut request = request;
                self.stamp(&mut request);
                request
            }
        };
        self.inner().round_trip(request).await
    }
}

impl fmt::Debug for BasicAuthTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthTransport")
            .field("username", &self.username)
            .field("auth_header", &self.auth_header)
            .field("custom_inner", &self.inner.is_some())
            .finish()
    }
}

/// Build the Basic Auth header value.
///
/// Encodes "username:password" in Base64 and prepends "Basic ".
fn build_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}

/// Store an API token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))?;

    Ok(())
}

/// Retrieve an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be retrieved from the keyring.
pub fn get_token(profile_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be deleted from the keyring.
pub fn delete_token(profile_name: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| ApiError::Keyring(format!("failed to delete token: {}", e)))?;

    Ok(())
}

/// Check if a token exists in the OS keyring for a profile.
pub fn has_token(profile_name: &str) -> bool {
    get_token(profile_name).is_ok()
}
