//! Shared helpers for API tests.

use wiremock::MockServer;

use super::client::JiraClient;

/// Path prefix the client is rooted at.
pub const BASE_PATH: &str = "/rest/agile/1.0/";

/// A single issue as JIRA returns it.
pub const ISSUE_JSON: &str = include_str!("testdata/issue.json");

/// Start a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, JiraClient) {
    let server = MockServer::start().await;
    let base_url = format!("{}{}", server.uri(), BASE_PATH);
    let client = JiraClient::with_basic_auth(&base_url, "user", "secret").unwrap();
    (server, client)
}

/// Absolute mock-server path for a path relative to the base URL.
pub fn base_path(relative: &str) -> String {
    format!("{}{}", BASE_PATH, relative)
}

/// An issue page holding the fixture issue.
pub fn issues_json() -> String {
    format!(
        r#"{{"expand": "schema,names", "startAt": 0, "maxResults": 50, "total": 13, "issues": [{}]}}"#,
        ISSUE_JSON
    )
}
