//! Backlog operations.

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::client::{JiraClient, Response};
use super::error::Result;
use super::types::IssueKeys;

/// Backlog operations, obtained from [`JiraClient::backlog`].
#[derive(Debug, Clone, Copy)]
pub struct BacklogService<'a> {
    client: &'a JiraClient,
}

impl<'a> BacklogService<'a> {
    pub(crate) fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Move issues to the backlog, removing them from any sprint.
    /// At most 50 issues per call.
    ///
    /// Returns `true` when JIRA answers `204 No Content`.
    ///
    /// `POST /rest/agile/1.0/backlog/issue`
    #[instrument(skip(self, ctx))]
    pub async fn move_issues_to(
        &self,
        ctx: &CancellationToken,
        issues: &IssueKeys,
    ) -> Result<(bool, Response)> {
        let request = self
            .client
            .new_request(Method::POST, "backlog/issue", Some(issues))?;
        self.client.move_issues(ctx, request).await
    }
}
