//! Sprint operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::client::{JiraClient, Response, NO_BODY};
use super::error::Result;
use super::issues::IssuesOptions;
use super::query::query_parameters;
use super::types::{Issue, IssueKeys, IssuePage, NewSprint, Sprint};

/// Filters for listing a board's sprints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SprintsOptions {
    pub start_at: u32,
    pub max_results: u32,
    /// Comma-separated states: `future`, `active`, `closed`.
    pub state: String,
}

/// Sprint operations, obtained from [`JiraClient::sprints`].
#[derive(Debug, Clone, Copy)]
pub struct SprintsService<'a> {
    client: &'a JiraClient,
}

impl<'a> SprintsService<'a> {
    pub(crate) fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Create a future sprint on a board.
    ///
    /// `POST /rest/agile/1.0/sprint`
    #[instrument(skip(self, ctx))]
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        sprint: &NewSprint,
    ) -> Result<(Sprint, Response)> {
        let request = self.client.new_request(Method::POST, "sprint", Some(sprint))?;
        let (sprint, response) = self.client.fetch::<Sprint>(ctx, request).await?;
        debug!(sprint_id = sprint.id, "Created sprint");
        Ok((sprint, response))
    }

    /// Get a single sprint.
    ///
    /// `GET /rest/agile/1.0/sprint/{sprintId}`
    #[instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CancellationToken, id: i64) -> Result<(Sprint, Response)> {
        let request = self
            .client
            .new_request(Method::GET, &format!("sprint/{}", id), NO_BODY)?;
        self.client.fetch(ctx, request).await
    }

    /// Replace a sprint. Fields left empty are cleared by JIRA.
    ///
    /// `PUT /rest/agile/1.0/sprint/{sprintId}`
    #[instrument(skip(self, ctx))]
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        id: i64,
        sprint: &Sprint,
    ) -> Result<(Sprint, Response)> {
        let request = self
            .client
            .new_request(Method::PUT, &format!("sprint/{}", id), Some(sprint))?;
        self.client.fetch(ctx, request).await
    }

    /// Update only the fields that are set in `sprint`.
    ///
    /// `POST /rest/agile/1.0/sprint/{sprintId}`
    #[instrument(skip(self, ctx))]
    pub async fn partially_update(
        &self,
        ctx: &CancellationToken,
        id: i64,
        sprint: &Sprint,
    ) -> Result<(Sprint, Response)> {
        let request = self
            .client
            .new_request(Method::POST, &format!("sprint/{}", id), Some(sprint))?;
        self.client.fetch(ctx, request).await
    }

    /// Move issues into a sprint. At most 50 issues per call.
    ///
    /// Returns `true` when JIRA answers `204 No Content`.
    ///
    /// `POST /rest/agile/1.0/sprint/{sprintId}/issue`
    #[instrument(skip(self, ctx))]
    pub async fn move_issues_to(
        &self,
        ctx: &CancellationToken,
        id: i64,
        issues: &IssueKeys,
    ) -> Result<(bool, Response)> {
        let request = self.client.new_request(
            Method::POST,
            &format!("sprint/{}/issue", id),
            Some(issues),
        )?;
        self.client.move_issues(ctx, request).await
    }

    /// List the issues in a sprint.
    ///
    /// `GET /rest/agile/1.0/sprint/{sprintId}/issue`
    #[instrument(skip(self, ctx))]
    pub async fn list_issues(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!("sprint/{}/issue{}", id, query_parameters(options));
        self.client.get_page::<IssuePage>(ctx, &path).await
    }
}
