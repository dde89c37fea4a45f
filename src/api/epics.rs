//! Epic operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::client::{JiraClient, Response, NO_BODY};
use super::error::Result;
use super::issues::IssuesOptions;
use super::query::query_parameters;
use super::types::{Epic, Issue, IssueKeys, IssuePage};

/// Filters for listing a board's epics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpicsOptions {
    pub start_at: u32,
    pub max_results: u32,
    /// Only epics that are done. `false` cannot be expressed and means
    /// "no filter".
    pub done: bool,
}

/// Epic operations, obtained from [`JiraClient::epics`].
#[derive(Debug, Clone, Copy)]
pub struct EpicsService<'a> {
    client: &'a JiraClient,
}

impl<'a> EpicsService<'a> {
    pub(crate) fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Get an epic by id or key.
    ///
    /// `GET /rest/agile/1.0/epic/{epicIdOrKey}`
    #[instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CancellationToken, id_or_key: &str) -> Result<(Epic, Response)> {
        let request = self
            .client
            .new_request(Method::GET, &format!("epic/{}", id_or_key), NO_BODY)?;
        self.client.fetch(ctx, request).await
    }

    /// List the issues of an epic.
    ///
    /// `GET /rest/agile/1.0/epic/{epicIdOrKey}/issue`
    #[instrument(skip(self, ctx))]
    pub async fn list_issues(
        &self,
        ctx: &CancellationToken,
        id_or_key: &str,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!("epic/{}/issue{}", id_or_key, query_parameters(options));
        self.client.get_page::<IssuePage>(ctx, &path).await
    }

    /// Update the fields set in `epic`.
    ///
    /// `POST /rest/agile/1.0/epic/{epicIdOrKey}`
    #[instrument(skip(self, ctx))]
    pub async fn partially_update(
        &self,
        ctx: &CancellationToken,
        id_or_key: &str,
        epic: &Epic,
    ) -> Result<(Epic, Response)> {
        let request = self
            .client
            .new_request(Method::POST, &format!("epic/{}", id_or_key), Some(epic))?;
        self.client.fetch(ctx, request).await
    }

    /// Move issues into an epic. At most 50 issues per call.
    ///
    /// `POST /rest/agile/1.0/epic/{epicIdOrKey}/issue`
    #[instrument(skip(self, ctx))]
    pub async fn move_issues_to(
        &self,
        ctx: &CancellationToken,
        id_or_key: &str,
        issues: &IssueKeys,
    ) -> Result<(bool, Response)> {
        let request = self.client.new_request(
            Method::POST,
            &format!("epic/{}/issue", id_or_key),
            Some(issues),
        )?;
        self.client.move_issues(ctx, request).await
    }

    /// Detach issues from whatever epic they belong to.
    ///
    /// `POST /rest/agile/1.0/epic/none/issue`
    #[instrument(skip(self, ctx))]
    pub async fn remove_issues_from(
        &self,
        ctx: &CancellationToken,
        issues: &IssueKeys,
    ) -> Result<(bool, Response)> {
        let request = self
            .client
            .new_request(Method::POST, "epic/none/issue", Some(issues))?;
        self.client.move_issues(ctx, request).await
    }

    /// List the issues that belong to no epic.
    ///
    /// `GET /rest/agile/1.0/epic/none/issue`
    #[instrument(skip(self, ctx))]
    pub async fn list_issues_without_epic(
        &self,
        ctx: &CancellationToken,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!("epic/none/issue{}", query_parameters(options));
        self.client.get_page::<IssuePage>(ctx, &path).await
    }
}
