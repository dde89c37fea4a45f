//! Issue operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::client::{JiraClient, Response, NO_BODY};
use super::error::Result;
use super::query::query_parameters;
use super::types::{Issue, IssueEstimation, IssueEstimationOptions};

/// Filters for issue lists (backlog, board, sprint and epic issues).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuesOptions {
    pub start_at: u32,
    pub max_results: u32,
    /// JQL filter. An `ORDER BY` in the query overrides the default order.
    pub jql: String,
    /// JIRA validates the query unless told otherwise, so only `true` is
    /// ever sent.
    pub validate_query: bool,
    /// Comma-separated fields to return.
    pub fields: String,
    pub expand: String,
}

/// Field selection for a single issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetIssueOptions {
    pub fields: String,
    pub expand: String,
}

/// Issue operations, obtained from [`JiraClient::issues`].
#[derive(Debug, Clone, Copy)]
pub struct IssuesService<'a> {
    client: &'a JiraClient,
}

impl<'a> IssuesService<'a> {
    pub(crate) fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Get an issue by id or key, including its Agile fields.
    ///
    /// `GET /rest/agile/1.0/issue/{issueIdOrKey}`
    #[instrument(skip(self, ctx))]
    pub async fn get(
        &self,
        ctx: &CancellationToken,
        id_or_key: &str,
        options: Option<&GetIssueOptions>,
    ) -> Result<(Issue, Response)> {
        let path = format!("issue/{}{}", id_or_key, query_parameters(options));
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        self.client.fetch(ctx, request).await
    }

    /// Get the estimation of an issue and the field the board estimates
    /// with.
    ///
    /// `GET /rest/agile/1.0/issue/{issueIdOrKey}/estimation?boardId={boardId}`
    #[instrument(skip(self, ctx))]
    pub async fn get_estimation_for_board(
        &self,
        ctx: &CancellationToken,
        id_or_key: &str,
        board_id: i64,
    ) -> Result<(IssueEstimation, Response)> {
        let request = self.client.new_request(
            Method::GET,
            &estimation_path(id_or_key, board_id),
            NO_BODY,
        )?;
        self.client.fetch(ctx, request).await
    }

    /// Set the estimation of an issue on a board's estimation field.
    ///
    /// Time tracking takes values like `1w`, `2d`, `3h`, `20m`, or a plain
    /// number of minutes.
    ///
    /// `PUT /rest/agile/1.0/issue/{issueIdOrKey}/estimation?boardId={boardId}`
    #[instrument(skip(self, ctx))]
    pub async fn estimation_for_board(
        &self,
        ctx: &CancellationToken,
        id_or_key: &str,
        board_id: i64,
        value: &str,
    ) -> Result<(IssueEstimation, Response)> {
        let body = IssueEstimationOptions {
            value: value.to_string(),
        };
        let request = self.client.new_request(
            Method::PUT,
            &estimation_path(id_or_key, board_id),
            Some(&body),
        )?;
        self.client.fetch(ctx, request).await
    }
}

fn estimation_path(id_or_key: &str, board_id: i64) -> String {
    format!("issue/{}/estimation?boardId={}", id_or_key, board_id)
}
