//! Board operations.
//!
//! Covers `/rest/agile/1.0/board` and the per-board collections: backlog,
//! issues, epics, projects, sprints and versions.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::client::{JiraClient, Response, NO_BODY};
use super::epics::EpicsOptions;
use super::error::Result;
use super::issues::IssuesOptions;
use super::query::query_parameters;
use super::sprints::SprintsOptions;
use super::types::{
    Board, Configuration, Epic, Issue, IssuePage, NewBoard, Page, Project, Sprint,
    Version,
};

/// Filters for listing boards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardsOptions {
    /// Index of the first board to return.
    pub start_at: u32,
    /// Page size. JIRA defaults to 50.
    pub max_results: u32,
    /// Board type: `scrum`, `kanban` or `simple`.
    #[serde(rename = "type")]
    pub board_type: String,
    /// Full or partial board name.
    pub name: String,
    /// Boards whose filter references this project.
    #[serde(rename = "projectKeyOrId")]
    pub project_key_or_id: String,
    /// Append private boards (without name and type) to the list.
    pub include_private: bool,
    /// Negate the location filters.
    pub negate_location_filtering: bool,
    /// Sort field; only `name` is supported.
    pub order_by: String,
    /// `admins`, `permissions`.
    pub expand: String,
    /// Boards built on this filter.
    pub filter_id: i64,
    #[serde(rename = "accountIdLocation")]
    pub account_id_location: String,
    #[serde(rename = "userkeyLocation")]
    pub user_key_location: String,
    #[serde(rename = "usernameLocation")]
    pub username_location: String,
    pub project_location: String,
}

/// Paging for a board's projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectsOptions {
    pub start_at: u32,
    pub max_results: u32,
}

/// Filters for a board's versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionsOptions {
    pub start_at: u32,
    pub max_results: u32,
    /// `true` or `false`; empty means both.
    pub released: String,
}

/// Board operations, obtained from [`JiraClient::boards`].
#[derive(Debug, Clone, Copy)]
pub struct BoardsService<'a> {
    client: &'a JiraClient,
}

impl<'a> BoardsService<'a> {
    pub(crate) fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Create a board from a filter.
    ///
    /// `POST /rest/agile/1.0/board`
    #[instrument(skip(self, ctx))]
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        board: &NewBoard,
    ) -> Result<(Board, Response)> {
        let request = self.client.new_request(Method::POST, "board", Some(board))?;
        let (board, response) = self.client.fetch::<Board>(ctx, request).await?;
        debug!(board_id = board.id, "Created board");
        Ok((board, response))
    }

    /// Delete a board.
    ///
    /// `DELETE /rest/agile/1.0/board/{boardId}`
    #[instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &CancellationToken, id: i64) -> Result<Response> {
        let request = self
            .client
            .new_request(Method::DELETE, &format!("board/{}", id), NO_BODY)?;
        self.client.execute(ctx, request).await
    }

    /// List the boards visible to the user.
    ///
    /// `GET /rest/agile/1.0/board`
    #[instrument(skip(self, ctx))]
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: Option<&BoardsOptions>,
    ) -> Result<(Vec<Board>, Response)> {
        let path = format!("board{}", query_parameters(options));
        self.client.get_page::<Page<Board>>(ctx, &path).await
    }

    /// Get a single board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}`
    #[instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CancellationToken, id: i64) -> Result<(Board, Response)> {
        let request = self
            .client
            .new_request(Method::GET, &format!("board/{}", id), NO_BODY)?;
        self.client.fetch(ctx, request).await
    }

    /// Get the configuration of a board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/configuration`
    #[instrument(skip(self, ctx))]
    pub async fn get_configuration(
        &self,
        ctx: &CancellationToken,
        id: i64,
    ) -> Result<(Configuration, Response)> {
        let request = self.client.new_request(
            Method::GET,
            &format!("board/{}/configuration", id),
            NO_BODY,
        )?;
        self.client.fetch(ctx, request).await
    }

    /// List the issues in a board's backlog.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/backlog`
    #[instrument(skip(self, ctx))]
    pub async fn list_backlog_issues(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!("board/{}/backlog{}", id, query_parameters(options));
        self.client.get_page::<IssuePage>(ctx, &path).await
    }

    /// List all issues on a board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/issue`
    #[instrument(skip(self, ctx))]
    pub async fn list_issues(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!("board/{}/issue{}", id, query_parameters(options));
        self.client.get_page::<IssuePage>(ctx, &path).await
    }

    /// List the epics of a board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/epic`
    #[instrument(skip(self, ctx))]
    pub async fn list_epics(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&EpicsOptions>,
    ) -> Result<(Vec<Epic>, Response)> {
        let path = format!("board/{}/epic{}", id, query_parameters(options));
        self.client.get_page::<Page<Epic>>(ctx, &path).await
    }

    /// List the issues of an epic, as seen on a board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/epic/{epicId}/issue`
    #[instrument(skip(self, ctx))]
    pub async fn list_issues_for_epic(
        &self,
        ctx: &CancellationToken,
        id: i64,
        epic_id: i64,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!(
            "board/{}/epic/{}/issue{}",
            id,
            epic_id,
            query_parameters(options)
        );
        self.client.get_page::<IssuePage>(ctx, &path).await
    }

    /// List the board's issues that belong to no epic.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/epic/none/issue`
    #[instrument(skip(self, ctx))]
    pub async fn list_issues_without_epic(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!("board/{}/epic/none/issue{}", id, query_parameters(options));
        self.client.get_page::<IssuePage>(ctx, &path).await
    }

    /// List the projects associated with a board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/project`
    #[instrument(skip(self, ctx))]
    pub async fn list_projects(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&ProjectsOptions>,
    ) -> Result<(Vec<Project>, Response)> {
        let path = format!("board/{}/project{}", id, query_parameters(options));
        self.client.get_page::<Page<Project>>(ctx, &path).await
    }

    /// List the sprints of a board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/sprint`
    #[instrument(skip(self, ctx))]
    pub async fn list_sprints(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&SprintsOptions>,
    ) -> Result<(Vec<Sprint>, Response)> {
        let path = format!("board/{}/sprint{}", id, query_parameters(options));
        self.client.get_page::<Page<Sprint>>(ctx, &path).await
    }

    /// List the issues of a sprint, as seen on a board.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/sprint/{sprintId}/issue`
    #[instrument(skip(self, ctx))]
    pub async fn list_issues_for_sprint(
        &self,
        ctx: &CancellationToken,
        id: i64,
        sprint_id: i64,
        options: Option<&IssuesOptions>,
    ) -> Result<(Vec<Issue>, Response)> {
        let path = format!(
            "board/{}/sprint/{}/issue{}",
            id,
            sprint_id,
            query_parameters(options)
        );
        self.client.get_page::<IssuePage>(ctx, &path).await
    }

    /// List the versions of a board's projects.
    ///
    /// `GET /rest/agile/1.0/board/{boardId}/version`
    #[instrument(skip(self, ctx))]
    pub async fn list_versions(
        &self,
        ctx: &CancellationToken,
        id: i64,
        options: Option<&VersionsOptions>,
    ) -> Result<(Vec<Version>, Response)> {
        let path = format!("board/{}/version{}", id, query_parameters(options));
        self.client.get_page::<Page<Version>>(ctx, &path).await
    }
}
