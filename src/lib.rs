//! jira-agile - a typed client for the JIRA Agile REST API.
//!
//! Boards, sprints, epics, the backlog and Agile issue views are reached
//! through service facades on [`api::JiraClient`]:
//!
//! ```no_run
//! use jira_agile::api::JiraClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> Result<(), jira_agile::api::ApiError> {
//! let client = JiraClient::with_basic_auth(
//!     "https://company.atlassian.net/rest/agile/1.0/",
//!     "jdoe",
//!     "api-token",
//! )?;
//! let (boards, response) = client.boards().list(&CancellationToken::new(), None).await?;
//! println!("{} boards, last page: {}", boards.len(), response.pagination.is_last);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
