//! JIRA Agile API client and types.
//!
//! This module provides the interface for communicating with the JIRA
//! Agile REST API (`/rest/agile/1.0`): boards, sprints, epics, the backlog
//! and Agile issue views.

mod auth;
mod backlog;
mod boards;
mod client;
mod epics;
pub mod error;
mod issues;
mod query;
mod sprints;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{delete_token, get_token, has_token, store_token, BasicAuthTransport, Transport};
pub use backlog::BacklogService;
pub use boards::{BoardsOptions, BoardsService, ProjectsOptions, VersionsOptions};
pub use client::{Discard, JiraClient, Json, Raw, Response, Sink};
pub use epics::{EpicsOptions, EpicsService};
pub use error::{ApiError, ErrorResponse};
pub use issues::{GetIssueOptions, IssuesOptions, IssuesService};
pub use query::query_parameters;
pub use sprints::{SprintsOptions, SprintsService};
pub use types::{IssueKeys, Pagination};
