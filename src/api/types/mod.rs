//! JIRA Agile API request and response types.
//!
//! These types mirror the JSON shapes of the Agile REST API. They carry no
//! behavior beyond (de)serialization; the remote service owns all semantics.

mod board;
mod datetime;
mod epic;
mod issue;
mod project;
mod sprint;

use serde::{Deserialize, Deserializer, Serialize};

pub use board::{
    Board, BoardLocation, ColumnConfig, Configuration, ConfigurationColumn,
    ConfigurationEstimation, ConfigurationEstimationField, ConfigurationFilter,
    ConfigurationRanking, ConfigurationStatus, NewBoard, SubQuery,
};
pub use datetime::jira_datetime;
pub use epic::Epic;
pub use issue::{
    Issue, IssueAttachment, IssueComment, IssueCommentPage, IssueComponent, IssueEstimation,
    IssueEstimationOptions, IssueFields, IssueLink, IssueLinkType, IssuePage, IssuePriority,
    IssueProgress, IssueResolution, IssueStatus, IssueStatusCategory, IssueTimeTracking,
    IssueType, IssueUser, IssueVersion, IssueVote, IssueWatch, IssueWorklog, IssueWorklogPage,
};
pub use project::{Project, ProjectCategory, Version};
pub use sprint::{NewSprint, Sprint};

/// Paging information returned with every collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// The maximum number of items in a page.
    #[serde(deserialize_with = "null_as_default")]
    pub max_results: u32,
    /// The index of the first item of the page.
    #[serde(deserialize_with = "null_as_default")]
    pub start_at: u32,
    /// Whether this is the last page.
    #[serde(deserialize_with = "null_as_default")]
    pub is_last: bool,
}

/// A page of results wrapped in the `values` envelope.
///
/// Used by boards, sprints, epics, projects and versions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(flatten)]
    pub pagination: Pagination,
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub values: Vec<T>,
}

/// A decoded collection envelope.
pub trait Envelope {
    /// The element type of the collection.
    type Item;

    /// Split the envelope into its paging information and its items.
    fn into_parts(self) -> (Pagination, Vec<Self::Item>);
}

impl<T> Envelope for Page<T> {
    type Item = T;

    fn into_parts(self) -> (Pagination, Vec<T>) {
        (self.pagination, self.values)
    }
}

/// Issue keys to move between sprints, epics and the backlog.
///
/// At most 50 issues may be moved at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueKeys {
    /// The issue keys (or ids).
    #[serde(default)]
    pub issues: Vec<String>,
}

impl IssueKeys {
    /// Build from any list of keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            issues: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Deserialize `null` as the type's default.
///
/// JIRA sends `null` for empty collections and texts in some payloads.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}
