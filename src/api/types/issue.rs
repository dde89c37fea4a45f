//! Issue types as returned by the Agile issue endpoints.
//!
//! Issues carry Agile-specific fields (sprint, closed sprints, epic,
//! flagged) on top of the regular JIRA fields. Anything the types below do
//! not name, custom fields in particular, is kept in [`IssueFields::custom`].

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};

use super::{jira_datetime, null_as_default, Envelope, Epic, Pagination, Project, Sprint};

/// Issue timestamp as decoded from the wire.
pub type Timestamp = Option<DateTime<FixedOffset>>;

/// A JIRA issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<IssueFields>,
}

impl Issue {
    /// The issue summary, or `""` when fields were not returned.
    pub fn summary(&self) -> &str {
        self.fields.as_ref().map_or("", |f| f.summary.as_str())
    }
}

/// The fields of an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueFields {
    #[serde(deserialize_with = "null_as_default")]
    pub flagged: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub environment: String,
    pub sprint: Option<Sprint>,
    #[serde(rename = "closedSprints", deserialize_with = "null_as_default")]
    pub closed_sprints: Vec<Sprint>,
    pub project: Option<Project>,
    pub epic: Option<Epic>,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueType>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub resolution: Option<IssueResolution>,
    pub reporter: Option<IssueUser>,
    pub creator: Option<IssueUser>,
    pub assignee: Option<IssueUser>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(rename = "issuelinks", deserialize_with = "null_as_default")]
    pub links: Vec<IssueLink>,
    #[serde(deserialize_with = "null_as_default")]
    pub subtasks: Vec<Issue>,
    #[serde(rename = "fixVersions", deserialize_with = "null_as_default")]
    pub fix_versions: Vec<IssueVersion>,
    #[serde(deserialize_with = "null_as_default")]
    pub versions: Vec<IssueVersion>,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<IssueComponent>,
    #[serde(rename = "attachment", deserialize_with = "null_as_default")]
    pub attachments: Vec<IssueAttachment>,
    #[serde(rename = "watches")]
    pub watch: Option<IssueWatch>,
    pub votes: Option<IssueVote>,
    #[serde(rename = "worklog")]
    pub worklogs: Option<IssueWorklogPage>,
    #[serde(rename = "comment")]
    pub comments: Option<IssueCommentPage>,
    pub progress: Option<IssueProgress>,
    #[serde(rename = "aggregateprogress")]
    pub aggregate_progress: Option<IssueProgress>,
    #[serde(rename = "timetracking")]
    pub time_tracking: Option<IssueTimeTracking>,

    #[serde(rename = "timeoriginalestimate", deserialize_with = "null_as_default")]
    pub time_original_estimate: i64,
    #[serde(rename = "timeestimate", deserialize_with = "null_as_default")]
    pub time_estimate: i64,
    #[serde(rename = "timespent", deserialize_with = "null_as_default")]
    pub time_spent: i64,
    #[serde(rename = "aggregatetimeoriginalestimate", deserialize_with = "null_as_default")]
    pub aggregate_time_original_estimate: i64,
    #[serde(rename = "aggregatetimeestimate", deserialize_with = "null_as_default")]
    pub aggregate_time_estimate: i64,
    #[serde(rename = "aggregatetimespent", deserialize_with = "null_as_default")]
    pub aggregate_time_spent: i64,
    #[serde(rename = "workratio", deserialize_with = "null_as_default")]
    pub work_ratio: i64,

    #[serde(with = "jira_datetime")]
    pub created: Timestamp,
    #[serde(with = "jira_datetime")]
    pub updated: Timestamp,
    #[serde(rename = "lastViewed", with = "jira_datetime")]
    pub last_viewed: Timestamp,
    #[serde(rename = "resolutiondate", with = "jira_datetime")]
    pub resolution_date: Timestamp,
    #[serde(rename = "duedate")]
    pub due_date: Option<NaiveDate>,

    /// Every field not named above, keyed by field id.
    #[serde(flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

impl IssueFields {
    /// A custom field by id, ignoring fields that were sent as `null`.
    pub fn custom_field(&self, id: &str) -> Option<&serde_json::Value> {
        self.custom.get(id).filter(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub description: String,
    pub icon_url: String,
    pub subtask: bool,
    pub avatar_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueResolution {
    pub id: String,
    pub name: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub description: String,
}

/// A link between two issues. Only one of `inward`/`outward` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueLink {
    pub id: String,
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(rename = "type")]
    pub link_type: Option<IssueLinkType>,
    #[serde(rename = "inwardIssue", skip_serializing_if = "Option::is_none")]
    pub inward: Option<Box<Issue>>,
    #[serde(rename = "outwardIssue", skip_serializing_if = "Option::is_none")]
    pub outward: Option<Box<Issue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueLinkType {
    pub id: String,
    pub name: String,
    pub inward: String,
    pub outward: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueTimeTracking {
    pub original_estimate: String,
    pub remaining_estimate: String,
    pub time_spent: String,
    pub original_estimate_seconds: i64,
    pub remaining_estimate_seconds: i64,
    pub time_spent_seconds: i64,
}

/// A user as embedded in issues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueUser {
    pub key: String,
    pub name: String,
    /// Set by JIRA Cloud instead of `key`/`name`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(rename = "emailAddress")]
    pub email: String,
    pub display_name: String,
    pub active: bool,
    pub time_zone: String,
    pub avatar_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueWatch {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(rename = "watchCount")]
    pub count: i64,
    #[serde(rename = "isWatching")]
    pub watching: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuePriority {
    pub id: String,
    pub name: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueAttachment {
    pub id: String,
    pub filename: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub author: Option<IssueUser>,
    #[serde(with = "jira_datetime")]
    pub created: Timestamp,
    pub size: i64,
    pub mime_type: String,
    /// Download URL of the attachment.
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueVote {
    #[serde(rename = "self")]
    pub self_link: String,
    pub votes: i64,
    #[serde(rename = "hasVoted")]
    pub voted: bool,
}

/// The worklog page embedded in an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueWorklogPage {
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub worklogs: Vec<IssueWorklog>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueWorklog {
    pub id: String,
    pub issue_id: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub author: Option<IssueUser>,
    pub update_author: Option<IssueUser>,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(with = "jira_datetime")]
    pub created: Timestamp,
    #[serde(with = "jira_datetime")]
    pub updated: Timestamp,
    #[serde(with = "jira_datetime")]
    pub started: Timestamp,
    pub time_spent: String,
    pub time_spent_seconds: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueStatus {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub icon_url: String,
    #[serde(rename = "statusCategory")]
    pub category: Option<IssueStatusCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueStatusCategory {
    pub id: i64,
    pub name: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub color_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueProgress {
    pub progress: i64,
    pub total: i64,
    pub percent: i64,
}

/// The comment page embedded in an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueCommentPage {
    pub start_at: u32,
    pub max_results: u32,
    pub total: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: Vec<IssueComment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueComment {
    pub id: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub body: String,
    pub author: Option<IssueUser>,
    pub update_author: Option<IssueUser>,
    #[serde(with = "jira_datetime")]
    pub created: Timestamp,
    #[serde(with = "jira_datetime")]
    pub updated: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueComponent {
    pub id: String,
    pub name: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

/// A version as embedded in issues (`fixVersions`, `versions`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueVersion {
    pub id: String,
    pub name: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub description: String,
    pub archived: bool,
    pub released: bool,
}

/// A page of issues wrapped in the `issues` envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IssuePage {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub total: u32,
    pub expand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
}

impl Envelope for IssuePage {
    type Item = Issue;

    fn into_parts(self) -> (Pagination, Vec<Issue>) {
        (self.pagination, self.issues)
    }
}

/// The estimation of an issue on a board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueEstimation {
    /// The field the board estimates with.
    #[serde(rename = "fieldId")]
    pub field_id: String,
    /// Seconds for time tracking, points for story points.
    #[serde(deserialize_with = "number_or_string")]
    pub value: f64,
}

/// Body of an estimation update.
///
/// Time tracking accepts `1w`, `2d`, `3h`, `20m` or a number of minutes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueEstimationOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Estimation values arrive as numbers or as numeric strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Raw::Number(n)) => Ok(n),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Raw::Text(s)) => s.trim().parse().map_err(de::Error::custom),
    }
}
