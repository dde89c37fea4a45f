//! Sprint types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_zero, null_as_default};

/// A JIRA Agile sprint.
///
/// Also used as the body of full and partial sprint updates, which is why
/// empty fields are left out when serializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprint {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// `future`, `active` or `closed`.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default", rename = "self", skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(rename = "completeDate", skip_serializing_if = "Option::is_none")]
    pub complete: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default", rename = "originBoardId", skip_serializing_if = "is_zero")]
    pub board_id: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub goal: String,
}

impl fmt::Display for Sprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Body for creating a sprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSprint {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// The board the sprint is created on.
    #[serde(rename = "originBoardId", skip_serializing_if = "is_zero")]
    pub board_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub goal: String,
}
