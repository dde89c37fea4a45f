//! Epic types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{is_zero, null_as_default};

/// A JIRA Agile epic.
///
/// Also used as the body of a partial epic update. Empty fields are left
/// out, so `done = false` cannot be sent explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Epic {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default", rename = "self", skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
    /// Color tags, e.g. `{"key": "color_9"}`.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "HashMap::is_empty")]
    pub color: HashMap<String, String>,
}

impl Epic {
    /// The color key, if one is set.
    pub fn color_key(&self) -> Option<&str> {
        self.color.get("key").map(String::as_str)
    }
}
