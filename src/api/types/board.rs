//! Board and board configuration types.

use serde::{Deserialize, Serialize};

use super::{is_zero, null_as_default};

/// A JIRA Agile board.
///
/// Returned by `GET /rest/agile/1.0/board/{boardId}` and in board pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    /// The board ID.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub id: i64,
    /// The board name.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// The board type (`scrum`, `kanban` or `simple`).
    #[serde(deserialize_with = "null_as_default", rename = "type", skip_serializing_if = "String::is_empty")]
    pub board_type: String,
    /// URL of the board resource.
    #[serde(deserialize_with = "null_as_default", rename = "self", skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// The project the board is located in, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<BoardLocation>,
}

/// Where a board lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardLocation {
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_type_key: String,
    #[serde(deserialize_with = "null_as_default", rename = "avatarURI")]
    pub avatar_uri: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Body for creating a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBoard {
    /// Must be less than 255 characters.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Valid values: `scrum`, `kanban`.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub board_type: String,
    /// Id of a filter the user has permission to view. Without the
    /// "Create shared objects" permission a private board is created.
    #[serde(skip_serializing_if = "is_zero")]
    pub filter_id: i64,
}

/// The configuration of a board.
///
/// Returned by `GET /rest/agile/1.0/board/{boardId}/configuration`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub board_type: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub sub_query: Option<SubQuery>,
    pub filter: ConfigurationFilter,
    pub estimation: Option<ConfigurationEstimation>,
    pub ranking: Option<ConfigurationRanking>,
    pub column_config: ColumnConfig,
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The JQL sub-query of a kanban board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubQuery {
    pub query: String,
}

/// The filter a board is built on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationFilter {
    pub id: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

/// How a board estimates issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationEstimation {
    #[serde(rename = "type")]
    pub estimation_type: String,
    pub field: ConfigurationEstimationField,
}

/// The field used for estimation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationEstimationField {
    #[serde(rename = "fieldId")]
    pub id: String,
    #[serde(rename = "displayName")]
    pub name: String,
}

/// The rank field of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationRanking {
    #[serde(rename = "rankCustomFieldId")]
    pub custom_field_id: i64,
}

/// The columns of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Vec<ConfigurationColumn>,
    pub constraint_type: String,
}

/// One board column and the statuses mapped to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationColumn {
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub statuses: Vec<ConfigurationStatus>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// A status mapped to a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationStatus {
    pub id: String,
    #[serde(rename = "self")]
    pub self_link: String,
}
