//! Timestamps in JIRA's issue format.

/// Serde adapter for `Option<DateTime<FixedOffset>>` fields holding issue
/// timestamps such as `2019-05-07T08:31:01.598+0530`.
///
/// RFC 3339 input (`+05:30`, `Z`) is accepted as well; `null` and empty
/// strings decode to `None`.
pub mod jira_datetime {
    use chrono::{DateTime, FixedOffset};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Layout used when writing timestamps.
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

    const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

    /// Parse a timestamp in JIRA's format, falling back to RFC 3339.
    pub fn parse(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_str(value, PARSE_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(value))
    }

    pub fn serialize<S>(value: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => parse(&raw).map(Some).map_err(de::Error::custom),
        }
    }
}
