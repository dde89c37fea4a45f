//! Query-string encoding for list options.
//!
//! Options structs declare their parameter names through serde. Fields
//! holding their zero value (`""`, `0`, `false`, `null`) are left out, so a
//! default options value produces no query string at all.

use serde::Serialize;
use serde_json::Value;

/// Encode `options` as a query string, including the leading `?`.
///
/// Returns `""` for `None`, for a value whose fields are all zero, and for a
/// value that does not serialize to a JSON object. Nested values are
/// skipped. Parameters come out sorted by name.
pub fn query_parameters<T: Serialize + ?Sized>(options: Option<&T>) -> String {
    let Some(options) = options else {
        return String::new();
    };

    let map = match serde_json::to_value(options) {
        Ok(Value::Object(map)) => map,
        _ => return String::new(),
    };

    let pairs: Vec<String> = map
        .iter()
        .filter_map(|(name, value)| {
            scalar(value).map(|v| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(&v))
            })
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// The textual form of a non-zero scalar.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if !is_zero(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_zero(n: &serde_json::Number) -> bool {
    n.as_i64() == Some(0) || n.as_u64() == Some(0) || n.as_f64() == Some(0.0)
}
