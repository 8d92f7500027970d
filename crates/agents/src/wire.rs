//! Small accessors for the loosely-typed rows the scraping scripts emit.
//! Rows are JSON objects whose fields come and go between script versions,
//! so everything is read defensively with an empty-string fallback.

use serde_json::Value;

pub(crate) fn text(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Like [`text`], trying each key in order. Script versions renamed a few
/// columns; the first present key wins.
pub(crate) fn text_any(row: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| row.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn opt_text(row: &Value, key: &str) -> Option<String> {
    row.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn opt_text_any(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| opt_text(row, key))
}

pub(crate) fn opt_int(row: &Value, key: &str) -> Option<i64> {
    row.get(key).and_then(Value::as_i64)
}

pub(crate) fn flag(row: &Value, key: &str) -> bool {
    row.get(key).and_then(Value::as_bool).unwrap_or_default()
}
