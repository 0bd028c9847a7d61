//! Text normalization for downstream matching.

use serde_json::Value;

/// Lowercase `text` and drop every character outside `[a-z0-9\s]`.
///
/// Whitespace runs are kept exactly as they appear.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// Normalize a raw JSON cell. Anything that is not a string yields `""`.
pub fn normalize_value(value: &Value) -> String {
    value.as_str().map(normalize).unwrap_or_default()
}
