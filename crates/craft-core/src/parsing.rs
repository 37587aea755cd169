// crates/craft-core/src/parsing.rs - Shared flag validation helpers
//
// Small, pure functions used by every command handler to turn raw flag
// strings into validated values. All failures are reported before any
// network call is attempted.

use serde_json::Value;

use crate::error::{CraftError, CraftResult};

/// Parse a structured flag value (e.g. `--position`) as JSON
pub fn parse_json(value: &str, label: &str) -> CraftResult<Value> {
    serde_json::from_str(value).map_err(|_| CraftError::validation(format!("Invalid {label} JSON.")))
}

/// Parse an integer flag value (e.g. `--max-depth`)
pub fn parse_number(value: &str, label: &str) -> CraftResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| CraftError::validation(format!("Invalid {label} value: {value}")))
}

/// Split a `key=value` flag into its parts
///
/// Only the first `=` separates; the key is trimmed, the value is kept as-is.
pub fn parse_key_value(value: &str, label: &str) -> CraftResult<(String, String)> {
    let (key, val) = value
        .split_once('=')
        .ok_or_else(|| CraftError::input(format!("{label} must be in key=value format.")))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(CraftError::input(format!("{label} key is required.")));
    }

    Ok((key.to_string(), val.to_string()))
}

/// Parse every entry of a repeatable `key=value` flag
pub fn parse_key_value_list(values: &[String], label: &str) -> CraftResult<Vec<(String, String)>> {
    values
        .iter()
        .map(|value| parse_key_value(value, label))
        .collect()
}

/// Map the `--accept` shorthands onto MIME types
///
/// "markdown" and "json" (and their full MIME forms, any case) are
/// normalized; anything else passes through untouched.
pub fn normalize_accept(value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;

    match value.to_lowercase().as_str() {
        "markdown" | "text/markdown" => Some("text/markdown".to_string()),
        "json" | "application/json" => Some("application/json".to_string()),
        _ => Some(value.to_string()),
    }
}

/// Gate a destructive command on `--confirm`
pub fn require_confirm(confirm: bool, command: &str) -> CraftResult<()> {
    if confirm {
        Ok(())
    } else {
        Err(CraftError::ConfirmationRequired {
            command: command.to_string(),
        })
    }
}
