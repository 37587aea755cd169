// crates/craft-core/src/body.rs - Request Body Resolution
//
// Produces the request payload text from exactly one source:
// - inline text (--body / --data)
// - a file path (--body-file / --data-file)
// - standard input, when the file path is the marker "-"
//
// Mutual exclusivity between inline text and file is enforced by the
// command handlers before calling in here. When both are passed anyway,
// the inline value wins.
//
// JSON VALIDATION:
// Any content type containing "json" (the default is application/json)
// requires the text to parse as JSON. The text itself is returned
// unchanged; it is never re-serialized.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{CraftError, CraftResult};

/// Content type assumed when the caller does not pick one
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Body file path that means "read from standard input"
pub const STDIN_MARKER: &str = "-";

/// Whether a content type requires a syntactically valid JSON body
pub fn expects_json(content_type: Option<&str>) -> bool {
    content_type.unwrap_or(DEFAULT_CONTENT_TYPE).contains("json")
}

/// Resolve the body text from inline value, file, or stdin
///
/// `read_stdin` is only invoked when `file` is the stdin marker.
pub fn resolve_body<F>(
    inline: Option<&str>,
    file: Option<&Path>,
    content_type: Option<&str>,
    read_stdin: F,
) -> CraftResult<String>
where
    F: FnOnce() -> CraftResult<String>,
{
    let text = match (inline, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) if path == Path::new(STDIN_MARKER) => read_stdin()?,
        (None, Some(path)) => read_file(path)?,
        (None, None) => return Err(CraftError::input("Request body is required.")),
    };

    if expects_json(content_type) && serde_json::from_str::<Value>(&text).is_err() {
        return Err(CraftError::validation(format!(
            "Request body must be valid JSON when using {}.",
            content_type.unwrap_or(DEFAULT_CONTENT_TYPE)
        )));
    }

    Ok(text)
}

/// Body for delete-style commands: an explicit body, or `{"<key>": [ids]}`
pub fn delete_body(body: Option<String>, ids: &[String], key: &str) -> CraftResult<String> {
    if let Some(body) = body {
        return Ok(body);
    }

    if ids.is_empty() {
        return Err(CraftError::input("Provide --ids or --body/--body-file."));
    }

    let mut object = Map::new();
    object.insert(key.to_string(), Value::from(ids.to_vec()));
    Ok(Value::Object(object).to_string())
}

fn read_file(path: &Path) -> CraftResult<String> {
    fs::read_to_string(path).map_err(|source| CraftError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
