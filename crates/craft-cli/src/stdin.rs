// crates/craft-cli/src/stdin.rs - Piped input for body and ID flags
//
// Any body-file flag set to "-" reads the request body from stdin, and a
// lone `--ids -` reads IDs one per line. Both refuse to block on an
// interactive terminal.
//
// UNIX PATTERN:
// ```bash
// jq -n '{tasks: [{markdown: "Call Sam"}]}' | craft tasks add --body-file -
// craft request GET /blocks --query date=today --raw | jq -r '.. | .id? // empty' \
//     | craft blocks delete --ids - --confirm
// ```

use std::io::{self, IsTerminal, Read};

use craft_core::body::STDIN_MARKER;
use craft_core::{CraftError, CraftResult};

/// Read the whole request body from stdin, unchanged
pub fn read_body() -> CraftResult<String> {
    if io::stdin().is_terminal() {
        return Err(CraftError::input(
            "No piped input detected. Pipe the request body in when using \"-\".\n\nExample:\n  echo '{\"tasks\": []}' | craft tasks add --body-file -",
        ));
    }

    read_all()
}

/// Expand `--ids -` into the IDs piped on stdin
///
/// Any other list of IDs is returned as given.
pub fn expand_ids(ids: Vec<String>) -> CraftResult<Vec<String>> {
    if ids.len() != 1 || ids[0] != STDIN_MARKER {
        return Ok(ids);
    }

    if io::stdin().is_terminal() {
        return Err(CraftError::input(
            "No piped input detected. Pipe one ID per line when using --ids -.",
        ));
    }

    let ids = split_lines(&read_all()?);
    if ids.is_empty() {
        return Err(CraftError::input("No IDs provided on stdin."));
    }

    Ok(ids)
}

fn read_all() -> CraftResult<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|source| CraftError::FileRead {
            path: STDIN_MARKER.into(),
            source,
        })?;
    Ok(buffer)
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
