// crates/craft-cli/src/commands/mod.rs - Command Handler Modules
//
// One module per command group. Every module exposes:
// - `build(cmd)`: validate flags and produce a RequestDescriptor (pure,
//   apart from reading body files or stdin)
// - `handle(ctx, cmd)`: build, then dispatch through the Context
//
// Validation failures surface from `build`, before configuration is
// resolved and before any network call.
//
// MODULE ORGANIZATION:
// - blocks: daily note blocks (get, insert, update, delete, move, search)
// - daily_notes: search across daily notes
// - collections: collection listing, schema, and item CRUD
// - tasks: task listing and CRUD
// - request: arbitrary method + path escape hatch
// - completions: shell completion scripts (feature-gated)

use std::path::Path;

use craft_core::body;
use craft_core::{CraftError, CraftResult};

use crate::cli::BodyArgs;
use crate::stdin;

pub mod blocks;
pub mod collections;
#[cfg(feature = "completions")]
pub mod completions;
pub mod daily_notes;
pub mod request;
pub mod tasks;

impl BodyArgs {
    /// Whether either body flag was given
    pub fn is_present(&self) -> bool {
        self.body.is_some() || self.body_file.is_some()
    }

    /// Resolve the required JSON body
    pub fn resolve(&self) -> CraftResult<String> {
        resolve_source(
            self.body.as_deref(),
            self.body_file.as_deref(),
            Some(body::DEFAULT_CONTENT_TYPE),
            ("--body", "--body-file"),
        )
    }

    /// Resolve the JSON body only when one was given
    pub fn resolve_optional(&self) -> CraftResult<Option<String>> {
        if self.is_present() {
            self.resolve().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Read a body from exactly one of an inline flag or a file flag
pub(crate) fn resolve_source(
    inline: Option<&str>,
    file: Option<&Path>,
    content_type: Option<&str>,
    (inline_flag, file_flag): (&str, &str),
) -> CraftResult<String> {
    if inline.is_some() && file.is_some() {
        return Err(CraftError::input(format!(
            "Use either {inline_flag} or {file_flag}, not both."
        )));
    }

    body::resolve_body(inline, file, content_type, stdin::read_body)
}

/// Body for a delete command: the explicit body, else `{"<key>": ids}`
pub(crate) fn delete_payload(input: &BodyArgs, ids: Vec<String>, key: &str) -> CraftResult<String> {
    match input.resolve_optional()? {
        Some(text) => body::delete_body(Some(text), &[], key),
        None => body::delete_body(None, &stdin::expand_ids(ids)?, key),
    }
}
