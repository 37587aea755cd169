// crates/craft-core/src/render.rs - Response Rendering
//
// Turns a finished HTTP response into terminal output plus an Outcome.
// Writers are passed in explicitly so the same code prints to the real
// stdout/stderr in the binary and to buffers in tests.
//
// MODES:
// - Raw: body verbatim to stdout, exit status follows the HTTP status
// - Structured (default): JSON is pretty-printed with 2-space indentation;
//   error responses go entirely to stderr, prefixed by "<status> <reason>"

use std::io::Write;
use std::process::ExitCode;

use serde_json::Value;

use crate::error::CraftResult;

/// Result of one invocation, converted to the exit status by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(u8),
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure(code) => ExitCode::from(code),
        }
    }
}

/// A fully-read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub text: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// "404 Not Found" style status line
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.status_text).trim_end().to_string()
    }
}

/// Print `response` according to the output mode and report the outcome
pub fn render<O: Write, E: Write>(
    response: &ApiResponse,
    raw: bool,
    out: &mut O,
    err: &mut E,
) -> CraftResult<Outcome> {
    let outcome = if response.is_success() {
        Outcome::Success
    } else {
        Outcome::Failure(1)
    };

    if raw {
        if !response.text.is_empty() {
            writeln!(out, "{}", response.text)?;
        }
        return Ok(outcome);
    }

    let formatted = pretty_json(&response.text);

    if response.is_success() {
        write_body(out, formatted.as_deref(), &response.text)?;
    } else {
        writeln!(err, "{}", response.status_line())?;
        write_body(err, formatted.as_deref(), &response.text)?;
    }

    Ok(outcome)
}

fn write_body<W: Write>(writer: &mut W, formatted: Option<&str>, text: &str) -> CraftResult<()> {
    if let Some(json) = formatted {
        writeln!(writer, "{json}")?;
    } else if !text.is_empty() {
        writeln!(writer, "{text}")?;
    }
    Ok(())
}

/// Pretty-print `text` if it is JSON, preserving key order
fn pretty_json(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}
