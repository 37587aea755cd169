// crates/craft-cli/src/commands/daily_notes.rs - Daily note search

use anyhow::Result;

use craft_core::{CraftResult, Outcome, RequestDescriptor};

use crate::cli::DailyNotesCommands;
use crate::context::Context;

pub async fn handle(ctx: &Context, cmd: DailyNotesCommands) -> Result<Outcome> {
    let descriptor = build(cmd)?;
    ctx.dispatch(descriptor).await
}

/// Build the request for a daily note command
///
/// Repeated `--include` / `--regex` flags become repeated `include` /
/// `regexps` query parameters, in the order given.
pub fn build(cmd: DailyNotesCommands) -> CraftResult<RequestDescriptor> {
    match cmd {
        DailyNotesCommands::Search {
            include,
            regex,
            start_date,
            end_date,
            fetch_metadata,
            output,
        } => Ok(RequestDescriptor::get("daily-notes/search")
            .query_opt("include", non_empty(include))
            .query_opt("regexps", non_empty(regex))
            .query_opt("startDate", start_date)
            .query_opt("endDate", end_date)
            .query_flag("fetchMetadata", fetch_metadata)
            .raw(output.raw)),
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}
