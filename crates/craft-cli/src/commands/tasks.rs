// crates/craft-cli/src/commands/tasks.rs - Task commands
//
// ENDPOINTS:
// - list    GET    tasks?scope=<active|upcoming|inbox|logbook>
// - add     POST   tasks
// - update  PUT    tasks
// - delete  DELETE tasks   ({"idsToDelete": [...]} unless --body given)

use anyhow::Result;

use craft_core::body::DEFAULT_CONTENT_TYPE;
use craft_core::parsing::require_confirm;
use craft_core::{CraftError, CraftResult, Outcome, RequestDescriptor};

use crate::cli::TasksCommands;
use crate::commands::delete_payload;
use crate::context::Context;

pub async fn handle(ctx: &Context, cmd: TasksCommands) -> Result<Outcome> {
    let descriptor = build(cmd)?;
    ctx.dispatch(descriptor).await
}

/// Validate flags and build the request for a task command
///
/// The scope value is not checked against the known set; the server
/// decides what it accepts.
pub fn build(cmd: TasksCommands) -> CraftResult<RequestDescriptor> {
    match cmd {
        TasksCommands::List { scope, output } => {
            let scope = scope.filter(|s| !s.is_empty()).ok_or_else(|| {
                CraftError::input("--scope is required (active, upcoming, inbox, logbook).")
            })?;

            Ok(RequestDescriptor::get("tasks")
                .query("scope", scope)
                .raw(output.raw))
        }

        TasksCommands::Add { input, output } => Ok(RequestDescriptor::post("tasks")
            .body(input.resolve()?)
            .content_type(DEFAULT_CONTENT_TYPE)
            .raw(output.raw)),

        TasksCommands::Update { input, output } => Ok(RequestDescriptor::put("tasks")
            .body(input.resolve()?)
            .content_type(DEFAULT_CONTENT_TYPE)
            .raw(output.raw)),

        TasksCommands::Delete {
            ids,
            input,
            confirm,
            output,
        } => {
            require_confirm(confirm, "tasks delete")?;
            Ok(RequestDescriptor::delete("tasks")
                .body(delete_payload(&input, ids, "idsToDelete")?)
                .content_type(DEFAULT_CONTENT_TYPE)
                .raw(output.raw))
        }
    }
}
