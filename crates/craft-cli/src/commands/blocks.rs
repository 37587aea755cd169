// crates/craft-cli/src/commands/blocks.rs - Daily note block commands
//
// ENDPOINTS:
// - get     GET    blocks          (?date | ?id, maxDepth, fetchMetadata)
// - insert  POST   blocks          (JSON body, or markdown)
// - update  PUT    blocks
// - delete  DELETE blocks          ({"blockIds": [...]} unless --body given)
// - move    PUT    blocks/move     ({"blockIds": [...], "position": {...}})
// - search  GET    blocks/search   (?pattern, date, caseSensitive, ...)
//
// MARKDOWN INSERT:
// --markdown defaults to text/markdown and sends the text as-is, with any
// --position carried as a compact JSON query parameter. Forcing a JSON
// content type wraps it instead: {"markdown": ..., "position": ...}.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use craft_core::body;
use craft_core::parsing::{normalize_accept, parse_json, parse_number, require_confirm};
use craft_core::{CraftError, CraftResult, Outcome, RequestDescriptor};

use crate::cli::{BlocksCommands, BodyArgs};
use crate::commands::{delete_payload, resolve_source};
use crate::context::Context;
use crate::stdin;

const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// JSON form of a markdown insert
#[derive(Serialize)]
struct MarkdownInsert {
    markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Value>,
}

/// Body of `blocks move` built from --ids and --position
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveBlocks {
    block_ids: Vec<String>,
    position: Value,
}

/// Handle all block commands
pub async fn handle(ctx: &Context, cmd: BlocksCommands) -> Result<Outcome> {
    let descriptor = build(cmd)?;
    ctx.dispatch(descriptor).await
}

/// Validate flags and build the request for a block command
pub fn build(cmd: BlocksCommands) -> CraftResult<RequestDescriptor> {
    match cmd {
        BlocksCommands::Get {
            date,
            id,
            max_depth,
            fetch_metadata,
            accept,
            output,
        } => {
            if date.is_some() && id.is_some() {
                return Err(CraftError::validation("Use either --date or --id, not both."));
            }

            let max_depth = max_depth
                .map(|value| parse_number(&value, "max-depth"))
                .transpose()?;

            let mut descriptor = RequestDescriptor::get("blocks")
                .query_opt("date", date)
                .query_opt("id", id)
                .query_opt("maxDepth", max_depth.map(|n| n.to_string()))
                .query_flag("fetchMetadata", fetch_metadata)
                .raw(output.raw);

            if let Some(accept) = normalize_accept(accept.as_deref()) {
                descriptor = descriptor.header("Accept", accept);
            }

            Ok(descriptor)
        }

        BlocksCommands::Insert {
            input,
            markdown,
            position,
            content_type,
            output,
        } => build_insert(input, markdown, position, content_type).map(|d| d.raw(output.raw)),

        BlocksCommands::Update { input, output } => Ok(RequestDescriptor::put("blocks")
            .body(input.resolve()?)
            .content_type(body::DEFAULT_CONTENT_TYPE)
            .raw(output.raw)),

        BlocksCommands::Delete {
            ids,
            input,
            confirm,
            output,
        } => {
            require_confirm(confirm, "blocks delete")?;
            Ok(RequestDescriptor::delete("blocks")
                .body(delete_payload(&input, ids, "blockIds")?)
                .content_type(body::DEFAULT_CONTENT_TYPE)
                .raw(output.raw))
        }

        BlocksCommands::Move {
            ids,
            position,
            input,
            output,
        } => Ok(RequestDescriptor::put("blocks/move")
            .body(move_payload(&input, ids, position)?)
            .content_type(body::DEFAULT_CONTENT_TYPE)
            .raw(output.raw)),

        BlocksCommands::Search {
            pattern,
            date,
            case_sensitive,
            before,
            after,
            output,
        } => {
            let before = before.map(|v| parse_number(&v, "before")).transpose()?;
            let after = after.map(|v| parse_number(&v, "after")).transpose()?;

            Ok(RequestDescriptor::get("blocks/search")
                .query("pattern", pattern)
                .query("date", date.unwrap_or_else(|| "today".to_string()))
                .query_flag("caseSensitive", case_sensitive)
                .query_opt("beforeBlockCount", before.map(|n| n.to_string()))
                .query_opt("afterBlockCount", after.map(|n| n.to_string()))
                .raw(output.raw))
        }
    }
}

fn build_insert(
    input: BodyArgs,
    markdown: Option<String>,
    position: Option<String>,
    content_type: Option<String>,
) -> CraftResult<RequestDescriptor> {
    let markdown = match (input.is_present(), markdown) {
        (false, None) => return Err(CraftError::input("Provide --body/--body-file or --markdown.")),
        (true, Some(_)) => {
            return Err(CraftError::input(
                "Use either --body/--body-file or --markdown, not both.",
            ));
        }
        (true, None) => None,
        (false, Some(text)) => Some(text),
    };

    let position = position
        .filter(|p| !p.is_empty())
        .map(|p| parse_json(&p, "position"))
        .transpose()?;

    let descriptor = RequestDescriptor::post("blocks");

    let Some(markdown) = markdown else {
        let content_type = content_type.unwrap_or_else(|| body::DEFAULT_CONTENT_TYPE.to_string());
        let text = resolve_source(
            input.body.as_deref(),
            input.body_file.as_deref(),
            Some(&content_type),
            ("--body", "--body-file"),
        )?;
        return Ok(descriptor.body(text).content_type(content_type));
    };

    let content_type = content_type.unwrap_or_else(|| MARKDOWN_CONTENT_TYPE.to_string());

    if body::expects_json(Some(&content_type)) {
        let payload = MarkdownInsert { markdown, position };
        return Ok(descriptor
            .body(to_json(&payload)?)
            .content_type(content_type));
    }

    Ok(descriptor
        .query_opt("position", position.map(|p| p.to_string()))
        .body(markdown)
        .content_type(content_type))
}

fn move_payload(input: &BodyArgs, ids: Vec<String>, position: Option<String>) -> CraftResult<String> {
    if let Some(text) = input.resolve_optional()? {
        return Ok(text);
    }

    if ids.is_empty() {
        return Err(CraftError::input("Provide --ids or --body/--body-file."));
    }

    let position = position
        .filter(|p| !p.is_empty())
        .ok_or_else(|| CraftError::input("Provide --position when using --ids."))?;
    let position = parse_json(&position, "position")?;

    // stdin is only read once every flag has checked out
    let ids = stdin::expand_ids(ids)?;

    to_json(&MoveBlocks {
        block_ids: ids,
        position,
    })
}

fn to_json<T: Serialize>(payload: &T) -> CraftResult<String> {
    serde_json::to_string(payload)
        .map_err(|e| CraftError::validation(format!("Unable to encode request body: {e}")))
}
