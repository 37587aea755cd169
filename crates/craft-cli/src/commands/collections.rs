// crates/craft-cli/src/commands/collections.rs - Collection commands
//
// ENDPOINTS:
// - list          GET    collections
// - schema        GET    collections/<id>/schema
// - items         GET    collections/<id>/items
// - add-items     POST   collections/<id>/items
// - update-items  PUT    collections/<id>/items
// - delete-items  DELETE collections/<id>/items   ({"idsToDelete": [...]})

use anyhow::Result;

use craft_core::body::DEFAULT_CONTENT_TYPE;
use craft_core::parsing::{parse_number, require_confirm};
use craft_core::{CraftResult, Outcome, RequestDescriptor};

use crate::cli::CollectionsCommands;
use crate::commands::delete_payload;
use crate::context::Context;

pub async fn handle(ctx: &Context, cmd: CollectionsCommands) -> Result<Outcome> {
    let descriptor = build(cmd)?;
    ctx.dispatch(descriptor).await
}

/// Validate flags and build the request for a collection command
pub fn build(cmd: CollectionsCommands) -> CraftResult<RequestDescriptor> {
    match cmd {
        CollectionsCommands::List {
            start_date,
            end_date,
            output,
        } => Ok(RequestDescriptor::get("collections")
            .query_opt("startDate", start_date)
            .query_opt("endDate", end_date)
            .raw(output.raw)),

        CollectionsCommands::Schema {
            collection_id,
            format,
            output,
        } => Ok(RequestDescriptor::get(items_path(&collection_id, "schema"))
            .query_opt("format", format)
            .raw(output.raw)),

        CollectionsCommands::Items {
            collection_id,
            max_depth,
            output,
        } => {
            let max_depth = max_depth
                .map(|value| parse_number(&value, "max-depth"))
                .transpose()?;

            Ok(RequestDescriptor::get(items_path(&collection_id, "items"))
                .query_opt("maxDepth", max_depth.map(|n| n.to_string()))
                .raw(output.raw))
        }

        CollectionsCommands::AddItems {
            collection_id,
            input,
            output,
        } => Ok(RequestDescriptor::post(items_path(&collection_id, "items"))
            .body(input.resolve()?)
            .content_type(DEFAULT_CONTENT_TYPE)
            .raw(output.raw)),

        CollectionsCommands::UpdateItems {
            collection_id,
            input,
            output,
        } => Ok(RequestDescriptor::put(items_path(&collection_id, "items"))
            .body(input.resolve()?)
            .content_type(DEFAULT_CONTENT_TYPE)
            .raw(output.raw)),

        CollectionsCommands::DeleteItems {
            collection_id,
            ids,
            input,
            confirm,
            output,
        } => {
            require_confirm(confirm, "collections delete-items")?;
            Ok(RequestDescriptor::delete(items_path(&collection_id, "items"))
                .body(delete_payload(&input, ids, "idsToDelete")?)
                .content_type(DEFAULT_CONTENT_TYPE)
                .raw(output.raw))
        }
    }
}

fn items_path(collection_id: &str, leaf: &str) -> String {
    format!("collections/{collection_id}/{leaf}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BodyArgs, OutputArgs};
    use craft_core::QueryValue;
    use serde_json::{Value, json};

    #[test]
    fn test_list_with_date_range() {
        let cmd = CollectionsCommands::List {
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-02-01".to_string()),
            output: OutputArgs::default(),
        };
        let descriptor = build(cmd).unwrap();

        assert_eq!(descriptor.path, "collections");
        let keys: Vec<&str> = descriptor.query.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["startDate", "endDate"]);
    }

    #[test]
    fn test_schema_path_and_format() {
        let cmd = CollectionsCommands::Schema {
            collection_id: "c42".to_string(),
            format: Some("json-schema-items".to_string()),
            output: OutputArgs::default(),
        };
        let descriptor = build(cmd).unwrap();

        assert_eq!(descriptor.path, "collections/c42/schema");
        assert_eq!(
            descriptor.query.get("format"),
            Some(&QueryValue::Single("json-schema-items".to_string()))
        );
    }

    #[test]
    fn test_items_rejects_bad_depth() {
        let cmd = CollectionsCommands::Items {
            collection_id: "c1".to_string(),
            max_depth: Some("x".to_string()),
            output: OutputArgs::default(),
        };
        assert_eq!(build(cmd).unwrap_err().to_string(), "Invalid max-depth value: x");
    }

    #[test]
    fn test_add_items_requires_body() {
        let cmd = CollectionsCommands::AddItems {
            collection_id: "c1".to_string(),
            input: BodyArgs::default(),
            output: OutputArgs::default(),
        };
        assert_eq!(build(cmd).unwrap_err().to_string(), "Request body is required.");
    }

    #[test]
    fn test_update_items_sends_body() {
        let cmd = CollectionsCommands::UpdateItems {
            collection_id: "c1".to_string(),
            input: BodyArgs {
                body: Some(r#"{"itemsToUpdate":[]}"#.to_string()),
                body_file: None,
            },
            output: OutputArgs { raw: true },
        };
        let descriptor = build(cmd).unwrap();

        assert_eq!(descriptor.method, "PUT");
        assert_eq!(descriptor.path, "collections/c1/items");
        assert_eq!(descriptor.body.as_deref(), Some(r#"{"itemsToUpdate":[]}"#));
        assert!(descriptor.raw);
    }

    #[test]
    fn test_delete_items_uses_ids_to_delete() {
        let cmd = CollectionsCommands::DeleteItems {
            collection_id: "c1".to_string(),
            ids: vec!["i1".to_string()],
            input: BodyArgs::default(),
            confirm: true,
            output: OutputArgs::default(),
        };
        let descriptor = build(cmd).unwrap();
        let body: Value = serde_json::from_str(descriptor.body.as_deref().unwrap()).unwrap();

        assert_eq!(descriptor.method, "DELETE");
        assert_eq!(body, json!({"idsToDelete": ["i1"]}));
    }

    #[test]
    fn test_delete_items_requires_confirm() {
        let cmd = CollectionsCommands::DeleteItems {
            collection_id: "c1".to_string(),
            ids: vec!["i1".to_string()],
            input: BodyArgs::default(),
            confirm: false,
            output: OutputArgs::default(),
        };
        assert!(
            build(cmd)
                .unwrap_err()
                .to_string()
                .starts_with("Refusing to run collections delete-items")
        );
    }
}
