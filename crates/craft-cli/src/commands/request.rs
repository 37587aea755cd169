// crates/craft-cli/src/commands/request.rs - Arbitrary API requests
//
// `craft request <METHOD> <PATH>` reaches endpoints the typed commands do
// not cover. PATH is relative to the base URL unless it is an absolute
// http(s) URL. Repeated --query / --header keys keep the last value.
//
// EXAMPLES:
// ```bash
// craft request GET blocks --query date=yesterday
// craft request POST tasks --data '{"tasks": []}'
// craft request PUT blocks --data-file payload.md --content-type text/markdown
// ```

use anyhow::Result;

use craft_core::parsing::parse_key_value_list;
use craft_core::{CraftResult, Outcome, RequestDescriptor};

use crate::cli::RequestArgs;
use crate::commands::resolve_source;
use crate::context::Context;

pub async fn handle(ctx: &Context, args: RequestArgs) -> Result<Outcome> {
    let descriptor = build(args)?;
    ctx.dispatch(descriptor).await
}

/// Build the request from raw method, path, and flags
pub fn build(args: RequestArgs) -> CraftResult<RequestDescriptor> {
    let query = parse_key_value_list(&args.query, "query")?;
    let headers = parse_key_value_list(&args.header, "header")?;

    let mut descriptor = RequestDescriptor::new(args.method, args.path).raw(args.output.raw);

    for (key, value) in query {
        descriptor = descriptor.query(key, value);
    }
    for (key, value) in headers {
        descriptor = descriptor.header(key, value);
    }

    if args.data.is_some() || args.data_file.is_some() {
        let body = resolve_source(
            args.data.as_deref(),
            args.data_file.as_deref(),
            args.content_type.as_deref(),
            ("--data", "--data-file"),
        )?;
        descriptor = descriptor.body(body);
    }

    if let Some(content_type) = args.content_type {
        descriptor = descriptor.content_type(content_type);
    }

    Ok(descriptor)
}
