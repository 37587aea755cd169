// crates/craft-cli/src/main.rs - CLI Application Entry Point
//
// The `craft` binary maps subcommands onto Craft REST API calls. Each
// command validates its own flags, builds a request descriptor, and hands
// it to the shared dispatcher in craft-core.
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │  (cli.rs)        │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                                          │
//                                                          ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │───▶│  craft-core         │
//                        │ (url + token)    │    │ (config, HTTP, I/O) │
//                        └──────────────────┘    └─────────────────────┘
//
// EXIT STATUS:
// - 0: the API answered with a 2xx status
// - 1: validation, configuration, transport, or HTTP error status
//
// EXAMPLE USAGE:
// ```bash
// export CRAFT_API_URL=https://connect.craft.do/links/<share-id>/api/v1
// craft blocks get --date today --accept markdown --raw
// craft tasks list --scope inbox
// craft blocks delete --ids b1 --ids b2 --confirm
// craft request GET collections --query startDate=2024-01-01
// ```

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use craft_core::Outcome;

mod cli; // Command-line interface definitions (pure data structures)
mod commands; // Command implementations (flag validation + request building)
mod context; // Application context (connection flags, dispatch)
mod stdin; // Piped input for body and ID flags

use cli::{Cli, Commands};
use context::Context;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CRAFT_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("{}", style(format!("Error: {err}")).red().for_stderr());
            ExitCode::FAILURE
        }
    }
}

/// Dispatch to the handler for the parsed command
async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    // Completions need neither configuration nor the network
    #[cfg(feature = "completions")]
    if let Commands::Completions { shell } = &cli.command {
        return Ok(commands::completions::handle(*shell));
    }

    let ctx = Context::new(cli.url, cli.token);

    match cli.command {
        Commands::Blocks(cmd) => commands::blocks::handle(&ctx, cmd).await,
        Commands::DailyNotes(cmd) => commands::daily_notes::handle(&ctx, cmd).await,
        Commands::Collections(cmd) => commands::collections::handle(&ctx, cmd).await,
        Commands::Tasks(cmd) => commands::tasks::handle(&ctx, cmd).await,
        Commands::Request(args) => commands::request::handle(&ctx, args).await,
        #[cfg(feature = "completions")]
        Commands::Completions { .. } => unreachable!(), // Already handled above
    }
}

/// Log to stderr, filtered by CRAFT_LOG (warn by default, debug with --verbose)
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
