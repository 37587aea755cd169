// crates/craft-cli/src/cli.rs - Command-line interface definitions
//
// Pure data: every subcommand and flag the binary understands. Handlers in
// commands/*.rs turn these into request descriptors.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "craft")]
#[command(about = "A command-line client for the Craft API (blocks, collections, tasks, daily notes)")]
#[command(version)]
pub struct Cli {
    /// Craft API base URL (overrides CRAFT_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// API token (overrides CRAFT_API_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with daily note blocks
    #[command(subcommand)]
    Blocks(BlocksCommands),

    /// Search across daily notes
    #[command(subcommand)]
    DailyNotes(DailyNotesCommands),

    /// Manage collections
    #[command(subcommand)]
    Collections(CollectionsCommands),

    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommands),

    /// Call an arbitrary API path
    Request(RequestArgs),

    /// Generate shell completion scripts
    #[cfg(feature = "completions")]
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Request body taken from a JSON string or a file
#[derive(Args, Debug, Clone, Default)]
pub struct BodyArgs {
    /// Request body as JSON string
    #[arg(long, value_name = "JSON")]
    pub body: Option<String>,

    /// Read request body from file ("-" reads stdin)
    #[arg(long, value_name = "PATH")]
    pub body_file: Option<PathBuf>,
}

/// Output mode shared by every command
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Print raw response
    #[arg(long)]
    pub raw: bool,
}

/// Block subcommands
#[derive(Subcommand, Debug)]
pub enum BlocksCommands {
    /// Fetch blocks from daily notes
    Get {
        /// Daily note date (today, tomorrow, yesterday, or YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Block ID to fetch
        #[arg(long)]
        id: Option<String>,

        /// Maximum depth
        #[arg(long, value_name = "N")]
        max_depth: Option<String>,

        /// Include metadata
        #[arg(long)]
        fetch_metadata: bool,

        /// Response format: json or markdown (default: json)
        #[arg(long, value_name = "TYPE")]
        accept: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Insert blocks or markdown into daily notes
    Insert {
        #[command(flatten)]
        input: BodyArgs,

        /// Insert raw markdown (text/markdown)
        #[arg(long, value_name = "TEXT")]
        markdown: Option<String>,

        /// Position object as JSON string
        #[arg(long, value_name = "JSON")]
        position: Option<String>,

        /// Override Content-Type
        #[arg(long, value_name = "TYPE")]
        content_type: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Update blocks in daily notes
    Update {
        #[command(flatten)]
        input: BodyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete blocks from daily notes
    Delete {
        /// Block ID to delete (repeatable, "-" reads IDs from stdin)
        #[arg(long, value_name = "ID")]
        ids: Vec<String>,

        #[command(flatten)]
        input: BodyArgs,

        /// Confirm deletion
        #[arg(long)]
        confirm: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Move blocks to a new position
    Move {
        /// Block ID to move (repeatable, "-" reads IDs from stdin)
        #[arg(long, value_name = "ID")]
        ids: Vec<String>,

        /// Position object as JSON string
        #[arg(long, value_name = "JSON")]
        position: Option<String>,

        #[command(flatten)]
        input: BodyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Search a daily note
    Search {
        /// Search pattern
        pattern: String,

        /// Daily note date (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Case-sensitive search
        #[arg(long)]
        case_sensitive: bool,

        /// Blocks before the match
        #[arg(long, value_name = "N")]
        before: Option<String>,

        /// Blocks after the match
        #[arg(long, value_name = "N")]
        after: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Daily note subcommands
#[derive(Subcommand, Debug)]
pub enum DailyNotesCommands {
    /// Search across daily notes
    Search {
        /// Include term (repeatable)
        #[arg(long, value_name = "TERM")]
        include: Vec<String>,

        /// Regex pattern (repeatable)
        #[arg(long, value_name = "PATTERN")]
        regex: Vec<String>,

        /// Start date (YYYY-MM-DD or relative)
        #[arg(long, value_name = "DATE")]
        start_date: Option<String>,

        /// End date (YYYY-MM-DD or relative)
        #[arg(long, value_name = "DATE")]
        end_date: Option<String>,

        /// Include metadata
        #[arg(long)]
        fetch_metadata: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Collection subcommands
#[derive(Subcommand, Debug)]
pub enum CollectionsCommands {
    /// List collections
    List {
        /// Start date (YYYY-MM-DD or relative)
        #[arg(long, value_name = "DATE")]
        start_date: Option<String>,

        /// End date (YYYY-MM-DD or relative)
        #[arg(long, value_name = "DATE")]
        end_date: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get collection schema
    Schema {
        /// Collection ID
        collection_id: String,

        /// schema or json-schema-items
        #[arg(long)]
        format: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Get collection items
    Items {
        /// Collection ID
        collection_id: String,

        /// Maximum depth
        #[arg(long, value_name = "N")]
        max_depth: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Add collection items
    AddItems {
        /// Collection ID
        collection_id: String,

        #[command(flatten)]
        input: BodyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Update collection items
    UpdateItems {
        /// Collection ID
        collection_id: String,

        #[command(flatten)]
        input: BodyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete collection items
    DeleteItems {
        /// Collection ID
        collection_id: String,

        /// Item ID to delete (repeatable, "-" reads IDs from stdin)
        #[arg(long, value_name = "ID")]
        ids: Vec<String>,

        #[command(flatten)]
        input: BodyArgs,

        /// Confirm deletion
        #[arg(long)]
        confirm: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TasksCommands {
    /// List tasks by scope
    List {
        /// active, upcoming, inbox, or logbook
        #[arg(long)]
        scope: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Add tasks
    Add {
        #[command(flatten)]
        input: BodyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Update tasks
    Update {
        #[command(flatten)]
        input: BodyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete tasks
    Delete {
        /// Task ID to delete (repeatable, "-" reads IDs from stdin)
        #[arg(long, value_name = "ID")]
        ids: Vec<String>,

        #[command(flatten)]
        input: BodyArgs,

        /// Confirm deletion
        #[arg(long)]
        confirm: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Arguments for the `request` escape hatch
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE, ...)
    pub method: String,

    /// API path relative to the base URL, or an absolute URL
    pub path: String,

    /// Add query param (repeatable)
    #[arg(long, value_name = "KEY=VALUE")]
    pub query: Vec<String>,

    /// Add header (repeatable)
    #[arg(long, value_name = "KEY=VALUE")]
    pub header: Vec<String>,

    /// JSON body as a string
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,

    /// Read request body from file ("-" reads stdin)
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Override Content-Type
    #[arg(long, value_name = "TYPE")]
    pub content_type: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "craft", "tasks", "list", "--scope", "inbox", "--url", "https://x", "--token", "t",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://x"));
        assert_eq!(cli.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_group_names_are_kebab_case() {
        assert!(Cli::try_parse_from(["craft", "daily-notes", "search"]).is_ok());
        assert!(Cli::try_parse_from(["craft", "collections", "delete-items", "c1"]).is_ok());
    }

    #[test]
    fn test_repeatable_ids() {
        let cli =
            Cli::try_parse_from(["craft", "blocks", "delete", "--ids", "a", "--ids", "b"]).unwrap();
        match cli.command {
            Commands::Blocks(BlocksCommands::Delete { ids, confirm, .. }) => {
                assert_eq!(ids, vec!["a", "b"]);
                assert!(!confirm);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_stdin_marker_is_a_value() {
        let cli = Cli::try_parse_from(["craft", "tasks", "add", "--body-file", "-"]).unwrap();
        match cli.command {
            Commands::Tasks(TasksCommands::Add { input, .. }) => {
                assert_eq!(input.body_file, Some(PathBuf::from("-")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
