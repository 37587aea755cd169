// crates/craft-cli/src/commands/completions.rs - Shell completion scripts

use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

use craft_core::Outcome;

use crate::cli::Cli;

/// Write the completion script for `shell` to stdout
pub fn handle(shell: Shell) -> Outcome {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Outcome::Success
}
