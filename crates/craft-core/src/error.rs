// crates/craft-core/src/error.rs - Error taxonomy for the request pipeline
//
// Every failure that can stop an invocation before or during the HTTP call
// lands in one enum. A non-2xx response is NOT an error here: it is a normal
// outcome of the dispatcher (see render.rs) that happens to exit non-zero.
//
// CATEGORIES:
// - Configuration: no base URL could be resolved
// - Input: missing or conflicting command inputs
// - Validation: malformed JSON or numeric flag values
// - ConfirmationRequired: destructive command without --confirm
// - Timeout / Transport: the network call itself failed

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, sending, or printing a request
#[derive(Error, Debug)]
pub enum CraftError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Validation(String),

    #[error("Refusing to run {command} without --confirm (destructive action).")]
    ConfirmationRequired { command: String },

    #[error("Unable to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CraftError {
    /// Shorthand for an input error with a formatted message
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input(message.into())
    }

    /// Shorthand for a validation error with a formatted message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for all craft-core operations
pub type CraftResult<T> = Result<T, CraftError>;
