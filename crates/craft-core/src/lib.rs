// crates/craft-core/src/lib.rs - Craft API client core
//
// Everything between "validated flags" and "bytes on the terminal":
//
// ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
// │ config       │   │ body/parsing │──▶│ request      │──▶│ http         │──▶ render
// │ (url, token) │──▶│ (validation) │   │ (descriptor) │   │ (dispatcher) │
// └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//
// The binary crate (craft-cli) owns argument parsing and the per-command
// handlers; it only talks to this crate through the types re-exported below.

pub mod body;
pub mod config;
pub mod error;
pub mod http;
pub mod parsing;
pub mod render;
pub mod request;

pub use config::{ConfigLayer, ConfigManager, ResolvedConfig};
pub use error::{CraftError, CraftResult};
pub use http::Dispatcher;
pub use render::{ApiResponse, Outcome};
pub use request::{QueryValue, RequestDescriptor};
