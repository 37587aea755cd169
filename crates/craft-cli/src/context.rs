// crates/craft-cli/src/context.rs - Application context passed to handlers
//
// Holds the connection flags from the command line. Configuration is only
// resolved when a handler is ready to send, so a command that fails its own
// validation never complains about a missing URL first.

use anyhow::Result;
use std::io;

use craft_core::render::render;
use craft_core::{ConfigLayer, ConfigManager, Dispatcher, Outcome, RequestDescriptor};

/// Application context that gets passed to command handlers
pub struct Context {
    flags: ConfigLayer,
}

impl Context {
    /// Create a context from the global `--url` / `--token` flags
    pub fn new(url: Option<String>, token: Option<String>) -> Self {
        Self {
            flags: ConfigLayer::new(url, token),
        }
    }

    /// Resolve configuration, send the request, and print the response
    pub async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<Outcome> {
        let config = ConfigManager::resolve_with_env(&self.flags)?;
        let dispatcher = Dispatcher::new(config)?;

        let response = dispatcher.send(&descriptor).await?;

        // Stdio locks must not be held across an await
        let mut out = io::stdout().lock();
        let mut err = io::stderr().lock();
        Ok(render(&response, descriptor.raw, &mut out, &mut err)?)
    }
}
