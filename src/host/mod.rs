//! Editor integration
//!
//! The editor implements [`Host`]; the [`Extension`] owns the pipeline,
//! registers its commands on activation and applies run outcomes back to
//! the host.

use crate::pipeline::{Notification, Outcome, Pipeline};
use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info};

/// Name of the command that fetches an answer for the current selection
pub const FETCH_COMMAND: &str = "sourcefetch:fetch";

/// What the extension needs from the editor
pub trait Host {
    /// Selected text in the active editor, `None` without an active editor
    fn selected_text(&self) -> Option<String>;

    /// Name of the active document's language (e.g. "Python")
    fn language(&self) -> String;

    /// Insert text at the cursor, replacing the selection
    fn insert_text(&mut self, text: &str);

    /// Show a message in the notification area
    fn notify(&mut self, notification: Notification);
}

/// Actions the extension can bind to command names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fetch,
}

/// The extension: a pipeline plus the commands currently registered
pub struct Extension {
    pipeline: Pipeline,
    commands: HashMap<String, Command>,
}

impl Extension {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            commands: HashMap::new(),
        }
    }

    /// Register commands; returns their names for the host's command palette
    pub fn activate(&mut self) -> Vec<&str> {
        self.commands.insert(FETCH_COMMAND.to_string(), Command::Fetch);
        info!("Activated with {} command(s)", self.commands.len());
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    /// Drop all command registrations
    pub fn deactivate(&mut self) {
        self.commands.clear();
        info!("Deactivated");
    }

    pub fn is_active(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Run the command registered under `name` against `host`
    pub async fn dispatch<H: Host + ?Sized>(&self, name: &str, host: &mut H) -> Result<Outcome> {
        match self.commands.get(name) {
            Some(Command::Fetch) => Ok(self.fetch(host).await),
            None => Err(anyhow::anyhow!("Command not registered: {}", name)),
        }
    }

    /// Fetch an answer for the host's selection and apply it
    pub async fn fetch<H: Host + ?Sized>(&self, host: &mut H) -> Outcome {
        let selection = match host.selected_text() {
            Some(text) => text,
            None => {
                debug!("No active editor");
                return Outcome::Skipped;
            }
        };

        let language = host.language();
        let outcome = self.pipeline.run(&selection, &language).await;
        apply(&outcome, host);
        outcome
    }
}

/// Apply an outcome to the host: at most one insertion and one notification
pub fn apply<H: Host + ?Sized>(outcome: &Outcome, host: &mut H) {
    if let Some(text) = outcome.insertion() {
        host.insert_text(text);
    }
    if let Some(notification) = outcome.notification() {
        host.notify(notification);
    }
}
