//! sourcefetch: pull accepted answers from Q&A sites into the editor
//!
//! A selection is turned into a site-restricted web search, the top hit is
//! downloaded, and the accepted answer's code block is extracted and handed
//! back to the editor for insertion.

pub mod config;
pub mod engines;
pub mod fetch;
pub mod host;
pub mod network;
pub mod pipeline;
pub mod scrape;
pub mod search;

pub use config::Settings;
pub use host::{Extension, Host, FETCH_COMMAND};
pub use pipeline::{Answer, Notification, Outcome, Pipeline, PipelineError, Query, Severity};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
