//! Search module
//!
//! Builds the site-restricted search string and resolves it to the top hit
//! through a pluggable provider.

mod provider;
mod searcher;

pub use provider::{EngineProvider, SearchProvider};
pub use searcher::Searcher;
