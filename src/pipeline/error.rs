//! Terminal failures of a pipeline run

use thiserror::Error;

/// Why a run stopped before producing an answer.
///
/// The `Display` text is the reason shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The search provider call itself failed
    #[error("Search failed: {0}")]
    SearchProvider(String),
    /// The provider answered with zero links
    #[error("No results found :(")]
    NoResults,
    /// Transport error or a non-200 status while downloading the page
    #[error("Failed to fetch page: {0}")]
    Fetch(String),
}

impl PipelineError {
    pub fn search_provider(err: impl std::fmt::Display) -> Self {
        Self::SearchProvider(err.to_string())
    }

    pub fn fetch(err: impl std::fmt::Display) -> Self {
        Self::Fetch(err.to_string())
    }
}
