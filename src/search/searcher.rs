//! Site-restricted search returning the top hit

use super::provider::SearchProvider;
use crate::pipeline::{PipelineError, SearchResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a query to the URL of the best matching page on one site
pub struct Searcher {
    provider: Arc<dyn SearchProvider>,
    target_domain: String,
    results_per_page: u32,
}

impl Searcher {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        target_domain: impl Into<String>,
        results_per_page: u32,
    ) -> Self {
        Self {
            provider,
            target_domain: target_domain.into(),
            results_per_page: results_per_page.max(1),
        }
    }

    /// `"<query> in <language> site:<target-domain>"`
    pub fn build_query(&self, query: &str, language: &str) -> String {
        format!("{} in {} site:{}", query, language, self.target_domain)
    }

    /// Search and return the first link's href
    pub async fn search(&self, query: &str, language: &str) -> Result<SearchResult, PipelineError> {
        let search_string = self.build_query(query, language);
        debug!("Searching {} for '{}'", self.provider.name(), search_string);

        let links = self
            .provider
            .links(&search_string, self.results_per_page)
            .await
            .map_err(|e| {
                warn!("Search provider {} failed: {}", self.provider.name(), e);
                PipelineError::search_provider(e)
            })?;

        let first = links.into_iter().next().ok_or(PipelineError::NoResults)?;

        Ok(SearchResult { url: first.href })
    }
}
