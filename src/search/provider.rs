//! Search providers: anything that maps a query string to ranked links

use crate::engines::{Engine, RequestParams, SearchLink};
use crate::network::Transport;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// External service returning ranked links for a query string
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &str;

    /// Run the query, asking for at most `results_per_page` links
    async fn links(&self, query: &str, results_per_page: u32) -> Result<Vec<SearchLink>>;
}

/// Provider backed by an HTML engine and an HTTP transport
pub struct EngineProvider {
    transport: Arc<dyn Transport>,
    engine: Arc<dyn Engine>,
}

impl EngineProvider {
    pub fn new(transport: Arc<dyn Transport>, engine: Arc<dyn Engine>) -> Self {
        Self { transport, engine }
    }
}

#[async_trait]
impl SearchProvider for EngineProvider {
    fn name(&self) -> &str {
        self.engine.name()
    }

    async fn links(&self, query: &str, results_per_page: u32) -> Result<Vec<SearchLink>> {
        let params = RequestParams::new(query, results_per_page);
        let request = self.engine.request(&params)?;
        let response = self.transport.execute(request).await?;

        let mut links = self.engine.response(response)?;
        links.truncate(results_per_page as usize);

        debug!("Engine {} returned {} links", self.engine.name(), links.len());
        Ok(links)
    }
}
