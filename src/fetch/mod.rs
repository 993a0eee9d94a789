//! Page download

use crate::network::Transport;
use crate::pipeline::{PageContent, PipelineError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Downloads a result page's HTML
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET `url`; anything but a 200 is a failure
    pub async fn fetch(&self, url: &str) -> Result<PageContent, PipelineError> {
        let response = self.transport.get(url).await.map_err(|e| {
            warn!("Request failed for {}: {}", url, e);
            PipelineError::fetch(e)
        })?;

        if !response.is_ok() {
            warn!("Unexpected status {} for {}", response.status, url);
            return Err(PipelineError::fetch(format!("HTTP status {}", response.status)));
        }

        debug!("Fetched {} bytes from {}", response.text.len(), url);
        Ok(PageContent {
            html: response.text,
        })
    }
}
