//! Settings structures for sourcefetch configuration

use crate::engines::EngineLoader;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main settings structure, loaded from `sourcefetch.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub scrape: ScrapeSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SOURCEFETCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SOURCEFETCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("SOURCEFETCH_ENGINE") {
            self.search.engine = val;
        }
        if let Some(val) = var("SOURCEFETCH_TARGET_DOMAIN") {
            self.search.target_domain = val;
        }
        if let Some(val) = var("SOURCEFETCH_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.search.results_per_page == 0 {
            anyhow::bail!("search.results_per_page must be at least 1");
        }
        if self.search.target_domain.trim().is_empty() {
            anyhow::bail!("search.target_domain must not be empty");
        }
        if !EngineLoader::available_engines().contains(&self.search.engine.as_str()) {
            anyhow::bail!(
                "Unknown engine '{}', expected one of: {}",
                self.search.engine,
                EngineLoader::available_engines().join(", ")
            );
        }
        let timeout = self.outgoing.request_timeout;
        if !(timeout > 0.0 && timeout.is_finite()) {
            anyhow::bail!("outgoing.request_timeout must be a positive number of seconds");
        }
        if Duration::try_from_secs_f64(timeout).is_err() {
            anyhow::bail!("outgoing.request_timeout is too large: {}", timeout);
        }
        scraper::Selector::parse(&self.scrape.answer_selector).map_err(|e| {
            anyhow::anyhow!(
                "Invalid scrape.answer_selector '{}': {:?}",
                self.scrape.answer_selector,
                e
            )
        })?;
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Engine used to resolve queries (duckduckgo, google)
    pub engine: String,
    /// Domain every query is restricted to with `site:`
    pub target_domain: String,
    /// Number of links requested from the engine
    pub results_per_page: u32,
    /// Override for the engine endpoint
    pub base_url: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            engine: "duckduckgo".to_string(),
            target_domain: "stackoverflow.com".to_string(),
            results_per_page: 1,
            base_url: None,
        }
    }
}

/// Answer extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeSettings {
    /// CSS selector of the accepted answer's code block
    pub answer_selector: String,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            answer_selector: crate::scrape::DEFAULT_ANSWER_SELECTOR.to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Fixed user agent (none = random browser string)
    pub useragent: Option<String>,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            useragent: None,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY from the environment
    pub use_env: bool,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            http: None,
            https: None,
            all: None,
            use_env: true,
        }
    }
}
