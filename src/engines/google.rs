//! Google search engine implementation

use super::traits::*;
use crate::network::HttpResponse;
use anyhow::Result;
use scraper::{Html, Selector};
use url::Url;

const SEARCH_URL: &str = "https://www.google.com/search";

/// Google web search engine
pub struct Google {
    base_url: String,
}

impl Google {
    pub fn new() -> Self {
        Self::with_base_url(SEARCH_URL)
    }

    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            base_url: url.into(),
        }
    }

    fn parse_results(&self, html: &str) -> Vec<SearchLink> {
        let document = Html::parse_document(html);
        let mut links = Vec::new();

        // Main result selector
        let result_selector = Selector::parse("div.g").unwrap();
        let title_selector = Selector::parse("h3").unwrap();
        let link_selector = Selector::parse("a").unwrap();

        for element in document.select(&result_selector) {
            let title = element
                .select(&title_selector)
                .next()
                .map(|t| t.text().collect::<String>())
                .unwrap_or_default();

            if title.is_empty() {
                continue;
            }

            let href = element
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(resolve_href);

            if let Some(href) = href {
                links.push(SearchLink::new(href).with_title(title));
            }
        }

        links
    }
}

impl Default for Google {
    fn default() -> Self {
        Self::new()
    }
}

/// Google's basic HTML wraps hits in `/url?q=<target>`; anything else
/// relative is navigation.
fn resolve_href(href: &str) -> Option<String> {
    if let Some(rest) = href.strip_prefix("/url?") {
        let url = Url::parse(&format!("https://www.google.com/url?{}", rest)).ok()?;
        return url
            .query_pairs()
            .find(|(k, _)| k == "q" || k == "url")
            .map(|(_, v)| v.into_owned())
            .filter(|v| v.starts_with("http"));
    }

    if href.is_empty() || href.starts_with('/') || href.starts_with('#') {
        return None;
    }

    Some(href.to_string())
}

impl Engine for Google {
    fn name(&self) -> &str {
        "google"
    }

    fn website(&self) -> &str {
        "https://www.google.com"
    }

    fn request(&self, params: &RequestParams) -> Result<EngineRequest> {
        let request = EngineRequest::get(&self.base_url)
            .param("q", params.query.clone())
            .param("hl", "en")
            .param("num", params.results.max(1).to_string());

        Ok(request)
    }

    fn response(&self, response: HttpResponse) -> Result<Vec<SearchLink>> {
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        let links = self.parse_results(&response.text);
        if links.is_empty() && response.is_captcha() {
            return Err(anyhow::anyhow!("CAPTCHA detected"));
        }

        Ok(links)
    }
}
