//! DuckDuckGo search engine implementation
//!
//! Scrapes the JavaScript-free HTML endpoint, which wraps every hit in a
//! `/l/?uddg=<target>` redirect link.

use super::traits::*;
use crate::network::HttpResponse;
use anyhow::Result;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

const HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo web search engine
pub struct DuckDuckGo {
    html_url: String,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        Self::with_base_url(HTML_URL)
    }

    /// Point the engine at another endpoint (mirrors, tests)
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            html_url: url.into(),
        }
    }

    fn parse_html_results(&self, html: &str) -> Vec<SearchLink> {
        let document = Html::parse_document(html);
        let mut links = Vec::new();

        let result_selector = Selector::parse("div.result").unwrap();
        let title_selector = Selector::parse("a.result__a").unwrap();

        for element in document.select(&result_selector) {
            let title_elem = match element.select(&title_selector).next() {
                Some(t) => t,
                None => continue,
            };

            let href = match title_elem.value().attr("href").and_then(resolve_href) {
                Some(h) => h,
                None => continue,
            };

            let title = title_elem.text().collect::<String>().trim().to_string();
            let mut link = SearchLink::new(href);
            if !title.is_empty() {
                link = link.with_title(title);
            }

            links.push(link);
        }

        links
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a result anchor into the real target URL.
///
/// Returns `None` for relative links and DuckDuckGo-internal pages (ads,
/// "more results").
fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') || href.starts_with('#') || href.is_empty() {
        return None;
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).ok()?;
    let host = url.host_str().unwrap_or_default();

    if host.ends_with("duckduckgo.com") {
        if url.path().starts_with("/l/") {
            return url
                .query_pairs()
                .find(|(k, _)| k == "uddg")
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty());
        }
        return None;
    }

    Some(absolute)
}

impl Engine for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn website(&self) -> &str {
        "https://duckduckgo.com"
    }

    fn request(&self, params: &RequestParams) -> Result<EngineRequest> {
        let mut form_data = HashMap::new();
        form_data.insert("q".to_string(), params.query.clone());
        form_data.insert("b".to_string(), String::new());
        // Region-neutral results
        form_data.insert("kl".to_string(), "wt-wt".to_string());

        let request = EngineRequest::post(&self.html_url)
            .header("Referer", "https://html.duckduckgo.com/")
            .form(form_data);

        Ok(request)
    }

    fn response(&self, response: HttpResponse) -> Result<Vec<SearchLink>> {
        if !response.is_success() {
            return Err(anyhow::anyhow!("HTTP error: {}", response.status));
        }

        // The query is echoed into the page; a CAPTCHA page has no hits
        let links = self.parse_html_results(&response.text);
        if links.is_empty() && response.is_captcha() {
            return Err(anyhow::anyhow!("CAPTCHA detected"));
        }

        Ok(links)
    }
}
