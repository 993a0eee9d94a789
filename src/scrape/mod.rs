//! Answer extraction
//!
//! Pulls the accepted answer's code block out of a Q&A page.

use crate::pipeline::Answer;
use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Accepted answer container → preformatted code block
pub const DEFAULT_ANSWER_SELECTOR: &str = "div.accepted-answer pre code";

static DEFAULT_SCRAPER: Lazy<Scraper> = Lazy::new(Scraper::default);

/// Extracts answer text with a fixed CSS selector
#[derive(Debug, Clone)]
pub struct Scraper {
    selector: Selector,
}

impl Scraper {
    /// Compile the selector up front so a bad one fails at startup, not mid-run
    pub fn new(selector: &str) -> Result<Self> {
        let selector = Selector::parse(selector)
            .map_err(|e| anyhow::anyhow!("Invalid answer selector '{}': {:?}", selector, e))?;
        Ok(Self { selector })
    }

    /// Text content of the first matching element, or an empty answer.
    ///
    /// Never fails: malformed markup is parsed leniently and a missing block
    /// simply means there is no answer.
    pub fn scrape(&self, html: &str) -> Answer {
        let document = Html::parse_document(html);

        let text = document
            .select(&self.selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        Answer::new(text)
    }
}

impl Default for Scraper {
    fn default() -> Self {
        Self {
            selector: Selector::parse(DEFAULT_ANSWER_SELECTOR).unwrap(),
        }
    }
}

/// Scrape with the default accepted-answer selector
pub fn scrape(html: &str) -> Answer {
    DEFAULT_SCRAPER.scrape(html)
}
