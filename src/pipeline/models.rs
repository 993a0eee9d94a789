//! Values flowing through a single pipeline run

use super::error::PipelineError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Selected text plus the document's language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub language: String,
}

impl Query {
    /// Build a query, collapsing the selection onto one line
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: WHITESPACE.replace_all(text.trim(), " ").into_owned(),
            language: language.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// First hit returned by the searcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
}

/// Raw body returned by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub html: String,
}

/// Extracted answer; empty means nothing was found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Searching,
    Fetching,
    Scraping,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Searching => write!(f, "searching"),
            Self::Fetching => write!(f, "fetching"),
            Self::Scraping => write!(f, "scraping"),
        }
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
}

/// A message for the host's notification area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Effect of one run, for the host to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Empty query; nothing happened
    Skipped,
    /// Another run was in flight; this one was ignored
    Busy,
    /// Insert the answer at the cursor
    Inserted(Answer),
    /// The page had no accepted answer block
    NotFound,
    /// A stage failed; nothing to insert
    Failed(PipelineError),
}

impl Outcome {
    /// Text to insert into the document, if any
    pub fn insertion(&self) -> Option<&str> {
        match self {
            Self::Inserted(answer) => Some(&answer.text),
            _ => None,
        }
    }

    /// Notification to show for this outcome, if any
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Inserted(_) => Some(Notification::success("Answer inserted")),
            Self::NotFound => Some(Notification::warning("No answer found :(")),
            Self::Failed(err) => Some(Notification::warning(err.to_string())),
            Self::Skipped | Self::Busy => None,
        }
    }
}
