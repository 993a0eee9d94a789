//! Engine traits and types

use crate::network::HttpResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single link returned by a search engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLink {
    /// Target URL of the hit
    pub href: String,
    /// Title shown by the engine, if any
    pub title: Option<String>,
}

impl SearchLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Parameters for building a search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestParams {
    /// Full search string, site restriction included
    pub query: String,
    /// Maximum number of links wanted
    pub results: u32,
}

impl RequestParams {
    pub fn new(query: impl Into<String>, results: u32) -> Self {
        Self {
            query: query.into(),
            results,
        }
    }
}

/// HTTP request to be made on behalf of an engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// Form body, POST only
    pub form: Option<HashMap<String, String>>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            params: HashMap::new(),
            form: None,
        }
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(url)
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set form data (sent as application/x-www-form-urlencoded)
    pub fn form(mut self, data: HashMap<String, String>) -> Self {
        self.form = Some(data);
        self
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A web search backend: turns a query into a request and a response into links
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Website of the backend
    fn website(&self) -> &str;

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> anyhow::Result<EngineRequest>;

    /// Parse the HTTP response into links, best hit first
    fn response(&self, response: HttpResponse) -> anyhow::Result<Vec<SearchLink>>;
}
