// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Free search provider
//!
//! Keyless web search over DuckDuckGo's HTML interface. Backend records
//! are passed through verbatim; this layer adds only the empty-query
//! short-circuit.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::config::SearchConfig;
use crate::types::{SearchError, SearchRecord};

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// Keyless backend returning opaque result records.
///
/// Treated as a black-box dependency: this crate does not define the
/// record schema, only the call shape.
#[async_trait]
pub trait FreeSearchBackend: Send + Sync {
    /// Fetch up to `max_results` records for `query`.
    ///
    /// # Errors
    /// - `SearchError::Transport` - network failure
    /// - `SearchError::Backend` - non-success response from the backend
    async fn fetch(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchRecord>, SearchError>;
}

/// DuckDuckGo HTML backend (no API key required)
pub struct DuckDuckGoBackend {
    client: Client,
}

impl DuckDuckGoBackend {
    /// Create a backend using the configured proxy and timeout
    ///
    /// # Errors
    /// - `SearchError::Transport` - HTTP client construction failed
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        // A realistic browser User-Agent avoids being blocked
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36");

        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl FreeSearchBackend for DuckDuckGoBackend {
    async fn fetch(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Backend {
                status: status.as_u16(),
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        let html = response.text().await?;
        Ok(parse_ddg_html(&html, max_results))
    }
}

/// Free search provider over a pluggable backend
pub struct FreeSearchProvider<B = DuckDuckGoBackend> {
    backend: B,
}

impl FreeSearchProvider<DuckDuckGoBackend> {
    /// Create a provider backed by DuckDuckGo
    ///
    /// # Errors
    /// - `SearchError::Transport` - HTTP client construction failed
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            backend: DuckDuckGoBackend::new(config)?,
        })
    }
}

impl<B: FreeSearchBackend> FreeSearchProvider<B> {
    /// Create a provider over a custom backend
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Perform a search
    ///
    /// Returns the backend's records unmodified, order preserved, at most
    /// `limit` of them. An empty query returns an empty set without any
    /// backend call. Backend failures propagate as-is; there is no retry
    /// or timeout handling at this layer.
    ///
    /// # Errors
    /// Whatever the backend returns; see [`FreeSearchBackend::fetch`].
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        if query.is_empty() {
            debug!("Empty query, skipping backend call");
            return Ok(Vec::new());
        }

        let records = self.backend.fetch(query, limit).await?;
        debug!("Free search returned {} records", records.len());
        Ok(records)
    }
}

/// Parse DuckDuckGo HTML into opaque result records.
///
/// Results sit in `<a class="result__a">` tags with a sibling
/// `<a class="result__snippet">` for the description. Records carry the
/// backend's field names (`title`, `href`, `body`) untouched.
fn parse_ddg_html(html: &str, max_results: usize) -> Vec<SearchRecord> {
    let mut records = Vec::new();

    for part in html.split("class=\"result__a\"").skip(1) {
        if records.len() >= max_results {
            break;
        }

        let Some(href) = extract_href(part) else {
            continue;
        };

        let title = part
            .find('>')
            .and_then(|start| {
                part[start + 1..]
                    .find("</a>")
                    .map(|end| strip_html(&part[start + 1..start + 1 + end]))
            })
            .unwrap_or_default();

        let body = extract_snippet(part).unwrap_or_default();

        if !href.is_empty() && !title.is_empty() {
            records.push(json!({
                "title": title,
                "href": href,
                "body": body,
            }));
        }
    }

    records
}

fn extract_href(part: &str) -> Option<String> {
    let start = part.find("href=\"")? + 6;
    let end = part[start..].find('"')?;
    Some(resolve_ddg_redirect(&part[start..start + end]))
}

fn extract_snippet(part: &str) -> Option<String> {
    let snippet_pos = part.find("class=\"result__snippet\"")?;
    let start = snippet_pos + part[snippet_pos..].find('>')? + 1;
    let end = part[start..].find("</a>")?;
    Some(strip_html(&part[start..start + end]))
}

/// Resolve DuckDuckGo's redirect wrapper to the target URL.
///
/// Hrefs look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=..`
fn resolve_ddg_redirect(href: &str) -> String {
    if let Some(uddg_pos) = href.find("uddg=") {
        let start = uddg_pos + 5;
        let end = href[start..].find('&').unwrap_or(href.len() - start);
        urlencoding::decode(&href[start..start + end])
            .map(|decoded| decoded.into_owned())
            .unwrap_or_default()
    } else if href.starts_with("http") {
        href.to_string()
    } else {
        String::new()
    }
}

/// Decode common HTML entities and drop remaining tags
fn strip_html(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .split('<')
        .map(|part| match part.find('>') {
            Some(pos) => &part[pos + 1..],
            None => part,
        })
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string()
}
