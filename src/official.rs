// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Official search provider
//!
//! Google Custom Search JSON API with link extraction. The one failure
//! mode with a known, stable shape (the structured `{error: {code,
//! message}}` body) is normalized into a returned value; transport
//! failures, malformed bodies, and credential-acquisition failures
//! propagate untouched.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::credentials::CredentialSource;
use crate::types::{ApiRejection, LinkResult, OfficialOutcome, SearchError};

const CSE_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Authenticated search provider against the official API
pub struct OfficialSearchProvider {
    engine_id: String,
    credentials: Arc<dyn CredentialSource>,
    client: Client,
}

impl OfficialSearchProvider {
    /// Create a provider for the configured search engine
    ///
    /// # Errors
    /// - `SearchError::InvalidConfig` - no search engine id configured
    /// - `SearchError::Transport` - HTTP client construction failed
    pub fn new(
        config: &SearchConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, SearchError> {
        if !config.has_engine_id() {
            return Err(SearchError::InvalidConfig {
                reason: "search engine id is required for the official provider".to_string(),
            });
        }

        let mut builder = Client::builder().timeout(Duration::from_millis(config.request_timeout_ms));
        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            engine_id: config.engine_id.clone(),
            credentials,
            client: builder.build()?,
        })
    }

    /// Perform a search, returning result links or a recognized rejection.
    ///
    /// An empty query returns an empty link set without fetching a
    /// credential or sending a request. A recognized structured API error
    /// comes back as `Ok(Err(ApiRejection))`, never as a propagated
    /// failure.
    ///
    /// # Errors
    /// - `SearchError::Credential` - credential acquisition failed
    /// - `SearchError::Transport` - network failure
    /// - `SearchError::Parse` - response or error body was not valid JSON
    pub async fn search(&self, query: &str, limit: usize) -> Result<OfficialOutcome, SearchError> {
        if query.is_empty() {
            debug!("Empty query, skipping API call");
            return Ok(Ok(Vec::new()));
        }

        let credential = self.credentials.current_credential().await?;

        debug!("Official search: query='{}', num={}", query, limit);

        let num = limit.to_string();
        let response = self
            .client
            .get(CSE_API_URL)
            .bearer_auth(credential.bearer())
            .query(&[
                ("q", query),
                ("cx", self.engine_id.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let rejection = map_api_error(&body)?;
            warn!("Official search rejected: {}", rejection);
            return Ok(Err(rejection));
        }

        let links = extract_links(&body)?;
        info!("Official search complete: {} links", links.len());
        Ok(Ok(links))
    }
}

/// Map a structured API error body into a typed rejection.
///
/// A body that is not the documented `{error: {code, message}}` shape is
/// not normalized; it fails parsing and propagates.
fn map_api_error(body: &str) -> Result<ApiRejection, SearchError> {
    let parsed: ApiErrorBody = serde_json::from_str(body)?;

    if parsed.error.code == 403 && parsed.error.message.contains("invalid API key") {
        Ok(ApiRejection::InvalidCredential)
    } else {
        Ok(ApiRejection::Provider(format!(
            "{}: {}",
            parsed.error.code, parsed.error.message
        )))
    }
}

/// Flatten a success body into its result links, preserving rank order.
///
/// A missing `items` field means no results. Items without a `link` field
/// are skipped rather than failing the whole call.
fn extract_links(body: &str) -> Result<Vec<LinkResult>, SearchError> {
    let parsed: CseResponse = serde_json::from_str(body)?;

    Ok(parsed
        .items
        .into_iter()
        .filter_map(|item| match item.link {
            Some(link) => Some(LinkResult { link }),
            None => {
                warn!("Search item missing link field, skipping");
                None
            }
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: i64,
    message: String,
}
