// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;
use std::path::PathBuf;

use url::Url;

/// Configuration for web search functionality
///
/// Loaded once at process start and handed to each provider at
/// construction time; read-only thereafter.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Custom search engine identifier for the official API (`cx` parameter)
    pub engine_id: String,
    /// Optional forward proxy for outbound HTTP
    pub proxy: Option<String>,
    /// Path to the client-secrets file consumed by the auth collaborator
    pub client_secrets_path: Option<PathBuf>,
    /// Default number of results per search
    pub default_num_results: usize,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            engine_id: env::var("SEARCH_ENGINE_ID").unwrap_or_default(),
            proxy: env::var("SEARCH_PROXY").ok(),
            client_secrets_path: env::var("SEARCH_CLIENT_SECRETS").ok().map(PathBuf::from),
            default_num_results: env::var("SEARCH_DEFAULT_NUM_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            request_timeout_ms: env::var("SEARCH_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        // Note: the free provider needs no engine id, so an empty one is
        // only rejected when constructing the official provider
        if self.default_num_results == 0 {
            return Err("Default result count must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if let Some(ref proxy) = self.proxy {
            Url::parse(proxy).map_err(|e| format!("Invalid proxy URL '{}': {}", proxy, e))?;
        }
        Ok(())
    }

    /// Check if the official provider can be configured
    pub fn has_engine_id(&self) -> bool {
        !self.engine_id.is_empty()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine_id: String::new(),
            proxy: None,
            client_secrets_path: None,
            default_num_results: 8,
            request_timeout_ms: 10000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.default_num_results, 8);
        assert_eq!(config.request_timeout_ms, 10000);
        assert!(!config.has_engine_id());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_with_engine_id() {
        let config = SearchConfig {
            engine_id: "e2ef88cb25af145ff".to_string(),
            ..SearchConfig::default()
        };
        assert!(config.has_engine_id());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_num_results() {
        let config = SearchConfig {
            default_num_results: 0,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = SearchConfig {
            request_timeout_ms: 0,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_proxy_url() {
        let mut config = SearchConfig {
            proxy: Some("http://127.0.0.1:1431".to_string()),
            ..SearchConfig::default()
        };
        assert!(config.validate().is_ok());

        config.proxy = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }
}
