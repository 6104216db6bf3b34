// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for agent web search

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A raw result record from the free search backend.
///
/// Records are provider-defined and passed through verbatim; no schema is
/// enforced on their fields.
pub type SearchRecord = serde_json::Value;

/// A single link extracted from an official API response item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkResult {
    /// URL of the search result
    pub link: String,
}

/// Outcome of an official search call: extracted links, or a recognized
/// API rejection normalized into a value the agent can act on.
pub type OfficialOutcome = Result<Vec<LinkResult>, ApiRejection>;

/// Structured API errors the official provider recognizes and recovers.
///
/// These are returned values, never propagated failures: only the
/// documented `{error: {code, message}}` body shape is normalized here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiRejection {
    /// The API rejected the key/credential (403 with "invalid API key").
    #[error("Error: The provided Google API key is invalid or missing.")]
    InvalidCredential,

    /// Any other structured API error, carrying its description.
    #[error("Error: {0}")]
    Provider(String),
}

/// Failures this crate does not normalize.
///
/// Everything here propagates to the caller as a hard failure; only
/// [`ApiRejection`] is recovered locally.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network-level failure from the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response or error body that could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-success status from the free search backend.
    #[error("backend error: {status} - {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Credential acquisition failed in the external collaborator.
    #[error("credential error: {reason}")]
    Credential {
        /// The reason acquisition failed
        reason: String,
    },

    /// Configuration rejected at provider construction.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid
        reason: String,
    },
}

/// Serialize a result set to JSON text.
///
/// Output is UTF-8, pretty-printed with 4-space indentation, and leaves
/// non-ASCII characters unescaped. Parsing the string back yields the same
/// sequence in the same order.
pub fn to_json_string(records: &[SearchRecord]) -> Result<String, SearchError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8(buf).expect("serde_json emitted invalid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_result_serialization() {
        let result = LinkResult {
            link: "https://example.com".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"link":"https://example.com"}"#);
    }

    #[test]
    fn test_link_result_deserialization() {
        let json = r#"{"link": "https://example.com"}"#;
        let result: LinkResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.link, "https://example.com");
    }

    #[test]
    fn test_invalid_credential_message_is_fixed() {
        let rejection = ApiRejection::InvalidCredential;
        assert_eq!(
            rejection.to_string(),
            "Error: The provided Google API key is invalid or missing."
        );
    }

    #[test]
    fn test_provider_rejection_carries_description() {
        let rejection = ApiRejection::Provider("500: internal error".to_string());
        assert!(rejection.to_string().contains("internal error"));
    }

    #[test]
    fn test_search_error_display() {
        let error = SearchError::Backend {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(error.to_string().contains("503"));

        let error = SearchError::Credential {
            reason: "token expired".to_string(),
        };
        assert!(error.to_string().contains("token expired"));
    }

    #[test]
    fn test_to_json_string_four_space_indent() {
        let records = vec![json!({"title": "Rust"})];
        let text = to_json_string(&records).unwrap();
        assert!(text.contains("\n    {"));
        assert!(text.contains("\n        \"title\""));
    }

    #[test]
    fn test_to_json_string_non_ascii_unescaped() {
        let records = vec![json!({"title": "東京の天気"})];
        let text = to_json_string(&records).unwrap();
        assert!(text.contains("東京の天気"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_to_json_string_round_trip() {
        let records = vec![
            json!({"title": "a", "href": "http://a", "body": "first"}),
            json!({"title": "b", "href": "http://b", "body": "second"}),
        ];

        let text = to_json_string(&records).unwrap();
        let parsed: Vec<SearchRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_to_json_string_empty_set() {
        let text = to_json_string(&[]).unwrap();
        let parsed: Vec<SearchRecord> = serde_json::from_str(&text).unwrap();
        assert!(parsed.is_empty());
    }
}
