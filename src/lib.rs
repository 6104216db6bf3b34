// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search for autonomous agent nodes
//!
//! Provides a bounded text-search capability with two interchangeable
//! providers:
//! - [`FreeSearchProvider`]: keyless public backend (DuckDuckGo HTML),
//!   raw records passed through verbatim
//! - [`OfficialSearchProvider`]: authenticated Google Custom Search API,
//!   flat link extraction with typed error normalization
//!
//! Both providers are invoked independently by the calling agent; there is
//! no internal dispatcher combining them. Recognized API rejections are
//! returned as values so the agent's control loop never unwinds on them.

pub mod config;
pub mod credentials;
pub mod free;
pub mod official;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use credentials::{Credential, CredentialSource, StaticCredentialSource};
pub use free::{DuckDuckGoBackend, FreeSearchBackend, FreeSearchProvider};
pub use official::OfficialSearchProvider;
pub use types::{
    to_json_string, ApiRejection, LinkResult, OfficialOutcome, SearchError, SearchRecord,
};
