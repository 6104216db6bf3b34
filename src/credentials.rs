// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Credential handling for the official search API
//!
//! Acquisition, refresh, and persistence belong to an external auth
//! collaborator; this crate only asks for a currently-valid token and
//! attaches it to one request.

use std::fmt;

use async_trait::async_trait;

use crate::types::SearchError;

/// Opaque authorization token for the official search API.
///
/// Never inspected or persisted here; it lives for one call.
#[derive(Clone)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wrap a token issued by the auth collaborator
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Token value for the Authorization header
    pub(crate) fn bearer(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credential {
    // Token value stays out of logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// Source of currently-valid credentials.
///
/// Implementations handle caching and refresh; callers only see the one
/// operation.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Return a credential valid for at least one call.
    ///
    /// # Errors
    /// - `SearchError::Credential` - acquisition or refresh failed
    async fn current_credential(&self) -> Result<Credential, SearchError>;
}

/// Credential source wrapping a fixed token.
///
/// For callers that manage refresh externally and hand in a token that is
/// already valid.
pub struct StaticCredentialSource {
    credential: Credential,
}

impl StaticCredentialSource {
    /// Create a source that always returns the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(token),
        }
    }
}

#[async_trait]
impl CredentialSource for StaticCredentialSource {
    async fn current_credential(&self) -> Result<Credential, SearchError> {
        Ok(self.credential.clone())
    }
}
