//! Trait seam between authentication and the API client
//!
//! Abstracting token retrieval behind a trait lets the API client run
//! against the real [`TokenManager`](super::TokenManager) in production and
//! against trivial doubles in tests.

use async_trait::async_trait;

use super::token_manager::AuthError;

/// Trait for producing a currently valid bearer token
///
/// Implementations handle caching and refresh internally; callers simply
/// attach the returned token to the `Authorization` header.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// # Errors
    /// Returns [`AuthError`] if no valid token can be produced.
    async fn access_token(&self) -> Result<String, AuthError>;
}
