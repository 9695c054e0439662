//! Token manager with lazy refresh
//!
//! Owns the cached bearer token for the process:
//! - Exchange of the offline token via the `refresh_token` grant
//! - Expiry tracking with a 5-minute safety buffer
//! - At most one refresh per expiry window, even under concurrent callers
//!
//! Refresh is reactive: it happens on demand inside
//! [`TokenManager::get_access_token`], never on a background timer.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::traits::AccessTokenProvider;
use super::types::{AuthConfig, OAuthErrorBody, TokenResponse, TokenSet};

/// Offline tokens carrying this prefix are used verbatim as the bearer
/// token, with no identity-provider exchange. Enables deterministic tests
/// against mock servers.
pub const STATIC_TOKEN_PREFIX: &str = "static:";

/// Tokens are considered stale this many seconds before their reported
/// expiry, so a refresh always happens before the server rejects them.
const TOKEN_EXPIRY_BUFFER_SECS: i64 = 300;

/// Timeout for the token-exchange HTTP call.
const TOKEN_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Error type for token manager operations
#[derive(Debug, Error)]
pub enum AuthError {
    /// The exchange request never produced a response
    #[error("token request failed: {0}")]
    Request(String),

    /// The identity provider rejected the exchange
    #[error("token endpoint returned status {status}: {detail}")]
    Exchange { status: u16, detail: String },

    /// The response could not be decoded into a token
    #[error("failed to parse token response: {0}")]
    Parse(String),

    /// No offline token configured
    #[error("no offline token configured")]
    MissingCredential,
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Token manager with cached, lazily refreshed bearer tokens
///
/// The cached token pair is the only shared mutable state in the client
/// stack. It is guarded by a single [`RwLock`]: reads take the fast path,
/// and the refresh sequence (check, exchange, store) runs under the write
/// lock so concurrent callers trigger at most one exchange.
pub struct TokenManager {
    config: AuthConfig,
    http: Client,
    current: RwLock<Option<TokenSet>>,
}

impl TokenManager {
    /// Create a new token manager
    ///
    /// The offline token inside `config` is immutable for the lifetime of
    /// the manager; only the cached access token ever changes.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let http = Client::builder()
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, http, current: RwLock::new(None) }
    }

    /// Get a currently valid bearer token
    ///
    /// Fast path: the cached token is present and outside the expiry
    /// buffer. Slow path: acquire the write lock, re-check (another caller
    /// may have refreshed while we waited), then perform the exchange.
    ///
    /// # Errors
    /// Returns [`AuthError`] if no offline token is configured or the
    /// exchange fails. A failed exchange leaves the cache untouched; the
    /// stale token is never silently reused.
    pub async fn get_access_token(&self) -> Result<String, AuthError> {
        if self.config.offline_token.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        // Static tokens bypass the identity provider entirely.
        if self.config.offline_token.starts_with(STATIC_TOKEN_PREFIX) {
            return Ok(self.config.offline_token.clone());
        }

        {
            let cached = self.current.read().await;
            if let Some(tokens) = cached.as_ref() {
                if !tokens.is_expired(TOKEN_EXPIRY_BUFFER_SECS) {
                    return Ok(tokens.access_token.clone());
                }
            }
        }

        let mut guard = self.current.write().await;

        // Re-check under the write lock: a concurrent caller may have
        // completed the refresh while we waited.
        if let Some(tokens) = guard.as_ref() {
            if !tokens.is_expired(TOKEN_EXPIRY_BUFFER_SECS) {
                return Ok(tokens.access_token.clone());
            }
        }

        debug!("cached token missing or stale, exchanging offline token");
        let fresh = self.exchange_offline_token().await?;
        let access_token = fresh.access_token.clone();
        *guard = Some(fresh);

        info!("obtained fresh access token");
        Ok(access_token)
    }

    /// Seconds until the cached token expires, if one is cached
    pub async fn seconds_until_expiry(&self) -> Option<i64> {
        let tokens = self.current.read().await;
        tokens.as_ref().and_then(TokenSet::seconds_until_expiry)
    }

    /// Exchange the offline token for a fresh access token
    ///
    /// Submits the `refresh_token` grant as form-encoded fields to the
    /// configured token endpoint.
    async fn exchange_offline_token(&self) -> Result<TokenSet, AuthError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", self.config.offline_token.as_str()),
        ];

        let response = self.http.post(&self.config.token_url).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<OAuthErrorBody>(&body) {
                Ok(err) => err.to_string(),
                Err(_) => body,
            };
            warn!(status = status.as_u16(), "offline token exchange rejected");
            return Err(AuthError::Exchange { status: status.as_u16(), detail });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(|e| AuthError::Parse(e.to_string()))?;

        if token_response.access_token.is_empty() {
            return Err(AuthError::Parse("response carried an empty access token".to_string()));
        }

        Ok(token_response.into())
    }
}

#[async_trait]
impl AccessTokenProvider for TokenManager {
    async fn access_token(&self) -> Result<String, AuthError> {
        self.get_access_token().await
    }
}
