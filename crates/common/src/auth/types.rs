//! Token types and authentication configuration
//!
//! Wire structures for the identity provider's token endpoint (RFC 6749)
//! and the in-memory representation of the cached bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default identity-provider token endpoint for the refresh-token grant.
pub const DEFAULT_TOKEN_URL: &str =
    "https://sso.anvil-cloud.io/auth/realms/anvil/protocol/openid-connect/token";

/// Public OAuth client id used for the offline-token exchange.
pub const PUBLIC_CLIENT_ID: &str = "anvil-cloud-services";

/// A short-lived bearer token with expiry metadata
///
/// Produced by exchanging the offline token at the identity provider. The
/// `expires_at` timestamp is calculated from `expires_in` at creation time
/// so staleness checks never depend on when the response was parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer" for OAuth 2.0)
    pub token_type: String,

    /// Access token lifetime in seconds, as reported by the server
    pub expires_in: i64,

    /// Absolute expiration timestamp (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenSet {
    /// Create a new `TokenSet` with calculated expiration time
    #[must_use]
    pub fn new(access_token: String, expires_in: i64) -> Self {
        let expires_at = if expires_in > 0 {
            Some(Utc::now() + chrono::Duration::seconds(expires_in))
        } else {
            None
        };

        Self { access_token, token_type: "Bearer".to_string(), expires_in, expires_at }
    }

    /// Check if the access token is expired or will expire within the given
    /// threshold
    ///
    /// # Arguments
    /// * `threshold_seconds` - Number of seconds before expiry to consider
    ///   expired (the token manager uses 300 = 5 minutes)
    ///
    /// # Returns
    /// `true` if the token is expired or will expire within the threshold.
    /// Tokens without an expiry timestamp are treated as already stale so
    /// the manager never reuses a token of unknown lifetime.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let threshold = chrono::Duration::seconds(threshold_seconds);
                Utc::now() + threshold >= expires_at
            }
            None => true,
        }
    }

    /// Get seconds until token expiration
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}

/// Token response from the identity provider
///
/// Standard OAuth 2.0 token response format (RFC 6749). The provider may
/// rotate the refresh token in its response; the offline token configured
/// for the process is immutable, so any rotated refresh token is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl From<TokenResponse> for TokenSet {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.expires_in)
    }
}

/// Error body returned by the identity provider on a failed exchange
#[derive(Debug, Serialize, Deserialize)]
pub struct OAuthErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl std::fmt::Display for OAuthErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Configuration for the offline-token exchange
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity-provider token endpoint
    pub token_url: String,

    /// Public OAuth client id
    pub client_id: String,

    /// Long-lived offline token, immutable for the process lifetime
    pub offline_token: String,
}

impl AuthConfig {
    /// Create a configuration for the production identity provider
    #[must_use]
    pub fn new(offline_token: String) -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: PUBLIC_CLIENT_ID.to_string(),
            offline_token,
        }
    }

    /// Override the token endpoint (tests and self-hosted providers)
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Read the offline token from `ANVIL_OFFLINE_TOKEN`
    ///
    /// # Errors
    /// Returns an error message if the variable is unset or empty.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var("ANVIL_OFFLINE_TOKEN") {
            Ok(token) if !token.is_empty() => Ok(Self::new(token)),
            _ => Err("ANVIL_OFFLINE_TOKEN is not set".to_string()),
        }
    }
}
