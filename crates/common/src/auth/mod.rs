//! Offline-token authentication with lazy refresh
//!
//! The provisioning API authenticates every call with a short-lived bearer
//! token obtained by exchanging a long-lived offline token at a fixed
//! identity-provider endpoint (`grant_type=refresh_token`). This module owns
//! that exchange:
//!
//! - **[`types`]**: `TokenSet`, `TokenResponse`, `AuthConfig`
//! - **[`token_manager`]**: cached, lazily refreshed token lifecycle
//! - **[`traits`]**: the `AccessTokenProvider` seam used by the API client
//!
//! Refresh is purely reactive: nothing runs on a timer, and a refresh
//! happens at most once per expiry window even under concurrent callers.

pub mod token_manager;
pub mod traits;
pub mod types;

pub use token_manager::{AuthError, TokenManager, STATIC_TOKEN_PREFIX};
pub use traits::AccessTokenProvider;
pub use types::{AuthConfig, OAuthErrorBody, TokenResponse, TokenSet};
