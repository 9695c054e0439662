//! # Anvil Common
//!
//! Shared primitives for the Anvil provisioning client.
//!
//! This crate contains:
//! - Credential configuration and OAuth token wire types
//! - The [`auth::TokenManager`] that exchanges a long-lived offline token
//!   for short-lived bearer tokens
//! - The [`auth::AccessTokenProvider`] seam consumed by the API client
//!
//! ## Architecture
//! - Owns the only shared mutable state in the system (the cached token
//!   pair)
//! - Depended on by `anvil-client`; depends on nothing internal

pub mod auth;

pub use auth::{AccessTokenProvider, AuthConfig, AuthError, TokenManager, TokenSet};
