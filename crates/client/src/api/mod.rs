//! Anvil provisioning API transport
//!
//! HTTP client for the provisioning REST API. It handles URL construction
//! (base URL + fixed API-version segment), bearer-token injection through
//! the [`AccessTokenProvider`](anvil_common::auth::AccessTokenProvider)
//! seam, JSON serialization, and classification of failures into the
//! transient/fatal taxonomy the poll engine depends on.
//!
//! The transport performs exactly one attempt per call. Retry policy is the
//! caller's concern, so one-shot operations stay simple and testable.

pub mod client;
pub mod errors;

pub use client::{ApiClient, ApiClientConfig};
pub use errors::ClientError;
