//! # Anvil Client
//!
//! Client core for driving long-running provisioning workflows through the
//! Anvil REST API.
//!
//! This crate contains:
//! - [`api`]: the authenticated transport (`ApiClient`) with typed and raw
//!   request helpers and a classified error taxonomy
//! - [`poll`]: a generic wait-for-condition engine behind every
//!   "wait until the cluster reaches state X" operation
//! - [`validations`]: normalization and readiness gating over the server's
//!   heterogeneous validation records
//!
//! ## Architecture
//! - Authentication is injected through
//!   [`anvil_common::auth::AccessTokenProvider`]; one shared
//!   `TokenManager` serves any number of concurrent `ApiClient` users
//! - The transport performs single attempts; retry policy lives in the
//!   poll engine, which classifies errors as transient or fatal

pub mod api;
pub mod poll;
pub mod validations;

pub use api::{ApiClient, ApiClientConfig, ClientError};
pub use poll::{wait_for_count, wait_for_state, CountPollConfig, Observation, PollConfig, PollError};
pub use validations::{
    RawValidation, RawValidationsInfo, Validation, ValidationCategory, ValidationFilter,
    ValidationSet, ValidationStatus, ValidationType,
};
