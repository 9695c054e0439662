//! Generic wait-for-condition engine
//!
//! Every long-running provisioning operation ("wait for the cluster to
//! finish installing", "wait until N hosts are discovered") is a wait on a
//! remote condition. This module owns the waiting skeleton once — interval
//! sleeps, wall-clock timeout, cancellation, bounded tolerance for
//! transient refresh failures — and callers supply only the refresh
//! function and the state classification:
//!
//! - **[`config`]**: `PollConfig` (pending/target state sets) and
//!   `CountPollConfig`
//! - **[`engine`]**: [`wait_for_state`] and [`wait_for_count`]
//! - **[`error`]**: `PollError` with the terminal failure reasons
//!
//! State values are opaque strings; their meaning lives entirely with the
//! caller's pending/target sets.

pub mod config;
pub mod engine;
pub mod error;

pub use config::{CountPollConfig, Observation, PollConfig};
pub use engine::{wait_for_count, wait_for_state};
pub use error::PollError;
