//! Terminal failure reasons for wait operations

use std::time::Duration;

use thiserror::Error;

use crate::api::ClientError;

/// Errors ending a wait operation
///
/// Each variant preserves the last observed remote state or message so
/// operators can diagnose a failed wait without re-querying the API.
#[derive(Debug, Error)]
pub enum PollError {
    /// The entity reported a state outside both the pending and target sets
    #[error("entity entered unexpected state \"{state}\": {info}")]
    UnexpectedState { state: String, info: String },

    /// The wait-level timeout elapsed before a terminal state was observed
    #[error("wait timed out after {waited:?} (last observed state: {last_state:?}, info: {last_info:?})")]
    Timeout { waited: Duration, last_state: Option<String>, last_info: Option<String> },

    /// The caller cancelled the wait
    #[error("wait cancelled")]
    Cancelled,

    /// Refreshing the observed state failed fatally, or transiently too
    /// many times in a row
    #[error("state refresh failed after {attempts} attempt(s): {source}")]
    RefreshFailed { attempts: u32, source: ClientError },

    /// The poll configuration is unusable
    #[error("invalid poll configuration: {0}")]
    InvalidConfig(String),
}
