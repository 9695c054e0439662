//! Poll configuration and observations

use std::collections::HashSet;
use std::time::Duration;

use super::error::PollError;

/// One observation of a remote entity's state
///
/// The state value is opaque to the engine; `info` is the server's
/// free-text status detail, preserved for diagnostics on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub state: String,
    pub info: String,
}

impl Observation {
    #[must_use]
    pub fn new(state: impl Into<String>, info: impl Into<String>) -> Self {
        Self { state: state.into(), info: info.into() }
    }
}

/// Configuration for a state wait
///
/// Observed states are classified against two disjoint sets: `pending`
/// means keep waiting, `target` means done. Anything outside both is an
/// unexpected-state failure, never a silent retry.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub pending_states: HashSet<String>,
    pub target_states: HashSet<String>,
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollConfig {
    /// Build a validated poll configuration
    ///
    /// # Errors
    /// Returns [`PollError::InvalidConfig`] if the target set is empty or
    /// the pending and target sets overlap.
    pub fn new<P, T>(
        pending: P,
        target: T,
        interval: Duration,
        timeout: Duration,
    ) -> Result<Self, PollError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let pending_states: HashSet<String> = pending.into_iter().map(Into::into).collect();
        let target_states: HashSet<String> = target.into_iter().map(Into::into).collect();

        if target_states.is_empty() {
            return Err(PollError::InvalidConfig("target state set is empty".to_string()));
        }

        if let Some(overlap) = pending_states.intersection(&target_states).next() {
            return Err(PollError::InvalidConfig(format!(
                "state \"{overlap}\" is both pending and target"
            )));
        }

        Ok(Self { pending_states, target_states, interval, timeout })
    }
}

/// Configuration for a count wait
///
/// Succeeds once the refreshed count reaches `expected`; overshoot counts
/// as success.
#[derive(Debug, Clone)]
pub struct CountPollConfig {
    pub expected: usize,
    pub interval: Duration,
    pub timeout: Duration,
}
