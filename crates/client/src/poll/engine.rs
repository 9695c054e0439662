//! The waiting skeleton shared by every long-running operation

use std::future::Future;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::config::{CountPollConfig, Observation, PollConfig};
use super::error::PollError;
use crate::api::ClientError;

/// Consecutive transient refresh failures tolerated before the wait gives
/// up. A single flaky response keeps the wait alive; a persistent outage
/// does not stall it until the wall-clock timeout.
const MAX_CONSECUTIVE_REFRESH_ERRORS: u32 = 3;

/// Wait until a remote entity reaches a target state
///
/// On each tick the caller-supplied `refresh` reports the entity's current
/// state. Target states end the wait successfully; pending states sleep
/// `config.interval` and repeat; anything else fails immediately as an
/// unexpected state. Transient refresh errors (network, 5xx) are tolerated
/// up to a small consecutive budget; fatal ones (4xx, auth) end the wait at
/// once. The wall-clock `config.timeout` bounds the whole wait and
/// cancellation is observed before every refresh and during every sleep.
///
/// # Errors
/// [`PollError::UnexpectedState`], [`PollError::Timeout`],
/// [`PollError::Cancelled`], or [`PollError::RefreshFailed`].
pub async fn wait_for_state<F, Fut>(
    config: &PollConfig,
    cancel: &CancellationToken,
    mut refresh: F,
) -> Result<Observation, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Observation, ClientError>>,
{
    let started = Instant::now();
    let deadline = started + config.timeout;
    let mut consecutive_errors: u32 = 0;
    let mut last_observed: Option<Observation> = None;

    loop {
        if cancel.is_cancelled() {
            return Err(PollError::Cancelled);
        }

        match refresh().await {
            Ok(observed) => {
                consecutive_errors = 0;

                if config.target_states.contains(&observed.state) {
                    debug!(state = %observed.state, "target state reached");
                    return Ok(observed);
                }

                if !config.pending_states.contains(&observed.state) {
                    return Err(PollError::UnexpectedState {
                        state: observed.state,
                        info: observed.info,
                    });
                }

                debug!(state = %observed.state, "still pending");
                last_observed = Some(observed);
            }
            Err(err) if err.is_transient() => {
                consecutive_errors += 1;
                warn!(error = %err, attempt = consecutive_errors, "transient refresh failure");

                if consecutive_errors >= MAX_CONSECUTIVE_REFRESH_ERRORS {
                    return Err(PollError::RefreshFailed {
                        attempts: consecutive_errors,
                        source: err,
                    });
                }
            }
            Err(err) => {
                return Err(PollError::RefreshFailed {
                    attempts: consecutive_errors + 1,
                    source: err,
                });
            }
        }

        tick(deadline, config.interval, cancel).await?;
        if Instant::now() >= deadline {
            return Err(PollError::Timeout {
                waited: started.elapsed(),
                last_state: last_observed.as_ref().map(|o| o.state.clone()),
                last_info: last_observed.map(|o| o.info),
            });
        }
    }
}

/// Wait until a count condition is met
///
/// Same skeleton as [`wait_for_state`] with a count predicate: the wait
/// succeeds once `refresh` reports at least `config.expected`. Used for
/// "N hosts with this parent exist and are in an acceptable state".
///
/// # Errors
/// [`PollError::Timeout`], [`PollError::Cancelled`], or
/// [`PollError::RefreshFailed`].
pub async fn wait_for_count<F, Fut>(
    config: &CountPollConfig,
    cancel: &CancellationToken,
    mut refresh: F,
) -> Result<usize, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<usize, ClientError>>,
{
    let started = Instant::now();
    let deadline = started + config.timeout;
    let mut consecutive_errors: u32 = 0;
    let mut last_count: Option<usize> = None;

    loop {
        if cancel.is_cancelled() {
            return Err(PollError::Cancelled);
        }

        match refresh().await {
            Ok(count) => {
                consecutive_errors = 0;

                if count >= config.expected {
                    debug!(count, expected = config.expected, "count condition met");
                    return Ok(count);
                }

                debug!(count, expected = config.expected, "count still below target");
                last_count = Some(count);
            }
            Err(err) if err.is_transient() => {
                consecutive_errors += 1;
                warn!(error = %err, attempt = consecutive_errors, "transient refresh failure");

                if consecutive_errors >= MAX_CONSECUTIVE_REFRESH_ERRORS {
                    return Err(PollError::RefreshFailed {
                        attempts: consecutive_errors,
                        source: err,
                    });
                }
            }
            Err(err) => {
                return Err(PollError::RefreshFailed {
                    attempts: consecutive_errors + 1,
                    source: err,
                });
            }
        }

        tick(deadline, config.interval, cancel).await?;
        if Instant::now() >= deadline {
            return Err(PollError::Timeout {
                waited: started.elapsed(),
                last_state: last_count.map(|c| c.to_string()),
                last_info: None,
            });
        }
    }
}

/// Sleep one interval, clamped to the remaining deadline, aborting early on
/// cancellation.
async fn tick(
    deadline: Instant,
    interval: std::time::Duration,
    cancel: &CancellationToken,
) -> Result<(), PollError> {
    let now = Instant::now();
    if now >= deadline {
        return Ok(());
    }

    let sleep_for = interval.min(deadline - now);
    tokio::select! {
        () = cancel.cancelled() => Err(PollError::Cancelled),
        () = tokio::time::sleep(sleep_for) => Ok(()),
    }
}
