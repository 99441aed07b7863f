// src/exec/executor.rs

//! Bounded execution: run a descriptor inline, or under a watchdog.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::errors::LaunchFault;
use crate::launch::LaunchDescriptor;

use super::supervisor::{supervise, PreparedLaunch};

/// How long a timed-out supervisor gets to kill its child before the
/// executor stops waiting for it.
const KILL_GRACE: Duration = Duration::from_millis(250);

/// Terminal result of one launch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The process ran to its end. `success` is false only for a non-zero
    /// exit when the descriptor does not fail on error.
    Completed { success: bool },
    Failed(LaunchFault),
    /// The watchdog window elapsed first.
    TimedOut,
}

/// Lifecycle of a launch attempt.
///
/// `NotStarted -> Running -> {Completed | Failed | TimedOut}`; a descriptor
/// that cannot even be turned into a command goes straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    NotStarted,
    Running,
    Completed,
    Failed,
    TimedOut,
}

impl LaunchState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LaunchState::Completed | LaunchState::Failed | LaunchState::TimedOut
        )
    }

    fn advance(&mut self, next: LaunchState) {
        debug_assert!(!self.is_terminal(), "launch already finished ({self:?})");
        debug!(from = ?*self, to = ?next, "launch state");
        *self = next;
    }
}

impl From<&ExecutionOutcome> for LaunchState {
    fn from(outcome: &ExecutionOutcome) -> Self {
        match outcome {
            ExecutionOutcome::Completed { .. } => LaunchState::Completed,
            ExecutionOutcome::Failed(_) => LaunchState::Failed,
            ExecutionOutcome::TimedOut => LaunchState::TimedOut,
        }
    }
}

/// Run the process described by `descriptor`.
///
/// - `timeout_millis <= 0`: run inline and wait for the process, however
///   long it takes.
/// - `timeout_millis > 0`: supervise the process on a background task and
///   wait at most that long. When the window elapses the supervisor is told
///   to cancel, which kills the child; termination of the OS process is
///   best effort and not awaited beyond a short grace period.
pub async fn execute(descriptor: &LaunchDescriptor, timeout_millis: i64) -> ExecutionOutcome {
    let mut state = LaunchState::NotStarted;

    let launch = match PreparedLaunch::from_descriptor(descriptor) {
        Ok(launch) => launch,
        Err(fault) => {
            state.advance(LaunchState::Failed);
            return ExecutionOutcome::Failed(fault);
        }
    };

    state.advance(LaunchState::Running);

    let outcome = if timeout_millis <= 0 {
        supervise(launch, None).await
    } else {
        run_with_watchdog(launch, timeout_millis).await
    };

    state.advance(LaunchState::from(&outcome));
    outcome
}

async fn run_with_watchdog(launch: PreparedLaunch, timeout_millis: i64) -> ExecutionOutcome {
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    watch(supervise(launch, Some(cancel_rx)), cancel_tx, timeout_millis).await
}

/// Race a supervisor running on its own task against the timeout window.
///
/// The join handle is the single slot through which the supervisor hands
/// its outcome to this waiter. If the cancel signal can no longer be
/// delivered the supervisor has already finished, and its own outcome is
/// reported instead of `TimedOut`.
async fn watch<F>(supervised: F, cancel_tx: oneshot::Sender<()>, timeout_millis: i64) -> ExecutionOutcome
where
    F: Future<Output = ExecutionOutcome> + Send + 'static,
{
    let window = Duration::from_millis(timeout_millis.unsigned_abs());
    let mut handle = tokio::spawn(supervised);

    match tokio::time::timeout(window, &mut handle).await {
        Ok(joined) => joined_outcome(joined),
        Err(_elapsed) => {
            if cancel_tx.send(()).is_err() {
                debug!("supervisor finished as the window elapsed");
                return match tokio::time::timeout(KILL_GRACE, handle).await {
                    Ok(joined) => joined_outcome(joined),
                    Err(_) => ExecutionOutcome::TimedOut,
                };
            }
            warn!(timeout_ms = timeout_millis, "SBT runner timed out; cancelling");
            if tokio::time::timeout(KILL_GRACE, handle).await.is_err() {
                debug!("supervisor still busy after grace period; leaving it behind");
            }
            ExecutionOutcome::TimedOut
        }
    }
}

fn joined_outcome(joined: Result<ExecutionOutcome, JoinError>) -> ExecutionOutcome {
    joined.unwrap_or_else(|join_err| ExecutionOutcome::Failed(LaunchFault::Supervisor(join_err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!LaunchState::NotStarted.is_terminal());
        assert!(!LaunchState::Running.is_terminal());
        assert!(LaunchState::Completed.is_terminal());
        assert!(LaunchState::Failed.is_terminal());
        assert!(LaunchState::TimedOut.is_terminal());
    }

    #[test]
    fn outcome_maps_to_state() {
        assert_eq!(
            LaunchState::from(&ExecutionOutcome::Completed { success: false }),
            LaunchState::Completed
        );
        assert_eq!(
            LaunchState::from(&ExecutionOutcome::Failed(LaunchFault::Exit { code: Some(1) })),
            LaunchState::Failed
        );
        assert_eq!(LaunchState::from(&ExecutionOutcome::TimedOut), LaunchState::TimedOut);
    }

    #[tokio::test]
    async fn finished_supervisor_keeps_its_outcome() {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        // Nothing listens for the cancel signal any more.
        drop(cancel_rx);
        let supervised = async {
            tokio::time::sleep(Duration::from_millis(80)).await;
            ExecutionOutcome::Completed { success: true }
        };

        let outcome = watch(supervised, cancel_tx, 20).await;
        assert_eq!(outcome, ExecutionOutcome::Completed { success: true });
    }

    #[tokio::test]
    async fn running_supervisor_is_cancelled() {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let supervised = async move {
            match cancel_rx.await {
                Ok(()) => ExecutionOutcome::Completed { success: false },
                Err(_) => ExecutionOutcome::Failed(LaunchFault::Supervisor("dropped".to_string())),
            }
        };

        let outcome = watch(supervised, cancel_tx, 20).await;
        assert_eq!(outcome, ExecutionOutcome::TimedOut);
    }

    #[tokio::test]
    async fn supervisor_inside_window_reports_directly() {
        let (cancel_tx, _cancel_rx) = oneshot::channel::<()>();
        let supervised = async { ExecutionOutcome::Failed(LaunchFault::Exit { code: Some(2) }) };

        let outcome = watch(supervised, cancel_tx, 5_000).await;
        assert_eq!(outcome, ExecutionOutcome::Failed(LaunchFault::Exit { code: Some(2) }));
    }
}
