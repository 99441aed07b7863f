// src/exec/supervisor.rs

//! Runs one child process to its end, or until cancelled.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::errors::LaunchFault;
use crate::launch::LaunchDescriptor;

use super::ExecutionOutcome;

/// A descriptor turned into a ready-to-spawn command.
#[derive(Debug)]
pub struct PreparedLaunch {
    command: Command,
    program: String,
    input: String,
    fail_on_error: bool,
}

impl PreparedLaunch {
    pub fn from_descriptor(descriptor: &LaunchDescriptor) -> Result<Self, LaunchFault> {
        let program = descriptor.java.display().to_string();
        let args = descriptor.command_args().map_err(|e| LaunchFault::Spawn {
            program: program.clone(),
            message: e.to_string(),
        })?;

        if !descriptor.fork {
            return Err(LaunchFault::Spawn {
                program,
                message: "in-process launch is not supported; fork must be enabled".to_string(),
            });
        }

        let mut command = Command::new(&descriptor.java);
        command
            .args(&args)
            .current_dir(&descriptor.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        Ok(Self {
            command,
            program,
            input: descriptor.input.clone(),
            fail_on_error: descriptor.fail_on_error,
        })
    }
}

/// Spawn the child, feed it the canned input and wait for it.
///
/// - With `cancel_rx = None` this waits for as long as the child runs.
/// - If the cancel channel fires, the child is killed (best effort) and
///   `TimedOut` is returned. If the channel is dropped without a signal the
///   supervisor gives up and the child is killed on drop.
pub async fn supervise(
    mut launch: PreparedLaunch,
    cancel_rx: Option<oneshot::Receiver<()>>,
) -> ExecutionOutcome {
    let mut child = match launch.command.spawn() {
        Ok(child) => child,
        Err(e) => {
            return ExecutionOutcome::Failed(LaunchFault::Spawn {
                program: launch.program,
                message: e.to_string(),
            });
        }
    };

    info!(program = %launch.program, pid = child.id(), "SBT process started");

    if let Some(mut stdin) = child.stdin.take() {
        let input = format!("{}\n", launch.input);
        if let Err(e) = stdin.write_all(input.as_bytes()).await {
            // The child may exit (or close stdin) before reading anything.
            debug!(error = %e, "could not write canned input to SBT process");
        }
        // Dropping stdin closes the pipe.
    }

    let cancelled = async move {
        match cancel_rx {
            Some(rx) => rx.await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        status_res = child.wait() => {
            let status = match status_res {
                Ok(status) => status,
                Err(e) => return ExecutionOutcome::Failed(LaunchFault::Wait(e.to_string())),
            };

            info!(
                exit_code = status.code().unwrap_or(-1),
                success = status.success(),
                "SBT process exited"
            );

            if status.success() {
                ExecutionOutcome::Completed { success: true }
            } else if launch.fail_on_error {
                ExecutionOutcome::Failed(LaunchFault::Exit { code: status.code() })
            } else {
                ExecutionOutcome::Completed { success: false }
            }
        }

        cancel = cancelled => {
            match cancel {
                Ok(()) => {
                    info!(pid = child.id(), "cancellation requested; killing SBT process");
                    if let Err(e) = child.kill().await {
                        warn!(error = %e, "failed to kill SBT process on cancellation");
                    }
                    ExecutionOutcome::TimedOut
                }
                Err(e) => {
                    debug!(error = %e, "cancel channel closed without explicit cancellation");
                    // Child will be killed on drop due to kill_on_drop(true).
                    ExecutionOutcome::Failed(LaunchFault::Supervisor(
                        "supervisor abandoned by its caller".to_string(),
                    ))
                }
            }
        }
    }
}
