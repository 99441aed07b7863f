// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`supervisor`] spawns the child with `tokio::process::Command`, writes
//!   the canned input and waits for exit or cancellation.
//! - [`executor`] adds the watchdog: inline execution without a timeout, or
//!   a background supervisor raced against the timeout window.
//! - [`backend`] provides the `LaunchBackend` trait and the real
//!   `ProcessBackend`; tests replace it with a fake.

pub mod backend;
pub mod executor;
pub mod supervisor;

pub use backend::{LaunchBackend, ProcessBackend};
pub use executor::{execute, ExecutionOutcome, LaunchState};
