// src/exec/backend.rs

//! Pluggable launch backend.
//!
//! The top-level run logic hands a finished [`LaunchDescriptor`] to a
//! `LaunchBackend` instead of spawning processes itself, so tests can swap
//! in a fake that records descriptors and returns canned outcomes.

use std::future::Future;
use std::pin::Pin;

use crate::launch::LaunchDescriptor;

use super::executor::{execute, ExecutionOutcome};

/// Trait abstracting how a launch descriptor is executed.
pub trait LaunchBackend: Send {
    /// Run `descriptor`, waiting at most `timeout_millis` (`<= 0`: no
    /// limit), and report the outcome.
    fn launch(
        &mut self,
        descriptor: LaunchDescriptor,
        timeout_millis: i64,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + '_>>;
}

/// Backend that starts a real child process via [`execute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBackend;

impl LaunchBackend for ProcessBackend {
    fn launch(
        &mut self,
        descriptor: LaunchDescriptor,
        timeout_millis: i64,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + '_>> {
        Box::pin(async move { execute(&descriptor, timeout_millis).await })
    }
}
