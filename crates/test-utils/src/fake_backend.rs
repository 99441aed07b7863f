use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use sbtrun::exec::{ExecutionOutcome, LaunchBackend};
use sbtrun::launch::LaunchDescriptor;

/// A fake backend that:
/// - records every descriptor it was asked to launch (with its timeout)
/// - immediately reports a fixed outcome.
pub struct RecordingBackend {
    outcome: ExecutionOutcome,
    launched: Arc<Mutex<Vec<(LaunchDescriptor, i64)>>>,
}

impl RecordingBackend {
    pub fn new(outcome: ExecutionOutcome) -> Self {
        Self {
            outcome,
            launched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(ExecutionOutcome::Completed { success: true })
    }

    pub fn launched(&self) -> Vec<(LaunchDescriptor, i64)> {
        self.launched.lock().unwrap().clone()
    }
}

impl LaunchBackend for RecordingBackend {
    fn launch(
        &mut self,
        descriptor: LaunchDescriptor,
        timeout_millis: i64,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + '_>> {
        let launched = Arc::clone(&self.launched);
        let outcome = self.outcome.clone();

        Box::pin(async move {
            launched.lock().unwrap().push((descriptor, timeout_millis));
            outcome
        })
    }
}
