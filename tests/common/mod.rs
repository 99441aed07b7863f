#![allow(dead_code)]

pub use sbtrun_test_utils::init_tracing;

use sbtrun::types::{ArtifactCoordinate, Scope};

/// `g:<name>:jar:<version>` in the given scope.
pub fn coord(name: &str, version: &str, scope: Scope) -> ArtifactCoordinate {
    ArtifactCoordinate::new("g", name, version).with_scope(scope)
}

/// Run a future with a 10-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(10), f)
        .await
        .expect("Test timed out after 10 seconds")
}
