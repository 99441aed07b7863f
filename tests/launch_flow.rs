mod common;
use crate::common::{init_tracing, with_timeout};

use std::path::PathBuf;

use sbtrun::config::model::{DEFAULT_LAUNCHER_GROUP, DEFAULT_LAUNCHER_NAME};
use sbtrun::errors::{FailureKind, LaunchFault, SbtRunError};
use sbtrun::exec::ExecutionOutcome;
use sbtrun::launch::DescriptorBuilder;
use sbtrun::types::ArtifactCoordinate;
use sbtrun_test_utils::builders::ConfigFileBuilder;
use sbtrun_test_utils::fake_backend::RecordingBackend;
use sbtrun_test_utils::repository::InMemoryRepository;

const BOOTSTRAP_JAR: &str = "/plugins/sbtrun-maven-plugin.jar";

fn repository() -> InMemoryRepository {
    let launcher = ArtifactCoordinate::new(DEFAULT_LAUNCHER_GROUP, DEFAULT_LAUNCHER_NAME, "1.10.0");
    InMemoryRepository::new().artifact(&launcher, vec![])
}

fn config() -> ConfigFileBuilder {
    ConfigFileBuilder::with_bootstrap(BOOTSTRAP_JAR).launcher_version("1.10.0")
}

#[tokio::test]
async fn skip_bypasses_everything() {
    init_tracing();

    let repo = repository();
    // No bootstrap either: nothing may be checked when skipping.
    let cfg = ConfigFileBuilder::new().skip(true).build();
    let builder = DescriptorBuilder::new(&repo);
    let mut backend = RecordingBackend::succeeding();

    let outcome = with_timeout(sbtrun::launch(&cfg, &builder, &mut backend)).await;

    assert!(matches!(outcome, Ok(None)));
    assert!(backend.launched().is_empty());
    assert_eq!(repo.total_resolve_calls(), 0);
}

#[tokio::test]
async fn marker_packaging_is_not_launched() {
    let repo = repository();
    let cfg = ConfigFileBuilder::new().packaging("pom").build();
    let builder = DescriptorBuilder::new(&repo);
    let mut backend = RecordingBackend::succeeding();

    let outcome = with_timeout(sbtrun::launch(&cfg, &builder, &mut backend)).await;

    assert!(matches!(outcome, Ok(None)));
    assert!(backend.launched().is_empty());
    assert_eq!(repo.total_resolve_calls(), 0);
}

#[tokio::test]
async fn successful_launch_passes_timeout_through() {
    let repo = repository();
    let cfg = config().args("compile").timeout(1_500).build();
    let builder = DescriptorBuilder::new(&repo);
    let mut backend = RecordingBackend::succeeding();

    let outcome = with_timeout(sbtrun::launch(&cfg, &builder, &mut backend))
        .await
        .unwrap();

    assert_eq!(outcome, Some(ExecutionOutcome::Completed { success: true }));
    let launched = backend.launched();
    assert_eq!(launched.len(), 1);
    let (descriptor, timeout) = &launched[0];
    assert_eq!(*timeout, 1_500);
    assert_eq!(descriptor.args, vec!["compile"]);
    assert_eq!(descriptor.classpath.last(), Some(&PathBuf::from(BOOTSTRAP_JAR)));
}

#[tokio::test]
async fn unsuccessful_completion_is_returned() {
    let repo = repository();
    let cfg = config().build();
    let builder = DescriptorBuilder::new(&repo);
    let mut backend = RecordingBackend::new(ExecutionOutcome::Completed { success: false });

    let outcome = with_timeout(sbtrun::launch(&cfg, &builder, &mut backend))
        .await
        .unwrap();
    assert_eq!(outcome, Some(ExecutionOutcome::Completed { success: false }));
}

#[tokio::test]
async fn failed_process_is_a_launch_error() {
    let repo = repository();
    let cfg = config().build();
    let builder = DescriptorBuilder::new(&repo);
    let mut backend =
        RecordingBackend::new(ExecutionOutcome::Failed(LaunchFault::Exit { code: Some(1) }));

    let err = with_timeout(sbtrun::launch(&cfg, &builder, &mut backend))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Launch);
    assert_eq!(err.to_string(), "SBT execution exception: process exited with code 1");
}

#[tokio::test]
async fn timed_out_process_is_a_timeout_error() {
    let repo = repository();
    let cfg = config().timeout(50).build();
    let builder = DescriptorBuilder::new(&repo);
    let mut backend = RecordingBackend::new(ExecutionOutcome::TimedOut);

    let err = with_timeout(sbtrun::launch(&cfg, &builder, &mut backend))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Timeout);
    assert!(err.to_string().contains("timed out after 50ms"));
}

#[tokio::test]
async fn build_errors_stop_before_launch() {
    let repo = repository();
    let cfg = ConfigFileBuilder::new().launcher_version("1.10.0").build();
    let builder = DescriptorBuilder::new(&repo);
    let mut backend = RecordingBackend::succeeding();

    let err = with_timeout(sbtrun::launch(&cfg, &builder, &mut backend))
        .await
        .unwrap_err();

    assert!(matches!(err, SbtRunError::ConfigError(_)));
    assert!(backend.launched().is_empty());
}
