// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod launch;
pub mod logging;
pub mod repository;
pub mod resolve;
pub mod types;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::model::MARKER_PACKAGING;
use crate::config::{default_config_path, load_and_validate, load_or_default, ConfigFile};
use crate::errors::{Result, SbtRunError};
use crate::exec::{ExecutionOutcome, LaunchBackend, ProcessBackend};
use crate::launch::{DescriptorBuilder, LaunchPlan};
use crate::repository::{LocalRepository, RepositoryClient};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + CLI overrides
/// - the local repository
/// - descriptor building (closure resolution, classpath)
/// - the process backend
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = match args.config {
        Some(ref path) => load_and_validate(path)?,
        None => load_or_default(default_config_path())?,
    }
    .with_overrides(&args.overrides());

    let repository = LocalRepository::open(
        cfg.repository.local_or_default(),
        &cfg.repository.remote,
    );
    let builder =
        DescriptorBuilder::new(repository).debug(tracing::enabled!(tracing::Level::DEBUG));

    if args.dry_run {
        if cfg.launch_disabled() {
            println!("sbtrun dry-run: launch disabled (skip or '{MARKER_PACKAGING}' packaging)");
        } else {
            print_dry_run(&builder.build_plan(&cfg)?);
        }
        return Ok(());
    }

    let mut backend = ProcessBackend;
    launch(&cfg, &builder, &mut backend).await?;
    Ok(())
}

/// Build the descriptor for `cfg` and hand it to `backend`.
///
/// Returns `Ok(None)` without building anything when the launch is
/// disabled. A failed or timed-out run is returned as an error; a
/// completed run (even an unsuccessful one, when the descriptor does not
/// fail on error) is returned as the outcome.
pub async fn launch<R, B>(
    cfg: &ConfigFile,
    builder: &DescriptorBuilder<R>,
    backend: &mut B,
) -> Result<Option<ExecutionOutcome>>
where
    R: RepositoryClient,
    B: LaunchBackend,
{
    if cfg.run.skip {
        info!("Skipping SBT execution");
        return Ok(None);
    }
    if cfg.run.packaging == MARKER_PACKAGING {
        info!(packaging = %cfg.run.packaging, "nothing to build; not launching SBT");
        return Ok(None);
    }

    let descriptor = builder.build(cfg)?;

    debug!(command = %descriptor.display_command(), "Launching SBT");

    let timeout = cfg.run.timeout;
    let outcome = backend.launch(descriptor, timeout).await;

    match outcome {
        ExecutionOutcome::Completed { success: true } => Ok(Some(outcome)),
        ExecutionOutcome::Completed { success: false } => {
            warn!("SBT finished unsuccessfully");
            Ok(Some(outcome))
        }
        ExecutionOutcome::Failed(fault) => Err(SbtRunError::Launch(fault)),
        ExecutionOutcome::TimedOut => Err(SbtRunError::TimedOut { millis: timeout }),
    }
}

/// Dry-run output: the command line, the classpath and the dependency tree.
fn print_dry_run(plan: &LaunchPlan) {
    let d = &plan.descriptor;
    println!("sbtrun dry-run");
    println!("  working dir: {}", d.working_dir.display());
    println!("  command: {}", d.display_command());
    println!();

    println!("classpath ({}):", d.classpath.len());
    for entry in &d.classpath {
        println!("  - {}", entry.display());
    }
    println!();

    println!("dependency tree:");
    for line in plan.closure.render_tree(&plan.launcher.key()).lines() {
        println!("  {line}");
    }
    println!("bootstrap: {}", plan.bootstrap.coordinate);
}
