// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ConfigOverrides;

/// Command-line arguments for `sbtrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sbtrun",
    version,
    about = "Resolve the sbt launcher and run sbt as a supervised child process.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Sbtrun.toml` in the current working directory; a missing
    /// default file means "all defaults".
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not launch anything.
    #[arg(long)]
    pub skip: bool,

    /// Working directory of the sbt process.
    #[arg(long, value_name = "DIR")]
    pub basedir: Option<PathBuf>,

    /// Arguments passed to sbt, split on whitespace (e.g. "clean test").
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Arguments passed to the JVM, split on whitespace.
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub jvm_args: Option<String>,

    /// Timeout in milliseconds (0 = wait forever).
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Local repository directory (default `~/.m2/repository`).
    #[arg(long, value_name = "DIR")]
    pub local_repository: Option<PathBuf>,

    /// Remote repository endpoint; may be given several times.
    #[arg(long = "remote-repository", value_name = "URL")]
    pub remote_repositories: Vec<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SBTRUN_LOG` or a default level will be used. At `debug`
    /// and below sbt itself is started with `--debug`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the launch command and dependency tree, but don't
    /// start sbt.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            skip: self.skip,
            basedir: self.basedir.clone(),
            args: self.args.clone(),
            jvm_args: self.jvm_args.clone(),
            timeout: self.timeout,
            local_repository: self.local_repository.clone(),
            remote_repositories: self.remote_repositories.clone(),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
