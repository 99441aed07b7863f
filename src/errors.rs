// src/errors.rs

//! Crate-wide error type and failure classification.

use std::path::PathBuf;

use thiserror::Error;

/// Why an artifact could not be provided by the repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Artifact not found: {coordinate} (looked in {searched:?})")]
    NotFound {
        coordinate: String,
        searched: Vec<PathBuf>,
    },

    #[error("Unable to fetch {coordinate}: {source}")]
    Fetch {
        coordinate: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Abnormal termination of the launched process, or of the machinery
/// around it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchFault {
    #[error("unable to start '{program}': {message}")]
    Spawn { program: String, message: String },

    #[error("error while waiting for the process: {0}")]
    Wait(String),

    #[error("process exited with {}", describe_exit(.code))]
    Exit { code: Option<i32> },

    #[error("process supervisor stopped unexpectedly: {0}")]
    Supervisor(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[derive(Error, Debug)]
pub enum SbtRunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Invalid dependency metadata for {coordinate}: {message}")]
    InvalidMetadata { coordinate: String, message: String },

    #[error("SBT execution exception: {0}")]
    Launch(#[from] LaunchFault),

    #[error("SBT runner timed out after {millis}ms")]
    TimedOut { millis: i64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a failure, used to pick an exit message and
/// by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Artifact lookup, fetch or metadata problems.
    Resolution,
    /// Invalid or incomplete configuration.
    Configuration,
    /// The child process (or its environment) faulted.
    Launch,
    /// The watchdog window elapsed.
    Timeout,
    Other,
}

impl SbtRunError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SbtRunError::Repository(_) | SbtRunError::InvalidMetadata { .. } => {
                FailureKind::Resolution
            }
            SbtRunError::ConfigError(_) | SbtRunError::TomlError(_) => FailureKind::Configuration,
            SbtRunError::Launch(_) => FailureKind::Launch,
            SbtRunError::TimedOut { .. } => FailureKind::Timeout,
            SbtRunError::IoError(_) | SbtRunError::Other(_) => FailureKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SbtRunError>;
