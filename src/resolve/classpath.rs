// src/resolve/classpath.rs

use std::ffi::OsString;
use std::path::PathBuf;

use crate::errors::{Result, SbtRunError};
use crate::types::ResolvedArtifact;

use super::DependencyClosure;

/// Order a closure into classpath entries: `root` first, then every other
/// member sorted by identity.
pub fn assemble_classpath(root: &ResolvedArtifact, closure: &DependencyClosure) -> Vec<PathBuf> {
    let root_key = root.key();
    let mut entries = Vec::with_capacity(closure.len().max(1));
    entries.push(root.file.clone());
    entries.extend(
        closure
            .iter()
            .filter(|artifact| artifact.key() != root_key)
            .map(|artifact| artifact.file.clone()),
    );
    entries
}

/// Join classpath entries with the platform separator.
pub fn join_classpath(entries: &[PathBuf]) -> Result<OsString> {
    std::env::join_paths(entries).map_err(|e| {
        SbtRunError::ConfigError(format!("classpath entry cannot be used on this platform: {e}"))
    })
}
