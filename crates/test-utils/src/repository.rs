use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use sbtrun::errors::{RepositoryError, Result, SbtRunError};
use sbtrun::repository::RepositoryClient;
use sbtrun::types::{ArtifactCoordinate, ArtifactKey, ResolvedArtifact};

/// In-memory repository whose dependency graph is declared by the test.
///
/// Every artifact added with [`InMemoryRepository::artifact`] resolves to
/// `/repo/<group>/<name>-<version>.<type>`. Resolve calls are counted per
/// identity so tests can check that nothing was fetched twice.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    artifacts: HashMap<ArtifactKey, Vec<ArtifactCoordinate>>,
    broken_metadata: HashSet<ArtifactKey>,
    resolve_calls: Mutex<HashMap<ArtifactKey, usize>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `coordinate` with its declared dependencies.
    pub fn artifact(mut self, coordinate: &ArtifactCoordinate, deps: Vec<ArtifactCoordinate>) -> Self {
        self.artifacts.insert(coordinate.key(), deps);
        self
    }

    /// Register `coordinate` with metadata that fails to parse.
    pub fn broken(mut self, coordinate: &ArtifactCoordinate) -> Self {
        self.artifacts.insert(coordinate.key(), Vec::new());
        self.broken_metadata.insert(coordinate.key());
        self
    }

    pub fn path_for(coordinate: &ArtifactCoordinate) -> PathBuf {
        PathBuf::from(format!(
            "/repo/{}/{}-{}.{}",
            coordinate.group, coordinate.name, coordinate.version, coordinate.kind
        ))
    }

    pub fn resolve_count(&self, coordinate: &ArtifactCoordinate) -> usize {
        let calls = self.resolve_calls.lock().unwrap();
        calls.get(&coordinate.key()).copied().unwrap_or(0)
    }

    pub fn total_resolve_calls(&self) -> usize {
        self.resolve_calls.lock().unwrap().values().sum()
    }
}

impl RepositoryClient for InMemoryRepository {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        let key = coordinate.key();
        *self.resolve_calls.lock().unwrap().entry(key.clone()).or_insert(0) += 1;

        if !self.artifacts.contains_key(&key) {
            return Err(RepositoryError::NotFound {
                coordinate: coordinate.to_string(),
                searched: vec![PathBuf::from("/repo")],
            }
            .into());
        }
        Ok(ResolvedArtifact::new(coordinate.clone(), Self::path_for(coordinate)))
    }

    fn dependencies(&self, artifact: &ResolvedArtifact) -> Result<Vec<ArtifactCoordinate>> {
        let key = artifact.key();
        if self.broken_metadata.contains(&key) {
            return Err(SbtRunError::InvalidMetadata {
                coordinate: artifact.coordinate.to_string(),
                message: "unparsable dependency declaration".to_string(),
            });
        }
        Ok(self.artifacts.get(&key).cloned().unwrap_or_default())
    }
}
