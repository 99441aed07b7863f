// src/resolve/mod.rs

//! Transitive dependency resolution and classpath assembly.
//!
//! - [`closure`] holds the deduplicated result set and its recorded edges.
//! - [`filter`] contains the scope / optionality filter pipeline.
//! - [`classpath`] turns a closure into an ordered list of files.
//!
//! The [`Resolver`] itself is synchronous: artifacts are fetched one at a
//! time on the calling thread.

pub mod classpath;
pub mod closure;
pub mod filter;

pub use classpath::{assemble_classpath, join_classpath};
pub use closure::DependencyClosure;
pub use filter::{launch_filter, AndFilter, ArtifactFilter, NonOptionalFilter, ScopeFilter};

use tracing::{debug, warn};

use crate::errors::Result;
use crate::repository::RepositoryClient;
use crate::types::{ArtifactCoordinate, ResolvedArtifact};

/// Depth-first closure resolver over a [`RepositoryClient`].
#[derive(Debug)]
pub struct Resolver<R, F = AndFilter> {
    repository: R,
    filter: F,
}

impl<R: RepositoryClient> Resolver<R, AndFilter> {
    /// Resolver using [`launch_filter`].
    pub fn new(repository: R) -> Self {
        Self::with_filter(repository, launch_filter())
    }
}

impl<R: RepositoryClient, F: ArtifactFilter> Resolver<R, F> {
    pub fn with_filter(repository: R, filter: F) -> Self {
        Self { repository, filter }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Resolve `root` and everything it transitively needs.
    ///
    /// The returned closure contains the root itself. The first failing
    /// lookup aborts the whole pass.
    pub fn resolve_closure(&self, root: &ArtifactCoordinate) -> Result<DependencyClosure> {
        let resolved = self.repository.resolve(root)?;
        self.resolve_closure_from(resolved)
    }

    /// Like [`Resolver::resolve_closure`] for a root whose file is already
    /// known; only its dependencies are looked up.
    pub fn resolve_closure_from(&self, root: ResolvedArtifact) -> Result<DependencyClosure> {
        let mut closure = DependencyClosure::new();
        let root_coordinate = root.coordinate.clone();
        closure.insert(root.clone());
        self.expand(&root, &mut closure)?;

        if closure.has_cycles() {
            warn!(
                root = %root_coordinate,
                "dependency graph contains a cycle; each artifact was resolved once"
            );
        }
        debug!(
            root = %root_coordinate,
            artifacts = closure.len(),
            "dependency closure resolved"
        );

        Ok(closure)
    }

    /// Expand the dependencies of an artifact that is already in `closure`.
    fn expand(&self, artifact: &ResolvedArtifact, closure: &mut DependencyClosure) -> Result<()> {
        let owner = artifact.key();
        let declared = self.repository.dependencies(artifact)?;

        for dep in declared {
            if !self.filter.include(&dep) {
                debug!(
                    dependency = %dep,
                    scope = %dep.scope,
                    optional = dep.optional,
                    "dependency filtered out"
                );
                continue;
            }

            let key = dep.key();
            closure.record_edge(&owner, &key, dep.scope);
            if closure.contains(&key) {
                continue;
            }

            let resolved = self.repository.resolve(&dep)?;
            debug!(
                "CP: {}:{}:{} ({})",
                dep.group, dep.name, dep.kind, dep.scope
            );
            closure.insert(resolved.clone());
            self.expand(&resolved, closure)?;
        }

        Ok(())
    }
}
