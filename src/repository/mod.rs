// src/repository/mod.rs

//! Artifact repository access.
//!
//! - [`layout`] maps coordinates onto the Maven directory layout.
//! - [`manifest`] parses the `.deps.toml` sidecar listing an artifact's
//!   declared dependencies.
//! - [`local`] provides [`LocalRepository`], the production
//!   [`RepositoryClient`], backed by a local directory plus optional
//!   filesystem mirrors.

pub mod layout;
pub mod local;
pub mod manifest;

pub use local::LocalRepository;

use crate::errors::Result;
use crate::types::{ArtifactCoordinate, ResolvedArtifact};

/// Trait abstracting where artifacts come from.
///
/// Implementations are expected to be idempotent: resolving the same
/// coordinate twice yields the same file. Any locking around a shared cache
/// directory is the implementation's business.
pub trait RepositoryClient {
    /// Locate (fetching if needed) the file for `coordinate`.
    ///
    /// Fails with [`crate::errors::RepositoryError`] when the artifact
    /// cannot be located or fetched.
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact>;

    /// Declared (unfiltered) dependencies of an already resolved artifact.
    ///
    /// Fails with `SbtRunError::InvalidMetadata` when the declaration cannot
    /// be interpreted.
    fn dependencies(&self, artifact: &ResolvedArtifact) -> Result<Vec<ArtifactCoordinate>>;
}

impl<R: RepositoryClient + ?Sized> RepositoryClient for &R {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        (**self).resolve(coordinate)
    }

    fn dependencies(&self, artifact: &ResolvedArtifact) -> Result<Vec<ArtifactCoordinate>> {
        (**self).dependencies(artifact)
    }
}
