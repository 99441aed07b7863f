// src/repository/local.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::{RepositoryError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::{ArtifactCoordinate, ResolvedArtifact};

use super::layout::{artifact_path, manifest_file_name, manifest_path};
use super::manifest::parse_manifest;
use super::RepositoryClient;

/// Repository backed by a local Maven-layout directory.
///
/// Remote endpoints are honoured only when they are reachable through the
/// filesystem (a plain directory or a `file://` URL). Artifacts found in
/// such a mirror are copied into the local directory before being returned,
/// together with their dependency manifest.
#[derive(Debug, Clone)]
pub struct LocalRepository<F: FileSystem = RealFileSystem> {
    fs: F,
    root: PathBuf,
    mirrors: Vec<PathBuf>,
}

impl LocalRepository<RealFileSystem> {
    pub fn open(root: impl Into<PathBuf>, remotes: &[String]) -> Self {
        Self::with_fs(RealFileSystem, root, remotes)
    }
}

impl<F: FileSystem> LocalRepository<F> {
    pub fn with_fs(fs: F, root: impl Into<PathBuf>, remotes: &[String]) -> Self {
        let root = root.into();
        let mirrors = remotes
            .iter()
            .filter_map(|endpoint| mirror_dir(endpoint))
            .collect::<Vec<_>>();

        debug!(root = ?root, ?mirrors, "local repository opened");

        Self { fs, root, mirrors }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mirrors(&self) -> &[PathBuf] {
        &self.mirrors
    }

    /// Copy an artifact and its manifest from `mirror` into this
    /// repository.
    ///
    /// The manifest goes first: a local artifact without its manifest would
    /// later pass for a leaf. If the artifact copy fails, a manifest copied
    /// by this call is removed again.
    fn fetch_from_mirror(
        &self,
        coordinate: &ArtifactCoordinate,
        mirror: &Path,
        local_file: &Path,
    ) -> Result<()> {
        let fetch_err = |source: anyhow::Error| RepositoryError::Fetch {
            coordinate: coordinate.to_string(),
            source,
        };

        info!(
            coordinate = %coordinate,
            mirror = ?mirror,
            "downloading artifact from mirror"
        );

        let remote_manifest = mirror.join(manifest_path(coordinate));
        let local_manifest = self.root.join(manifest_path(coordinate));
        let mut copied_manifest = false;
        if self.fs.is_file(&remote_manifest) && !self.fs.is_file(&local_manifest) {
            self.fs
                .copy(&remote_manifest, &local_manifest)
                .map_err(fetch_err)?;
            copied_manifest = true;
        }

        if let Err(e) = self.fs.copy(&mirror.join(artifact_path(coordinate)), local_file) {
            if copied_manifest {
                if let Err(cleanup) = self.fs.remove_file(&local_manifest) {
                    warn!(error = %cleanup, path = ?local_manifest, "could not remove copied manifest");
                }
            }
            return Err(fetch_err(e).into());
        }

        Ok(())
    }

    /// Look for a missing manifest on the mirrors and copy the first one
    /// found to `local_manifest`.
    fn fetch_manifest(&self, coordinate: &ArtifactCoordinate, local_manifest: &Path) -> Result<bool> {
        for mirror in &self.mirrors {
            let remote_manifest = mirror.join(manifest_path(coordinate));
            if !self.fs.is_file(&remote_manifest) {
                continue;
            }
            debug!(coordinate = %coordinate, mirror = ?mirror, "fetching manifest from mirror");
            self.fs
                .copy(&remote_manifest, local_manifest)
                .map_err(|source| RepositoryError::Fetch {
                    coordinate: coordinate.to_string(),
                    source,
                })?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Candidate locations for the manifest of `artifact`: next to its file
    /// first, then the standard location in this repository.
    fn manifest_candidates(&self, artifact: &ResolvedArtifact) -> Vec<PathBuf> {
        let sibling = artifact
            .file
            .with_file_name(manifest_file_name(&artifact.coordinate));
        let standard = self.root.join(manifest_path(&artifact.coordinate));

        if sibling == standard {
            vec![sibling]
        } else {
            vec![sibling, standard]
        }
    }
}

impl<F: FileSystem> RepositoryClient for LocalRepository<F> {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        let local_file = self.root.join(artifact_path(coordinate));

        if self.fs.is_file(&local_file) {
            debug!(coordinate = %coordinate, file = ?local_file, "artifact found locally");
            return Ok(ResolvedArtifact::new(coordinate.clone(), local_file));
        }

        for mirror in &self.mirrors {
            if self.fs.is_file(&mirror.join(artifact_path(coordinate))) {
                self.fetch_from_mirror(coordinate, mirror, &local_file)?;
                return Ok(ResolvedArtifact::new(coordinate.clone(), local_file));
            }
        }

        let mut searched = vec![self.root.clone()];
        searched.extend(self.mirrors.iter().cloned());
        Err(RepositoryError::NotFound {
            coordinate: coordinate.to_string(),
            searched,
        }
        .into())
    }

    fn dependencies(&self, artifact: &ResolvedArtifact) -> Result<Vec<ArtifactCoordinate>> {
        let candidates = self.manifest_candidates(artifact);
        let mut found = candidates.iter().find(|c| self.fs.is_file(c)).cloned();

        if found.is_none() {
            let local_manifest = self.root.join(manifest_path(&artifact.coordinate));
            if self.fetch_manifest(&artifact.coordinate, &local_manifest)? {
                found = Some(local_manifest);
            }
        }

        if let Some(manifest) = found {
            let contents = self
                .fs
                .read_to_string(&manifest)
                .map_err(|source| RepositoryError::Fetch {
                    coordinate: artifact.coordinate.to_string(),
                    source,
                })?;
            return parse_manifest(&artifact.coordinate, &contents);
        }

        debug!(
            coordinate = %artifact.coordinate,
            "no dependency manifest; treating artifact as a leaf"
        );
        Ok(Vec::new())
    }
}

/// Translate a remote endpoint into a mirror directory, if it is reachable
/// through the filesystem.
fn mirror_dir(endpoint: &str) -> Option<PathBuf> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return None;
    }

    if let Some(path) = endpoint.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }

    if endpoint.contains("://") {
        warn!(
            endpoint,
            "remote repository is not reachable through the filesystem; skipping"
        );
        return None;
    }

    Some(PathBuf::from(endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_endpoints_are_filtered() {
        assert_eq!(mirror_dir("file:///srv/m2"), Some(PathBuf::from("/srv/m2")));
        assert_eq!(mirror_dir("/srv/m2"), Some(PathBuf::from("/srv/m2")));
        assert_eq!(mirror_dir("https://repo1.maven.org/maven2"), None);
        assert_eq!(mirror_dir("  "), None);
    }
}
