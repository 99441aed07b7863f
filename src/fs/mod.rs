// src/fs/mod.rs

//! Filesystem access used by the local repository.
//!
//! The repository only needs a handful of operations, so they live behind a
//! small trait. Production code uses [`RealFileSystem`]; tests use
//! [`mock::MockFileSystem`] to lay out fake repositories in memory.

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write `contents` to `path`, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn is_file(&self, path: &Path) -> bool;

    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Copy a file, creating the destination's parent directories.
    ///
    /// The bytes are written to a temporary sibling of `to` which is then
    /// renamed into place, so `to` never holds a partial copy.
    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        let staging = staging_path(to);
        let staged = self
            .read(from)
            .and_then(|bytes| self.write(&staging, &bytes))
            .and_then(|()| self.rename(&staging, to));

        if staged.is_err() && self.is_file(&staging) {
            let _ = self.remove_file(&staging);
        }
        staged.with_context(|| format!("copying {:?} to {:?}", from, to))
    }
}

/// Temporary name next to `target` used while a copy is in flight.
pub fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.part"))
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::write(path, contents).with_context(|| format!("writing file {:?}", path))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).with_context(|| format!("renaming {:?} to {:?}", from, to))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("removing file {:?}", path))
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        let staging = staging_path(to);
        let copied = fs::copy(from, &staging)
            .map(|_| ())
            .and_then(|()| fs::rename(&staging, to));

        if let Err(e) = copied {
            let _ = fs::remove_file(&staging);
            return Err(e).with_context(|| format!("copying {:?} to {:?}", from, to));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_path_is_a_hidden_sibling() {
        assert_eq!(
            staging_path(Path::new("/repo/g/a/1.0/a-1.0.jar")),
            PathBuf::from("/repo/g/a/1.0/.a-1.0.jar.part")
        );
    }

    #[test]
    fn failed_copy_leaves_nothing_behind() {
        let tmp = tempfile::TempDir::new().unwrap();
        let from = tmp.path().join("src.jar");
        fs::write(&from, b"bytes").unwrap();
        let to = tmp.path().join("dst.jar");
        fs::create_dir(&to).unwrap();

        assert!(RealFileSystem.copy(&from, &to).is_err());
        assert!(to.is_dir());
        assert!(!staging_path(&to).exists());
    }
}
