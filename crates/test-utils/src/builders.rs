#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sbtrun::config::{ConfigFile, PluginArtifactEntry, RawConfigFile};
use sbtrun::config::model::{DEFAULT_BOOTSTRAP_GROUP, DEFAULT_BOOTSTRAP_NAME, DEFAULT_BOOTSTRAP_TYPE};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    /// Defaults plus a bootstrap plugin artifact, which every launch needs.
    pub fn with_bootstrap(file: impl AsRef<Path>) -> Self {
        Self::new().plugin_artifact(
            DEFAULT_BOOTSTRAP_GROUP,
            DEFAULT_BOOTSTRAP_NAME,
            "1.0.0",
            DEFAULT_BOOTSTRAP_TYPE,
            file,
        )
    }

    pub fn skip(mut self, val: bool) -> Self {
        self.config.run.skip = val;
        self
    }

    pub fn basedir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.run.basedir = Some(dir.into());
        self
    }

    pub fn args(mut self, args: &str) -> Self {
        self.config.run.args = args.to_string();
        self
    }

    pub fn jvm_args(mut self, args: &str) -> Self {
        self.config.run.jvm_args = args.to_string();
        self
    }

    pub fn timeout(mut self, millis: i64) -> Self {
        self.config.run.timeout = millis;
        self
    }

    pub fn packaging(mut self, packaging: &str) -> Self {
        self.config.run.packaging = packaging.to_string();
        self
    }

    pub fn java(mut self, java: impl Into<PathBuf>) -> Self {
        self.config.run.java = Some(java.into());
        self
    }

    pub fn launcher_version(mut self, version: &str) -> Self {
        self.config.launcher.version = Some(version.to_string());
        self
    }

    pub fn system_property(mut self, key: &str, value: &str) -> Self {
        self.config
            .system_properties
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn system_property_file(mut self, key: &str, path: impl Into<PathBuf>) -> Self {
        self.config
            .system_property_files
            .insert(key.to_string(), path.into());
        self
    }

    pub fn plugin_artifact(
        mut self,
        group: &str,
        name: &str,
        version: &str,
        kind: &str,
        file: impl AsRef<Path>,
    ) -> Self {
        self.config.plugin_artifact.push(PluginArtifactEntry {
            group: group.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            file: file.as_ref().to_path_buf(),
        });
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Properties map helper for assertions.
pub fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
