// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::ResolvedArtifact;

pub const DEFAULT_LAUNCHER_GROUP: &str = "org.scala-sbt";
pub const DEFAULT_LAUNCHER_NAME: &str = "launcher";
pub const DEFAULT_MAIN_CLASS: &str = "xsbt.boot.Boot";

/// Artifact carrying the `sbt.boot.properties` resource.
pub const DEFAULT_BOOTSTRAP_GROUP: &str = "com.google.code.sbtrun-maven-plugin";
pub const DEFAULT_BOOTSTRAP_NAME: &str = "sbtrun-maven-plugin";
pub const DEFAULT_BOOTSTRAP_TYPE: &str = "maven-plugin";

/// Packaging of projects that have nothing to build.
pub const MARKER_PACKAGING: &str = "pom";

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [run]
/// args = "clean test"
/// jvm_args = "-Xmx2g"
/// timeout = 600000
///
/// [launcher]
/// version = "1.10.0"
///
/// [repository]
/// local = "/home/me/.m2/repository"
/// remote = ["file:///srv/maven-mirror"]
///
/// [system_properties]
/// "sbt.log.noformat" = "true"
///
/// [[plugin_artifact]]
/// group = "com.google.code.sbtrun-maven-plugin"
/// name = "sbtrun-maven-plugin"
/// version = "1.0.1"
/// type = "maven-plugin"
/// file = "lib/sbtrun-maven-plugin-1.0.1.jar"
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub run: RunSection,

    #[serde(default)]
    pub launcher: LauncherSection,

    #[serde(default)]
    pub bootstrap: BootstrapSection,

    #[serde(default)]
    pub repository: RepositorySection,

    /// Text-valued `-D` properties.
    #[serde(default)]
    pub system_properties: BTreeMap<String, String>,

    /// File-valued `-D` properties; relative paths are taken from the
    /// working directory.
    #[serde(default)]
    pub system_property_files: BTreeMap<String, PathBuf>,

    /// The caller's own pre-resolved artifacts.
    #[serde(default)]
    pub plugin_artifact: Vec<PluginArtifactEntry>,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub run: RunSection,
    pub launcher: LauncherSection,
    pub bootstrap: BootstrapSection,
    pub repository: RepositorySection,
    pub system_properties: BTreeMap<String, String>,
    pub system_property_files: BTreeMap<String, PathBuf>,
    pub plugin_artifacts: Vec<ResolvedArtifact>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile, plugin_artifacts: Vec<ResolvedArtifact>) -> Self {
        Self {
            run: raw.run,
            launcher: raw.launcher,
            bootstrap: raw.bootstrap,
            repository: raw.repository,
            system_properties: raw.system_properties,
            system_property_files: raw.system_property_files,
            plugin_artifacts,
        }
    }

    /// True when there is nothing to launch: `skip` is set or the project
    /// packaging is the non-buildable marker type.
    pub fn launch_disabled(&self) -> bool {
        self.run.skip || self.run.packaging == MARKER_PACKAGING
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if overrides.skip {
            self.run.skip = true;
        }
        if let Some(ref basedir) = overrides.basedir {
            self.run.basedir = Some(basedir.clone());
        }
        if let Some(ref args) = overrides.args {
            self.run.args = args.clone();
        }
        if let Some(ref jvm_args) = overrides.jvm_args {
            self.run.jvm_args = jvm_args.clone();
        }
        if let Some(timeout) = overrides.timeout {
            self.run.timeout = timeout;
        }
        if let Some(ref local) = overrides.local_repository {
            self.repository.local = Some(local.clone());
        }
        if !overrides.remote_repositories.is_empty() {
            self.repository.remote = overrides.remote_repositories.clone();
        }
        self
    }
}

/// Values given on the command line; `None` / empty means "keep the file
/// value".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub skip: bool,
    pub basedir: Option<PathBuf>,
    pub args: Option<String>,
    pub jvm_args: Option<String>,
    pub timeout: Option<i64>,
    pub local_repository: Option<PathBuf>,
    pub remote_repositories: Vec<String>,
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Bypass everything; no process is launched.
    #[serde(default)]
    pub skip: bool,

    /// Working directory of the tool; `.` when unset.
    #[serde(default)]
    pub basedir: Option<PathBuf>,

    /// Tool arguments, split on whitespace.
    #[serde(default)]
    pub args: String,

    /// JVM arguments, split on whitespace.
    #[serde(default)]
    pub jvm_args: String,

    /// Watchdog timeout in milliseconds; `0` (or negative) waits forever.
    #[serde(default)]
    pub timeout: i64,

    /// Project packaging; `pom` projects are never launched.
    #[serde(default = "default_packaging")]
    pub packaging: String,

    /// Java executable; defaults to `$JAVA_HOME/bin/java`, then `java`.
    #[serde(default)]
    pub java: Option<PathBuf>,
}

fn default_packaging() -> String {
    "jar".to_string()
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            skip: false,
            basedir: None,
            args: String::new(),
            jvm_args: String::new(),
            timeout: 0,
            packaging: default_packaging(),
            java: None,
        }
    }
}

/// `[launcher]` section: the tool's launcher artifact and entry point.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherSection {
    #[serde(default = "default_launcher_group")]
    pub group: String,

    #[serde(default = "default_launcher_name")]
    pub name: String,

    /// Needed only when the launcher is not among the plugin artifacts.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default = "default_main_class")]
    pub main_class: String,
}

fn default_launcher_group() -> String {
    DEFAULT_LAUNCHER_GROUP.to_string()
}

fn default_launcher_name() -> String {
    DEFAULT_LAUNCHER_NAME.to_string()
}

fn default_main_class() -> String {
    DEFAULT_MAIN_CLASS.to_string()
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            group: default_launcher_group(),
            name: default_launcher_name(),
            version: None,
            main_class: default_main_class(),
        }
    }
}

/// `[bootstrap]` section: which plugin artifact carries the launcher's
/// boot configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapSection {
    #[serde(default = "default_bootstrap_group")]
    pub group: String,

    #[serde(default = "default_bootstrap_name")]
    pub name: String,

    #[serde(default = "default_bootstrap_type", rename = "type")]
    pub kind: String,
}

fn default_bootstrap_group() -> String {
    DEFAULT_BOOTSTRAP_GROUP.to_string()
}

fn default_bootstrap_name() -> String {
    DEFAULT_BOOTSTRAP_NAME.to_string()
}

fn default_bootstrap_type() -> String {
    DEFAULT_BOOTSTRAP_TYPE.to_string()
}

impl Default for BootstrapSection {
    fn default() -> Self {
        Self {
            group: default_bootstrap_group(),
            name: default_bootstrap_name(),
            kind: default_bootstrap_type(),
        }
    }
}

/// `[repository]` section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RepositorySection {
    /// Local repository directory; defaults to `~/.m2/repository`.
    #[serde(default)]
    pub local: Option<PathBuf>,

    /// Remote endpoints, tried in order.
    #[serde(default)]
    pub remote: Vec<String>,
}

impl RepositorySection {
    pub fn local_or_default(&self) -> PathBuf {
        match self.local {
            Some(ref local) => local.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".m2")
                .join("repository"),
        }
    }
}

/// `[[plugin_artifact]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginArtifactEntry {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default = "default_plugin_artifact_type", rename = "type")]
    pub kind: String,
    pub file: PathBuf,
}

fn default_plugin_artifact_type() -> String {
    "jar".to_string()
}
