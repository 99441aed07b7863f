// src/launch/builder.rs

//! Turns a validated [`ConfigFile`] into a [`LaunchDescriptor`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ConfigFile;
use crate::errors::{Result, SbtRunError};
use crate::repository::RepositoryClient;
use crate::resolve::{assemble_classpath, DependencyClosure, Resolver};
use crate::types::{ArtifactCoordinate, ResolvedArtifact};

use super::descriptor::{split_arguments, LaunchDescriptor, SystemPropertyValue, CANNED_INPUT};

/// Extra tool argument added when debug logging is enabled.
pub const DEBUG_ARG: &str = "--debug";

/// Works around a jline terminal issue on Windows
/// (https://github.com/jline/jline2/issues/103).
pub const WINDOWS_TERMINAL_JVM_ARG: &str = "-Djline.WindowsTerminal.directConsole=false";

/// A built descriptor together with what went into its classpath.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub descriptor: LaunchDescriptor,
    /// The launcher artifact (first classpath entry).
    pub launcher: ResolvedArtifact,
    pub closure: DependencyClosure,
    pub bootstrap: ResolvedArtifact,
}

pub struct DescriptorBuilder<R> {
    resolver: Resolver<R>,
    debug: bool,
    windows: bool,
}

impl<R: RepositoryClient> DescriptorBuilder<R> {
    pub fn new(repository: R) -> Self {
        Self {
            resolver: Resolver::new(repository),
            debug: false,
            windows: cfg!(windows),
        }
    }

    /// Append [`DEBUG_ARG`] to the tool arguments.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[doc(hidden)]
    pub fn assume_windows(mut self, windows: bool) -> Self {
        self.windows = windows;
        self
    }

    pub fn build(&self, cfg: &ConfigFile) -> Result<LaunchDescriptor> {
        self.build_plan(cfg).map(|plan| plan.descriptor)
    }

    pub fn build_plan(&self, cfg: &ConfigFile) -> Result<LaunchPlan> {
        let bootstrap = find_plugin_artifact(
            cfg,
            &cfg.bootstrap.group,
            &cfg.bootstrap.name,
            &cfg.bootstrap.kind,
        )
        .cloned()
        .ok_or_else(|| missing_plugin_artifact(&cfg.bootstrap.group, &cfg.bootstrap.name))?;

        let (launcher, closure) = self.resolve_launcher(cfg)?;

        let mut classpath = assemble_classpath(&launcher, &closure);
        if !classpath.contains(&bootstrap.file) {
            classpath.push(bootstrap.file.clone());
        }

        let working_dir = cfg.run.basedir.clone().unwrap_or_else(|| PathBuf::from("."));

        let mut args = split_arguments(&cfg.run.args);
        if self.debug {
            args.push(DEBUG_ARG.to_string());
            debug!("  Adding arg '{}'", DEBUG_ARG);
        }

        let mut jvm_args = Vec::new();
        if self.windows {
            jvm_args.push(WINDOWS_TERMINAL_JVM_ARG.to_string());
            debug!("  Adding jvmarg '{}'", WINDOWS_TERMINAL_JVM_ARG);
        }
        for arg in split_arguments(&cfg.run.jvm_args) {
            debug!("  Adding jvmarg '{}'", arg);
            jvm_args.push(arg);
        }

        let system_properties = system_properties(cfg, &working_dir);

        let descriptor = LaunchDescriptor {
            java: java_executable(cfg),
            main_class: cfg.launcher.main_class.clone(),
            working_dir,
            classpath,
            args,
            jvm_args,
            system_properties,
            input: CANNED_INPUT.to_string(),
            fork: true,
            fail_on_error: true,
        };

        Ok(LaunchPlan {
            descriptor,
            launcher,
            closure,
            bootstrap,
        })
    }

    /// Resolve the launcher's closure, rooted either at the pre-resolved
    /// plugin artifact or at the configured coordinate.
    fn resolve_launcher(&self, cfg: &ConfigFile) -> Result<(ResolvedArtifact, DependencyClosure)> {
        let launcher = &cfg.launcher;

        if let Some(found) = find_plugin_artifact(cfg, &launcher.group, &launcher.name, "jar") {
            debug!(launcher = %found.coordinate, "using launcher from plugin artifacts");
            let closure = self.resolver.resolve_closure_from(found.clone())?;
            return Ok((found.clone(), closure));
        }

        let Some(ref version) = launcher.version else {
            return Err(SbtRunError::ConfigError(format!(
                "Unable to locate '{}:{}' in the list of plugin artifacts and no [launcher].version is configured",
                launcher.group, launcher.name
            )));
        };

        let coordinate = ArtifactCoordinate::new(&launcher.group, &launcher.name, version);
        debug!(launcher = %coordinate, "resolving launcher from repository");
        let closure = self.resolver.resolve_closure(&coordinate)?;
        let root = closure
            .get(&coordinate.key())
            .cloned()
            .ok_or_else(|| SbtRunError::ConfigError(format!("launcher {coordinate} missing from its own closure")))?;
        Ok((root, closure))
    }
}

fn find_plugin_artifact<'a>(
    cfg: &'a ConfigFile,
    group: &str,
    name: &str,
    kind: &str,
) -> Option<&'a ResolvedArtifact> {
    cfg.plugin_artifacts
        .iter()
        .find(|a| a.coordinate.matches(group, name, kind))
}

fn missing_plugin_artifact(group: &str, name: &str) -> SbtRunError {
    SbtRunError::ConfigError(format!(
        "Unable to locate '{group}:{name}' in the list of plugin artifacts"
    ))
}

fn system_properties(cfg: &ConfigFile, working_dir: &Path) -> BTreeMap<String, SystemPropertyValue> {
    let mut props = BTreeMap::new();
    for (key, value) in &cfg.system_properties {
        props.insert(key.clone(), SystemPropertyValue::Text(value.clone()));
    }
    for (key, path) in &cfg.system_property_files {
        let path = if path.is_absolute() {
            path.clone()
        } else {
            working_dir.join(path)
        };
        props.insert(key.clone(), SystemPropertyValue::File(path));
    }
    props
}

fn java_executable(cfg: &ConfigFile) -> PathBuf {
    if let Some(ref java) = cfg.run.java {
        return java.clone();
    }
    let exe = if cfg!(windows) { "java.exe" } else { "java" };
    match std::env::var_os("JAVA_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join("bin").join(exe),
        _ => PathBuf::from(exe),
    }
}
