// src/config/validate.rs

use crate::config::model::{ConfigFile, PluginArtifactEntry, RawConfigFile};
use crate::errors::{Result, SbtRunError};
use crate::types::{ArtifactCoordinate, ResolvedArtifact};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::SbtRunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let plugin_artifacts = raw
            .plugin_artifact
            .iter()
            .map(plugin_artifact)
            .collect::<Vec<_>>();
        Ok(ConfigFile::new_unchecked(raw, plugin_artifacts))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_launcher(cfg)?;
    validate_bootstrap(cfg)?;
    validate_plugin_artifacts(cfg)?;
    validate_system_properties(cfg)?;
    Ok(())
}

fn config_error(msg: impl Into<String>) -> SbtRunError {
    SbtRunError::ConfigError(msg.into())
}

fn validate_launcher(cfg: &RawConfigFile) -> Result<()> {
    let launcher = &cfg.launcher;
    if launcher.group.trim().is_empty() || launcher.name.trim().is_empty() {
        return Err(config_error("[launcher].group and [launcher].name must not be empty"));
    }
    if launcher.main_class.trim().is_empty() {
        return Err(config_error("[launcher].main_class must not be empty"));
    }
    if let Some(ref version) = launcher.version {
        if version.trim().is_empty() {
            return Err(config_error("[launcher].version must not be empty when set"));
        }
    }
    Ok(())
}

fn validate_bootstrap(cfg: &RawConfigFile) -> Result<()> {
    let bootstrap = &cfg.bootstrap;
    if bootstrap.group.trim().is_empty()
        || bootstrap.name.trim().is_empty()
        || bootstrap.kind.trim().is_empty()
    {
        return Err(config_error(
            "[bootstrap].group, [bootstrap].name and [bootstrap].type must not be empty",
        ));
    }
    Ok(())
}

fn validate_plugin_artifacts(cfg: &RawConfigFile) -> Result<()> {
    for (idx, entry) in cfg.plugin_artifact.iter().enumerate() {
        let fields = [
            ("group", entry.group.as_str()),
            ("name", entry.name.as_str()),
            ("version", entry.version.as_str()),
            ("type", entry.kind.as_str()),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(config_error(format!(
                    "[[plugin_artifact]] #{} has an empty `{}`",
                    idx + 1,
                    field
                )));
            }
        }
        if entry.file.as_os_str().is_empty() {
            return Err(config_error(format!(
                "[[plugin_artifact]] '{}:{}' has an empty `file`",
                entry.group, entry.name
            )));
        }
    }
    Ok(())
}

fn validate_system_properties(cfg: &RawConfigFile) -> Result<()> {
    let keys = cfg
        .system_properties
        .keys()
        .chain(cfg.system_property_files.keys());

    for key in keys {
        if key.is_empty() || key.contains('=') || key.chars().any(char::is_whitespace) {
            return Err(config_error(format!(
                "invalid system property name '{key}' (must be non-empty, without '=' or whitespace)"
            )));
        }
        if cfg.system_properties.contains_key(key) && cfg.system_property_files.contains_key(key) {
            return Err(config_error(format!(
                "system property '{key}' is set both as text and as file"
            )));
        }
    }
    Ok(())
}

fn plugin_artifact(entry: &PluginArtifactEntry) -> ResolvedArtifact {
    let coordinate = ArtifactCoordinate::new(&entry.group, &entry.name, &entry.version)
        .with_kind(&entry.kind);
    ResolvedArtifact::new(coordinate, entry.file.clone())
}
