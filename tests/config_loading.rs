mod common;
use crate::common::init_tracing;

use std::fs;
use std::path::PathBuf;

use sbtrun::config::model::{DEFAULT_BOOTSTRAP_TYPE, DEFAULT_MAIN_CLASS};
use sbtrun::config::{load_and_validate, load_or_default, ConfigFile, ConfigOverrides};
use sbtrun::errors::{FailureKind, SbtRunError};
use sbtrun_test_utils::builders::{props, ConfigFileBuilder};
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
[run]
args = "clean test"
jvm_args = "-Xmx2g"
timeout = 600000
basedir = "/work/project"

[launcher]
version = "1.10.0"

[repository]
local = "/cache/m2"
remote = ["file:///srv/mirror", "https://repo1.maven.org/maven2"]

[system_properties]
"sbt.log.noformat" = "true"

[system_property_files]
"sbt.global.base" = "target/sbt-global"

[[plugin_artifact]]
group = "com.google.code.sbtrun-maven-plugin"
name = "sbtrun-maven-plugin"
version = "1.0.1"
type = "maven-plugin"
file = "lib/sbtrun-maven-plugin-1.0.1.jar"
"#;

fn write_config(tmp: &TempDir, contents: &str) -> PathBuf {
    let path = tmp.path().join("Sbtrun.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn full_config_loads() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let cfg = load_and_validate(write_config(&tmp, FULL_CONFIG)).unwrap();

    assert_eq!(cfg.run.args, "clean test");
    assert_eq!(cfg.run.timeout, 600_000);
    assert_eq!(cfg.run.basedir, Some(PathBuf::from("/work/project")));
    assert_eq!(cfg.run.packaging, "jar");
    assert_eq!(cfg.launcher.version.as_deref(), Some("1.10.0"));
    assert_eq!(cfg.launcher.main_class, DEFAULT_MAIN_CLASS);
    assert_eq!(cfg.repository.local_or_default(), PathBuf::from("/cache/m2"));
    assert_eq!(cfg.repository.remote.len(), 2);
    assert_eq!(cfg.system_properties, props(&[("sbt.log.noformat", "true")]));

    assert_eq!(cfg.plugin_artifacts.len(), 1);
    let bootstrap = &cfg.plugin_artifacts[0];
    assert_eq!(bootstrap.coordinate.kind, DEFAULT_BOOTSTRAP_TYPE);
    assert_eq!(bootstrap.file, PathBuf::from("lib/sbtrun-maven-plugin-1.0.1.jar"));
}

#[test]
fn empty_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let cfg = load_and_validate(write_config(&tmp, "")).unwrap();

    assert!(!cfg.run.skip);
    assert_eq!(cfg.run.timeout, 0);
    assert!(cfg.plugin_artifacts.is_empty());
    assert!(!cfg.launch_disabled());
}

#[test]
fn missing_default_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let cfg = load_or_default(tmp.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.launcher.main_class, DEFAULT_MAIN_CLASS);
}

#[test]
fn missing_explicit_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = load_and_validate(tmp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SbtRunError::IoError(_)));
}

#[test]
fn unknown_field_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = load_and_validate(write_config(&tmp, "[run]\nfrobnicate = true\n")).unwrap_err();

    assert!(matches!(err, SbtRunError::TomlError(_)));
    assert_eq!(err.kind(), FailureKind::Configuration);
}

#[test]
fn bad_property_names_are_rejected() {
    for key in ["", "a=b", "has space"] {
        let raw = ConfigFileBuilder::new().system_property(key, "x").raw();
        let err = ConfigFile::try_from(raw).unwrap_err();
        assert!(matches!(err, SbtRunError::ConfigError(_)), "key {key:?} accepted");
    }
}

#[test]
fn property_set_twice_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .system_property("sbt.home", "x")
        .system_property_file("sbt.home", "y")
        .raw();
    let err = ConfigFile::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("both as text and as file"));
}

#[test]
fn plugin_artifact_with_blank_field_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .plugin_artifact("g", " ", "1.0", "jar", "/x.jar")
        .raw();
    let err = ConfigFile::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("empty `name`"), "unexpected: {err}");
}

#[test]
fn overrides_win_over_file_values() {
    let tmp = TempDir::new().unwrap();
    let cfg = load_and_validate(write_config(&tmp, FULL_CONFIG)).unwrap();

    let overrides = ConfigOverrides {
        skip: true,
        args: Some("compile".to_string()),
        timeout: Some(0),
        remote_repositories: vec!["/srv/other".to_string()],
        ..Default::default()
    };
    let cfg = cfg.with_overrides(&overrides);

    assert!(cfg.run.skip);
    assert!(cfg.launch_disabled());
    assert_eq!(cfg.run.args, "compile");
    assert_eq!(cfg.run.jvm_args, "-Xmx2g", "unset overrides keep file values");
    assert_eq!(cfg.run.timeout, 0);
    assert_eq!(cfg.repository.remote, vec!["/srv/other".to_string()]);
    assert_eq!(cfg.repository.local, Some(PathBuf::from("/cache/m2")));
}
