// src/repository/manifest.rs

//! Dependency manifest parsing.
//!
//! Each artifact may ship a sidecar `<name>-<version>.deps.toml`:
//!
//! ```toml
//! [[dependency]]
//! group = "org.scala-lang"
//! name = "scala-library"
//! version = "2.12.20"
//! scope = "runtime"      # optional, default "compile"
//! type = "jar"           # optional, default "jar"
//! optional = false       # optional, default false
//! ```
//!
//! The manifest lists *declared* dependencies; filtering by scope and
//! optionality happens in the resolver.

use serde::Deserialize;

use crate::errors::{Result, SbtRunError};
use crate::types::{ArtifactCoordinate, Scope, DEFAULT_ARTIFACT_TYPE};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    dependency: Vec<RawDependency>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDependency {
    group: String,
    name: String,
    version: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    optional: bool,
}

/// Parse the manifest belonging to `owner`.
///
/// Any syntax error, unknown scope or blank coordinate field is reported as
/// `InvalidMetadata` for `owner`.
pub fn parse_manifest(owner: &ArtifactCoordinate, contents: &str) -> Result<Vec<ArtifactCoordinate>> {
    let invalid = |message: String| SbtRunError::InvalidMetadata {
        coordinate: owner.to_string(),
        message,
    };

    let raw: RawManifest = toml::from_str(contents).map_err(|e| invalid(e.to_string()))?;

    raw.dependency
        .into_iter()
        .enumerate()
        .map(|(idx, dep)| {
            for (field, value) in [("group", &dep.group), ("name", &dep.name), ("version", &dep.version)] {
                if value.trim().is_empty() {
                    return Err(invalid(format!("dependency #{} has an empty `{field}`", idx + 1)));
                }
            }

            let scope = match dep.scope {
                Some(s) => s
                    .parse::<Scope>()
                    .map_err(|e| invalid(format!("dependency '{}:{}': {e}", dep.group, dep.name)))?,
                None => Scope::default(),
            };

            let kind = dep
                .kind
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ARTIFACT_TYPE.to_string());

            Ok(ArtifactCoordinate::new(dep.group, dep.name, dep.version)
                .with_kind(kind)
                .with_scope(scope)
                .with_optional(dep.optional))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;

    fn owner() -> ArtifactCoordinate {
        ArtifactCoordinate::new("org.scala-sbt", "launcher", "1.10.0")
    }

    #[test]
    fn parses_dependencies_with_defaults() {
        let deps = parse_manifest(
            &owner(),
            r#"
[[dependency]]
group = "org.scala-lang"
name = "scala-library"
version = "2.12.20"

[[dependency]]
group = "junit"
name = "junit"
version = "4.13"
scope = "test"

[[dependency]]
group = "com.example"
name = "extra"
version = "1.0"
type = "zip"
optional = true
"#,
        )
        .unwrap();

        assert_eq!(deps.len(), 3);
        assert_eq!(deps[0].scope, Scope::Compile);
        assert_eq!(deps[0].kind, "jar");
        assert_eq!(deps[1].scope, Scope::Test);
        assert!(deps[2].optional);
        assert_eq!(deps[2].kind, "zip");
    }

    #[test]
    fn empty_manifest_has_no_dependencies() {
        assert!(parse_manifest(&owner(), "").unwrap().is_empty());
    }

    #[test]
    fn unknown_scope_is_invalid_metadata() {
        let err = parse_manifest(
            &owner(),
            r#"
[[dependency]]
group = "a"
name = "b"
version = "1"
scope = "system"
"#,
        )
        .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Resolution);
        match err {
            SbtRunError::InvalidMetadata { coordinate, message } => {
                assert_eq!(coordinate, "org.scala-sbt:launcher:jar:1.10.0");
                assert!(message.contains("system"));
            }
            other => panic!("expected InvalidMetadata, got {other:?}"),
        }
    }

    #[test]
    fn syntax_error_is_invalid_metadata() {
        let err = parse_manifest(&owner(), "[[dependency]\ngroup = ").unwrap_err();
        assert!(matches!(err, SbtRunError::InvalidMetadata { .. }));
    }

    #[test]
    fn blank_version_is_invalid_metadata() {
        let err = parse_manifest(
            &owner(),
            "[[dependency]]\ngroup = \"a\"\nname = \"b\"\nversion = \" \"\n",
        )
        .unwrap_err();
        match err {
            SbtRunError::InvalidMetadata { message, .. } => assert!(message.contains("version")),
            other => panic!("expected InvalidMetadata, got {other:?}"),
        }
    }
}
