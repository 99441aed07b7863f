// src/repository/layout.rs

use std::path::PathBuf;

use crate::types::ArtifactCoordinate;

/// Suffix of the sidecar file listing an artifact's dependencies.
pub const MANIFEST_SUFFIX: &str = ".deps.toml";

/// File extension used for a packaging type.
pub fn extension_for(kind: &str) -> &str {
    match kind {
        "jar" | "maven-plugin" | "test-jar" | "bundle" | "ejb" => "jar",
        other => other,
    }
}

/// Directory of an artifact relative to a repository root:
/// `org/scala-sbt/launcher/1.10.0`.
pub fn artifact_dir(coordinate: &ArtifactCoordinate) -> PathBuf {
    let mut dir = PathBuf::new();
    for segment in coordinate.group.split('.').filter(|s| !s.is_empty()) {
        dir.push(segment);
    }
    dir.push(&coordinate.name);
    dir.push(&coordinate.version);
    dir
}

/// `org/scala-sbt/launcher/1.10.0/launcher-1.10.0.jar`
pub fn artifact_path(coordinate: &ArtifactCoordinate) -> PathBuf {
    artifact_dir(coordinate).join(format!(
        "{}-{}.{}",
        coordinate.name,
        coordinate.version,
        extension_for(&coordinate.kind)
    ))
}

/// `org/scala-sbt/launcher/1.10.0/launcher-1.10.0.deps.toml`
pub fn manifest_path(coordinate: &ArtifactCoordinate) -> PathBuf {
    artifact_dir(coordinate).join(manifest_file_name(coordinate))
}

pub fn manifest_file_name(coordinate: &ArtifactCoordinate) -> String {
    format!("{}-{}{}", coordinate.name, coordinate.version, MANIFEST_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_dots_become_directories() {
        let coord = ArtifactCoordinate::new("org.scala-sbt", "launcher", "1.10.0");
        assert_eq!(
            artifact_path(&coord),
            PathBuf::from("org/scala-sbt/launcher/1.10.0/launcher-1.10.0.jar")
        );
        assert_eq!(
            manifest_path(&coord),
            PathBuf::from("org/scala-sbt/launcher/1.10.0/launcher-1.10.0.deps.toml")
        );
    }

    #[test]
    fn plugin_packaging_is_stored_as_jar() {
        let coord = ArtifactCoordinate::new("com.example", "plugin", "2.0").with_kind("maven-plugin");
        assert_eq!(
            artifact_path(&coord),
            PathBuf::from("com/example/plugin/2.0/plugin-2.0.jar")
        );

        let pom = ArtifactCoordinate::new("com.example", "parent", "2.0").with_kind("pom");
        assert_eq!(
            artifact_path(&pom),
            PathBuf::from("com/example/parent/2.0/parent-2.0.pom")
        );
    }
}
