use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// When (and why) a dependency is needed.
///
/// - `Compile`: needed to build and run the artifact (default).
/// - `Runtime`: only needed when running.
/// - `Test`: only needed by the artifact's own tests; never part of a
///   launch classpath.
/// - `Provided`: expected to be supplied by the environment, but still
///   resolved for a standalone launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Runtime,
    Test,
    Provided,
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compile" => Ok(Scope::Compile),
            "runtime" => Ok(Scope::Runtime),
            "test" => Ok(Scope::Test),
            "provided" => Ok(Scope::Provided),
            other => Err(format!(
                "invalid scope: {other} (expected \"compile\", \"runtime\", \"test\" or \"provided\")"
            )),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::Provided => "provided",
        };
        f.write_str(s)
    }
}

/// Default artifact type when none is declared.
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

/// Identity of an artifact for deduplication: scope and optionality are
/// resolution-time attributes and deliberately not part of it.
///
/// Ordering is (group, name, version, type), which is also the order used
/// when a closure is turned into a classpath.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub group: String,
    pub name: String,
    pub version: String,
    pub kind: String,
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.group, self.name, self.kind, self.version)
    }
}

/// A fully specified artifact coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub name: String,
    pub version: String,
    /// Packaging type (`jar`, `maven-plugin`, `pom`, ...).
    pub kind: String,
    pub scope: Scope,
    pub optional: bool,
}

impl ArtifactCoordinate {
    /// A non-optional `jar` coordinate in `compile` scope.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            kind: DEFAULT_ARTIFACT_TYPE.to_string(),
            scope: Scope::default(),
            optional: false,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn key(&self) -> ArtifactKey {
        ArtifactKey {
            group: self.group.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            kind: self.kind.clone(),
        }
    }

    /// True when group, name and type match; version is ignored.
    pub fn matches(&self, group: &str, name: &str, kind: &str) -> bool {
        self.group == group && self.name == name && self.kind == kind
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.group, self.name, self.kind, self.version)
    }
}

/// An artifact coordinate together with the local file it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub coordinate: ArtifactCoordinate,
    pub file: PathBuf,
}

impl ResolvedArtifact {
    pub fn new(coordinate: ArtifactCoordinate, file: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            file: file.into(),
        }
    }

    pub fn key(&self) -> ArtifactKey {
        self.coordinate.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parses_case_insensitively() {
        assert_eq!("Runtime".parse::<Scope>(), Ok(Scope::Runtime));
        assert_eq!(" test ".parse::<Scope>(), Ok(Scope::Test));
        assert!("system".parse::<Scope>().is_err());
    }

    #[test]
    fn scope_defaults_to_compile() {
        assert_eq!(Scope::default(), Scope::Compile);
        assert_eq!(ArtifactCoordinate::new("g", "a", "1").scope, Scope::Compile);
    }

    #[test]
    fn identity_ignores_scope_and_optional() {
        let a = ArtifactCoordinate::new("org.example", "a", "1.0");
        let b = a.clone().with_scope(Scope::Runtime).with_optional(true);
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn identity_includes_type() {
        let jar = ArtifactCoordinate::new("org.example", "a", "1.0");
        let plugin = jar.clone().with_kind("maven-plugin");
        assert_ne!(jar.key(), plugin.key());
        assert_eq!(plugin.to_string(), "org.example:a:maven-plugin:1.0");
    }
}
