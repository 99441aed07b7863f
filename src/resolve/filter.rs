// src/resolve/filter.rs

//! Declared-dependency filters applied during closure resolution.

use std::fmt::Debug;

use crate::types::{ArtifactCoordinate, Scope};

pub trait ArtifactFilter: Debug + Send + Sync {
    /// Whether `artifact` should be part of the closure.
    fn include(&self, artifact: &ArtifactCoordinate) -> bool;
}

/// Rejects a fixed set of scopes.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    excluded: Vec<Scope>,
}

impl ScopeFilter {
    pub fn excluding(excluded: impl IntoIterator<Item = Scope>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }
}

impl ArtifactFilter for ScopeFilter {
    fn include(&self, artifact: &ArtifactCoordinate) -> bool {
        !self.excluded.contains(&artifact.scope)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NonOptionalFilter;

impl ArtifactFilter for NonOptionalFilter {
    fn include(&self, artifact: &ArtifactCoordinate) -> bool {
        !artifact.optional
    }
}

/// Accepts an artifact only if every inner filter accepts it.
#[derive(Debug, Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn ArtifactFilter>>,
}

impl AndFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl ArtifactFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl ArtifactFilter for AndFilter {
    fn include(&self, artifact: &ArtifactCoordinate) -> bool {
        self.filters.iter().all(|f| f.include(artifact))
    }
}

/// Filter used for launch classpaths: no test-scoped and no optional
/// dependencies.
pub fn launch_filter() -> AndFilter {
    AndFilter::new()
        .with(ScopeFilter::excluding([Scope::Test]))
        .with(NonOptionalFilter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(scope: Scope, optional: bool) -> ArtifactCoordinate {
        ArtifactCoordinate::new("g", "a", "1")
            .with_scope(scope)
            .with_optional(optional)
    }

    #[test]
    fn launch_filter_rejects_test_and_optional() {
        let filter = launch_filter();
        assert!(filter.include(&dep(Scope::Compile, false)));
        assert!(filter.include(&dep(Scope::Runtime, false)));
        assert!(filter.include(&dep(Scope::Provided, false)));
        assert!(!filter.include(&dep(Scope::Test, false)));
        assert!(!filter.include(&dep(Scope::Runtime, true)));
    }

    #[test]
    fn empty_and_filter_accepts_everything() {
        assert!(AndFilter::new().include(&dep(Scope::Test, true)));
    }
}
