// src/resolve/closure.rs

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::types::{ArtifactKey, ResolvedArtifact, Scope};

/// Deduplicated transitive set of resolved artifacts.
///
/// Members are keyed by [`ArtifactKey`], so no two members share identity,
/// and iteration is sorted by that key. Alongside the members the closure
/// keeps the declared edges that survived filtering (`from -> to`, weighted
/// by the declared scope), including edges that pointed at an artifact that
/// was already resolved.
#[derive(Debug, Clone, Default)]
pub struct DependencyClosure {
    artifacts: BTreeMap<ArtifactKey, ResolvedArtifact>,
    graph: DiGraph<ArtifactKey, Scope>,
    nodes: HashMap<ArtifactKey, NodeIndex>,
}

impl DependencyClosure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an artifact; returns `false` (and keeps the existing member)
    /// if one with the same identity is already present.
    pub fn insert(&mut self, artifact: ResolvedArtifact) -> bool {
        let key = artifact.key();
        if self.artifacts.contains_key(&key) {
            return false;
        }
        self.node(&key);
        self.artifacts.insert(key, artifact);
        true
    }

    pub fn record_edge(&mut self, from: &ArtifactKey, to: &ArtifactKey, scope: Scope) {
        let a = self.node(from);
        let b = self.node(to);
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, scope);
        }
    }

    fn node(&mut self, key: &ArtifactKey) -> NodeIndex {
        if let Some(idx) = self.nodes.get(key) {
            return *idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.nodes.insert(key.clone(), idx);
        idx
    }

    pub fn contains(&self, key: &ArtifactKey) -> bool {
        self.artifacts.contains_key(key)
    }

    pub fn get(&self, key: &ArtifactKey) -> Option<&ResolvedArtifact> {
        self.artifacts.get(key)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Members in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedArtifact> {
        self.artifacts.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArtifactKey> {
        self.artifacts.keys()
    }

    /// Direct (filtered) dependencies of `key`, sorted by identity.
    pub fn dependencies_of(&self, key: &ArtifactKey) -> Vec<&ArtifactKey> {
        let Some(idx) = self.nodes.get(key) else {
            return Vec::new();
        };
        let mut deps: Vec<&ArtifactKey> = self
            .graph
            .neighbors(*idx)
            .map(|n| &self.graph[n])
            .collect();
        deps.sort();
        deps
    }

    /// Whether the declared dependency graph reachable from the root
    /// contained a cycle.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Render the graph as an indented tree starting at `root`.
    ///
    /// Artifacts already printed higher up are marked with `(*)` and not
    /// expanded again.
    pub fn render_tree(&self, root: &ArtifactKey) -> String {
        let mut out = String::new();
        let mut seen = HashSet::new();
        self.render_node(root, 0, &mut seen, &mut out);
        out
    }

    fn render_node<'a>(
        &'a self,
        key: &'a ArtifactKey,
        depth: usize,
        seen: &mut HashSet<&'a ArtifactKey>,
        out: &mut String,
    ) {
        let indent = "  ".repeat(depth);
        if !seen.insert(key) {
            let _ = writeln!(out, "{indent}{key} (*)");
            return;
        }
        let _ = writeln!(out, "{indent}{key}");
        for dep in self.dependencies_of(key) {
            self.render_node(dep, depth + 1, seen, out);
        }
    }
}
