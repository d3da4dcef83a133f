//! Core graph types
//!
//! This module contains the node and link weights stored in the dependency
//! graph, the assembled [`DependencyGraph`] itself, and the borrowed views
//! used to serialize it as a nested tree.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::ser::{Error as _, SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use super::registry::NodeRegistry;

/// A module identified by its normalized path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    path: String,
}

impl ModuleNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Weight of an issuer -> dependency link
///
/// The ordinal records arrival order across the whole run, so dependency
/// lists can be read back in the order edges were observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DepLink {
    ordinal: usize,
}

impl DepLink {
    pub fn new(ordinal: usize) -> Self {
        Self { ordinal }
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// The assembled module graph of one analysis run
#[derive(Debug)]
pub struct DependencyGraph {
    registry: NodeRegistry,
    root: Option<NodeIndex>,
}

impl DependencyGraph {
    pub(crate) fn new(registry: NodeRegistry, root: Option<NodeIndex>) -> Self {
        Self { registry, root }
    }

    /// The entry module, if a self-edge was observed
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    pub fn node(&self, idx: NodeIndex) -> &ModuleNode {
        &self.registry.graph()[idx]
    }

    pub fn path(&self, idx: NodeIndex) -> &str {
        self.node(idx).path()
    }

    pub fn lookup(&self, path: &str) -> Option<NodeIndex> {
        self.registry.get(path)
    }

    /// Dependencies of `idx` in edge arrival order, duplicates included
    pub fn deps(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph walks outgoing edges newest-first
        let mut links: Vec<(DepLink, NodeIndex)> = self
            .registry
            .graph()
            .edges(idx)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        links.sort_by_key(|(link, _)| *link);
        links.into_iter().map(|(_, target)| target).collect()
    }

    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    pub fn link_count(&self) -> usize {
        self.registry.graph().edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.registry.graph().node_indices()
    }

    /// Strongly connected components that contain a cycle, reachable from
    /// the root or not
    ///
    /// Components are returned as sorted path lists.
    pub fn cyclic_components(&self) -> Vec<Vec<String>> {
        let graph = self.registry.graph();
        let mut components: Vec<Vec<String>> = tarjan_scc(graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut paths: Vec<String> =
                    scc.iter().map(|&idx| graph[idx].path().to_string()).collect();
                paths.sort();
                paths
            })
            .collect();
        components.sort();
        components
    }

    pub(crate) fn petgraph(&self) -> &DiGraph<ModuleNode, DepLink> {
        self.registry.graph()
    }

    /// Borrowed view serializing the graph as nested `{path, deps}` nodes
    /// starting at the root
    pub fn view(&self) -> GraphView<'_> {
        GraphView { graph: self }
    }
}

/// Serializable view of a whole [`DependencyGraph`]
///
/// A graph without a root serializes as an empty object.
#[derive(Debug, Clone, Copy)]
pub struct GraphView<'a> {
    graph: &'a DependencyGraph,
}

impl<'a> GraphView<'a> {
    pub fn graph(&self) -> &'a DependencyGraph {
        self.graph
    }
}

impl Serialize for GraphView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.graph.root() {
            Some(root) => NodeView {
                graph: self.graph,
                idx: root,
                parent: None,
            }
            .serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

struct NodeView<'a> {
    graph: &'a DependencyGraph,
    idx: NodeIndex,
    parent: Option<&'a NodeView<'a>>,
}

impl NodeView<'_> {
    fn is_ancestor(&self, idx: NodeIndex) -> bool {
        let mut current = self.parent;
        while let Some(view) = current {
            if view.idx == idx {
                return true;
            }
            current = view.parent;
        }
        false
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_ancestor(self.idx) {
            return Err(S::Error::custom(format!(
                "module '{}' depends on itself and cannot be nested",
                self.graph.path(self.idx)
            )));
        }

        let mut state = serializer.serialize_struct("ModuleNode", 2)?;
        state.serialize_field("path", self.graph.path(self.idx))?;
        state.serialize_field("deps", &DepsView { node: self })?;
        state.end()
    }
}

struct DepsView<'a> {
    node: &'a NodeView<'a>,
}

impl Serialize for DepsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let deps = self.node.graph.deps(self.node.idx);
        let mut seq = serializer.serialize_seq(Some(deps.len()))?;
        for dep in deps {
            seq.serialize_element(&NodeView {
                graph: self.node.graph,
                idx: dep,
                parent: Some(self.node),
            })?;
        }
        seq.end()
    }
}
