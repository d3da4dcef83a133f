//! Path-keyed node arena
//!
//! The registry is the single source of node identity for a run: every path
//! resolves to exactly one [`NodeIndex`], so a module referenced by several
//! issuers is the same node in each of their dependency lists.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::trace;

use super::types::{DepLink, ModuleNode};

/// Deduplicating store mapping a normalized path to its node
#[derive(Debug, Default)]
pub struct NodeRegistry {
    graph: DiGraph<ModuleNode, DepLink>,
    index: HashMap<String, NodeIndex>,
    links: usize,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `path`, creating it with no dependencies on first
    /// sight
    pub fn get_or_create(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(path) {
            return idx;
        }

        let idx = self.graph.add_node(ModuleNode::new(path));
        self.index.insert(path.to_string(), idx);
        trace!(path, node = idx.index(), "registered module");
        idx
    }

    /// Look a path up without creating it
    pub fn get(&self, path: &str) -> Option<NodeIndex> {
        self.index.get(path).copied()
    }

    /// Append `dependency` to the end of `issuer`'s dependency list
    ///
    /// Repeated links are kept; the list length reflects the number of
    /// observed edges, not the number of distinct dependencies.
    pub fn link(&mut self, issuer: NodeIndex, dependency: NodeIndex) {
        let ordinal = self.links;
        self.links += 1;
        self.graph.add_edge(issuer, dependency, DepLink::new(ordinal));
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub(crate) fn graph(&self) -> &DiGraph<ModuleNode, DepLink> {
        &self.graph
    }
}
