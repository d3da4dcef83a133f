use petgraph::graph::NodeIndex;
use tracing::{debug, trace};

use super::registry::NodeRegistry;
use super::types::DependencyGraph;
use crate::core::Edge;

/// Incremental builder turning an ordered edge stream into a
/// [`DependencyGraph`]
///
/// Edges must be fed one at a time, in observation order. A self-edge
/// (dependency == issuer) designates the entry module; every other edge
/// appends the dependency to the issuer's dependency list.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    registry: NodeRegistry,
    root: Option<NodeIndex>,
    edges_seen: usize,
}

impl GraphAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a complete graph from an ordered edge sequence
    pub fn assemble<'a, I>(edges: I) -> DependencyGraph
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut assembler = Self::new();
        for edge in edges {
            assembler.add_edge(edge);
        }
        assembler.finish()
    }

    pub fn add_edge(&mut self, edge: &Edge) {
        self.edges_seen += 1;

        let dependency = self.registry.get_or_create(&edge.dependency);
        let issuer = self.registry.get_or_create(&edge.issuer);

        if edge.is_entry() {
            if let Some(previous) = self.root.replace(dependency) {
                if previous != dependency {
                    debug!(
                        previous = %node_path(&self.registry, previous),
                        entry = %edge.dependency,
                        "entry module replaced by a later self-edge"
                    );
                }
            }
            return;
        }

        trace!(issuer = %edge.issuer, dependency = %edge.dependency, "linking modules");
        self.registry.link(issuer, dependency);
    }

    pub fn edges_seen(&self) -> usize {
        self.edges_seen
    }

    pub fn finish(self) -> DependencyGraph {
        debug!(
            edges = self.edges_seen,
            modules = self.registry.len(),
            has_entry = self.root.is_some(),
            "graph assembled"
        );
        DependencyGraph::new(self.registry, self.root)
    }
}

fn node_path(registry: &NodeRegistry, idx: NodeIndex) -> &str {
    registry.graph()[idx].path()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dep_paths(graph: &DependencyGraph, path: &str) -> Vec<String> {
        let idx = graph.lookup(path).unwrap();
        graph
            .deps(idx)
            .into_iter()
            .map(|d| graph.path(d).to_string())
            .collect()
    }

    #[test]
    fn test_no_self_edge_means_no_root() {
        let graph = GraphAssembler::assemble(&[Edge::new("b", "a"), Edge::new("c", "b")]);

        assert!(!graph.has_root());
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_self_edge_marks_root_without_linking() {
        let graph = GraphAssembler::assemble(&[Edge::entry("a"), Edge::new("b", "a")]);

        let root = graph.root().unwrap();
        assert_eq!(graph.path(root), "a");
        assert_eq!(dep_paths(&graph, "a"), vec!["b"]);
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn test_last_self_edge_wins() {
        let graph = GraphAssembler::assemble(&[
            Edge::entry("first"),
            Edge::new("shared", "first"),
            Edge::entry("second"),
        ]);

        assert_eq!(graph.path(graph.root().unwrap()), "second");
    }

    #[test]
    fn test_duplicate_edges_append_twice() {
        let graph = GraphAssembler::assemble(&[
            Edge::entry("x"),
            Edge::new("y", "x"),
            Edge::new("y", "x"),
        ]);

        assert_eq!(dep_paths(&graph, "x"), vec!["y", "y"]);
    }

    #[test]
    fn test_shared_dependency_is_one_node() {
        let graph = GraphAssembler::assemble(&[
            Edge::entry("x"),
            Edge::new("y", "x"),
            Edge::new("z", "x"),
            Edge::new("y", "z"),
        ]);

        let x = graph.lookup("x").unwrap();
        let z = graph.lookup("z").unwrap();
        let y_under_x = graph.deps(x)[0];
        let y_under_z = graph.deps(z)[0];

        assert_eq!(y_under_x, y_under_z);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_back_edge_to_ancestor_is_kept() {
        let graph = GraphAssembler::assemble(&[
            Edge::entry("a"),
            Edge::new("b", "a"),
            Edge::new("a", "b"),
        ]);

        assert_eq!(dep_paths(&graph, "b"), vec!["a"]);
    }

    #[test]
    fn test_incremental_edge_count() {
        let mut assembler = GraphAssembler::new();
        assembler.add_edge(&Edge::entry("a"));
        assembler.add_edge(&Edge::new("b", "a"));

        assert_eq!(assembler.edges_seen(), 2);
        assert_eq!(assembler.finish().node_count(), 2);
    }
}
