use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::core::CircularPath;
use crate::error::LoopError;
use crate::graph::DependencyGraph;

// Blue-Orange Accessible Palette
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD";
    pub const NORMAL_NODE_STROKE: &str = "#1976D2";
    pub const ENTRY_NODE_FILL: &str = "#E8F5E9";
    pub const ENTRY_NODE_STROKE: &str = "#388E3C";
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0";
    pub const CYCLE_NODE_STROKE: &str = "#F57C00";
    pub const NORMAL_EDGE: &str = "#64B5F6";
    pub const CYCLE_EDGE: &str = "#FF6500";
}

macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(LoopError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(LoopError::from)
    };
}

/// Module paths and consecutive path pairs that belong to reported cycles
struct CycleMarks<'a> {
    nodes: HashSet<&'a str>,
    links: HashSet<(&'a str, &'a str)>,
}

impl<'a> CycleMarks<'a> {
    fn new(cycles: &'a [CircularPath]) -> Self {
        let mut nodes = HashSet::new();
        let mut links = HashSet::new();
        for cycle in cycles {
            nodes.extend(cycle.paths().iter().map(String::as_str));
            links.extend(
                cycle
                    .paths()
                    .windows(2)
                    .map(|pair| (pair[0].as_str(), pair[1].as_str())),
            );
        }
        Self { nodes, links }
    }

    fn has_node(&self, path: &str) -> bool {
        self.nodes.contains(path)
    }

    fn has_link(&self, from: &str, to: &str) -> bool {
        self.links.contains(&(from, to))
    }
}

struct TreeItem {
    node: NodeIndex,
    depth: usize,
    prefix: String,
    connector: &'static str,
    child_prefix: String,
}

/// Renders a [`DependencyGraph`] as a console tree, a Mermaid flowchart, or
/// a Graphviz digraph
pub struct GraphRenderer {
    highlight_cycles: bool,
}

impl GraphRenderer {
    pub fn new(highlight_cycles: bool) -> Self {
        Self { highlight_cycles }
    }

    /// Render the modules reachable from the entry as an indented tree
    ///
    /// A module already printed elsewhere in the tree is not expanded again,
    /// and a dependency pointing back at an ancestor is marked and not
    /// followed.
    pub fn render_ascii(
        &self,
        graph: &DependencyGraph,
        cycles: &[CircularPath],
        output: &mut dyn Write,
    ) -> Result<(), LoopError> {
        if graph.is_empty() {
            writeln_out!(output, "No modules observed")?;
            return Ok(());
        }

        let marks = CycleMarks::new(cycles);

        let Some(root) = graph.root() else {
            writeln_out!(
                output,
                "\n📊 Module Dependency Graph (no entry module observed)\n"
            )?;
            let mut nodes: Vec<NodeIndex> = graph.node_indices().collect();
            nodes.sort_by_key(|&idx| graph.path(idx));
            for idx in nodes {
                self.render_flat_node(graph, idx, &marks, output)?;
            }
            return Ok(());
        };

        writeln_out!(
            output,
            "\n📊 Module Dependency Graph (entry: {})\n",
            graph.path(root)
        )?;

        let mut expanded: HashSet<NodeIndex> = HashSet::new();
        let mut ancestors: Vec<NodeIndex> = Vec::new();
        let mut pending = vec![TreeItem {
            node: root,
            depth: 0,
            prefix: String::new(),
            connector: "",
            child_prefix: String::new(),
        }];

        while let Some(item) = pending.pop() {
            ancestors.truncate(item.depth);
            let path = graph.path(item.node);

            let mut line = format!("{}{}{}", item.prefix, item.connector, path);
            if self.highlight_cycles && marks.has_node(path) {
                line.push_str(" ⚠️");
            }

            if ancestors.contains(&item.node) {
                line.push_str(" ↺ [CYCLE]");
                writeln_out!(output, "{}", line)?;
                continue;
            }
            if !expanded.insert(item.node) {
                line.push_str(" (shown above)");
                writeln_out!(output, "{}", line)?;
                continue;
            }
            writeln_out!(output, "{}", line)?;

            ancestors.push(item.node);
            let deps = graph.deps(item.node);
            let count = deps.len();
            for (i, dep) in deps.into_iter().enumerate().rev() {
                let is_last = i + 1 == count;
                pending.push(TreeItem {
                    node: dep,
                    depth: item.depth + 1,
                    prefix: item.child_prefix.clone(),
                    connector: if is_last { "└── " } else { "├── " },
                    child_prefix: format!(
                        "{}{}",
                        item.child_prefix,
                        if is_last { "    " } else { "│   " }
                    ),
                });
            }
        }

        let mut unreachable: Vec<&str> = graph
            .node_indices()
            .filter(|idx| !expanded.contains(idx))
            .map(|idx| graph.path(idx))
            .collect();
        if !unreachable.is_empty() {
            unreachable.sort_unstable();
            writeln_out!(output, "\nNot reachable from the entry module:")?;
            for path in unreachable {
                writeln_out!(output, "  • {}", path)?;
            }
        }

        if !cycles.is_empty() && self.highlight_cycles {
            writeln_out!(output, "\n⚠️  = Part of a reported dependency cycle")?;
        }

        Ok(())
    }

    fn render_flat_node(
        &self,
        graph: &DependencyGraph,
        idx: NodeIndex,
        marks: &CycleMarks<'_>,
        output: &mut dyn Write,
    ) -> Result<(), LoopError> {
        let path = graph.path(idx);
        let marker = if self.highlight_cycles && marks.has_node(path) {
            " ⚠️"
        } else {
            ""
        };
        writeln_out!(output, "{}{}", path, marker)?;

        let deps = graph.deps(idx);
        if deps.is_empty() {
            writeln_out!(output, "  └── (no dependencies)")?;
        }
        for (i, dep) in deps.iter().enumerate() {
            let prefix = if i + 1 == deps.len() { "└──" } else { "├──" };
            writeln_out!(output, "  {} → {}", prefix, graph.path(*dep))?;
        }
        writeln_out!(output)
    }

    pub fn render_mermaid(
        &self,
        graph: &DependencyGraph,
        cycles: &[CircularPath],
        output: &mut dyn Write,
    ) -> Result<(), LoopError> {
        let marks = CycleMarks::new(cycles);

        writeln_out!(output, "graph TD")?;

        for idx in graph.node_indices() {
            writeln_out!(
                output,
                "    {}[\"{}\"]",
                self.mermaid_id(idx),
                escape_mermaid(graph.path(idx))
            )?;
        }

        writeln_out!(output)?;

        let mut cycle_links = Vec::new();
        for (link_number, ((source, target), count)) in
            self.aggregate_links(graph).into_iter().enumerate()
        {
            let label = if count > 1 {
                format!("|{count}x|")
            } else {
                String::new()
            };
            writeln_out!(
                output,
                "    {} -->{} {}",
                self.mermaid_id(source),
                label,
                self.mermaid_id(target)
            )?;
            if marks.has_link(graph.path(source), graph.path(target)) {
                cycle_links.push(link_number);
            }
        }

        writeln_out!(output)?;
        writeln_out!(
            output,
            "    classDef module fill:{},stroke:{}",
            colors::NORMAL_NODE_FILL,
            colors::NORMAL_NODE_STROKE
        )?;
        writeln_out!(
            output,
            "    classDef entry fill:{},stroke:{},stroke-width:2px",
            colors::ENTRY_NODE_FILL,
            colors::ENTRY_NODE_STROKE
        )?;
        writeln_out!(
            output,
            "    classDef cycle fill:{},stroke:{},stroke-width:2px",
            colors::CYCLE_NODE_FILL,
            colors::CYCLE_NODE_STROKE
        )?;

        for idx in graph.node_indices() {
            let class = if self.highlight_cycles && marks.has_node(graph.path(idx)) {
                "cycle"
            } else if graph.root() == Some(idx) {
                "entry"
            } else {
                "module"
            };
            writeln_out!(output, "    class {} {}", self.mermaid_id(idx), class)?;
        }

        if self.highlight_cycles {
            for link_number in cycle_links {
                writeln_out!(
                    output,
                    "    linkStyle {} stroke:{},stroke-width:3px",
                    link_number,
                    colors::CYCLE_EDGE
                )?;
            }
        }

        Ok(())
    }

    pub fn render_dot(
        &self,
        graph: &DependencyGraph,
        cycles: &[CircularPath],
        output: &mut dyn Write,
    ) -> Result<(), LoopError> {
        let marks = CycleMarks::new(cycles);

        writeln_out!(output, "digraph module_dependencies {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        for idx in graph.node_indices() {
            let path = graph.path(idx);
            let (fill_color, stroke_color) = if self.highlight_cycles && marks.has_node(path) {
                (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
            } else if graph.root() == Some(idx) {
                (colors::ENTRY_NODE_FILL, colors::ENTRY_NODE_STROKE)
            } else {
                (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
            };

            writeln_out!(
                output,
                r#"    "{}" [style=filled, fillcolor="{}", color="{}", penwidth=2];"#,
                escape_label(path),
                fill_color,
                stroke_color
            )?;
        }

        writeln_out!(output)?;

        for ((source, target), count) in self.aggregate_links(graph) {
            let from = graph.path(source);
            let to = graph.path(target);
            let label = if count > 1 {
                format!(r#", label="{count}x""#)
            } else {
                String::new()
            };
            let (color, width) = if self.highlight_cycles && marks.has_link(from, to) {
                (colors::CYCLE_EDGE, 3)
            } else {
                (colors::NORMAL_EDGE, 2)
            };

            writeln_out!(
                output,
                r#"    "{}" -> "{}" [color="{}", penwidth={}{}];"#,
                escape_label(from),
                escape_label(to),
                color,
                width,
                label
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// Count repeated issuer -> dependency links, ordered by node index
    fn aggregate_links(&self, graph: &DependencyGraph) -> BTreeMap<(NodeIndex, NodeIndex), usize> {
        let mut links = BTreeMap::new();
        for edge in graph.petgraph().edge_references() {
            *links.entry((edge.source(), edge.target())).or_insert(0) += 1;
        }
        links
    }

    fn mermaid_id(&self, idx: NodeIndex) -> String {
        format!("m{}", idx.index())
    }
}

fn escape_label(path: &str) -> String {
    path.replace('"', "\\\"")
}

// Mermaid labels take HTML-style entity codes rather than backslash escapes
fn escape_mermaid(path: &str) -> String {
    path.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Edge;
    use crate::detector::{CircularMode, detect_all};
    use crate::graph::GraphAssembler;

    fn render(
        graph: &DependencyGraph,
        f: impl Fn(&GraphRenderer, &[CircularPath], &mut Vec<u8>),
    ) -> String {
        let cycles = detect_all(graph, CircularMode::Circular);
        let renderer = GraphRenderer::new(true);
        let mut out = Vec::new();
        f(&renderer, &cycles, &mut out);
        String::from_utf8(out).unwrap()
    }

    fn cyclic_graph() -> DependencyGraph {
        GraphAssembler::assemble(&[
            Edge::entry("index.js"),
            Edge::new("a.js", "index.js"),
            Edge::new("b.js", "index.js"),
            Edge::new("b.js", "a.js"),
            Edge::new("a.js", "b.js"),
        ])
    }

    #[test]
    fn test_ascii_tree_layout() {
        let graph = GraphAssembler::assemble(&[
            Edge::entry("index.js"),
            Edge::new("a.js", "index.js"),
            Edge::new("c.js", "index.js"),
            Edge::new("b.js", "a.js"),
        ]);

        let out = render(&graph, |r, c, o| r.render_ascii(&graph, c, o).unwrap());

        assert!(out.contains("(entry: index.js)"));
        assert!(out.contains("index.js\n├── a.js\n│   └── b.js\n└── c.js\n"));
        assert!(!out.contains("⚠️"));
    }

    #[test]
    fn test_ascii_marks_back_references_and_repeats() {
        let graph = cyclic_graph();
        let out = render(&graph, |r, c, o| r.render_ascii(&graph, c, o).unwrap());

        assert!(out.contains("a.js ⚠️ ↺ [CYCLE]"));
        assert!(out.contains("b.js ⚠️ (shown above)"));
        assert!(out.contains("Part of a reported dependency cycle"));
    }

    #[test]
    fn test_ascii_lists_unreachable_modules() {
        let graph = GraphAssembler::assemble(&[
            Edge::entry("index.js"),
            Edge::new("lonely.js", "orphan.js"),
        ]);

        let out = render(&graph, |r, c, o| r.render_ascii(&graph, c, o).unwrap());
        assert!(out.contains("Not reachable from the entry module:"));
        assert!(out.contains("  • lonely.js"));
        assert!(out.contains("  • orphan.js"));
    }

    #[test]
    fn test_ascii_without_entry() {
        let graph = GraphAssembler::assemble(&[Edge::new("a.js", "b.js")]);
        let out = render(&graph, |r, c, o| r.render_ascii(&graph, c, o).unwrap());

        assert!(out.contains("no entry module observed"));
        assert!(out.contains("b.js\n  └── → a.js"));
    }

    #[test]
    fn test_mermaid_highlights_cycle_links() {
        let graph = cyclic_graph();
        let out = render(&graph, |r, c, o| r.render_mermaid(&graph, c, o).unwrap());

        assert!(out.starts_with("graph TD"));
        assert!(out.contains("m0[\"index.js\"]"));
        assert!(out.contains("class m0 entry"));
        assert!(out.contains("class m1 cycle"));
        assert!(out.contains("linkStyle"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let graph = GraphAssembler::assemble(&[Edge::entry("we\"ird.js")]);

        let mermaid = render(&graph, |r, c, o| r.render_mermaid(&graph, c, o).unwrap());
        assert!(mermaid.contains("m0[\"we#quot;ird.js\"]"));

        let dot = render(&graph, |r, c, o| r.render_dot(&graph, c, o).unwrap());
        assert!(dot.contains(r#""we\"ird.js""#));
    }

    #[test]
    fn test_dot_output() {
        let graph = GraphAssembler::assemble(&[
            Edge::entry("index.js"),
            Edge::new("a.js", "index.js"),
            Edge::new("a.js", "index.js"),
        ]);

        let out = render(&graph, |r, c, o| r.render_dot(&graph, c, o).unwrap());
        assert!(out.contains("digraph module_dependencies"));
        assert!(out.contains(r#""index.js" -> "a.js""#));
        assert!(out.contains(r#"label="2x""#));
    }
}
