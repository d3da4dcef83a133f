//! Tests for the graph renderer module

use std::io::Cursor;

use loop_de_loop::core::{CircularPath, Edge};
use loop_de_loop::detector::{CircularMode, detect_all};
use loop_de_loop::graph::{DependencyGraph, GraphAssembler, GraphRenderer};
use pretty_assertions::assert_eq;

/// A small app with a store/api loop and a module imported twice from the
/// same page
fn create_app_graph() -> DependencyGraph {
    GraphAssembler::assemble(&[
        Edge::entry("app.ts"),
        Edge::new("router.ts", "app.ts"),
        Edge::new("store.ts", "app.ts"),
        Edge::new("pages/home.ts", "router.ts"),
        Edge::new("store.ts", "pages/home.ts"),
        Edge::new("store.ts", "pages/home.ts"),
        Edge::new("api.ts", "store.ts"),
        Edge::new("store.ts", "api.ts"),
    ])
}

fn cycles_of(graph: &DependencyGraph) -> Vec<CircularPath> {
    detect_all(graph, CircularMode::Circular)
}

fn render_with<F>(highlight: bool, graph: &DependencyGraph, render: F) -> String
where
    F: Fn(
        &GraphRenderer,
        &DependencyGraph,
        &[CircularPath],
        &mut Cursor<Vec<u8>>,
    ) -> Result<(), loop_de_loop::error::LoopError>,
{
    let renderer = GraphRenderer::new(highlight);
    let cycles = cycles_of(graph);
    let mut output = Cursor::new(Vec::new());
    render(&renderer, graph, &cycles, &mut output).unwrap();
    String::from_utf8(output.into_inner()).unwrap()
}

#[test]
fn test_every_walk_into_the_loop_is_reported() {
    let graph = create_app_graph();
    let cycles = cycles_of(&graph);

    // Reached through both copies of the pages/home.ts link and directly
    // from the entry
    assert_eq!(cycles.len(), 3);
    for cycle in &cycles {
        assert_eq!(cycle.paths(), ["store.ts", "api.ts", "store.ts"]);
    }
}

#[test]
fn test_ascii_tree() {
    let output = render_with(true, &create_app_graph(), |r, g, c, o| {
        r.render_ascii(g, c, o)
    });

    let expected_tree = "app.ts
├── router.ts
│   └── pages/home.ts
│       ├── store.ts ⚠️
│       │   └── api.ts ⚠️
│       │       └── store.ts ⚠️ ↺ [CYCLE]
│       └── store.ts ⚠️ (shown above)
└── store.ts ⚠️ (shown above)
";

    assert!(output.contains("📊 Module Dependency Graph (entry: app.ts)"));
    assert!(
        output.contains(expected_tree),
        "unexpected tree:\n{output}"
    );
    assert!(output.contains("⚠️  = Part of a reported dependency cycle"));
    assert!(!output.contains("Not reachable from the entry module"));
}

#[test]
fn test_ascii_without_highlighting() {
    let output = render_with(false, &create_app_graph(), |r, g, c, o| {
        r.render_ascii(g, c, o)
    });

    assert!(output.contains("│       │       └── store.ts ↺ [CYCLE]"));
    assert!(!output.contains("⚠️"));
}

#[test]
fn test_ascii_empty_graph() {
    let graph = GraphAssembler::new().finish();
    let output = render_with(true, &graph, |r, g, c, o| r.render_ascii(g, c, o));

    assert_eq!(output, "No modules observed\n");
}

#[test]
fn test_mermaid_deduplicates_links() {
    let output = render_with(true, &create_app_graph(), |r, g, c, o| {
        r.render_mermaid(g, c, o)
    });

    assert!(output.starts_with("graph TD\n"));
    for node in [
        "m0[\"app.ts\"]",
        "m1[\"router.ts\"]",
        "m2[\"store.ts\"]",
        "m3[\"pages/home.ts\"]",
        "m4[\"api.ts\"]",
    ] {
        assert!(output.contains(node), "missing node {node}");
    }

    // One line per issuer/dependency pair, with the repeat count as a label
    assert_eq!(output.matches("m3 -->").count(), 1);
    assert!(output.contains("    m3 -->|2x| m2"));
    assert!(output.contains("    m0 --> m1"));
}

#[test]
fn test_mermaid_cycle_styling() {
    let output = render_with(true, &create_app_graph(), |r, g, c, o| {
        r.render_mermaid(g, c, o)
    });

    assert!(output.contains("class m0 entry"));
    assert!(output.contains("class m1 module"));
    assert!(output.contains("class m2 cycle"));
    assert!(output.contains("class m4 cycle"));

    // Links sorted by (issuer, dependency) index: store -> api is the 4th,
    // api -> store the 6th
    assert!(output.contains("linkStyle 3 stroke:#FF6500,stroke-width:3px"));
    assert!(output.contains("linkStyle 5 stroke:#FF6500,stroke-width:3px"));
    assert_eq!(output.matches("linkStyle").count(), 2);
}

#[test]
fn test_mermaid_without_highlighting() {
    let output = render_with(false, &create_app_graph(), |r, g, c, o| {
        r.render_mermaid(g, c, o)
    });

    assert!(output.contains("class m2 module"));
    assert!(!output.contains("class m2 cycle"));
    assert!(!output.contains("linkStyle"));
}

#[test]
fn test_dot_output() {
    let output = render_with(true, &create_app_graph(), |r, g, c, o| {
        r.render_dot(g, c, o)
    });

    assert!(output.starts_with("digraph module_dependencies {"));
    assert!(output.trim_end().ends_with('}'));

    assert!(output.contains(
        r##""app.ts" [style=filled, fillcolor="#E8F5E9", color="#388E3C", penwidth=2];"##
    ));
    assert!(output.contains(
        r##""store.ts" [style=filled, fillcolor="#FFF3E0", color="#F57C00", penwidth=2];"##
    ));
    assert!(output.contains(
        r##""pages/home.ts" -> "store.ts" [color="#64B5F6", penwidth=2, label="2x"];"##
    ));
    assert!(output.contains(r##""store.ts" -> "api.ts" [color="#FF6500", penwidth=3];"##));
    assert!(output.contains(r##""api.ts" -> "store.ts" [color="#FF6500", penwidth=3];"##));
}

#[test]
fn test_dot_without_highlighting() {
    let output = render_with(false, &create_app_graph(), |r, g, c, o| {
        r.render_dot(g, c, o)
    });

    assert!(!output.contains("#FF6500"));
    assert!(output.contains(r##""store.ts" -> "api.ts" [color="#64B5F6", penwidth=2];"##));
}

#[test]
fn test_only_reported_links_are_highlighted() {
    // b -> a closes the loop; a -> b belongs to it as well, but index -> b
    // does not even though b is a cycle member
    let graph = GraphAssembler::assemble(&[
        Edge::entry("index.js"),
        Edge::new("a.js", "index.js"),
        Edge::new("b.js", "a.js"),
        Edge::new("a.js", "b.js"),
        Edge::new("b.js", "index.js"),
    ]);

    let output = render_with(true, &graph, |r, g, c, o| r.render_dot(g, c, o));

    assert!(output.contains(r##""a.js" -> "b.js" [color="#FF6500", penwidth=3];"##));
    assert!(output.contains(r##""b.js" -> "a.js" [color="#FF6500", penwidth=3];"##));
    assert!(output.contains(r##""index.js" -> "b.js" [color="#64B5F6", penwidth=2];"##));
}
