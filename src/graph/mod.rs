//! # Module Graph Assembly and Rendering
//!
//! This module turns an ordered stream of observed edges into a shared
//! module graph and renders it for humans.
//!
//! ## Components
//!
//! ### Graph Building
//! - **NodeRegistry**: path-keyed arena; one node per normalized path
//! - **GraphAssembler**: consumes edges in arrival order, links issuers to
//!   their dependencies, and records the entry module
//! - **DependencyGraph**: the assembled graph, serializable as a nested tree
//!   through [`DependencyGraph::view`]
//!
//! ### Graph Rendering
//! - **GraphRenderer**: ASCII tree, Mermaid, and Graphviz DOT output with
//!   cycle highlighting
//!
//! ## Example
//!
//! ```
//! use loop_de_loop::core::Edge;
//! use loop_de_loop::graph::GraphAssembler;
//!
//! let graph = GraphAssembler::assemble(&[
//!     Edge::entry("src/main.ts"),
//!     Edge::new("src/util.ts", "src/main.ts"),
//! ]);
//!
//! let json = serde_json::to_string(&graph.view()).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"path":"src/main.ts","deps":[{"path":"src/util.ts","deps":[]}]}"#
//! );
//! ```

mod builder;
mod registry;
mod renderer;
mod types;

pub use builder::GraphAssembler;
pub use petgraph::graph::NodeIndex;
pub use registry::NodeRegistry;
pub use renderer::GraphRenderer;
pub use types::{DepLink, DependencyGraph, GraphView, ModuleNode};
