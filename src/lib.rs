//! # Loop-de-Loop - Find Circular Imports in a Build's Module Graph
//!
//! Loop-de-Loop is a passive observer for module bundlers. While a build
//! runs it receives every resolved `(dependency, issuer)` pair; when the
//! build completes it assembles those edges into a module graph, looks for
//! circular dependency chains reachable from the entry module, and reports
//! either the cycle it found or the full nested graph.
//!
//! ## Main Components
//!
//! - **Edges**: parsing recorded edge streams, admission filtering, path
//!   normalization, and the thread-safe edge recorder
//! - **Graph**: the path-keyed node registry and the graph assembler
//! - **Detector**: depth-first cycle detection with `full`, `pre`, and
//!   `circular` trimming
//! - **Reports**: report selection, formatters, and sinks
//! - **Analyzer**: the [`BuildObserver`](analyzer::BuildObserver) tying all
//!   of the above into one run
//!
//! ## Usage
//!
//! ### Observing a Build
//!
//! ```
//! use loop_de_loop::analyzer::BuildObserver;
//! use loop_de_loop::detector::CircularMode;
//! use loop_de_loop::edges::{EdgeFilter, PathNormalizer, PathStyle};
//! use loop_de_loop::reports::{FileSink, JsonFormatter, ReportSink};
//!
//! # fn main() -> Result<(), loop_de_loop::error::LoopError> {
//! let observer = BuildObserver::builder()
//!     .with_filter(EdgeFilter::new(&["/repo/src"], &["js", "ts"])?)
//!     .with_normalizer(PathNormalizer::from_style(
//!         PathStyle::Relative,
//!         "/repo".into(),
//!     ))
//!     .with_mode(CircularMode::Full)
//!     .with_formatter(JsonFormatter::new())
//!     .build();
//!
//! // The bundler reports each resolution as it happens
//! observer.observe("/repo/src/index.ts", "/repo/src/index.ts")?;
//! observer.observe("/repo/src/store.ts", "/repo/src/index.ts")?;
//! observer.observe("/repo/src/view.ts", "/repo/src/store.ts")?;
//! observer.observe("/repo/src/store.ts", "/repo/src/view.ts")?;
//! observer.observe("/repo/node_modules/react/index.js", "/repo/src/view.ts")?;
//!
//! // Build complete
//! let outcome = observer.finish()?;
//! assert_eq!(
//!     outcome.analysis.cycle().map(|c| c.paths().to_vec()),
//!     Some(vec![
//!         "src/index.ts".to_string(),
//!         "src/store.ts".to_string(),
//!         "src/view.ts".to_string(),
//!         "src/store.ts".to_string(),
//!     ])
//! );
//!
//! # let dir = tempfile::tempdir().unwrap();
//! FileSink::new(dir.path()).deliver(&outcome.report)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the Engine Directly
//!
//! ```
//! use loop_de_loop::core::Edge;
//! use loop_de_loop::detector::{CircularMode, detect};
//! use loop_de_loop::graph::GraphAssembler;
//! use loop_de_loop::reports::select;
//!
//! let edges = vec![
//!     Edge::entry("a.js"),
//!     Edge::new("b.js", "a.js"),
//!     Edge::new("c.js", "b.js"),
//! ];
//!
//! let graph = GraphAssembler::assemble(&edges);
//! let payload = select(&graph, detect(&graph, CircularMode::Circular));
//!
//! assert_eq!(
//!     serde_json::to_string(&payload).unwrap(),
//!     r#"{"path":"a.js","deps":[{"path":"b.js","deps":[{"path":"c.js","deps":[]}]}]}"#
//! );
//! ```
//!
//! ### Rendering the Graph
//!
//! ```
//! use loop_de_loop::core::Edge;
//! use loop_de_loop::detector::{CircularMode, detect_all};
//! use loop_de_loop::graph::{GraphAssembler, GraphRenderer};
//!
//! # fn main() -> Result<(), loop_de_loop::error::LoopError> {
//! let graph = GraphAssembler::assemble(&[
//!     Edge::entry("a.js"),
//!     Edge::new("b.js", "a.js"),
//!     Edge::new("a.js", "b.js"),
//! ]);
//! let cycles = detect_all(&graph, CircularMode::Circular);
//!
//! let mut mermaid = Vec::new();
//! GraphRenderer::new(true).render_mermaid(&graph, &cycles, &mut mermaid)?;
//! assert!(String::from_utf8_lossy(&mermaid).starts_with("graph TD"));
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod logging;
mod progress;
mod utils;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod edges;
pub mod error;
pub mod executors;
pub mod graph;
pub mod reports;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    execute_command(cli.command, cli.quiet)
}
