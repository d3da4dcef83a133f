//! # Cycle Detection Module
//!
//! This module finds circular dependency chains in an assembled module
//! graph.
//!
//! ## Algorithm
//!
//! A depth-first walk starts at the entry module and keeps the ordered list
//! of modules on the current descent. Entering a module that is already on
//! that list closes a cycle: the chain is cut according to the configured
//! [`CircularMode`] and recorded, and the walk backs out of that branch.
//! There is no global visited set, so a module shared by two branches is
//! walked once per branch, and a cycle reachable along several descents is
//! reported once per descent.
//!
//! [`detect`] keeps only the most recently discovered cycle; [`detect_all`]
//! keeps every one in discovery order.
//!
//! ## Example
//!
//! ```
//! use loop_de_loop::core::Edge;
//! use loop_de_loop::detector::{CircularMode, detect};
//! use loop_de_loop::graph::GraphAssembler;
//!
//! let graph = GraphAssembler::assemble(&[
//!     Edge::entry("src/index.js"),
//!     Edge::new("src/a.js", "src/index.js"),
//!     Edge::new("src/b.js", "src/a.js"),
//!     Edge::new("src/a.js", "src/b.js"),
//! ]);
//!
//! let cycle = detect(&graph, CircularMode::Circular).unwrap();
//! assert_eq!(cycle.paths(), ["src/a.js", "src/b.js", "src/a.js"]);
//! ```

mod detector_impl;

pub use detector_impl::*;
