//! Report selection, formatting, and delivery
//!
//! After detection the selector decides what the run reports:
//! - a cycle, when one was found
//! - the whole dependency graph otherwise
//!
//! The chosen [`ReportPayload`] is handed unmodified to a
//! [`ReportFormatter`], and the resulting text to a [`ReportSink`].

pub mod human;
pub mod json;
pub mod sink;

use serde::Serialize;

use crate::core::CircularPath;
use crate::error::LoopError;
use crate::graph::{DependencyGraph, GraphView};

/// The value a run reports
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportPayload<'a> {
    /// A single cycle, in the configured trimming mode
    Cycle(CircularPath),
    /// Every cycle found, in discovery order
    Cycles(Vec<CircularPath>),
    /// The nested graph starting at the entry module
    Graph(GraphView<'a>),
}

impl ReportPayload<'_> {
    pub fn is_cycle(&self) -> bool {
        matches!(self, ReportPayload::Cycle(_) | ReportPayload::Cycles(_))
    }
}

/// Choose between the detected cycle and the full graph
///
/// An empty cycle counts as no cycle.
pub fn select(graph: &DependencyGraph, cycle: Option<CircularPath>) -> ReportPayload<'_> {
    match cycle {
        Some(cycle) if !cycle.is_empty() => ReportPayload::Cycle(cycle),
        _ => ReportPayload::Graph(graph.view()),
    }
}

/// Like [`select`], but reports every discovered cycle
pub fn select_all(graph: &DependencyGraph, cycles: Vec<CircularPath>) -> ReportPayload<'_> {
    let cycles: Vec<CircularPath> = cycles.into_iter().filter(|c| !c.is_empty()).collect();
    if cycles.is_empty() {
        ReportPayload::Graph(graph.view())
    } else {
        ReportPayload::Cycles(cycles)
    }
}

/// Turns a report payload into text
pub trait ReportFormatter: Send + Sync {
    fn format(&self, payload: &ReportPayload<'_>) -> Result<String, LoopError>;
}

/// Formatter backed by a caller-supplied function
pub struct FnFormatter<F> {
    format: F,
}

impl<F> FnFormatter<F>
where
    F: Fn(&ReportPayload<'_>) -> String + Send + Sync,
{
    pub fn new(format: F) -> Self {
        Self { format }
    }
}

impl<F> ReportFormatter for FnFormatter<F>
where
    F: Fn(&ReportPayload<'_>) -> String + Send + Sync,
{
    fn format(&self, payload: &ReportPayload<'_>) -> Result<String, LoopError> {
        Ok((self.format)(payload))
    }
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use sink::{FileSink, ReportSink, StdoutSink};
