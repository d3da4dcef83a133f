use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, trace};

use crate::core::{CircularPath, Edge};
use crate::detector::{CircularMode, detect, detect_all};
use crate::edges::{EdgeFilter, EdgeRecorder, PathNormalizer};
use crate::error::LoopError;
use crate::graph::{DependencyGraph, GraphAssembler};
use crate::reports::{JsonFormatter, ReportFormatter, ReportPayload, select, select_all};

/// Passive observer of one build
///
/// Resolved edges are pushed in through [`BuildObserver::observe`] from any
/// number of threads. When the build completes, [`BuildObserver::finish`]
/// consumes the observer and runs assembly, detection, selection, and
/// formatting exactly once.
pub struct BuildObserver {
    filter: EdgeFilter,
    normalizer: PathNormalizer,
    mode: CircularMode,
    all_cycles: bool,
    formatter: Box<dyn ReportFormatter>,
    recorder: EdgeRecorder,
    rejected: AtomicUsize,
}

impl Default for BuildObserver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for BuildObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildObserver")
            .field("filter", &self.filter)
            .field("normalizer", &self.normalizer)
            .field("mode", &self.mode)
            .field("all_cycles", &self.all_cycles)
            .field("recorded", &self.recorder.len())
            .finish_non_exhaustive()
    }
}

impl BuildObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> BuildObserverBuilder {
        BuildObserverBuilder::new()
    }

    pub fn mode(&self) -> CircularMode {
        self.mode
    }

    /// Offer one resolved edge
    ///
    /// Returns `Ok(false)` when the admission filter drops the edge. Paths
    /// are filtered as observed and normalized afterwards.
    pub fn observe(&self, dependency: &str, issuer: &str) -> Result<bool, LoopError> {
        let raw = Edge::new(dependency, issuer);
        if !self.filter.admits(&raw) {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            trace!(dependency, issuer, "edge not admitted");
            return Ok(false);
        }

        let edge = Edge::new(
            self.normalizer.normalize(dependency),
            self.normalizer.normalize(issuer),
        );
        self.recorder.record(edge)?;
        Ok(true)
    }

    pub fn record_edge(&self, edge: &Edge) -> Result<bool, LoopError> {
        self.observe(&edge.dependency, &edge.issuer)
    }

    pub fn edges_recorded(&self) -> usize {
        self.recorder.len()
    }

    pub fn edges_rejected(&self) -> usize {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Freeze the edge log and run assembly and detection
    pub fn close(self) -> Result<Analysis, LoopError> {
        self.analyze()
    }

    /// Complete the run: analyze, select the report, and format it
    pub fn finish(self) -> Result<AnalysisOutcome, LoopError> {
        let analysis = self.analyze()?;
        let report = self.formatter.format(&analysis.payload())?;
        Ok(AnalysisOutcome { analysis, report })
    }

    fn analyze(&self) -> Result<Analysis, LoopError> {
        let edges = self.recorder.close()?;
        let rejected = self.edges_rejected();
        debug!(
            recorded = edges.len(),
            rejected,
            mode = %self.mode,
            "build complete, analyzing"
        );

        let graph = GraphAssembler::assemble(&edges);
        let cycles = if self.all_cycles {
            detect_all(&graph, self.mode)
        } else {
            detect(&graph, self.mode).into_iter().collect()
        };
        debug!(cycles = cycles.len(), "cycle detection finished");

        Ok(Analysis {
            graph,
            cycles,
            mode: self.mode,
            all_cycles: self.all_cycles,
            edges: edges.len(),
            rejected,
        })
    }
}

#[derive(Default)]
pub struct BuildObserverBuilder {
    filter: Option<EdgeFilter>,
    normalizer: Option<PathNormalizer>,
    mode: Option<CircularMode>,
    all_cycles: bool,
    formatter: Option<Box<dyn ReportFormatter>>,
}

impl BuildObserverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: EdgeFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_normalizer(mut self, normalizer: PathNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_mode(mut self, mode: CircularMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_all_cycles(mut self, all_cycles: bool) -> Self {
        self.all_cycles = all_cycles;
        self
    }

    pub fn with_formatter(mut self, formatter: impl ReportFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn with_boxed_formatter(mut self, formatter: Box<dyn ReportFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn build(self) -> BuildObserver {
        BuildObserver {
            filter: self.filter.unwrap_or_default(),
            normalizer: self.normalizer.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            all_cycles: self.all_cycles,
            formatter: self
                .formatter
                .unwrap_or_else(|| Box::new(JsonFormatter::new())),
            recorder: EdgeRecorder::new(),
            rejected: AtomicUsize::new(0),
        }
    }
}

/// Frozen result of one run: the graph and the cycles found in it
///
/// Without `all_cycles` only the last discovered cycle is kept.
#[derive(Debug)]
pub struct Analysis {
    graph: DependencyGraph,
    cycles: Vec<CircularPath>,
    mode: CircularMode,
    all_cycles: bool,
    edges: usize,
    rejected: usize,
}

impl Analysis {
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// The reported cycle: the last one discovered
    pub fn cycle(&self) -> Option<&CircularPath> {
        self.cycles.last()
    }

    /// Retained cycles, in discovery order
    pub fn cycles(&self) -> &[CircularPath] {
        &self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn mode(&self) -> CircularMode {
        self.mode
    }

    pub fn edges_recorded(&self) -> usize {
        self.edges
    }

    pub fn edges_rejected(&self) -> usize {
        self.rejected
    }

    pub fn payload(&self) -> ReportPayload<'_> {
        if self.all_cycles {
            select_all(&self.graph, self.cycles.clone())
        } else {
            select(&self.graph, self.cycle().cloned())
        }
    }
}

/// An [`Analysis`] together with its formatted report
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub report: String,
}
