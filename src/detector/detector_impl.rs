use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::CircularPath;
use crate::graph::DependencyGraph;

/// How much context around a detected cycle is kept in the reported path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CircularMode {
    /// The whole descent from the entry module, closed by the repeated node
    Full,
    /// The cycle plus the single edge leading into it
    Pre,
    /// Only the cycle itself
    #[default]
    Circular,
}

impl CircularMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircularMode::Full => "full",
            CircularMode::Pre => "pre",
            CircularMode::Circular => "circular",
        }
    }

    /// Parse a mode name, falling back to [`CircularMode::Circular`] for
    /// anything unrecognized
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "full" => CircularMode::Full,
            "pre" => CircularMode::Pre,
            "circular" => CircularMode::Circular,
            other => {
                warn!(mode = other, "unknown circular mode, using 'circular'");
                CircularMode::Circular
            }
        }
    }

    /// Cut a cycle out of the current descent
    ///
    /// `stack` is the path from the root down to (excluding) the node being
    /// entered; `repeated` is that node, which already appears in `stack`.
    pub fn trim(self, stack: &[String], repeated: &str) -> CircularPath {
        let mut chain: Vec<String> = Vec::with_capacity(stack.len() + 1);
        chain.extend_from_slice(stack);
        chain.push(repeated.to_string());

        let last = chain.len() - 1;
        let start = chain.iter().position(|p| p == repeated).unwrap_or(last);

        let kept = match self {
            CircularMode::Full => chain,
            CircularMode::Circular => chain.split_off(start),
            // Starting at the root leaves nothing before the cycle; only the
            // closing element survives.
            CircularMode::Pre if start == 0 => chain.split_off(last),
            CircularMode::Pre => chain.split_off(start - 1),
        };
        CircularPath::new(kept)
    }
}

impl FromStr for CircularMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for CircularMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<CircularMode> for String {
    fn from(mode: CircularMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for CircularMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detector for circular dependency chains reachable from the entry module
///
/// Walks the graph depth-first from the root, tracking the modules on the
/// current descent. Entering a module that is already on the descent records
/// a cycle and stops that branch; sibling branches are still explored. A
/// module reached again through a different branch is not a cycle.
pub struct CycleDetector {
    mode: CircularMode,
    cycles: Vec<CircularPath>,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(CircularMode::default())
    }
}

impl CycleDetector {
    pub fn new(mode: CircularMode) -> Self {
        Self {
            mode,
            cycles: Vec::new(),
        }
    }

    pub fn mode(&self) -> CircularMode {
        self.mode
    }

    /// Run a traversal over `graph`, replacing any previous results
    pub fn detect_cycles(&mut self, graph: &DependencyGraph) {
        self.cycles = detect_all(graph, self.mode);
    }

    /// Every cycle found by the last traversal, in discovery order
    pub fn cycles(&self) -> &[CircularPath] {
        &self.cycles
    }

    /// The most recently discovered cycle
    pub fn last_cycle(&self) -> Option<&CircularPath> {
        self.cycles.last()
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}

/// Find the most recently discovered cycle reachable from the root
///
/// Only one cycle is held at a time; each discovery replaces the previous
/// one. Use [`detect_all`] to keep every discovery.
pub fn detect(graph: &DependencyGraph, mode: CircularMode) -> Option<CircularPath> {
    match walk(graph, mode, Found::Last(None)) {
        Found::Last(cycle) => cycle,
        Found::All(mut cycles) => cycles.pop(),
    }
}

/// Find every cycle reachable from the root, in discovery order
///
/// A loop reachable along many different descents is reported once per
/// descent.
pub fn detect_all(graph: &DependencyGraph, mode: CircularMode) -> Vec<CircularPath> {
    match walk(graph, mode, Found::All(Vec::new())) {
        Found::Last(cycle) => cycle.into_iter().collect(),
        Found::All(cycles) => cycles,
    }
}

fn walk(graph: &DependencyGraph, mode: CircularMode, found: Found) -> Found {
    let Some(root) = graph.root() else {
        debug!("no entry module; skipping cycle detection");
        return found;
    };

    let mut walk = Walk::new(graph, mode, found);
    walk.run(root);

    debug!(
        mode = %mode,
        discovered = walk.discovered,
        "cycle detection complete"
    );
    walk.found
}

/// Where discovered cycles go
enum Found {
    /// Keep only the most recent discovery
    Last(Option<CircularPath>),
    All(Vec<CircularPath>),
}

impl Found {
    fn push(&mut self, cycle: CircularPath) {
        match self {
            Found::Last(last) => *last = Some(cycle),
            Found::All(cycles) => cycles.push(cycle),
        }
    }
}

struct Frame {
    node: NodeIndex,
    deps: Vec<NodeIndex>,
    next: usize,
}

/// Depth-first traversal state
///
/// Frames are kept on the heap so long import chains cannot exhaust the
/// thread stack. The visiting order matches a recursive walk exactly.
struct Walk<'a> {
    graph: &'a DependencyGraph,
    mode: CircularMode,
    path: Vec<String>,
    on_path: HashSet<NodeIndex>,
    frames: Vec<Frame>,
    found: Found,
    discovered: usize,
}

impl<'a> Walk<'a> {
    fn new(graph: &'a DependencyGraph, mode: CircularMode, found: Found) -> Self {
        Self {
            graph,
            mode,
            path: Vec::new(),
            on_path: HashSet::new(),
            frames: Vec::new(),
            found,
            discovered: 0,
        }
    }

    fn run(&mut self, root: NodeIndex) {
        self.enter(root);

        while let Some(frame) = self.frames.last_mut() {
            if frame.next < frame.deps.len() {
                let child = frame.deps[frame.next];
                frame.next += 1;
                self.enter(child);
            } else {
                self.leave();
            }
        }
    }

    fn enter(&mut self, node: NodeIndex) {
        let path = self.graph.path(node);

        if self.on_path.contains(&node) {
            let cycle = self.mode.trim(&self.path, path);
            trace!(cycle = %cycle, "circular dependency found");
            self.discovered += 1;
            self.found.push(cycle);
            return;
        }

        self.path.push(path.to_string());
        self.on_path.insert(node);
        self.frames.push(Frame {
            node,
            deps: self.graph.deps(node),
            next: 0,
        });
    }

    fn leave(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.on_path.remove(&frame.node);
            self.path.pop();
        }
    }
}
