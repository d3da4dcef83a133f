//! Serialized edge delivery
//!
//! Hosts may resolve modules on several threads at once. The recorder is the
//! point where those deliveries are put into a single order before they reach
//! the graph assembler: the arrival order of the run is the order in which
//! callers acquire the lock.

use parking_lot::Mutex;
use tracing::trace;

use crate::core::Edge;
use crate::error::LoopError;

#[derive(Debug, Default)]
struct RecorderState {
    edges: Vec<Edge>,
    closed: bool,
}

/// Thread-safe, append-only log of the edges observed during one build
#[derive(Debug, Default)]
pub struct EdgeRecorder {
    state: Mutex<RecorderState>,
}

impl EdgeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge to the log
    ///
    /// Fails once the log has been closed.
    pub fn record(&self, edge: Edge) -> Result<(), LoopError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LoopError::graph(format!(
                "edge {} <- {} recorded after the build completed",
                edge.dependency, edge.issuer
            )));
        }
        trace!(dependency = %edge.dependency, issuer = %edge.issuer, "edge recorded");
        state.edges.push(edge);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.state.lock().edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().edges.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Freeze the log and take its contents
    ///
    /// A log can only be closed once.
    pub fn close(&self) -> Result<Vec<Edge>, LoopError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LoopError::graph("edge log closed twice"));
        }
        state.closed = true;
        Ok(std::mem::take(&mut state.edges))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_record_then_close() {
        let recorder = EdgeRecorder::new();
        recorder.record(Edge::entry("a")).unwrap();
        recorder.record(Edge::new("b", "a")).unwrap();

        assert_eq!(recorder.len(), 2);
        let edges = recorder.close().unwrap();
        assert_eq!(edges, vec![Edge::entry("a"), Edge::new("b", "a")]);
        assert!(recorder.is_closed());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_record_after_close_fails() {
        let recorder = EdgeRecorder::new();
        recorder.close().unwrap();

        let err = recorder.record(Edge::entry("late")).unwrap_err();
        assert!(matches!(err, LoopError::GraphError { .. }));
    }

    #[test]
    fn test_close_twice_fails() {
        let recorder = EdgeRecorder::new();
        recorder.close().unwrap();
        assert!(recorder.close().is_err());
    }

    #[test]
    fn test_concurrent_producers_are_serialized() {
        let recorder = EdgeRecorder::new();

        thread::scope(|scope| {
            for worker in 0..4 {
                let recorder = &recorder;
                scope.spawn(move || {
                    for i in 0..250 {
                        recorder
                            .record(Edge::new(format!("w{worker}/m{i}"), format!("w{worker}")))
                            .unwrap();
                    }
                });
            }
        });

        let edges = recorder.close().unwrap();
        assert_eq!(edges.len(), 1000);

        // Each producer's own edges keep their relative order
        let worker_two: Vec<&str> = edges
            .iter()
            .filter(|edge| edge.issuer == "w2")
            .map(|edge| edge.dependency.as_str())
            .collect();
        let expected: Vec<String> = (0..250).map(|i| format!("w2/m{i}")).collect();
        assert_eq!(worker_two, expected);
    }
}
