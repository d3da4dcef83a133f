//! Configuration constants for loop-de-loop
//!
//! Defaults used when neither a flag, an environment variable, nor the
//! configuration file provides a value.

use std::time::Duration;

/// Progress spinner configuration
pub mod progress {
    use super::*;

    /// Duration between spinner updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the roller coaster animation
    pub const SPINNER_FRAMES: &[&str] = &["🎢 ", "🎢◜", "🎢◝", "🎢◞", "🎢◟", "✓"];
}

/// Output configuration
pub mod output {
    /// Default report filename inside the output directory
    pub const DEFAULT_FILENAME: &str = "module-graph.json";
}

/// Analysis configuration
pub mod analysis {
    /// File extensions collected when an input path is a directory
    pub const EDGE_FILE_EXTENSIONS: &[&str] = &["jsonl", "json"];

    /// Input path that reads the edge stream from stdin
    pub const STDIN_INPUT: &str = "-";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_constants() {
        assert_eq!(progress::TICK_INTERVAL, Duration::from_millis(100));
        assert_eq!(progress::SPINNER_FRAMES.last(), Some(&"✓"));
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_FILENAME, "module-graph.json");
    }

    #[test]
    fn test_analysis_constants() {
        assert_eq!(analysis::STDIN_INPUT, "-");
        assert!(analysis::EDGE_FILE_EXTENSIONS.contains(&"jsonl"));
    }
}
