//! Command executors that handle the actual logic for each command

pub mod inspect;
pub mod spectacle;

use miette::{Result, WrapErr};
use tracing::{debug, warn};

use crate::analyzer::BuildObserver;
use crate::edges::{discover_inputs, load_edges};
use crate::progress::ProgressReporter;

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Read every input and replay its edges into the observer, input by input
fn replay_inputs(
    inputs: &[std::path::PathBuf],
    observer: &BuildObserver,
    mut progress: Option<&mut ProgressReporter>,
) -> Result<()> {
    let inputs = discover_inputs(inputs).wrap_err("Failed to discover edge streams")?;
    if inputs.is_empty() {
        warn!("no edge streams found");
    }

    if let Some(p) = progress.as_deref_mut() {
        p.start_loading(inputs.len());
    }

    let streams =
        load_edges(&inputs, progress.as_deref()).wrap_err("Failed to load edge streams")?;

    let mut offered = 0usize;
    for edge in streams.iter().flatten() {
        observer
            .record_edge(edge)
            .wrap_err("Failed to record edge")?;
        offered += 1;
    }

    debug!(
        offered,
        recorded = observer.edges_recorded(),
        rejected = observer.edges_rejected(),
        "edge streams replayed"
    );
    if let Some(p) = progress {
        p.finish_loading(observer.edges_recorded());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::edges::EdgeFilter;

    #[test]
    fn test_replay_inputs_in_order() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("a.jsonl"),
            "{\"dependency\": \"main.js\", \"issuer\": \"main.js\"}\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("b.json"),
            r#"[{"dependency": "util.js", "issuer": "main.js"},
                {"dependency": "vendor.css", "issuer": "main.js"}]"#,
        )
        .unwrap();

        let observer = BuildObserver::builder()
            .with_filter(EdgeFilter::new(&[] as &[&str], &["js"]).unwrap())
            .build();
        replay_inputs(&[temp.path().to_path_buf()], &observer, None).unwrap();

        assert_eq!(observer.edges_recorded(), 2);
        assert_eq!(observer.edges_rejected(), 1);

        let analysis = observer.close().unwrap();
        let root = analysis.graph().root().unwrap();
        assert_eq!(analysis.graph().path(root), "main.js");
        assert_eq!(analysis.graph().deps(root).len(), 1);
    }
}
