//! Discovery and loading of recorded edge streams

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use super::parser::parse_edge_stream;
use crate::constants::analysis::{EDGE_FILE_EXTENSIONS, STDIN_INPUT};
use crate::core::Edge;
use crate::error::LoopError;
use crate::progress::ProgressReporter;

/// A single edge stream to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeInput {
    Stdin,
    File(PathBuf),
}

impl EdgeInput {
    pub fn name(&self) -> String {
        match self {
            EdgeInput::Stdin => "<stdin>".to_string(),
            EdgeInput::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String, LoopError> {
        match self {
            EdgeInput::Stdin => {
                let mut content = String::new();
                std::io::stdin().lock().read_to_string(&mut content)?;
                Ok(content)
            }
            EdgeInput::File(path) => {
                std::fs::read_to_string(path).map_err(|source| LoopError::FileReadError {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

impl fmt::Display for EdgeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Expand command line inputs into concrete edge streams
///
/// `-` reads stdin. Directories contribute every `*.jsonl` / `*.json` file
/// beneath them, sorted by path. Files are taken as given regardless of
/// extension.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<EdgeInput>, LoopError> {
    let mut discovered = Vec::new();

    for input in inputs {
        if input.as_os_str() == STDIN_INPUT {
            discovered.push(EdgeInput::Stdin);
        } else if input.is_dir() {
            let before = discovered.len();
            discovered.extend(scan_directory(input)?);
            debug!(
                dir = %input.display(),
                files = discovered.len() - before,
                "scanned directory for edge streams"
            );
        } else if input.is_file() {
            discovered.push(EdgeInput::File(input.clone()));
        } else {
            return Err(LoopError::FileReadError {
                path: input.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file or directory",
                ),
            });
        }
    }

    Ok(discovered)
}

fn scan_directory(dir: &Path) -> Result<Vec<EdgeInput>, LoopError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).into_iter().filter_entry(|e| {
        let name = e.file_name();
        name != ".git" && name != "node_modules"
    }) {
        let entry = entry.map_err(|e| LoopError::FileReadError {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            source: e.into(),
        })?;

        if entry.file_type().is_file() && has_edge_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files.into_iter().map(EdgeInput::File).collect())
}

fn has_edge_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EDGE_FILE_EXTENSIONS.contains(&ext))
}

/// Read and parse every input, returning one edge list per input in the
/// order the inputs were given
///
/// Files are parsed in parallel; the first failure aborts the load.
pub fn load_edges(
    inputs: &[EdgeInput],
    progress: Option<&ProgressReporter>,
) -> Result<Vec<Vec<Edge>>, LoopError> {
    inputs
        .par_iter()
        .map(|input| {
            if let Some(p) = progress {
                p.reading_input(&input.name());
            }
            let content = input.read()?;
            let edges = parse_edge_stream(&input.name(), &content)?;
            debug!(input = %input, edges = edges.len(), "parsed edge stream");
            Ok(edges)
        })
        .collect()
}
