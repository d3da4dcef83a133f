//! Report destinations

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::constants::output::DEFAULT_FILENAME;
use crate::error::LoopError;

/// Receives the formatted report text
///
/// Failures are logged by the sink and returned; nothing is retried.
pub trait ReportSink {
    fn deliver(&self, text: &str) -> Result<(), LoopError>;
}

/// Prints the report to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn deliver(&self, text: &str) -> Result<(), LoopError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Writes the report to `<dir>/<filename>`, creating `dir` when missing
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    filename: String,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    fn write(&self, path: &Path, text: &str) -> Result<(), LoopError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| LoopError::WriteError {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(path, text).map_err(|source| LoopError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ReportSink for FileSink {
    fn deliver(&self, text: &str) -> Result<(), LoopError> {
        let path = self.path();
        match self.write(&path, text) {
            Ok(()) => {
                debug!(path = %path.display(), bytes = text.len(), "report written");
                Ok(())
            }
            Err(err) => {
                error!(path = %path.display(), "failed to write report: {err}");
                Err(err)
            }
        }
    }
}
