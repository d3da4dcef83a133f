use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid edge record in '{file}' at line {line} column {column}: {reason}")]
#[diagnostic(
    code(loop_de_loop::edge_parse_error),
    help(
        "Each record must be a JSON object like {{\"dependency\": \"./a.js\", \"issuer\": \
         \"./b.js\"}}"
    )
)]
pub struct EdgeParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("{reason}")]
    pub span: Option<SourceSpan>,
    /// Position in the whole stream, 1-based
    pub line: usize,
    pub column: usize,
    /// What the JSON parser rejected, without its own position
    pub reason: String,
}

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid configuration file '{file}'")]
#[diagnostic(
    code(loop_de_loop::config_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct ConfigParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum LoopError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(loop_de_loop::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report to '{path}'")]
    #[diagnostic(
        code(loop_de_loop::write_error),
        help("Check that the output directory is writable and the disk is not full")
    )]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    EdgeParseError(Box<EdgeParseError>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParseError(Box<ConfigParseError>),

    #[error("JSON serialization error")]
    #[diagnostic(
        code(loop_de_loop::json_error),
        help("A reachable cycle cannot be serialized as a nested graph")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(loop_de_loop::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(loop_de_loop::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(loop_de_loop::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(loop_de_loop::graph_error),
        help("The analysis run was driven out of order; this is a caller bug")
    )]
    GraphError { message: String },
}

impl LoopError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        LoopError::ConfigurationError {
            message: message.into(),
        }
    }

    pub(crate) fn graph(message: impl Into<String>) -> Self {
        LoopError::GraphError {
            message: message.into(),
        }
    }
}
