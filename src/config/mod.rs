//! # Configuration Module
//!
//! Configuration structures for the loop-de-loop commands. Values come from
//! three places, in order of precedence:
//!
//! 1. command line flags (and their `LOOP_DE_LOOP_*` environment variables)
//! 2. the TOML file passed with `--config`
//! 3. built-in defaults
//!
//! ## Command Configurations
//!
//! - **InspectConfig**: Configuration for the `inspect` command
//! - **SpectacleConfig**: Configuration for the `spectacle` command
//! - **AnalysisOptions**: edge admission, path style, and cycle mode shared
//!   by both
//!
//! ## Example
//!
//! ```
//! use loop_de_loop::cli::OutputFormat;
//! use loop_de_loop::common::ConfigBuilder;
//! use loop_de_loop::config::{AnalysisOptions, InspectConfig};
//!
//! # fn main() -> Result<(), loop_de_loop::error::LoopError> {
//! let config = InspectConfig::builder()
//!     .with_inputs(vec!["edges.jsonl".into()])
//!     .with_analysis(AnalysisOptions::new("/repo".into()))
//!     .with_format(OutputFormat::Human)
//!     .with_error_on_cycles(true)
//!     .build()?;
//!
//! assert_eq!(config.filename, "module-graph.json");
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod file;
pub mod inspect;
pub mod spectacle;

pub use common::AnalysisOptions;
pub use file::ConfigFile;
pub use inspect::InspectConfig;
pub use spectacle::SpectacleConfig;
