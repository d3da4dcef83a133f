//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::constants::analysis::STDIN_INPUT;
use crate::edges::PathStyle;

/// Common arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Edge stream files or directories to read ('-' for stdin, the default)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// TOML configuration file; explicit flags take precedence over it
    #[arg(long, value_name = "FILE", env = "LOOP_DE_LOOP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Options controlling how edges become a graph and how cycles are trimmed
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// How much of the path leading into a cycle to report (full, pre,
    /// circular)
    #[arg(long, value_name = "MODE", env = "LOOP_DE_LOOP_CIRCULAR_MODE")]
    pub circular_mode: Option<String>,

    /// Only admit edges whose paths start with this prefix or match this
    /// glob (repeatable)
    #[arg(
        long,
        value_name = "PATH",
        value_delimiter = ',',
        env = "LOOP_DE_LOOP_INCLUDE"
    )]
    pub include: Vec<String>,

    /// Only admit edges between files with this extension (repeatable)
    #[arg(
        long = "extension",
        value_name = "EXT",
        value_delimiter = ',',
        env = "LOOP_DE_LOOP_EXTENSIONS"
    )]
    pub extensions: Vec<String>,

    /// How module paths are written in reports
    #[arg(long, value_enum, env = "LOOP_DE_LOOP_PATH_STYLE")]
    pub path_style: Option<PathStyle>,

    /// Directory relative paths are computed from (defaults to the current
    /// directory)
    #[arg(long, value_name = "DIR", env = "LOOP_DE_LOOP_CONTEXT")]
    pub context: Option<PathBuf>,
}

impl CommonArgs {
    /// Get inputs, reading stdin if none provided
    pub fn get_inputs(&self) -> Vec<PathBuf> {
        if self.inputs.is_empty() {
            vec![PathBuf::from(STDIN_INPUT)]
        } else {
            self.inputs.clone()
        }
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::LoopError>;
}

/// Trait for configurations that can be created from CLI commands
pub trait FromCommand: Sized {
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::LoopError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::LoopError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
