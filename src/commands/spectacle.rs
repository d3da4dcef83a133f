//! Spectacle command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{AnalysisOptions, ConfigFile, SpectacleConfig};
use crate::error::LoopError;

impl FromCommand for SpectacleConfig {
    fn from_command(command: Commands) -> Result<Self, LoopError> {
        match command {
            Commands::Spectacle {
                common,
                analysis,
                format,
                output,
                no_highlight,
            } => {
                let file = match &common.config {
                    Some(path) => ConfigFile::load(path)?,
                    None => ConfigFile::default(),
                };
                let highlight_cycles = !no_highlight && file.highlight_cycles.unwrap_or(true);

                SpectacleConfig::builder()
                    .with_inputs(common.get_inputs())
                    .with_analysis(AnalysisOptions::resolve(analysis, &file)?)
                    .with_format(format.or(file.graph_format).unwrap_or_default())
                    .with_output(output)
                    .with_highlight_cycles(highlight_cycles)
                    .build()
            }
            _ => Err(LoopError::config("Invalid command type for SpectacleConfig")),
        }
    }
}

crate::impl_try_from_command!(SpectacleConfig);

/// Execute the spectacle command for rendering the module graph
pub fn execute_spectacle_command(command: Commands, quiet: bool) -> Result<()> {
    let mut config = SpectacleConfig::from_command(command)
        .wrap_err("Failed to parse spectacle command configuration")?;
    config.quiet = quiet;

    use crate::executors::CommandExecutor;
    use crate::executors::spectacle::SpectacleExecutor;
    SpectacleExecutor::execute(config)
}
