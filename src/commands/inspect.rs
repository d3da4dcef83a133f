//! Inspect command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{AnalysisOptions, ConfigFile, InspectConfig};
use crate::error::LoopError;

impl FromCommand for InspectConfig {
    fn from_command(command: Commands) -> Result<Self, LoopError> {
        match command {
            Commands::Inspect {
                common,
                analysis,
                format,
                output_dir,
                filename,
                all_cycles,
                error_on_cycles,
            } => {
                let file = match &common.config {
                    Some(path) => ConfigFile::load(path)?,
                    None => ConfigFile::default(),
                };

                InspectConfig::builder()
                    .with_inputs(common.get_inputs())
                    .with_analysis(AnalysisOptions::resolve(analysis, &file)?)
                    .with_format(format.or(file.format).unwrap_or_default())
                    .with_output_dir(output_dir.or(file.output_dir))
                    .with_filename(filename.or(file.filename))
                    .with_all_cycles(all_cycles || file.all_cycles.unwrap_or(false))
                    .with_error_on_cycles(
                        error_on_cycles || file.error_on_cycles.unwrap_or(false),
                    )
                    .build()
            }
            _ => Err(LoopError::config("Invalid command type for InspectConfig")),
        }
    }
}

crate::impl_try_from_command!(InspectConfig);

/// Execute the inspect command
pub fn execute_inspect_command(command: Commands, quiet: bool) -> Result<()> {
    let mut config = InspectConfig::from_command(command)
        .wrap_err("Failed to parse inspect command configuration")?;
    config.quiet = quiet;

    use crate::executors::CommandExecutor;
    use crate::executors::inspect::InspectExecutor;
    InspectExecutor::execute(config)
}
