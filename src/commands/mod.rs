//! Command implementations for the loop-de-loop CLI
//!
//! - inspect: replay recorded edges and report the cycle or the graph
//! - spectacle: render the module graph with cycles highlighted

pub mod inspect;
pub mod spectacle;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands, quiet: bool) -> Result<()> {
    match &command {
        Commands::Inspect { .. } => inspect::execute_inspect_command(command, quiet),
        Commands::Spectacle { .. } => spectacle::execute_spectacle_command(command, quiet),
    }
}
