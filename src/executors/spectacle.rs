//! Spectacle command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use super::replay_inputs;
use crate::cli::GraphFormat;
use crate::config::SpectacleConfig;
use crate::executors::CommandExecutor;
use crate::graph::GraphRenderer;

pub struct SpectacleExecutor;

impl CommandExecutor for SpectacleExecutor {
    type Config = SpectacleConfig;

    fn execute(config: Self::Config) -> Result<()> {
        if !config.quiet {
            eprintln!(
                "{} Generating {} module graph...",
                style("📊").cyan(),
                format!("{:?}", config.format).to_lowercase()
            );
        }

        let observer = config
            .analysis
            .observer()
            .wrap_err("Invalid analysis options")?
            .with_all_cycles(config.highlight_cycles)
            .build();
        replay_inputs(&config.inputs, &observer, None)?;

        let analysis = observer.close().wrap_err("Failed to analyze module graph")?;

        if analysis.graph().is_empty() {
            if !config.quiet {
                eprintln!("{} No modules observed", style("ℹ").blue());
            }
            return Ok(());
        }

        let cycles = if config.highlight_cycles {
            analysis.cycles().to_vec()
        } else {
            Vec::new()
        };

        let renderer = GraphRenderer::new(config.highlight_cycles);

        // Determine output destination
        let mut output_writer: Box<dyn Write> = if let Some(output_path) = config.output.as_ref()
        {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        format!("Failed to create output file '{}'", output_path.display())
                    })?,
            ))
        } else {
            Box::new(io::stdout())
        };

        match config.format {
            GraphFormat::Ascii => {
                renderer
                    .render_ascii(analysis.graph(), &cycles, output_writer.as_mut())
                    .wrap_err("Failed to render ASCII graph")?;
            }
            GraphFormat::Mermaid => {
                renderer
                    .render_mermaid(analysis.graph(), &cycles, output_writer.as_mut())
                    .wrap_err("Failed to render Mermaid graph")?;
            }
            GraphFormat::Dot => {
                renderer
                    .render_dot(analysis.graph(), &cycles, output_writer.as_mut())
                    .wrap_err("Failed to render DOT graph")?;
            }
        }
        output_writer
            .flush()
            .into_diagnostic()
            .wrap_err("Failed to flush graph output")?;

        if let Some(output_path) = config.output
            && !config.quiet
        {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}
