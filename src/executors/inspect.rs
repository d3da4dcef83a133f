//! Inspect command executor

use console::style;
use miette::{Result, WrapErr};

use super::replay_inputs;
use crate::cli::OutputFormat;
use crate::config::InspectConfig;
use crate::executors::CommandExecutor;
use crate::progress::ProgressReporter;
use crate::reports::{
    FileSink, HumanFormatter, JsonFormatter, ReportFormatter, ReportSink, StdoutSink,
};

pub struct InspectExecutor;

fn formatter_for(format: OutputFormat) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Compact => Box::new(JsonFormatter::compact()),
        OutputFormat::Human => Box::new(HumanFormatter::new()),
    }
}

impl CommandExecutor for InspectExecutor {
    type Config = InspectConfig;

    fn execute(config: Self::Config) -> Result<()> {
        if !config.quiet {
            eprintln!(
                "{} Inspecting module graph (circular mode: {})...\n",
                style("🎢").cyan(),
                style(config.analysis.mode).bold()
            );
        }

        let mut progress = if config.quiet {
            None
        } else {
            ProgressReporter::for_terminal()
        };

        let observer = config
            .analysis
            .observer()
            .wrap_err("Invalid analysis options")?
            .with_all_cycles(config.all_cycles)
            .with_boxed_formatter(formatter_for(config.format))
            .build();

        replay_inputs(&config.inputs, &observer, progress.as_mut())?;

        if let Some(p) = progress.as_mut() {
            p.start_analysis();
        }

        let outcome = observer.finish().wrap_err("Failed to produce the report")?;
        let analysis = &outcome.analysis;

        if let Some(p) = progress.as_mut() {
            p.finish_analysis(analysis.graph().node_count(), analysis.cycles().len());
        }

        if !config.quiet && !analysis.graph().has_root() {
            eprintln!(
                "{} No entry module observed; the report is empty",
                style("ℹ").blue()
            );
        }

        match &config.output_dir {
            Some(dir) => {
                let sink = FileSink::new(dir).with_filename(&config.filename);
                sink.deliver(&outcome.report)
                    .wrap_err("Failed to write report")?;
                if !config.quiet {
                    eprintln!(
                        "{} Report written to {}",
                        style("✓").green(),
                        style(sink.path().display()).bold()
                    );
                }
            }
            None => StdoutSink
                .deliver(&outcome.report)
                .wrap_err("Failed to print report")?,
        }

        // Exit with error code if cycles found and requested
        if config.error_on_cycles && analysis.has_cycles() {
            std::process::exit(1);
        }

        Ok(())
    }
}
