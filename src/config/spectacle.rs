//! Spectacle command configuration

use std::path::PathBuf;

use super::AnalysisOptions;
use crate::cli::GraphFormat;
use crate::common::ConfigBuilder;
use crate::error::LoopError;

/// Configuration for the spectacle command
#[derive(Debug, Clone)]
pub struct SpectacleConfig {
    pub inputs: Vec<PathBuf>,
    pub analysis: AnalysisOptions,
    pub format: GraphFormat,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    pub highlight_cycles: bool,
    /// Suppress status output
    pub quiet: bool,
}

impl SpectacleConfig {
    pub fn builder() -> SpectacleConfigBuilder {
        SpectacleConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct SpectacleConfigBuilder {
    inputs: Option<Vec<PathBuf>>,
    analysis: Option<AnalysisOptions>,
    format: Option<GraphFormat>,
    output: Option<PathBuf>,
    highlight_cycles: Option<bool>,
    quiet: bool,
}

impl SpectacleConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(mut self, inputs: Vec<PathBuf>) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisOptions) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_highlight_cycles(mut self, highlight_cycles: bool) -> Self {
        self.highlight_cycles = Some(highlight_cycles);
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl ConfigBuilder for SpectacleConfigBuilder {
    type Config = SpectacleConfig;

    fn build(self) -> Result<Self::Config, LoopError> {
        Ok(SpectacleConfig {
            inputs: self
                .inputs
                .filter(|inputs| !inputs.is_empty())
                .ok_or_else(|| LoopError::config("Missing required field: inputs"))?,
            analysis: self
                .analysis
                .ok_or_else(|| LoopError::config("Missing required field: analysis"))?,
            format: self.format.unwrap_or_default(),
            output: self.output,
            highlight_cycles: self.highlight_cycles.unwrap_or(true),
            quiet: self.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let config = SpectacleConfig::builder()
            .with_inputs(vec!["edges.jsonl".into()])
            .with_analysis(AnalysisOptions::new("/".into()))
            .build()
            .unwrap();

        assert_eq!(config.format, GraphFormat::Ascii);
        assert!(config.highlight_cycles);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_missing_analysis() {
        let err = SpectacleConfig::builder()
            .with_inputs(vec!["edges.jsonl".into()])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("analysis"));
    }
}
