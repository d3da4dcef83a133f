//! Inspect command configuration

use std::path::PathBuf;

use super::AnalysisOptions;
use crate::cli::OutputFormat;
use crate::common::ConfigBuilder;
use crate::constants::output::DEFAULT_FILENAME;
use crate::error::LoopError;

/// Configuration for the inspect command
#[derive(Debug, Clone)]
pub struct InspectConfig {
    /// Edge stream files, directories, or `-`
    pub inputs: Vec<PathBuf>,
    pub analysis: AnalysisOptions,
    /// Output format for the report
    pub format: OutputFormat,
    /// Directory to write the report into; stdout when absent
    pub output_dir: Option<PathBuf>,
    /// Report file name inside `output_dir`
    pub filename: String,
    /// Report every cycle instead of the last one
    pub all_cycles: bool,
    /// Whether to exit with error code if cycles are found
    pub error_on_cycles: bool,
    /// Suppress progress and status output
    pub quiet: bool,
}

impl InspectConfig {
    pub fn builder() -> InspectConfigBuilder {
        InspectConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct InspectConfigBuilder {
    inputs: Option<Vec<PathBuf>>,
    analysis: Option<AnalysisOptions>,
    format: Option<OutputFormat>,
    output_dir: Option<PathBuf>,
    filename: Option<String>,
    all_cycles: bool,
    error_on_cycles: bool,
    quiet: bool,
}

impl InspectConfigBuilder {
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

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    pub fn with_all_cycles(mut self, all_cycles: bool) -> Self {
        self.all_cycles = all_cycles;
        self
    }

    pub fn with_error_on_cycles(mut self, error_on_cycles: bool) -> Self {
        self.error_on_cycles = error_on_cycles;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl ConfigBuilder for InspectConfigBuilder {
    type Config = InspectConfig;

    fn build(self) -> Result<Self::Config, LoopError> {
        let inputs = self
            .inputs
            .filter(|inputs| !inputs.is_empty())
            .ok_or_else(|| LoopError::config("Missing required field: inputs"))?;
        let analysis = self
            .analysis
            .ok_or_else(|| LoopError::config("Missing required field: analysis"))?;

        if self.filename.is_some() && self.output_dir.is_none() {
            return Err(LoopError::config(
                "A report filename was given without an output directory",
            ));
        }
        let filename = self
            .filename
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(LoopError::config(format!(
                "Invalid report filename '{filename}': expected a plain file name"
            )));
        }

        Ok(InspectConfig {
            inputs,
            analysis,
            format: self.format.unwrap_or_default(),
            output_dir: self.output_dir,
            filename,
            all_cycles: self.all_cycles,
            error_on_cycles: self.error_on_cycles,
            quiet: self.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> InspectConfigBuilder {
        InspectConfig::builder()
            .with_inputs(vec!["-".into()])
            .with_analysis(AnalysisOptions::new("/".into()))
    }

    #[test]
    fn test_build_with_defaults() {
        let config = base().build().unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.filename, "module-graph.json");
        assert!(config.output_dir.is_none());
        assert!(!config.all_cycles);
        assert!(!config.error_on_cycles);
    }

    #[test]
    fn test_missing_inputs() {
        let err = InspectConfig::builder()
            .with_analysis(AnalysisOptions::new("/".into()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("inputs"));
    }

    #[test]
    fn test_filename_requires_output_dir() {
        assert!(base().with_filename(Some("x.json".into())).build().is_err());
        assert!(
            base()
                .with_output_dir(Some("out".into()))
                .with_filename(Some("x.json".into()))
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_filename_must_be_plain() {
        let err = base()
            .with_output_dir(Some("out".into()))
            .with_filename(Some("nested/x.json".into()))
            .build()
            .unwrap_err();
        assert!(matches!(err, LoopError::ConfigurationError { .. }));
    }
}
