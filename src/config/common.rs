//! Analysis options shared by every command

use std::path::PathBuf;

use super::ConfigFile;
use crate::analyzer::BuildObserverBuilder;
use crate::common::AnalysisArgs;
use crate::detector::CircularMode;
use crate::edges::{EdgeFilter, PathNormalizer, PathStyle, anchor};
use crate::error::LoopError;

/// Resolved edge admission, normalization, and detection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Cycle trimming mode
    pub mode: CircularMode,
    /// Include prefixes or glob patterns (empty admits everything)
    pub include: Vec<String>,
    /// Extension allowlist (empty admits everything)
    pub extensions: Vec<String>,
    pub path_style: PathStyle,
    /// Base directory for relative paths
    pub context: PathBuf,
}

impl AnalysisOptions {
    pub fn new(context: PathBuf) -> Self {
        Self {
            mode: CircularMode::default(),
            include: Vec::new(),
            extensions: Vec::new(),
            path_style: PathStyle::default(),
            context,
        }
    }

    /// Merge command line arguments over a configuration file
    ///
    /// Anything given on the command line wins; whatever is left falls back
    /// to the file, then to the defaults.
    pub fn resolve(args: AnalysisArgs, file: &ConfigFile) -> Result<Self, LoopError> {
        let mode = match args.circular_mode {
            Some(name) => CircularMode::from_name(&name),
            None => file.circular_mode.unwrap_or_default(),
        };

        let include = if args.include.is_empty() {
            file.include.clone().unwrap_or_default()
        } else {
            args.include
        };

        let extensions = if args.extensions.is_empty() {
            file.extensions.clone().unwrap_or_default()
        } else {
            args.extensions
        };

        let cwd = std::env::current_dir()?;
        let context = match args.context.or_else(|| file.context.clone()) {
            Some(context) => anchor(&context, &cwd),
            None => cwd,
        };

        Ok(Self {
            mode,
            include,
            extensions,
            path_style: args.path_style.or(file.path_style).unwrap_or_default(),
            context,
        })
    }

    pub fn filter(&self) -> Result<EdgeFilter, LoopError> {
        EdgeFilter::new(&self.include, &self.extensions)
    }

    pub fn normalizer(&self) -> PathNormalizer {
        PathNormalizer::from_style(self.path_style, self.context.clone())
    }

    /// Observer builder preloaded with these options
    pub fn observer(&self) -> Result<BuildObserverBuilder, LoopError> {
        Ok(BuildObserverBuilder::new()
            .with_filter(self.filter()?)
            .with_normalizer(self.normalizer())
            .with_mode(self.mode))
    }
}
