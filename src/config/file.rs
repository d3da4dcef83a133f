//! TOML configuration file
//!
//! Every key is optional. Values found here fill in whatever was not given
//! on the command line or through the environment:
//!
//! ```toml
//! circular_mode = "full"
//! include = ["src/"]
//! extensions = ["js", "ts"]
//! path_style = "relative"
//! context = "."
//! format = "human"
//! output_dir = "reports"
//! filename = "loops.json"
//! all_cycles = true
//! error_on_cycles = true
//! graph_format = "mermaid"
//! highlight_cycles = false
//! ```

use std::path::{Path, PathBuf};

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;
use tracing::debug;

use crate::cli::{GraphFormat, OutputFormat};
use crate::detector::CircularMode;
use crate::edges::{PathStyle, anchor};
use crate::error::{ConfigParseError, LoopError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub circular_mode: Option<CircularMode>,
    pub include: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub path_style: Option<PathStyle>,
    pub context: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
    pub filename: Option<String>,
    pub all_cycles: Option<bool>,
    pub error_on_cycles: Option<bool>,
    pub graph_format: Option<GraphFormat>,
    pub highlight_cycles: Option<bool>,
}

impl ConfigFile {
    /// Load a configuration file
    ///
    /// Relative `context` and `output_dir` values are resolved against the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Self, LoopError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoopError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&path.display().to_string(), &content)?;

        // A bare file name has an empty parent: the current directory
        let dir = path.parent().unwrap_or(Path::new(""));
        let base = anchor(dir, &std::env::current_dir()?);
        config.context = config.context.map(|context| anchor(&context, &base));
        config.output_dir = config.output_dir.map(|output| anchor(&output, &base));

        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Parse configuration text; `name` labels diagnostics
    pub fn parse(name: &str, content: &str) -> Result<Self, LoopError> {
        toml::from_str(content).map_err(|source| {
            let span: Option<SourceSpan> = source
                .span()
                .map(|range| (range.start, range.end.saturating_sub(range.start)).into());
            LoopError::ConfigParseError(Box::new(ConfigParseError {
                file: name.to_string(),
                source_code: NamedSource::new(name, content.to_string()),
                span,
                source,
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ConfigFile::parse(
            "loop-de-loop.toml",
            r#"
circular_mode = "pre"
include = ["src/", "lib/**"]
extensions = ["js"]
path_style = "relative"
format = "compact"
filename = "loops.json"
all_cycles = true
graph_format = "dot"
highlight_cycles = false
"#,
        )
        .unwrap();

        assert_eq!(config.circular_mode, Some(CircularMode::Pre));
        assert_eq!(
            config.include,
            Some(vec!["src/".to_string(), "lib/**".to_string()])
        );
        assert_eq!(config.path_style, Some(PathStyle::Relative));
        assert_eq!(config.format, Some(OutputFormat::Compact));
        assert_eq!(config.filename.as_deref(), Some("loops.json"));
        assert_eq!(config.all_cycles, Some(true));
        assert_eq!(config.error_on_cycles, None);
        assert_eq!(config.graph_format, Some(GraphFormat::Dot));
        assert_eq!(config.highlight_cycles, Some(false));
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(ConfigFile::parse("empty.toml", "").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let config = ConfigFile::parse("c.toml", "circular_mode = \"sideways\"").unwrap();
        assert_eq!(config.circular_mode, Some(CircularMode::Circular));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ConfigFile::parse("c.toml", "max_cycles = 3").unwrap_err();
        assert!(matches!(err, LoopError::ConfigParseError(_)));
    }

    #[test]
    fn test_syntax_error_has_span() {
        let err = ConfigFile::parse("c.toml", "format = ").unwrap_err();
        let LoopError::ConfigParseError(inner) = err else {
            panic!("expected a config parse error");
        };
        assert!(inner.span.is_some());
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loop-de-loop.toml");
        fs::write(&path, "context = \"app\"\noutput_dir = \"out\"\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.context, Some(temp.path().join("app")));
        assert_eq!(config.output_dir, Some(temp.path().join("out")));
    }

    #[test]
    fn test_load_bare_file_name_resolves_against_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let file = tempfile::Builder::new()
            .prefix("loop-de-loop-")
            .suffix(".toml")
            .tempfile_in(&cwd)
            .unwrap();
        fs::write(file.path(), "context = \".\"\noutput_dir = \"out\"\n").unwrap();

        let bare = Path::new(file.path().file_name().unwrap());
        assert_eq!(bare.parent(), Some(Path::new("")));

        let config = ConfigFile::load(bare).unwrap();
        assert_eq!(config.context, Some(cwd.clone()));
        assert_eq!(config.output_dir, Some(cwd.join("out")));
    }

    #[test]
    fn test_load_relative_path_resolves_against_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let temp = TempDir::new_in(&cwd).unwrap();
        fs::write(
            temp.path().join("loop-de-loop.toml"),
            "context = \"../app\"\n",
        )
        .unwrap();

        let relative = Path::new(temp.path().file_name().unwrap()).join("loop-de-loop.toml");
        let config = ConfigFile::load(&relative).unwrap();
        assert_eq!(config.context, Some(cwd.join("app")));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ConfigFile::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, LoopError::FileReadError { .. }));
    }
}
