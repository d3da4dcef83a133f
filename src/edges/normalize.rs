//! Path normalization applied to admitted edges

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Built-in normalization strategies selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Keep paths as observed, cleaned up lexically
    #[default]
    Absolute,
    /// Express paths relative to a context directory
    Relative,
}

type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Turns raw module paths into the keys used for node identity
#[derive(Clone)]
pub enum PathNormalizer {
    Absolute,
    Relative { context: PathBuf },
    Custom(Transform),
}

impl PathNormalizer {
    /// Normalizer for a built-in style
    ///
    /// A relative `context` is anchored at the current directory, since the
    /// observed paths it is compared against are absolute.
    pub fn from_style(style: PathStyle, context: PathBuf) -> Self {
        match style {
            PathStyle::Absolute => PathNormalizer::Absolute,
            PathStyle::Relative if context.is_absolute() => PathNormalizer::Relative {
                context: anchor(&context, Path::new("/")),
            },
            PathStyle::Relative => match std::env::current_dir() {
                Ok(cwd) => PathNormalizer::Relative {
                    context: anchor(&context, &cwd),
                },
                Err(err) => {
                    warn!(context = %context.display(), %err, "cannot anchor relative context");
                    PathNormalizer::Relative { context }
                }
            },
        }
    }

    /// Wrap an arbitrary transform
    pub fn custom<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        PathNormalizer::Custom(Arc::new(transform))
    }

    pub fn normalize(&self, raw: &str) -> String {
        match self {
            PathNormalizer::Absolute => clean(raw),
            PathNormalizer::Relative { context } => relative_to(raw, context),
            PathNormalizer::Custom(transform) => transform(raw),
        }
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        PathNormalizer::Absolute
    }
}

impl fmt::Debug for PathNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathNormalizer::Absolute => f.write_str("Absolute"),
            PathNormalizer::Relative { context } => f
                .debug_struct("Relative")
                .field("context", context)
                .finish(),
            PathNormalizer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Split a path into its root marker and cleaned segments
///
/// `.` segments vanish, `..` folds into the previous segment where one
/// exists, and backslashes count as separators.
fn segments(raw: &str) -> (bool, Vec<String>) {
    let unified = raw.replace('\\', "/");
    let rooted = unified.starts_with('/');
    let mut parts: Vec<String> = Vec::new();

    for part in unified.split('/') {
        match part {
            "" | "." => {}
            // `..` above the filesystem root is dropped
            ".." => {
                if parts.last().is_some_and(|last| last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push(part.to_string());
                }
            }
            other => parts.push(other.to_string()),
        }
    }

    (rooted, parts)
}

fn clean(raw: &str) -> String {
    let (rooted, parts) = segments(raw);
    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Resolve `path` against `base` and clean the result lexically
///
/// An absolute `path` ignores `base`.
pub fn anchor(path: &Path, base: &Path) -> PathBuf {
    PathBuf::from(clean(&base.join(path).to_string_lossy()))
}

fn relative_to(raw: &str, context: &Path) -> String {
    let (rooted, target) = segments(raw);
    if !rooted {
        // Already relative to something we cannot know about
        return clean(raw);
    }

    let (_, base) = segments(&context.to_string_lossy());
    let shared = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = std::iter::repeat_n("..", base.len() - shared).collect();
    parts.extend(target[shared..].iter().map(String::as_str));

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_cleans_lexically() {
        let normalizer = PathNormalizer::Absolute;

        assert_eq!(normalizer.normalize("/repo/src/./a.js"), "/repo/src/a.js");
        assert_eq!(normalizer.normalize("/repo/src/lib/../a.js"), "/repo/src/a.js");
        assert_eq!(normalizer.normalize("/repo//src/a.js"), "/repo/src/a.js");
        assert_eq!(normalizer.normalize("/../a.js"), "/a.js");
        assert_eq!(normalizer.normalize("C:\\repo\\src\\a.js"), "C:/repo/src/a.js");
        assert_eq!(normalizer.normalize("../shared/a.js"), "../shared/a.js");
        assert_eq!(normalizer.normalize("./"), ".");
    }

    #[test]
    fn test_relative_inside_context() {
        let normalizer = PathNormalizer::from_style(PathStyle::Relative, "/repo".into());

        assert_eq!(normalizer.normalize("/repo/src/a.js"), "src/a.js");
        assert_eq!(normalizer.normalize("/repo"), ".");
    }

    #[test]
    fn test_relative_outside_context() {
        let normalizer = PathNormalizer::from_style(PathStyle::Relative, "/repo/app".into());

        assert_eq!(
            normalizer.normalize("/repo/shared/util.js"),
            "../shared/util.js"
        );
        assert_eq!(normalizer.normalize("/other/x.js"), "../../other/x.js");
    }

    #[test]
    fn test_anchor() {
        let base = Path::new("/work/repo");

        assert_eq!(anchor(Path::new("."), base), PathBuf::from("/work/repo"));
        assert_eq!(anchor(Path::new(""), base), PathBuf::from("/work/repo"));
        assert_eq!(anchor(Path::new("app"), base), PathBuf::from("/work/repo/app"));
        assert_eq!(anchor(Path::new("../lib/./x"), base), PathBuf::from("/work/lib/x"));
        assert_eq!(anchor(Path::new("/elsewhere"), base), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_relative_context_is_anchored_at_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let module = cwd.join("app").join("x.js");

        let normalizer = PathNormalizer::from_style(PathStyle::Relative, "app".into());
        assert_eq!(normalizer.normalize(&module.to_string_lossy()), "x.js");

        let normalizer = PathNormalizer::from_style(PathStyle::Relative, ".".into());
        assert_eq!(normalizer.normalize(&module.to_string_lossy()), "app/x.js");
    }

    #[test]
    fn test_relative_keeps_already_relative_paths() {
        let normalizer = PathNormalizer::from_style(PathStyle::Relative, "/repo".into());
        assert_eq!(normalizer.normalize("./src/../lib/a.js"), "lib/a.js");
    }

    #[test]
    fn test_custom_transform() {
        let normalizer =
            PathNormalizer::custom(|raw| raw.trim_start_matches("/repo/").to_uppercase());
        assert_eq!(normalizer.normalize("/repo/src/a.js"), "SRC/A.JS");
        assert_eq!(format!("{normalizer:?}"), "Custom(..)");
    }

    #[test]
    fn test_path_style_deserializes() {
        #[derive(Deserialize)]
        struct Holder {
            style: PathStyle,
        }
        let holder: Holder = toml::from_str("style = \"relative\"").unwrap();
        assert_eq!(holder.style, PathStyle::Relative);
    }
}
