//! Edge admission filtering

use std::path::Path;

use glob::Pattern;

use crate::core::Edge;
use crate::error::LoopError;

#[derive(Debug, Clone)]
enum IncludeRule {
    Prefix(String),
    Pattern(Pattern),
}

impl IncludeRule {
    fn parse(raw: &str) -> Result<Self, LoopError> {
        if raw.contains(['*', '?', '[']) {
            Pattern::new(raw)
                .map(IncludeRule::Pattern)
                .map_err(|e| LoopError::config(format!("Invalid include pattern '{raw}': {e}")))
        } else {
            Ok(IncludeRule::Prefix(raw.to_string()))
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            IncludeRule::Prefix(prefix) => path.starts_with(prefix.as_str()),
            IncludeRule::Pattern(pattern) => pattern.matches(path),
        }
    }
}

/// Decides which observed edges enter the analysis
///
/// An edge is admitted only when both of its paths fall under one of the
/// include rules and carry an allowed extension. An empty rule list admits
/// everything for that check.
#[derive(Debug, Clone, Default)]
pub struct EdgeFilter {
    include: Vec<IncludeRule>,
    extensions: Vec<String>,
}

impl EdgeFilter {
    /// Create a filter from include prefixes (or glob patterns) and an
    /// extension allowlist
    pub fn new<S: AsRef<str>>(include: &[S], extensions: &[S]) -> Result<Self, LoopError> {
        let include = include
            .iter()
            .map(|raw| IncludeRule::parse(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let extensions = extensions
            .iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            include,
            extensions,
        })
    }

    /// A filter that admits every edge
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn admits_path(&self, path: &str) -> bool {
        self.is_included(path) && self.has_allowed_extension(path)
    }

    pub fn admits(&self, edge: &Edge) -> bool {
        self.admits_path(&edge.dependency) && self.admits_path(&edge.issuer)
    }

    fn is_included(&self, path: &str) -> bool {
        self.include.is_empty() || self.include.iter().any(|rule| rule.matches(path))
    }

    fn has_allowed_extension(&self, path: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_empty_filter_admits_everything() {
        let filter = EdgeFilter::allow_all();
        assert!(filter.admits(&Edge::new("/anything/at/all", "no-extension")));
    }

    #[test]
    fn test_include_prefixes() {
        let filter = EdgeFilter::new(&["/repo/src"], NONE).unwrap();

        assert!(filter.admits(&Edge::new("/repo/src/a.js", "/repo/src/index.js")));
        assert!(!filter.admits(&Edge::new(
            "/repo/node_modules/react/index.js",
            "/repo/src/index.js"
        )));
        assert!(!filter.admits(&Edge::new("/repo/src/a.js", "/elsewhere/b.js")));
    }

    #[test]
    fn test_include_glob_patterns() {
        let filter = EdgeFilter::new(&["/repo/packages/*/src/**"], NONE).unwrap();

        assert!(filter.admits_path("/repo/packages/ui/src/button.tsx"));
        assert!(!filter.admits_path("/repo/packages/ui/test/button.tsx"));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let err = EdgeFilter::new(&["/repo/[src"], NONE).unwrap_err();
        assert!(matches!(err, LoopError::ConfigurationError { .. }));
    }

    #[test]
    fn test_extension_allowlist_accepts_leading_dot() {
        let filter = EdgeFilter::new(NONE, &[".js", "ts"]).unwrap();

        assert!(filter.admits(&Edge::new("src/a.ts", "src/index.js")));
        assert!(!filter.admits(&Edge::new("src/styles.css", "src/index.js")));
        assert!(!filter.admits(&Edge::new("src/Makefile", "src/index.js")));
    }

    #[test]
    fn test_both_rules_apply() {
        let filter = EdgeFilter::new(&["src/"], &["js"]).unwrap();

        assert!(filter.admits_path("src/a.js"));
        assert!(!filter.admits_path("lib/a.js"));
        assert!(!filter.admits_path("src/a.ts"));
    }
}
