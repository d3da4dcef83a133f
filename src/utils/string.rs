//! Wording helpers for console output

use std::borrow::Cow;

/// English plural of `word` unless `count` is exactly one
///
/// Only the two forms used in our messages are handled: a trailing
/// consonant + `y` becomes `ies`, anything else gets an `s`.
pub fn pluralize(word: &str, count: usize) -> Cow<'_, str> {
    if count == 1 {
        return Cow::Borrowed(word);
    }

    match word.strip_suffix('y') {
        Some(stem) if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) => {
            Cow::Owned(format!("{stem}ies"))
        }
        _ => Cow::Owned(format!("{word}s")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("module", 0), "modules");
        assert_eq!(pluralize("module", 1), "module");
        assert_eq!(pluralize("loop", 5), "loops");
    }

    #[test]
    fn test_pluralize_y_endings() {
        assert_eq!(pluralize("dependency", 2), "dependencies");
        assert_eq!(pluralize("dependency", 1), "dependency");
        assert_eq!(pluralize("day", 3), "days");
    }
}
