//! Matcher selection.
//!
//! One strategy is chosen per session from the configuration flags, then
//! applied to every (pattern, line) pair. Dispatching once up front keeps
//! the per-line work to a single enum match instead of re-deriving the
//! strategy on every line.

use crate::config::GrepConfig;
use crate::patterns::Pattern;

/// Strategy for matching one pattern against one line.
///
/// Fixed-string modes compare literal text; the regex mode defers to the
/// compiled form, where full-line matching was already folded into the
/// pattern (`^(...)$`) and case-insensitivity into a compile flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// `-F -x`: the line must equal the pattern exactly.
    FixedExact,
    /// `-F -i -x`: the line must equal the pattern, ignoring ASCII case.
    FixedExactIgnoreCase,
    /// `-F`: the pattern must occur as a substring of the line.
    FixedSubstring,
    /// `-F -i`: substring search ignoring ASCII case.
    FixedSubstringIgnoreCase,
    /// Execute the compiled regex against the line.
    Regex,
}

impl MatchStrategy {
    /// Pick the strategy for this session's flags.
    pub fn select(config: &GrepConfig) -> Self {
        if config.fixed_string {
            match (config.case_insensitive, config.full_line_match) {
                (true, true) => Self::FixedExactIgnoreCase,
                (true, false) => Self::FixedSubstringIgnoreCase,
                (false, true) => Self::FixedExact,
                (false, false) => Self::FixedSubstring,
            }
        } else {
            Self::Regex
        }
    }

    /// Does `pattern` match `line` under this strategy?
    ///
    /// In regex mode an uncompiled pattern never matches; the session
    /// skips scanning when compilation failed, so this is unreachable in
    /// practice.
    pub fn is_match(self, pattern: &Pattern, line: &str) -> bool {
        match self {
            Self::FixedExact => line == pattern.text(),
            Self::FixedExactIgnoreCase => line.eq_ignore_ascii_case(pattern.text()),
            Self::FixedSubstring => line.contains(pattern.text()),
            Self::FixedSubstringIgnoreCase => {
                case_insensitive_find(line, pattern.text()).is_some()
            }
            Self::Regex => pattern.regex().is_some_and(|regex| regex.is_match(line)),
        }
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack`,
/// ignoring ASCII case. The empty needle matches at offset 0.
pub fn case_insensitive_find(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&start| haystack[start..start + needle.len()].eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(text: &str) -> Pattern {
        Pattern::new(text.to_string())
    }

    #[test]
    fn test_strategy_selection_table() {
        let mut config = GrepConfig {
            fixed_string: true,
            case_insensitive: true,
            full_line_match: true,
            ..Default::default()
        };
        assert_eq!(
            MatchStrategy::select(&config),
            MatchStrategy::FixedExactIgnoreCase
        );

        config.full_line_match = false;
        assert_eq!(
            MatchStrategy::select(&config),
            MatchStrategy::FixedSubstringIgnoreCase
        );

        config.case_insensitive = false;
        config.full_line_match = true;
        assert_eq!(MatchStrategy::select(&config), MatchStrategy::FixedExact);

        config.full_line_match = false;
        assert_eq!(
            MatchStrategy::select(&config),
            MatchStrategy::FixedSubstring
        );

        config.fixed_string = false;
        config.case_insensitive = true;
        assert_eq!(MatchStrategy::select(&config), MatchStrategy::Regex);
    }

    #[test]
    fn test_fixed_exact() {
        let pattern = fixed("abc");
        assert!(MatchStrategy::FixedExact.is_match(&pattern, "abc"));
        assert!(!MatchStrategy::FixedExact.is_match(&pattern, "abcdefg"));
        assert!(!MatchStrategy::FixedExact.is_match(&pattern, "ABC"));
    }

    #[test]
    fn test_fixed_exact_ignore_case() {
        let pattern = fixed("aBc");
        assert!(MatchStrategy::FixedExactIgnoreCase.is_match(&pattern, "AbC"));
        assert!(!MatchStrategy::FixedExactIgnoreCase.is_match(&pattern, "xAbC"));
    }

    #[test]
    fn test_fixed_substring() {
        let pattern = fixed("abc");
        assert!(MatchStrategy::FixedSubstring.is_match(&pattern, "xxabcxx"));
        assert!(!MatchStrategy::FixedSubstring.is_match(&pattern, "xxABCxx"));
        // The empty pattern is a substring of every line.
        assert!(MatchStrategy::FixedSubstring.is_match(&fixed(""), "anything"));
    }

    #[test]
    fn test_fixed_substring_ignore_case() {
        let pattern = fixed("abc");
        assert!(MatchStrategy::FixedSubstringIgnoreCase.is_match(&pattern, "xxABCxx"));
        assert!(!MatchStrategy::FixedSubstringIgnoreCase.is_match(&pattern, "xxabxx"));
    }

    #[test]
    fn test_uncompiled_regex_never_matches() {
        let pattern = fixed("abc");
        assert!(!MatchStrategy::Regex.is_match(&pattern, "abc"));
    }

    #[test]
    fn test_case_insensitive_find_positions() {
        assert_eq!(case_insensitive_find("aBc", "b"), Some(1));
        assert_eq!(case_insensitive_find("hello", "LO"), Some(3));
        assert_eq!(case_insensitive_find("hello", "z"), None);
    }

    #[test]
    fn test_case_insensitive_find_empty_needle() {
        assert_eq!(case_insensitive_find("anything", ""), Some(0));
        assert_eq!(case_insensitive_find("", ""), Some(0));
    }

    #[test]
    fn test_case_insensitive_find_needle_longer_than_haystack() {
        assert_eq!(case_insensitive_find("ab", "abc"), None);
        assert_eq!(case_insensitive_find("", "a"), None);
    }
}
