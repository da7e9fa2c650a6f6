//! Pattern storage and compilation.
//!
//! A [`PatternSet`] owns every search pattern for one session, in
//! insertion order. Patterns arrive from three sources: a literal string,
//! a newline-delimited block (`-e`, or the positional pattern argument),
//! or a pattern file (`-f`). Compilation to regexes happens once, after
//! all patterns are loaded, and only when fixed-string mode is off.

use std::io::{self, BufRead};

use regex::{Regex, RegexBuilder};

use crate::errors::GrepError;

/// One search pattern: the raw text and, in regex mode, its compiled form.
#[derive(Debug)]
pub struct Pattern {
    text: String,
    regex: Option<Regex>,
}

impl Pattern {
    pub(crate) fn new(text: String) -> Self {
        Self { text, regex: None }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    pub fn is_compiled(&self) -> bool {
        self.regex.is_some()
    }
}

/// Ordered collection of search patterns for one session.
///
/// Order does not affect match outcome (matching is a logical OR over all
/// patterns) but keeps pattern-file reading reproducible.
#[derive(Debug, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pattern verbatim, in uncompiled state.
    pub fn push_literal(&mut self, text: impl Into<String>) {
        self.patterns.push(Pattern::new(text.into()));
    }

    /// Append patterns from a newline-delimited block.
    ///
    /// An empty block appends exactly one empty pattern, preserving the
    /// "empty pattern matches everything" semantics. Otherwise the block
    /// is tokenized with consume-delimiter semantics: empty tokens, both
    /// interior and trailing, produce no entries. `"a\n\nb"` yields `a`
    /// and `b`; `"\n"` yields nothing.
    pub fn push_block(&mut self, block: &str) {
        if block.is_empty() {
            self.push_literal("");
            return;
        }
        for token in block.split('\n').filter(|token| !token.is_empty()) {
            self.push_literal(token);
        }
    }

    /// Append one pattern per line read from `reader`.
    ///
    /// Unlike [`push_block`](Self::push_block), empty lines here do yield
    /// empty patterns. On a read error the lines appended so far remain
    /// valid; the error is returned for the caller to record as fatal.
    pub fn push_from_reader<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        for line in reader.lines() {
            self.push_literal(line?);
        }
        Ok(())
    }

    /// Compile every pattern; only meaningful when fixed-string mode is
    /// off. Must be called at most once per session.
    ///
    /// When `full_line` is set, each pattern text is first rewritten to
    /// `^(` + text + `)$` so the regex must cover the whole line. A
    /// compile failure does not stop compilation of the remaining
    /// patterns; every failure is returned so all malformed patterns are
    /// reported in one run.
    pub fn compile(&mut self, case_insensitive: bool, full_line: bool) -> Vec<GrepError> {
        let mut failures = Vec::new();
        for pattern in &mut self.patterns {
            if full_line {
                pattern.text = format!("^({})$", pattern.text);
            }
            match RegexBuilder::new(&pattern.text)
                .case_insensitive(case_insensitive)
                .build()
            {
                Ok(regex) => pattern.regex = Some(regex),
                Err(source) => {
                    failures.push(GrepError::invalid_pattern(pattern.text.clone(), source))
                }
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_push_block_splits_on_newlines() {
        let mut set = PatternSet::new();
        set.push_block("abc\ndef");
        let texts: Vec<_> = set.iter().map(Pattern::text).collect();
        assert_eq!(texts, ["abc", "def"]);
    }

    #[test]
    fn test_push_block_drops_empty_tokens() {
        let mut set = PatternSet::new();
        set.push_block("a\n\nb\n");
        let texts: Vec<_> = set.iter().map(Pattern::text).collect();
        assert_eq!(texts, ["a", "b"]);

        let mut set = PatternSet::new();
        set.push_block("\n");
        assert!(set.is_empty());
    }

    #[test]
    fn test_push_block_empty_appends_one_empty_pattern() {
        let mut set = PatternSet::new();
        set.push_block("");
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().text(), "");
    }

    #[test]
    fn test_push_from_reader_keeps_empty_lines() {
        let mut set = PatternSet::new();
        set.push_from_reader(Cursor::new("abc\n\ndef\n")).unwrap();
        let texts: Vec<_> = set.iter().map(Pattern::text).collect();
        assert_eq!(texts, ["abc", "", "def"]);
    }

    #[test]
    fn test_compile_success() {
        let mut set = PatternSet::new();
        set.push_literal("ab+c");
        let failures = set.compile(false, false);
        assert!(failures.is_empty());
        assert!(set.iter().all(Pattern::is_compiled));
    }

    #[test]
    fn test_compile_reports_all_failures() {
        let mut set = PatternSet::new();
        set.push_literal("(");
        set.push_literal("good");
        set.push_literal("[");
        let failures = set.compile(false, false);
        assert_eq!(failures.len(), 2);
        // The well-formed pattern still compiled.
        assert!(set.iter().nth(1).unwrap().is_compiled());
    }

    #[test]
    fn test_compile_full_line_wraps_pattern() {
        let mut set = PatternSet::new();
        set.push_literal("abc");
        let failures = set.compile(false, true);
        assert!(failures.is_empty());
        let pattern = set.iter().next().unwrap();
        assert_eq!(pattern.text(), "^(abc)$");
        let regex = pattern.regex().unwrap();
        assert!(regex.is_match("abc"));
        assert!(!regex.is_match("abcdefg"));
    }

    #[test]
    fn test_compile_empty_pattern_full_line_matches_only_empty() {
        let mut set = PatternSet::new();
        set.push_literal("");
        assert!(set.compile(false, true).is_empty());
        let regex = set.iter().next().unwrap().regex().unwrap();
        assert!(regex.is_match(""));
        assert!(!regex.is_match("x"));
    }

    #[test]
    fn test_compile_case_insensitive() {
        let mut set = PatternSet::new();
        set.push_literal("abc");
        assert!(set.compile(true, false).is_empty());
        let regex = set.iter().next().unwrap().regex().unwrap();
        assert!(regex.is_match("xABCx"));
    }
}
