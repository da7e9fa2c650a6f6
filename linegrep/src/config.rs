//! Session configuration.
//!
//! The configuration is produced by the CLI argument parser and consumed
//! read-only by the scanning core. Flag conflicts are not rejected up
//! front: [`GrepConfig::validate`] collects every violation so the session
//! can report them all before deciding to skip the scan.

use crate::errors::GrepError;

/// Flags controlling matching and output for one scan session.
///
/// Each field corresponds to one short option of the CLI surface.
#[derive(Debug, Clone, Default)]
pub struct GrepConfig {
    /// Write only a count of matching lines per source (`-c`).
    pub count_only: bool,

    /// Compile patterns as extended regular expressions (`-E`).
    ///
    /// The `regex` crate exposes a single, extended-style syntax, so this
    /// flag only participates in mutual-exclusion checking against `-F`.
    pub extended_regex: bool,

    /// Match patterns as literal strings, never as regexes (`-F`).
    pub fixed_string: bool,

    /// Ignore case distinctions when matching (`-i`).
    pub case_insensitive: bool,

    /// Write only the names of sources containing a match (`-l`).
    pub names_only: bool,

    /// Prefix each written line with its 1-based line number (`-n`).
    pub line_numbers: bool,

    /// Suppress all normal output; only the exit status reports (`-q`).
    pub quiet: bool,

    /// Silently skip sources that are missing or unreadable (`-s`).
    pub suppress_file_errors: bool,

    /// Select lines that do NOT match any pattern (`-v`).
    pub invert_match: bool,

    /// A match must cover the entire line (`-x`).
    pub full_line_match: bool,
}

impl GrepConfig {
    /// Check the mutual-exclusion rules, returning every violation.
    pub fn validate(&self) -> Vec<GrepError> {
        let mut errors = Vec::new();
        if self.extended_regex && self.fixed_string {
            errors.push(GrepError::config_error(
                "options -E and -F are mutually exclusive",
            ));
        }
        if (self.count_only && self.names_only)
            || (self.count_only && self.quiet)
            || (self.names_only && self.quiet)
        {
            errors.push(GrepError::config_error(
                "options -c, -l, and -q are mutually exclusive",
            ));
        }
        errors
    }
}
