//! The per-source scan loop.
//!
//! A [`LineScanner`] consumes one readable line stream, applies every
//! pattern to every line through the session's chosen strategy, and
//! drives the output policy and exit-status updates. It is shared
//! read-only across all sources of a session.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use tracing::trace;

use super::matcher::MatchStrategy;
use crate::config::GrepConfig;
use crate::errors::{report, GrepError};
use crate::patterns::PatternSet;
use crate::results::{ExitStatus, ScanSummary};

/// Scans one input source line by line.
#[derive(Debug)]
pub struct LineScanner<'a> {
    config: &'a GrepConfig,
    patterns: &'a PatternSet,
    strategy: MatchStrategy,
    /// Number of sources declared for the run; a `name:` prefix is
    /// written only when more than one was declared.
    num_sources: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(
        config: &'a GrepConfig,
        patterns: &'a PatternSet,
        strategy: MatchStrategy,
        num_sources: usize,
    ) -> Self {
        Self {
            config,
            patterns,
            strategy,
            num_sources,
        }
    }

    /// Logical OR over all patterns, then optional inversion.
    fn line_matches(&self, line: &str) -> bool {
        let matched = self
            .patterns
            .iter()
            .any(|pattern| self.strategy.is_match(pattern, line));
        if self.config.invert_match {
            !matched
        } else {
            matched
        }
    }

    /// Scan `reader` under the source name `name`.
    ///
    /// Normal output goes to `out`, diagnostics to `err`, and every
    /// failure (read or write) is folded into `status`. Write failures do
    /// not stop the scan: later lines are still matched and later writes
    /// still attempted, so partial output survives a transient sink error.
    /// Lines must be valid UTF-8; a line that fails to decode is reported
    /// as a read error, which ends the scan of this source. Output written
    /// for earlier lines stands.
    pub fn scan<R: BufRead>(
        &self,
        name: &str,
        reader: R,
        out: &mut dyn Write,
        err: &mut dyn Write,
        status: &mut ExitStatus,
    ) -> ScanSummary {
        let mut lines: u64 = 0;
        let mut matches: u64 = 0;
        for next_line in reader.lines() {
            lines += 1;
            let line = match next_line {
                Ok(line) => line,
                Err(source) => {
                    report(err, status, &GrepError::input(name, source));
                    break;
                }
            };
            if !self.line_matches(&line) {
                continue;
            }
            matches += 1;
            status.record_match();
            if self.config.names_only {
                if let Err(source) = writeln!(out, "{name}") {
                    report(err, status, &GrepError::output(source));
                }
                // One name per source; no further lines are read.
                break;
            }
            if self.config.quiet || self.config.count_only {
                continue;
            }
            let mut rendered = String::new();
            if self.num_sources > 1 {
                let _ = write!(rendered, "{name}:");
            }
            if self.config.line_numbers {
                let _ = write!(rendered, "{lines}:");
            }
            rendered.push_str(&line);
            if let Err(source) = writeln!(out, "{rendered}") {
                report(err, status, &GrepError::output(source));
            }
        }
        if self.config.count_only {
            let mut rendered = String::new();
            if self.num_sources > 1 {
                let _ = write!(rendered, "{name}:");
            }
            let _ = write!(rendered, "{matches}");
            if let Err(source) = writeln!(out, "{rendered}") {
                report(err, status, &GrepError::output(source));
            }
        }
        trace!("scanned {name}: {lines} lines, {matches} matching");
        ScanSummary { lines, matches }
    }
}
