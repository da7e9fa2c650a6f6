//! The session orchestrator.
//!
//! A [`GrepSession`] owns the configuration, the pattern set, the
//! tri-state exit status, and the two output sinks. It validates the
//! configuration, compiles patterns, then walks every declared source
//! (or standard input) best-effort: a source that fails to open or read
//! is reported and the remaining sources are still scanned.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::matcher::MatchStrategy;
use super::scanner::LineScanner;
use crate::config::GrepConfig;
use crate::errors::{report, GrepError};
use crate::patterns::PatternSet;
use crate::results::ExitStatus;

/// Placeholder source name used when reading from standard input.
pub const STDIN_NAME: &str = "(standard input)";

/// One end-to-end scan session.
///
/// The sinks are injected so callers (and tests) decide where normal
/// output and diagnostics go; the CLI wires them to stdout and stderr.
pub struct GrepSession<'a> {
    config: GrepConfig,
    patterns: PatternSet,
    status: ExitStatus,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> GrepSession<'a> {
    pub fn new(config: GrepConfig, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self {
            config,
            patterns: PatternSet::new(),
            status: ExitStatus::default(),
            out,
            err,
        }
    }

    /// Append patterns from a newline-delimited block (`-e`, or the
    /// positional pattern argument).
    pub fn add_pattern_block(&mut self, block: &str) {
        self.patterns.push_block(block);
    }

    /// Append patterns from a pattern file (`-f`), one per line.
    ///
    /// Open and read failures are recorded as fatal; patterns read before
    /// a failure remain in the set.
    pub fn add_pattern_file(&mut self, path: &Path) {
        match File::open(path) {
            Ok(file) => {
                if let Err(source) = self.patterns.push_from_reader(BufReader::new(file)) {
                    self.record_error(GrepError::input(path.display().to_string(), source));
                }
            }
            Err(source) => {
                self.record_error(GrepError::input(path.display().to_string(), source));
            }
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn status(&self) -> ExitStatus {
        self.status
    }

    /// Report an error on the diagnostic sink and force the status to
    /// trouble.
    pub fn record_error(&mut self, error: GrepError) {
        report(&mut *self.err, &mut self.status, &error);
    }

    /// Run the session over `files`, or standard input when empty.
    ///
    /// Returns the process exit code: 0 for at least one match, 1 for a
    /// clean scan without matches, 2 when any error was recorded. If any
    /// error was recorded before scanning could start (flag conflicts,
    /// pattern-file failures, compile failures), scanning is skipped
    /// entirely.
    pub fn run(&mut self, files: &[PathBuf]) -> i32 {
        for error in self.config.validate() {
            self.record_error(error);
        }
        if !self.config.fixed_string {
            let failures = self
                .patterns
                .compile(self.config.case_insensitive, self.config.full_line_match);
            for error in failures {
                self.record_error(error);
            }
        }
        if self.status.is_trouble() {
            debug!("errors recorded before scanning; skipping scan");
            return self.status.code();
        }
        let strategy = MatchStrategy::select(&self.config);
        if files.is_empty() {
            debug!("no sources declared; scanning standard input");
            let scanner = LineScanner::new(&self.config, &self.patterns, strategy, 1);
            let stdin = io::stdin();
            scanner.scan(
                STDIN_NAME,
                stdin.lock(),
                &mut *self.out,
                &mut *self.err,
                &mut self.status,
            );
        } else {
            debug!("scanning {} sources", files.len());
            let scanner = LineScanner::new(&self.config, &self.patterns, strategy, files.len());
            for path in files {
                let name = path.display().to_string();
                match File::open(path) {
                    Ok(file) => {
                        scanner.scan(
                            &name,
                            BufReader::new(file),
                            &mut *self.out,
                            &mut *self.err,
                            &mut self.status,
                        );
                    }
                    Err(source) => {
                        if self.config.suppress_file_errors && suppressible(source.kind()) {
                            debug!("suppressed open failure for {name}: {source}");
                        } else {
                            report(
                                &mut *self.err,
                                &mut self.status,
                                &GrepError::input(name, source),
                            );
                        }
                    }
                }
            }
        }
        self.status.code()
    }
}

/// Open-failure classes silenced by `-s`: missing, unreadable, or not a
/// usable plain file. Anything else is still reported, including symlink
/// loops and ENXIO, which have no stable `ErrorKind`.
fn suppressible(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::NotFound
            | ErrorKind::PermissionDenied
            | ErrorKind::IsADirectory
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidFilename
    )
}
