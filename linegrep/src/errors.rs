//! Error types for pattern matching and scanning.
//!
//! Errors in this crate never abort a scan session outright. Each one is
//! reported on the diagnostic sink and folded into the session's tri-state
//! [`ExitStatus`](crate::results::ExitStatus); the session then continues
//! to do as much useful work as it still can (compile the remaining
//! patterns, scan the remaining sources).

use std::io;
use std::io::Write;
use thiserror::Error;

use crate::results::ExitStatus;

/// Result type for scan operations.
pub type GrepResult<T> = Result<T, GrepError>;

/// Errors that can occur while loading patterns or scanning input.
#[derive(Error, Debug)]
pub enum GrepError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("{name}: {source}")]
    Input { name: String, source: io::Error },
    #[error("write error: {0}")]
    Output(io::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("missing pattern")]
    MissingPattern,
}

impl GrepError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn input(name: impl Into<String>, source: io::Error) -> Self {
        Self::Input {
            name: name.into(),
            source,
        }
    }

    pub fn output(source: io::Error) -> Self {
        Self::Output(source)
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Write a diagnostic for `error` and force the session status to trouble.
///
/// A failure to write the diagnostic itself is ignored; there is nowhere
/// left to report it.
pub fn report(err: &mut dyn Write, status: &mut ExitStatus, error: &GrepError) {
    status.record_trouble();
    let _ = writeln!(err, "linegrep: {error}");
}
