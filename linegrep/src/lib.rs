//! Line-oriented pattern matching over files and standard input.
//!
//! The pipeline: patterns are collected into a [`PatternSet`], one
//! [`MatchStrategy`] is selected from the session flags, and a
//! [`GrepSession`] scans each input source line by line, folding matches
//! and errors into a tri-state [`ExitStatus`].

pub mod config;
pub mod errors;
pub mod patterns;
pub mod results;
pub mod search;

pub use config::GrepConfig;
pub use errors::{GrepError, GrepResult};
pub use patterns::{Pattern, PatternSet};
pub use results::{ExitStatus, ScanSummary};
pub use search::{GrepSession, LineScanner, MatchStrategy, STDIN_NAME};
