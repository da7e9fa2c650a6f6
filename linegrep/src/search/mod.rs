//! Line scanning: matcher selection, the per-source scan loop, and the
//! session orchestrator that drives both across every input source.

pub mod engine;
pub mod matcher;
pub mod scanner;

pub use engine::{GrepSession, STDIN_NAME};
pub use matcher::MatchStrategy;
pub use scanner::LineScanner;
