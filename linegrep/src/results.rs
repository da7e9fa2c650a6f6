//! Session outcome types.

/// Tri-state outcome of a scan session, mapped onto the process exit code.
///
/// The session starts in [`NoMatch`](ExitStatus::NoMatch). A matched line
/// upgrades it to [`MatchFound`](ExitStatus::MatchFound) only while no
/// error has been recorded; any recorded error moves it to
/// [`Trouble`](ExitStatus::Trouble), and no later match downgrades it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitStatus {
    /// At least one line matched and no error occurred.
    MatchFound,
    /// The scan completed without matches or errors.
    #[default]
    NoMatch,
    /// An error was recorded at some point during the session.
    Trouble,
}

impl ExitStatus {
    /// Record a matched line. Ignored once an error has been recorded.
    pub fn record_match(&mut self) {
        if !self.is_trouble() {
            *self = Self::MatchFound;
        }
    }

    /// Record an error. Absorbing: the status never leaves this state.
    pub fn record_trouble(&mut self) {
        *self = Self::Trouble;
    }

    pub fn is_trouble(self) -> bool {
        self == Self::Trouble
    }

    /// The process exit code for this status.
    pub fn code(self) -> i32 {
        match self {
            Self::MatchFound => 0,
            Self::NoMatch => 1,
            Self::Trouble => 2,
        }
    }
}

/// Per-source tally produced by the line scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Number of lines read from the source.
    pub lines: u64,
    /// Number of lines that matched, after inversion.
    pub matches: u64,
}
