//! Process signalling port.

use super::CellError;

/// Signals the supervisor sends to stop a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// Polite request (SIGTERM).
    Terminate,
    /// Forced termination (SIGKILL).
    Kill,
}

#[cfg_attr(test, mockall::automock)]
pub trait ProcessSignaller: Send + Sync {
    /// Deliver `signal` to `pid`.
    ///
    /// A process that is already gone counts as delivered. Any other
    /// failure is [`CellError::KillFailed`].
    fn send(&self, pid: u32, signal: TerminationSignal) -> Result<(), CellError>;
}
