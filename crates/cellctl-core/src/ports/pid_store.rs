//! Pid persistence port.

use super::PidfileError;

/// Durable single-value store for the last pid spawned for a cell.
///
/// A store is bound to one pidfile path for its whole lifetime.
#[cfg_attr(test, mockall::automock)]
pub trait PidStore: Send + Sync {
    /// Read the stored pid.
    fn read_pid(&self) -> Result<u32, PidfileError>;

    /// Replace the stored pid wholesale.
    fn write_pid(&self, pid: u32) -> Result<(), PidfileError>;

    /// Delete the record. Missing records are not an error.
    fn remove(&self) -> Result<(), PidfileError>;
}
