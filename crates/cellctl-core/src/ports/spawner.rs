//! Process spawning port.

use std::path::PathBuf;

use super::CellError;
use crate::domain::{Cell, SpawnSpec};

/// Launches cell processes.
///
/// Callers check privileges before spawning; the spawner assumes it may
/// switch identity.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessSpawner: Send + Sync {
    /// Absolute path of the cell's executable.
    ///
    /// Fails with [`CellError::ExecutableNotFound`] when it cannot be found.
    fn resolve_executable(&self, cell: &Cell) -> Result<PathBuf, CellError>;

    /// Launch `spec` and return the new pid.
    ///
    /// The spawner keeps no handle on the child once this returns.
    /// Launch failures surface as [`CellError::SpawnFailed`].
    fn spawn(&self, spec: &SpawnSpec) -> Result<u32, CellError>;
}
