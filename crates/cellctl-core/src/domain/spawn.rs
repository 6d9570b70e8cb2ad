//! Launch description for a cell process.

use std::ffi::OsString;
use std::path::PathBuf;

use super::{Cell, Identity};

/// What a standard stream of the child is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioPolicy {
    /// Share the controller's stream.
    Inherit,
    /// Connect to the null device.
    Null,
}

/// Everything one spawn needs, as a single value.
///
/// The spawn primitive consumes this without consulting any other state, so
/// identity drop and detachment are visible here instead of being side
/// effects of the spawner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnSpec {
    /// Absolute path of the executable.
    pub program: PathBuf,
    /// Arguments after the program name.
    pub args: Vec<OsString>,
    /// Identity the child runs under; supplementary groups are not inherited.
    pub identity: Identity,
    /// Start the child in a new session without a controlling terminal.
    pub detach: bool,
    /// Standard input of the child.
    pub stdin: StdioPolicy,
    /// Standard output and error of the child.
    pub output: StdioPolicy,
    /// Working directory; `None` keeps the controller's.
    pub working_dir: Option<PathBuf>,
}

impl SpawnSpec {
    /// Spec for starting `cell` from `program` under `identity`.
    ///
    /// The child is detached, shares the controller's stdin, has its output
    /// streams redirected away from the controller and receives the cell's
    /// startup arguments.
    pub fn for_cell(cell: &Cell, program: PathBuf, identity: Identity) -> Self {
        Self {
            program,
            args: cell.startup_args(),
            identity,
            detach: true,
            stdin: StdioPolicy::Inherit,
            output: StdioPolicy::Null,
            working_dir: None,
        }
    }
}
