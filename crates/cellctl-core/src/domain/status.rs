//! Results reported by supervisor operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ports::CellError;

/// Liveness of the pid found in the pidfile, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liveness {
    pub pid: u32,
    pub alive: bool,
}

/// How a stop request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StopOutcome {
    /// Nothing was running; no signal was sent.
    NotRunning,
    /// The process was signalled and its exit observed.
    Stopped { pid: u32 },
    /// The process was signalled but still looked alive when the wait
    /// window ran out. This is a soft outcome, not an error.
    TimedOut { pid: u32 },
}

impl StopOutcome {
    /// Whether the process exit was confirmed (or nothing was running).
    pub const fn confirmed(&self) -> bool {
        !matches!(self, Self::TimedOut { .. })
    }
}

/// Result of a restart: whatever stop produced, then the new pid.
#[derive(Debug)]
pub struct RestartOutcome {
    /// Stop result, carried for reporting only.
    pub stop: Result<StopOutcome, CellError>,
    /// Pid of the freshly started process.
    pub pid: u32,
}

/// Extra facts about a live process, when the platform exposes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDetails {
    /// Process name as reported by the OS.
    pub name: String,
    /// Executable backing the process.
    pub executable: Option<PathBuf>,
    /// Start time in seconds since the Unix epoch.
    pub started_at: u64,
}

/// Snapshot reported by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStatus {
    pub cell: String,
    pub identity: String,
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    pub uid: u32,
    pub gid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ProcessDetails>,
}
