//! Port definitions (trait abstractions) for the operating system.
//!
//! Ports define what the supervisor expects from the OS: identity lookup,
//! pid persistence, liveness, spawning and signalling. Implementations live
//! in `cellctl-runtime`; tests substitute mocks.
//!
//! # Design Rules
//!
//! - No `nix`/`libc` types in any signature
//! - All calls are synchronous; the supervisor runs one operation per process
//! - Probes that cannot fail return plain values instead of `Result`

pub mod identity;
pub mod inspector;
pub mod liveness;
pub mod lock;
pub mod pid_store;
pub mod privilege;
pub mod signaller;
pub mod spawner;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use identity::IdentityResolver;
pub use inspector::{NoopInspector, ProcessInspector};
pub use liveness::LivenessProbe;
pub use lock::{LockGuard, NoopLock, OperationLock};
pub use pid_store::PidStore;
pub use privilege::PrivilegeCheck;
pub use signaller::{ProcessSignaller, TerminationSignal};
pub use spawner::ProcessSpawner;

/// Failures reading or writing the pidfile.
#[derive(Debug, Error)]
pub enum PidfileError {
    /// No pidfile exists yet.
    #[error("pidfile {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The pidfile does not hold a decimal pid.
    #[error("pidfile {} holds an invalid pid: {content:?}", .path.display())]
    Parse { path: PathBuf, content: String },

    /// The pidfile could not be read, written or removed.
    #[error("pidfile {} is not accessible: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Every way a supervisor operation can fail.
///
/// All variants are terminal for the current invocation. Adapters map them
/// to exit codes and operator-facing messages.
#[derive(Debug, Error)]
pub enum CellError {
    /// A live process already owns the pidfile.
    #[error("already running with pid {pid}")]
    AlreadyRunning { pid: u32 },

    /// Nothing is running (only raised under the strict stop policy).
    #[error("not running")]
    NotRunning,

    /// The cell's identity is missing from the user database.
    #[error("identity {name} does not exist")]
    UnknownIdentity { name: String },

    /// The cell's executable could not be found.
    #[error("executable {name} does not exist")]
    ExecutableNotFound { name: String },

    /// The OS refused to launch the executable.
    #[error("failed to spawn {}: {source}", .program.display())]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing the pidfile failed.
    #[error(transparent)]
    PidfileIo(#[from] PidfileError),

    /// The termination signal could not be delivered.
    #[error("could not signal pid {pid}: {reason}")]
    KillFailed { pid: u32, reason: String },

    /// The controller lacks the privileges to assume another identity.
    #[error("this operation must be run as root")]
    InsufficientPrivilege,

    /// The advisory operation lock could not be taken.
    #[error("could not lock {}: {reason}", .path.display())]
    Lock { path: PathBuf, reason: String },

    /// Invalid configuration (bad cell name and the like).
    #[error("Configuration error: {0}")]
    Configuration(String),
}
