//! Pidfile management for tracking the cell process.
//!
//! # Guarantees
//! - Atomic writes via temp file + rename in the pidfile's directory
//! - Idempotent removal
//! - An advisory `flock` next to the pidfile serializes whole operations

mod io;
mod lock;

pub use io::{FilePidStore, delete_pidfile, parse_pid, read_pidfile, write_pidfile};
pub use lock::FlockOperationLock;
