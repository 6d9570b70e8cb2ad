//! Path and name derivation for cells.
//!
//! Every location a cell touches is derived from its name plus a small
//! [`CellLayout`] of roots:
//! - Identity (user) name: `hlhv-<cell>`
//! - Executable: looked up on the search path under the identity name
//! - Pidfile: `<run_dir>/hlhv-<cell>.pid`
//! - Log destination: `<log_root>/<cell>`
//!
//! Nothing here touches the filesystem.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Cell controlled when none is named.
pub const DEFAULT_CELL: &str = "queen";

/// Prefix joining a cell name to its identity and executable name.
pub const IDENTITY_PREFIX: &str = "hlhv-";

/// Runtime-state directory holding default pidfiles.
pub const DEFAULT_RUN_DIR: &str = "/run";

/// Root under which each cell gets its log destination.
pub const DEFAULT_LOG_ROOT: &str = "/var/log/hlhv";

/// Roots and overrides used to derive a cell's paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLayout {
    /// Directory holding default pidfiles.
    pub run_dir: PathBuf,
    /// Directory under which log destinations are derived.
    pub log_root: PathBuf,
    /// Explicit pidfile, bypassing `run_dir`.
    pub pidfile: Option<PathBuf>,
    /// Explicit executable, bypassing the search path.
    pub executable: Option<PathBuf>,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            run_dir: PathBuf::from(DEFAULT_RUN_DIR),
            log_root: PathBuf::from(DEFAULT_LOG_ROOT),
            pidfile: None,
            executable: None,
        }
    }
}

/// Identity (and executable) name for a cell.
pub fn identity_name(cell: &str) -> String {
    format!("{IDENTITY_PREFIX}{cell}")
}

/// Default pidfile location for a cell under `run_dir`.
pub fn default_pidfile_path(run_dir: &Path, cell: &str) -> PathBuf {
    run_dir.join(format!("{}.pid", identity_name(cell)))
}

/// Log destination handed to the cell on startup.
pub fn log_destination(log_root: &Path, cell: &str) -> PathBuf {
    log_root.join(cell)
}

/// Advisory lock file sitting next to a pidfile.
pub fn lock_path(pidfile: &Path) -> PathBuf {
    let mut name = pidfile
        .file_name()
        .map_or_else(|| OsString::from("cell"), ToOwned::to_owned);
    name.push(".lock");
    pidfile.with_file_name(name)
}
