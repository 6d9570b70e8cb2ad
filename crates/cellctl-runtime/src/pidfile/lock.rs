//! Advisory operation lock on `<pidfile>.lock`.

use std::fs::{self, File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use cellctl_core::domain::Cell;
use cellctl_core::ports::{CellError, LockGuard, OperationLock};
use nix::fcntl::{Flock, FlockArg};
use tracing::debug;

/// Blocking exclusive `flock` held for the lifetime of the returned guard.
///
/// The lock file is left in place after release; removing it would let two
/// controllers lock different inodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlockOperationLock;

impl OperationLock for FlockOperationLock {
    fn acquire(&self, cell: &Cell) -> Result<LockGuard, CellError> {
        let path = cell.lock_path();
        let file = open_lock_file(&path).map_err(|e| CellError::Lock {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        debug!(lockfile = %path.display(), "waiting for operation lock");
        let flock = Flock::lock(file, FlockArg::LockExclusive).map_err(|(_, errno)| {
            CellError::Lock {
                path: path.clone(),
                reason: errno.desc().to_owned(),
            }
        })?;
        debug!(lockfile = %path.display(), "operation lock held");

        Ok(LockGuard::new(flock))
    }
}

fn open_lock_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o644)
        .open(path)
}
