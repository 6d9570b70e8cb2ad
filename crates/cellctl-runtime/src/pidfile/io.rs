//! Atomic pidfile I/O.
//!
//! Format: the pid in ASCII decimal, no trailing newline. Surrounding
//! whitespace is tolerated on read.

use std::fs::{self, OpenOptions, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use cellctl_core::ports::{PidStore, PidfileError};
use tracing::debug;

const PIDFILE_MODE: u32 = 0o644;

/// [`PidStore`] backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FilePidStore {
    path: PathBuf,
}

impl FilePidStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PidStore for FilePidStore {
    fn read_pid(&self) -> Result<u32, PidfileError> {
        read_pidfile(&self.path)
    }

    fn write_pid(&self, pid: u32) -> Result<(), PidfileError> {
        write_pidfile(&self.path, pid).map_err(|source| PidfileError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn remove(&self) -> Result<(), PidfileError> {
        delete_pidfile(&self.path).map_err(|source| PidfileError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Write `pid` to `path` atomically using temp file + rename.
///
/// # Atomicity
/// 1. Write to `.<name>.<controller pid>.tmp` in the same directory
/// 2. Rename over `path` (atomic on POSIX filesystems)
///
/// Missing parent directories are created.
pub fn write_pidfile(path: &Path, pid: u32) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let temp_path = temp_path_for(dir, path);
    let result = write_new(&temp_path, pid).and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    debug!(pidfile = %path.display(), pid, "pidfile written");
    Ok(())
}

fn write_new(path: &Path, pid: u32) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(PIDFILE_MODE)
        .open(path)?;
    // The open mode is filtered through the umask
    file.set_permissions(Permissions::from_mode(PIDFILE_MODE))?;
    file.write_all(pid.to_string().as_bytes())?;
    file.sync_all()
}

fn temp_path_for(dir: &Path, path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "pidfile".into(), |n| n.to_string_lossy());
    dir.join(format!(".{name}.{}.tmp", std::process::id()))
}

/// Read and parse the pid stored at `path`.
pub fn read_pidfile(path: &Path) -> Result<u32, PidfileError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PidfileError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(PidfileError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse_pid(&content).ok_or_else(|| PidfileError::Parse {
        path: path.to_path_buf(),
        content,
    })
}

/// Delete the pidfile (idempotent - no error if missing).
pub fn delete_pidfile(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(pidfile = %path.display(), "pidfile removed");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Parse pidfile content.
///
/// Any `u32` is accepted, including 0; whether a recorded pid is alive is
/// the liveness probe's call.
pub fn parse_pid(content: &str) -> Option<u32> {
    content.trim().parse::<u32>().ok()
}
