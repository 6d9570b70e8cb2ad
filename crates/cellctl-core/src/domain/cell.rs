//! The supervised cell and everything derived from its name.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::paths::{self, CellLayout};
use crate::ports::CellError;

/// A named, supervised child process.
///
/// All derived attributes are fixed at construction and stay immutable for
/// the rest of the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    name: String,
    identity_name: String,
    executable: Option<PathBuf>,
    pidfile: PathBuf,
    log_destination: PathBuf,
}

impl Cell {
    /// Derive a cell from its name and a layout.
    ///
    /// Names must be non-empty and free of path separators, since they end
    /// up in file names and user names.
    pub fn resolve(name: &str, layout: &CellLayout) -> Result<Self, CellError> {
        validate_name(name)?;

        let pidfile = layout
            .pidfile
            .clone()
            .unwrap_or_else(|| paths::default_pidfile_path(&layout.run_dir, name));

        Ok(Self {
            name: name.to_owned(),
            identity_name: paths::identity_name(name),
            executable: layout.executable.clone(),
            pidfile,
            log_destination: paths::log_destination(&layout.log_root, name),
        })
    }

    /// Bare cell name, as given on the command line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the OS identity and of the executable.
    pub fn identity_name(&self) -> &str {
        &self.identity_name
    }

    /// Executable configured explicitly, if any.
    pub fn executable_override(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Pidfile holding the last spawned pid.
    pub fn pidfile(&self) -> &Path {
        &self.pidfile
    }

    /// Advisory lock file guarding the pidfile.
    pub fn lock_path(&self) -> PathBuf {
        paths::lock_path(&self.pidfile)
    }

    /// Where the cell is told to write its logs.
    pub fn log_destination(&self) -> &Path {
        &self.log_destination
    }

    /// Fixed startup argument pair pointing the cell at its log destination.
    pub fn startup_args(&self) -> Vec<OsString> {
        vec![
            OsString::from("-L"),
            self.log_destination.clone().into_os_string(),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cell = {}", self.name)?;
        writeln!(f, "identity = {}", self.identity_name)?;
        match &self.executable {
            Some(path) => writeln!(f, "executable = {}", path.display())?,
            None => writeln!(f, "executable = {} (search path)", self.identity_name)?,
        }
        writeln!(f, "pidfile = {}", self.pidfile.display())?;
        writeln!(f, "lockfile = {}", self.lock_path().display())?;
        write!(f, "log_destination = {}", self.log_destination.display())
    }
}

fn validate_name(name: &str) -> Result<(), CellError> {
    if name.trim().is_empty() {
        return Err(CellError::Configuration("cell name cannot be empty".into()));
    }
    if name.contains('/') || name.contains('\0') {
        return Err(CellError::Configuration(format!(
            "cell name {name:?} must not contain '/' or NUL"
        )));
    }
    if name == "." || name == ".." {
        return Err(CellError::Configuration(format!(
            "cell name {name:?} is reserved"
        )));
    }
    Ok(())
}
