//! Detached spawning under a cell's identity.
//!
//! The command is assembled in named steps (identity drop, terminal
//! detachment) and launched once. The child handle is dropped immediately;
//! once the controller exits, init adopts the cell.

use std::io;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use cellctl_core::domain::{Cell, Identity, SpawnSpec, StdioPolicy};
use cellctl_core::ports::{CellError, ProcessSpawner};
use tracing::{debug, error};

/// [`ProcessSpawner`] that starts cells in their own session.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn resolve_executable(&self, cell: &Cell) -> Result<PathBuf, CellError> {
        if let Some(path) = cell.executable_override() {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            debug!(path = %path.display(), "configured executable is missing");
            return Err(CellError::ExecutableNotFound {
                name: path.display().to_string(),
            });
        }

        let name = cell.identity_name();
        which::which(name).map_err(|e| {
            debug!(name, error = %e, "executable not on search path");
            CellError::ExecutableNotFound {
                name: name.to_owned(),
            }
        })
    }

    fn spawn(&self, spec: &SpawnSpec) -> Result<u32, CellError> {
        debug!(
            program = %spec.program.display(),
            args = ?spec.args,
            identity = %spec.identity,
            detach = spec.detach,
            "spawning cell"
        );

        let child = build_command(spec).spawn().map_err(|source| {
            error!(program = %spec.program.display(), error = %source, "spawn failed");
            CellError::SpawnFailed {
                program: spec.program.clone(),
                source,
            }
        })?;

        let pid = child.id();
        release(child);
        Ok(pid)
    }
}

/// Assemble the command described by `spec`.
pub fn build_command(spec: &SpawnSpec) -> Command {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(stdio(spec.stdin))
        .stdout(stdio(spec.output))
        .stderr(stdio(spec.output));

    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }

    drop_identity(&mut command, spec.identity);
    if spec.detach {
        detach_from_terminal(&mut command);
    }
    command
}

fn stdio(policy: StdioPolicy) -> Stdio {
    match policy {
        StdioPolicy::Inherit => Stdio::inherit(),
        StdioPolicy::Null => Stdio::null(),
    }
}

/// Run the child as `identity`.
///
/// With a uid set and no explicit group list, std clears the supplementary
/// groups (`setgroups(0)`) before switching uid.
fn drop_identity(command: &mut Command, identity: Identity) {
    command.uid(identity.uid).gid(identity.gid);
}

/// Start the child in a new session, leaving the controlling terminal.
#[allow(unsafe_code)]
fn detach_from_terminal(command: &mut Command) {
    // SAFETY: setsid() is async-signal-safe and touches no parent state,
    // so it is sound between fork and exec.
    unsafe {
        command.pre_exec(|| {
            nix::unistd::setsid().map_err(io::Error::from)?;
            Ok(())
        });
    }
}

/// Give up the handle without waiting; the cell outlives the controller.
fn release(child: Child) {
    drop(child);
}
