//! Liveness via the null signal.

use cellctl_core::ports::{CellError, LivenessProbe, PrivilegeCheck};
use nix::errno::Errno;
use nix::sys::signal;

use crate::process::to_nix_pid;

/// Sends signal 0 to check existence without delivering anything.
///
/// An unprivileged controller gets `EPERM` for every foreign process, so
/// this probe can only be built when elevated.
#[derive(Debug)]
pub struct SignalProbe {
    _elevated: (),
}

impl SignalProbe {
    pub fn new(privileges: &dyn PrivilegeCheck) -> Result<Self, CellError> {
        if privileges.is_elevated() {
            Ok(Self { _elevated: () })
        } else {
            Err(CellError::InsufficientPrivilege)
        }
    }
}

impl LivenessProbe for SignalProbe {
    fn is_alive(&self, pid: u32) -> bool {
        let Some(target) = to_nix_pid(pid) else {
            return false;
        };
        match signal::kill(target, None) {
            Ok(()) => true,
            Err(Errno::ESRCH) => false, // No such process
            Err(_) => true,             // Exists but we lack permission
        }
    }
}
