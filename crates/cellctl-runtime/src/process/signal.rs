//! Signal delivery by pid, without a `Child` handle.

use cellctl_core::ports::{CellError, ProcessSignaller, TerminationSignal};
use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use tracing::debug;

use super::to_nix_pid;

/// Delivers termination signals with `kill(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NixSignaller;

impl ProcessSignaller for NixSignaller {
    fn send(&self, pid: u32, request: TerminationSignal) -> Result<(), CellError> {
        let target = to_nix_pid(pid).ok_or_else(|| CellError::KillFailed {
            pid,
            reason: "not a valid process id".into(),
        })?;
        let sig = match request {
            TerminationSignal::Terminate => Signal::SIGTERM,
            TerminationSignal::Kill => Signal::SIGKILL,
        };

        match signal::kill(target, sig) {
            Ok(()) => {
                debug!(pid, signal = %sig, "signal delivered");
                Ok(())
            }
            Err(Errno::ESRCH) => {
                // Already gone
                debug!(pid, signal = %sig, "process exited before signal");
                Ok(())
            }
            Err(e) => Err(CellError::KillFailed {
                pid,
                reason: e.to_string(),
            }),
        }
    }
}
