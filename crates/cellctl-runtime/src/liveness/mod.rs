//! Liveness probes and their one-time selection.

mod proc_table;
mod signal_probe;

use std::path::Path;
use std::sync::Arc;

use cellctl_core::ports::{CellError, LivenessProbe, PrivilegeCheck};
use tracing::debug;

pub use proc_table::{PROC_ROOT, ProcTableProbe};
pub use signal_probe::SignalProbe;

/// Pick the liveness strategy for this host.
///
/// The process table under `proc_root` wins when it is mounted. Otherwise
/// the signal probe is used, which requires elevated privileges.
pub fn select_probe(
    proc_root: &Path,
    privileges: &dyn PrivilegeCheck,
) -> Result<Arc<dyn LivenessProbe>, CellError> {
    if let Some(probe) = ProcTableProbe::detect(proc_root) {
        debug!(root = %proc_root.display(), "liveness via process table");
        return Ok(Arc::new(probe));
    }

    let probe = SignalProbe::new(privileges)?;
    debug!("process table unavailable, liveness via null signal");
    Ok(Arc::new(probe))
}
