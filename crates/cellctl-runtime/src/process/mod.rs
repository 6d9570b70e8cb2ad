//! Process spawning, signalling and inspection.

mod inspect;
mod signal;
mod spawn;

use nix::unistd::Pid;

pub use inspect::SysinfoInspector;
pub use signal::NixSignaller;
pub use spawn::{DetachedSpawner, build_command};

/// Convert a pid for use with `kill(2)`.
///
/// Returns `None` for 0 and for values beyond `i32::MAX`; both would be
/// interpreted as process-group or broadcast targets.
pub(crate) fn to_nix_pid(pid: u32) -> Option<Pid> {
    i32::try_from(pid)
        .ok()
        .filter(|raw| *raw > 0)
        .map(Pid::from_raw)
}
