//! Liveness probe port.

/// Decides whether a pid still refers to a live process.
///
/// Probes never fail: a nonexistent or unreadable pid is simply not alive.
/// Strategy selection (process table vs. signal probe) happens once when the
/// probe is built, never in callers.
#[cfg_attr(test, mockall::automock)]
pub trait LivenessProbe: Send + Sync {
    fn is_alive(&self, pid: u32) -> bool;
}
