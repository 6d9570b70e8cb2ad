//! Process inspection port.

use crate::domain::ProcessDetails;

/// Looks up descriptive details for a live pid.
///
/// Used for status reporting and for the optional pid-reuse guard. Returns
/// `None` when the platform cannot tell.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessInspector: Send + Sync {
    fn inspect(&self, pid: u32) -> Option<ProcessDetails>;
}

/// Inspector that never knows anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInspector;

impl ProcessInspector for NoopInspector {
    fn inspect(&self, _pid: u32) -> Option<ProcessDetails> {
        None
    }
}
