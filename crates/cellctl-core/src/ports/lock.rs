//! Operation lock port.
//!
//! The pidfile is otherwise an unsynchronized single-writer resource: two
//! controllers racing a start and a stop can interleave their liveness
//! checks and writes. An [`OperationLock`] serializes whole operations per
//! pidfile.

use super::CellError;
use crate::domain::Cell;

/// Held for the duration of one operation; releases on drop.
pub struct LockGuard {
    inner: Option<Box<dyn Send>>,
}

impl LockGuard {
    /// Guard owning whatever keeps the lock held.
    pub fn new(inner: impl Send + 'static) -> Self {
        Self {
            inner: Some(Box::new(inner)),
        }
    }

    /// Guard that holds nothing.
    pub const fn noop() -> Self {
        Self { inner: None }
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("held", &self.inner.is_some())
            .finish()
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait OperationLock: Send + Sync {
    /// Block until the lock for `cell` is held.
    fn acquire(&self, cell: &Cell) -> Result<LockGuard, CellError>;
}

/// Lock that never blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLock;

impl OperationLock for NoopLock {
    fn acquire(&self, _cell: &Cell) -> Result<LockGuard, CellError> {
        Ok(LockGuard::noop())
    }
}
