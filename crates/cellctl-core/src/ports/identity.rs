//! Identity lookup port.

use super::CellError;
use crate::domain::{Cell, Identity};

/// Maps a cell to the OS identity its process runs under.
///
/// Implementations must look the identity up on every call; the user
/// database may change between invocations.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the identity named by [`Cell::identity_name`].
    ///
    /// Fails with [`CellError::UnknownIdentity`] when no such user exists.
    fn resolve(&self, cell: &Cell) -> Result<Identity, CellError>;
}
