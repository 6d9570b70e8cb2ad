//! Operating-system identity a cell runs under.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(uid, gid)` pair resolved from the user database.
///
/// Identities are looked up fresh for every operation that needs one and are
/// never cached across invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user id.
    pub uid: u32,
    /// Numeric primary group id.
    pub gid: u32,
}

impl Identity {
    /// Create a new identity.
    #[must_use]
    pub const fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uid={} gid={}", self.uid, self.gid)
    }
}
