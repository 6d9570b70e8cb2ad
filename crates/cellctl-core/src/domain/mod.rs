//! Domain types for cell supervision.

mod cell;
mod identity;
mod spawn;
mod status;

pub use cell::Cell;
pub use identity::Identity;
pub use spawn::{SpawnSpec, StdioPolicy};
pub use status::{CellStatus, Liveness, ProcessDetails, RestartOutcome, StopOutcome};
