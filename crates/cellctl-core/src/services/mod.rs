//! Core services - the supervisor's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain types.
//! They never know which concrete implementations they drive.

mod supervisor;

pub use supervisor::{Supervisor, SupervisorPorts};
