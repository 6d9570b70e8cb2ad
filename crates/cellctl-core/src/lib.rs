//! Core of the cell controller.
//!
//! A *cell* is a named child process run under its own OS identity and
//! tracked through a pidfile. This crate holds the domain types, the port
//! traits the operating system is reached through, and the [`Supervisor`]
//! that implements start, stop, restart and status on top of them.
//!
//! Concrete port implementations live in `cellctl-runtime`.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;

pub use config::{
    ControllerConfig, DEFAULT_POLL_INTERVAL, DEFAULT_STOP_TIMEOUT, PrivilegePolicy, StopPolicy,
    TerminationMode,
};
pub use domain::{
    Cell, CellStatus, Identity, Liveness, ProcessDetails, RestartOutcome, SpawnSpec, StdioPolicy,
    StopOutcome,
};
pub use paths::{CellLayout, DEFAULT_CELL, DEFAULT_LOG_ROOT, DEFAULT_RUN_DIR, IDENTITY_PREFIX};
pub use ports::{
    CellError, IdentityResolver, LivenessProbe, LockGuard, NoopInspector, NoopLock,
    OperationLock, PidStore, PidfileError, PrivilegeCheck, ProcessInspector, ProcessSignaller,
    ProcessSpawner, TerminationSignal,
};
pub use services::{Supervisor, SupervisorPorts};
