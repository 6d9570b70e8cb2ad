//! Operating-system adapters for the cellctl ports.
//!
//! Each module implements one port from `cellctl_core::ports` on top of
//! POSIX primitives:
//!
//! - [`pidfile`]: atomic pidfile I/O and the advisory operation lock
//! - [`liveness`]: `/proc` inspection with a signal-probe fallback
//! - [`process`]: detached spawning, signalling and process details
//! - [`identity`]: passwd lookup
//! - [`privilege`]: effective-uid check

#![deny(unsafe_code)]

#[cfg(not(unix))]
compile_error!("cellctl-runtime only supports Unix platforms");

pub mod identity;
pub mod liveness;
pub mod pidfile;
pub mod privilege;
pub mod process;

pub use identity::PasswdIdentityResolver;
pub use liveness::{ProcTableProbe, SignalProbe, select_probe};
pub use pidfile::{FilePidStore, FlockOperationLock};
pub use privilege::EffectiveUserPrivileges;
pub use process::{DetachedSpawner, NixSignaller, SysinfoInspector};
