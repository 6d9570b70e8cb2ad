//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the runtime adapters are wired
//! together for the CLI:
//! - Pidfile store and operation lock (via cellctl-runtime)
//! - Liveness probe, selected once for this host
//! - Spawner, signaller and inspector
//! - The supervisor itself (via cellctl-core)
//!
//! Command handlers receive the composed [`CliContext`] and delegate to it.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cellctl_core::domain::Cell;
use cellctl_core::paths::CellLayout;
use cellctl_core::ports::PrivilegeCheck;
use cellctl_core::{
    ControllerConfig, PrivilegePolicy, StopPolicy, Supervisor, SupervisorPorts, TerminationMode,
};
use cellctl_runtime::liveness::PROC_ROOT;
use cellctl_runtime::{
    DetachedSpawner, EffectiveUserPrivileges, FilePidStore, FlockOperationLock, NixSignaller,
    PasswdIdentityResolver, SysinfoInspector, select_probe,
};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Fully composed controller for one invocation.
pub struct CliContext {
    /// Configuration every operation runs with.
    pub config: ControllerConfig,
    /// Lifecycle supervisor over the system adapters.
    pub supervisor: Supervisor,
}

impl CliContext {
    /// Name of the controlled cell.
    pub fn cell_name(&self) -> &str {
        self.config.cell.name()
    }
}

/// Path roots and overrides taken from the command line.
pub fn cell_layout(cli: &Cli) -> CellLayout {
    CellLayout {
        run_dir: cli.run_dir.clone(),
        log_root: cli.log_root.clone(),
        pidfile: cli.pidfile.clone(),
        executable: cli.executable.clone(),
    }
}

/// Build the controller configuration from parsed arguments.
pub fn controller_config(cli: &Cli) -> Result<ControllerConfig, CliError> {
    let cell = Cell::resolve(&cli.cell, &cell_layout(cli))?;
    let stop_timeout = Duration::from_secs(cli.stop_timeout);

    let termination = match cli.graceful {
        None => TerminationMode::Kill,
        Some(secs) if secs > cli.stop_timeout => {
            return Err(CliError::Arguments(format!(
                "--graceful ({secs}s) must not exceed --stop-timeout ({}s)",
                cli.stop_timeout
            )));
        }
        Some(secs) => TerminationMode::Graceful {
            grace: Duration::from_secs(secs),
        },
    };

    let stop_policy = if cli.strict_stop {
        StopPolicy::Strict
    } else {
        StopPolicy::Lenient
    };
    let privilege_policy = if cli.no_privilege_check {
        PrivilegePolicy::NotRequired
    } else {
        PrivilegePolicy::RequiredForStart
    };

    Ok(ControllerConfig::new(cell)
        .with_stop_timeout(stop_timeout)
        .with_poll_interval(Duration::from_millis(cli.poll_interval))
        .with_stop_policy(stop_policy)
        .with_privilege_policy(privilege_policy)
        .with_termination(termination)
        .with_lock(!cli.no_lock)
        .with_pidfile_removal(cli.remove_pidfile)
        .with_executable_check(cli.verify_executable))
}

/// Compose the CLI context from parsed arguments.
///
/// Fails when the host offers no usable liveness probe (no `/proc` and no
/// root privileges for the signal fallback).
pub fn bootstrap(cli: &Cli) -> Result<CliContext, CliError> {
    let config = controller_config(cli)?;
    let privileges: Arc<dyn PrivilegeCheck> = Arc::new(EffectiveUserPrivileges);
    let liveness = select_probe(Path::new(PROC_ROOT), privileges.as_ref())?;

    let ports = SupervisorPorts {
        identities: Arc::new(PasswdIdentityResolver),
        pids: Arc::new(FilePidStore::new(config.cell.pidfile())),
        liveness,
        spawner: Arc::new(DetachedSpawner),
        signaller: Arc::new(NixSignaller),
        privileges,
        inspector: Arc::new(SysinfoInspector),
        lock: Arc::new(FlockOperationLock),
    };

    debug!(
        cell = config.cell.name(),
        pidfile = %config.cell.pidfile().display(),
        "controller composed"
    );

    Ok(CliContext {
        config,
        supervisor: Supervisor::new(ports),
    })
}
