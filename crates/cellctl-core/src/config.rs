//! Controller configuration.
//!
//! A [`ControllerConfig`] is built once per invocation (by the CLI) and
//! passed by reference to every supervisor operation. Nothing in the
//! workspace keeps configuration in global state.

use std::time::Duration;

use crate::domain::Cell;

/// Default ceiling on how long `stop` waits for the process to exit.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(16);

/// Default interval between liveness polls while stopping.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What `stop` does when nothing is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopPolicy {
    /// Report the condition and succeed.
    #[default]
    Lenient,
    /// Fail with `NotRunning`.
    Strict,
}

/// When the controller must hold elevated privileges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrivilegePolicy {
    /// Starting a cell requires root.
    #[default]
    RequiredForStart,
    /// Never checked; spawning under a foreign identity will then fail at
    /// the OS level instead.
    NotRequired,
}

impl PrivilegePolicy {
    pub const fn requires_elevation_for_start(self) -> bool {
        matches!(self, Self::RequiredForStart)
    }
}

/// How `stop` asks the process to exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TerminationMode {
    /// A single SIGKILL.
    #[default]
    Kill,
    /// SIGTERM, then SIGKILL if the process is still alive after `grace`.
    Graceful { grace: Duration },
}

/// Explicit configuration for one controller invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// The cell being controlled.
    pub cell: Cell,
    /// Upper bound on the post-signal wait in `stop`.
    pub stop_timeout: Duration,
    /// Interval between liveness polls in `stop`.
    pub poll_interval: Duration,
    pub stop_policy: StopPolicy,
    pub privilege_policy: PrivilegePolicy,
    pub termination: TerminationMode,
    /// Hold an advisory lock next to the pidfile during start/stop/restart.
    pub lock_pidfile: bool,
    /// Delete the pidfile once a stop is confirmed.
    pub remove_pidfile_on_stop: bool,
    /// Treat a live pid whose executable differs from the cell's as stale.
    pub verify_executable: bool,
}

impl ControllerConfig {
    /// Configuration with default policies for `cell`.
    pub const fn new(cell: Cell) -> Self {
        Self {
            cell,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            stop_policy: StopPolicy::Lenient,
            privilege_policy: PrivilegePolicy::RequiredForStart,
            termination: TerminationMode::Kill,
            lock_pidfile: true,
            remove_pidfile_on_stop: false,
            verify_executable: false,
        }
    }

    #[must_use]
    pub const fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_stop_policy(mut self, policy: StopPolicy) -> Self {
        self.stop_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_privilege_policy(mut self, policy: PrivilegePolicy) -> Self {
        self.privilege_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_termination(mut self, mode: TerminationMode) -> Self {
        self.termination = mode;
        self
    }

    #[must_use]
    pub const fn with_lock(mut self, enabled: bool) -> Self {
        self.lock_pidfile = enabled;
        self
    }

    #[must_use]
    pub const fn with_pidfile_removal(mut self, enabled: bool) -> Self {
        self.remove_pidfile_on_stop = enabled;
        self
    }

    #[must_use]
    pub const fn with_executable_check(mut self, enabled: bool) -> Self {
        self.verify_executable = enabled;
        self
    }
}
