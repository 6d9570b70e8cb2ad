//! Cell lifecycle supervisor.
//!
//! Orchestrates start/stop/restart/status over the OS ports. Each operation
//! is a synchronous, single-shot call; the only wait is the bounded liveness
//! poll after a stop signal.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::{ControllerConfig, StopPolicy, TerminationMode};
use crate::domain::{CellStatus, Liveness, RestartOutcome, SpawnSpec, StopOutcome};
use crate::ports::{
    CellError, IdentityResolver, LivenessProbe, LockGuard, OperationLock, PidStore, PidfileError,
    PrivilegeCheck, ProcessInspector, ProcessSignaller, ProcessSpawner, TerminationSignal,
};

/// Container for the port implementations a supervisor drives.
#[derive(Clone)]
pub struct SupervisorPorts {
    pub identities: Arc<dyn IdentityResolver>,
    pub pids: Arc<dyn PidStore>,
    pub liveness: Arc<dyn LivenessProbe>,
    pub spawner: Arc<dyn ProcessSpawner>,
    pub signaller: Arc<dyn ProcessSignaller>,
    pub privileges: Arc<dyn PrivilegeCheck>,
    pub inspector: Arc<dyn ProcessInspector>,
    pub lock: Arc<dyn OperationLock>,
}

/// Lifecycle state machine for a single cell.
pub struct Supervisor {
    ports: SupervisorPorts,
}

impl Supervisor {
    pub const fn new(ports: SupervisorPorts) -> Self {
        Self { ports }
    }

    /// Liveness of the pid currently in the pidfile.
    ///
    /// Returns `None` when there is no usable pidfile. An unreadable or
    /// malformed pidfile is treated the same as a missing one.
    pub fn liveness(&self, config: &ControllerConfig) -> Option<Liveness> {
        let pid = match self.ports.pids.read_pid() {
            Ok(pid) => pid,
            Err(PidfileError::NotFound(path)) => {
                debug!(pidfile = %path.display(), "no pidfile");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "ignoring unusable pidfile");
                return None;
            }
        };

        let mut alive = self.ports.liveness.is_alive(pid);
        if alive && config.verify_executable && !self.pid_runs_cell_executable(config, pid) {
            warn!(pid, "pid is alive but runs a different executable; treating as stale");
            alive = false;
        }

        debug!(pid, alive, "probed pidfile pid");
        Some(Liveness { pid, alive })
    }

    /// Start the cell unless it is already running.
    ///
    /// Returns the pid of the spawned process, which has also been written
    /// to the pidfile.
    pub fn start(&self, config: &ControllerConfig) -> Result<u32, CellError> {
        let _guard = self.lock(config)?;
        self.start_locked(config)
    }

    /// Stop the cell and wait (bounded) for it to exit.
    ///
    /// An unavailable lock only fails the stop when a live process would
    /// need signalling; with nothing running the outcome is the same as
    /// with the lock held.
    pub fn stop(&self, config: &ControllerConfig) -> Result<StopOutcome, CellError> {
        let _guard = match self.lock(config) {
            Ok(guard) => guard,
            Err(e) if self.running_pid(config).is_none() => {
                debug!(error = %e, "operation lock unavailable, cell is not running");
                return Self::not_running(config);
            }
            Err(e) => return Err(e),
        };
        self.stop_locked(config)
    }

    /// Stop, then start, regardless of how the stop went.
    ///
    /// If the stop timed out the old process may still be alive, in which
    /// case start reports `AlreadyRunning`.
    pub fn restart(&self, config: &ControllerConfig) -> Result<RestartOutcome, CellError> {
        let _guard = self.lock(config)?;

        let stop = self.stop_locked(config);
        match &stop {
            Ok(outcome) => debug!(?outcome, "restart: stop finished"),
            Err(e) => warn!(error = %e, "restart: stop failed, starting anyway"),
        }

        let pid = self.start_locked(config)?;
        Ok(RestartOutcome { stop, pid })
    }

    /// Report identity and liveness. Never touches the pidfile.
    pub fn status(&self, config: &ControllerConfig) -> Result<CellStatus, CellError> {
        let cell = &config.cell;
        let identity = self.ports.identities.resolve(cell)?;
        let pid = self.running_pid(config);
        let details = pid.and_then(|pid| self.ports.inspector.inspect(pid));

        Ok(CellStatus {
            cell: cell.name().to_owned(),
            identity: cell.identity_name().to_owned(),
            running: pid.is_some(),
            pid,
            uid: identity.uid,
            gid: identity.gid,
            details,
        })
    }

    fn start_locked(&self, config: &ControllerConfig) -> Result<u32, CellError> {
        let cell = &config.cell;

        if let Some(pid) = self.running_pid(config) {
            return Err(CellError::AlreadyRunning { pid });
        }

        if config.privilege_policy.requires_elevation_for_start()
            && !self.ports.privileges.is_elevated()
        {
            return Err(CellError::InsufficientPrivilege);
        }

        let identity = self.ports.identities.resolve(cell)?;
        let program = self.ports.spawner.resolve_executable(cell)?;
        let spec = SpawnSpec::for_cell(cell, program, identity);

        let pid = self.ports.spawner.spawn(&spec)?;
        info!(
            cell = cell.name(),
            pid,
            program = %spec.program.display(),
            %identity,
            "cell started"
        );

        if let Err(e) = self.ports.pids.write_pid(pid) {
            error!(pid, error = %e, "cell is running but its pid could not be recorded");
            return Err(e.into());
        }

        Ok(pid)
    }

    fn stop_locked(&self, config: &ControllerConfig) -> Result<StopOutcome, CellError> {
        let Some(pid) = self.running_pid(config) else {
            return Self::not_running(config);
        };

        let exited = match config.termination {
            TerminationMode::Kill => {
                self.ports.signaller.send(pid, TerminationSignal::Kill)?;
                self.await_exit(pid, config.stop_timeout, config.poll_interval)
            }
            TerminationMode::Graceful { grace } => {
                let grace = grace.min(config.stop_timeout);
                self.ports.signaller.send(pid, TerminationSignal::Terminate)?;
                if self.await_exit(pid, grace, config.poll_interval) {
                    true
                } else {
                    debug!(pid, "grace period over, escalating to SIGKILL");
                    self.ports.signaller.send(pid, TerminationSignal::Kill)?;
                    self.await_exit(pid, config.stop_timeout - grace, config.poll_interval)
                }
            }
        };

        if !exited {
            warn!(pid, timeout = ?config.stop_timeout, "cell did not confirm exit in time");
            return Ok(StopOutcome::TimedOut { pid });
        }

        info!(cell = config.cell.name(), pid, "cell stopped");
        if config.remove_pidfile_on_stop {
            if let Err(e) = self.ports.pids.remove() {
                warn!(error = %e, "cell stopped but its pidfile could not be removed");
            }
        }
        Ok(StopOutcome::Stopped { pid })
    }

    fn not_running(config: &ControllerConfig) -> Result<StopOutcome, CellError> {
        match config.stop_policy {
            StopPolicy::Lenient => {
                info!(cell = config.cell.name(), "cell is not running");
                Ok(StopOutcome::NotRunning)
            }
            StopPolicy::Strict => Err(CellError::NotRunning),
        }
    }

    /// Poll until `pid` is gone or `window` elapses. Returns whether it exited.
    ///
    /// A window too large to represent as an `Instant` means no deadline.
    fn await_exit(&self, pid: u32, window: Duration, interval: Duration) -> bool {
        let deadline = Instant::now().checked_add(window);
        loop {
            if !self.ports.liveness.is_alive(pid) {
                return true;
            }
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    interval.min(deadline - now)
                }
                None => interval,
            };
            thread::sleep(pause);
        }
    }

    fn running_pid(&self, config: &ControllerConfig) -> Option<u32> {
        self.liveness(config)
            .filter(|liveness| liveness.alive)
            .map(|liveness| liveness.pid)
    }

    /// Whether `pid` runs the cell's executable. Unknown counts as yes.
    fn pid_runs_cell_executable(&self, config: &ControllerConfig, pid: u32) -> bool {
        let Some(actual) = self
            .ports
            .inspector
            .inspect(pid)
            .and_then(|details| details.executable)
        else {
            return true;
        };
        let Ok(expected) = self.ports.spawner.resolve_executable(&config.cell) else {
            return true;
        };
        same_executable(&actual, &expected)
    }

    fn lock(&self, config: &ControllerConfig) -> Result<LockGuard, CellError> {
        if config.lock_pidfile {
            self.ports.lock.acquire(&config.cell)
        } else {
            Ok(LockGuard::noop())
        }
    }
}

fn same_executable(actual: &Path, expected: &Path) -> bool {
    if actual == expected {
        return true;
    }
    match (actual.canonicalize(), expected.canonicalize()) {
        (Ok(actual), Ok(expected)) => actual == expected,
        _ => actual.file_name() == expected.file_name(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::PrivilegePolicy;
    use crate::domain::{Cell, Identity, ProcessDetails};
    use crate::paths::CellLayout;
    use crate::ports::identity::MockIdentityResolver;
    use crate::ports::inspector::MockProcessInspector;
    use crate::ports::lock::MockOperationLock;
    use crate::ports::privilege::MockPrivilegeCheck;
    use crate::ports::spawner::MockProcessSpawner;
    use crate::ports::{NoopInspector, NoopLock};

    const PROGRAM: &str = "/usr/local/bin/hlhv-queen";

    /// In-memory pidfile that counts writes.
    #[derive(Default)]
    struct MemoryPidStore {
        pid: Mutex<Option<u32>>,
        writes: AtomicUsize,
        corrupt: bool,
    }

    impl MemoryPidStore {
        fn holding(pid: u32) -> Self {
            Self {
                pid: Mutex::new(Some(pid)),
                ..Self::default()
            }
        }

        fn current(&self) -> Option<u32> {
            *self.pid.lock().unwrap()
        }
    }

    impl PidStore for MemoryPidStore {
        fn read_pid(&self) -> Result<u32, PidfileError> {
            if self.corrupt {
                return Err(PidfileError::Parse {
                    path: PathBuf::from("/run/hlhv-queen.pid"),
                    content: "garbage".into(),
                });
            }
            self.current()
                .ok_or_else(|| PidfileError::NotFound(PathBuf::from("/run/hlhv-queen.pid")))
        }

        fn write_pid(&self, pid: u32) -> Result<(), PidfileError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            *self.pid.lock().unwrap() = Some(pid);
            Ok(())
        }

        fn remove(&self) -> Result<(), PidfileError> {
            *self.pid.lock().unwrap() = None;
            Ok(())
        }
    }

    /// Process table where a pid stays alive for a fixed number of probes.
    struct ScriptedLiveness {
        alive_pid: Option<u32>,
        alive_probes: Option<usize>,
        probes: AtomicUsize,
    }

    impl ScriptedLiveness {
        fn dead() -> Self {
            Self {
                alive_pid: None,
                alive_probes: None,
                probes: AtomicUsize::new(0),
            }
        }

        fn forever(pid: u32) -> Self {
            Self {
                alive_pid: Some(pid),
                alive_probes: None,
                probes: AtomicUsize::new(0),
            }
        }

        fn for_probes(pid: u32, probes: usize) -> Self {
            Self {
                alive_pid: Some(pid),
                alive_probes: Some(probes),
                probes: AtomicUsize::new(0),
            }
        }

        fn probes(&self) -> usize {
            self.probes.load(Ordering::SeqCst)
        }
    }

    impl LivenessProbe for ScriptedLiveness {
        fn is_alive(&self, pid: u32) -> bool {
            let seen = self.probes.fetch_add(1, Ordering::SeqCst);
            self.alive_pid == Some(pid) && self.alive_probes.is_none_or(|limit| seen < limit)
        }
    }

    #[derive(Default)]
    struct RecordingSignaller {
        sent: Mutex<Vec<(u32, TerminationSignal)>>,
        refuse: bool,
    }

    impl RecordingSignaller {
        fn sent(&self) -> Vec<(u32, TerminationSignal)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl ProcessSignaller for RecordingSignaller {
        fn send(&self, pid: u32, signal: TerminationSignal) -> Result<(), CellError> {
            if self.refuse {
                return Err(CellError::KillFailed {
                    pid,
                    reason: "EPERM: Operation not permitted".into(),
                });
            }
            self.sent.lock().unwrap().push((pid, signal));
            Ok(())
        }
    }

    fn config() -> ControllerConfig {
        let cell = Cell::resolve("queen", &CellLayout::default()).unwrap();
        ControllerConfig::new(cell)
            .with_poll_interval(Duration::from_millis(2))
            .with_stop_timeout(Duration::from_millis(200))
    }

    fn known_identity() -> MockIdentityResolver {
        let mut identities = MockIdentityResolver::new();
        identities
            .expect_resolve()
            .returning(|_| Ok(Identity::new(901, 902)));
        identities
    }

    fn unknown_identity() -> MockIdentityResolver {
        let mut identities = MockIdentityResolver::new();
        identities.expect_resolve().returning(|cell| {
            Err(CellError::UnknownIdentity {
                name: cell.identity_name().to_owned(),
            })
        });
        identities
    }

    fn spawner_returning(pid: u32, times: usize) -> MockProcessSpawner {
        let mut spawner = MockProcessSpawner::new();
        spawner
            .expect_resolve_executable()
            .returning(|_| Ok(PathBuf::from(PROGRAM)));
        spawner.expect_spawn().times(times).returning(move |_| Ok(pid));
        spawner
    }

    fn elevated(yes: bool) -> MockPrivilegeCheck {
        let mut privileges = MockPrivilegeCheck::new();
        privileges.expect_is_elevated().return_const(yes);
        privileges
    }

    struct Fixture {
        pids: Arc<MemoryPidStore>,
        liveness: Arc<ScriptedLiveness>,
        signaller: Arc<RecordingSignaller>,
        identities: MockIdentityResolver,
        spawner: MockProcessSpawner,
        privileges: MockPrivilegeCheck,
    }

    impl Fixture {
        fn new(pids: MemoryPidStore, liveness: ScriptedLiveness) -> Self {
            Self {
                pids: Arc::new(pids),
                liveness: Arc::new(liveness),
                signaller: Arc::new(RecordingSignaller::default()),
                identities: known_identity(),
                spawner: spawner_returning(0, 0),
                privileges: elevated(true),
            }
        }

        fn supervisor(
            self,
        ) -> (
            Supervisor,
            Arc<MemoryPidStore>,
            Arc<ScriptedLiveness>,
            Arc<RecordingSignaller>,
        ) {
            let ports = SupervisorPorts {
                identities: Arc::new(self.identities),
                pids: self.pids.clone(),
                liveness: self.liveness.clone(),
                spawner: Arc::new(self.spawner),
                signaller: self.signaller.clone(),
                privileges: Arc::new(self.privileges),
                inspector: Arc::new(NoopInspector),
                lock: Arc::new(NoopLock),
            };
            (Supervisor::new(ports), self.pids, self.liveness, self.signaller)
        }
    }

    #[test]
    fn start_without_pidfile_spawns_once_and_records_pid() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        fixture.spawner = spawner_returning(4242, 1);
        let (supervisor, pids, _, _) = fixture.supervisor();

        let pid = supervisor.start(&config()).unwrap();

        assert_eq!(pid, 4242);
        assert_eq!(pids.current(), Some(4242));
        assert_eq!(pids.writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn start_passes_identity_and_log_args_to_spawner() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let mut spawner = MockProcessSpawner::new();
        spawner
            .expect_resolve_executable()
            .returning(|_| Ok(PathBuf::from(PROGRAM)));
        spawner
            .expect_spawn()
            .withf(|spec| {
                spec.program == Path::new(PROGRAM)
                    && spec.identity == Identity::new(901, 902)
                    && spec.args == ["-L", "/var/log/hlhv/queen"]
                    && spec.detach
            })
            .times(1)
            .returning(|_| Ok(77));
        fixture.spawner = spawner;
        let (supervisor, _, _, _) = fixture.supervisor();

        assert_eq!(supervisor.start(&config()).unwrap(), 77);
    }

    #[test]
    fn start_while_alive_fails_without_spawning() {
        let fixture = Fixture::new(MemoryPidStore::holding(310), ScriptedLiveness::forever(310));
        let (supervisor, pids, _, _) = fixture.supervisor();

        let err = supervisor.start(&config()).unwrap_err();

        assert!(matches!(err, CellError::AlreadyRunning { pid: 310 }));
        assert_eq!(pids.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn start_over_stale_pid_overwrites_pidfile() {
        let mut fixture = Fixture::new(MemoryPidStore::holding(310), ScriptedLiveness::dead());
        fixture.spawner = spawner_returning(311, 1);
        let (supervisor, pids, _, _) = fixture.supervisor();

        assert_eq!(supervisor.start(&config()).unwrap(), 311);
        assert_eq!(pids.current(), Some(311));
    }

    #[test]
    fn start_over_corrupt_pidfile_spawns() {
        let pids = MemoryPidStore {
            corrupt: true,
            ..MemoryPidStore::default()
        };
        let mut fixture = Fixture::new(pids, ScriptedLiveness::dead());
        fixture.spawner = spawner_returning(12, 1);
        let (supervisor, _, liveness, _) = fixture.supervisor();

        assert_eq!(supervisor.start(&config()).unwrap(), 12);
        assert_eq!(liveness.probes(), 0);
    }

    #[test]
    fn start_requires_privilege_by_default() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        fixture.privileges = elevated(false);
        let (supervisor, pids, _, _) = fixture.supervisor();

        let err = supervisor.start(&config()).unwrap_err();

        assert!(matches!(err, CellError::InsufficientPrivilege));
        assert_eq!(pids.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn privilege_check_can_be_disabled() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let mut privileges = MockPrivilegeCheck::new();
        privileges.expect_is_elevated().never();
        fixture.privileges = privileges;
        fixture.spawner = spawner_returning(55, 1);
        let (supervisor, _, _, _) = fixture.supervisor();

        let config = config().with_privilege_policy(PrivilegePolicy::NotRequired);
        assert_eq!(supervisor.start(&config).unwrap(), 55);
    }

    #[test]
    fn start_with_unknown_identity_fails_before_mutation() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        fixture.identities = unknown_identity();
        let (supervisor, pids, _, _) = fixture.supervisor();

        let err = supervisor.start(&config()).unwrap_err();

        assert!(matches!(err, CellError::UnknownIdentity { ref name } if name == "hlhv-queen"));
        assert_eq!(pids.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn start_with_missing_executable_fails() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let mut spawner = MockProcessSpawner::new();
        spawner.expect_resolve_executable().returning(|cell| {
            Err(CellError::ExecutableNotFound {
                name: cell.identity_name().to_owned(),
            })
        });
        spawner.expect_spawn().never();
        fixture.spawner = spawner;
        let (supervisor, _, _, _) = fixture.supervisor();

        let err = supervisor.start(&config()).unwrap_err();
        assert!(matches!(err, CellError::ExecutableNotFound { .. }));
    }

    #[test]
    fn spawn_failure_propagates_without_retry() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let mut spawner = MockProcessSpawner::new();
        spawner
            .expect_resolve_executable()
            .returning(|_| Ok(PathBuf::from(PROGRAM)));
        spawner.expect_spawn().times(1).returning(|spec| {
            Err(CellError::SpawnFailed {
                program: spec.program.clone(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });
        fixture.spawner = spawner;
        let (supervisor, pids, _, _) = fixture.supervisor();

        let err = supervisor.start(&config()).unwrap_err();

        assert!(matches!(err, CellError::SpawnFailed { .. }));
        assert_eq!(pids.current(), None);
    }

    #[test]
    fn stop_without_pidfile_sends_nothing() {
        let fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let outcome = supervisor.stop(&config()).unwrap();

        assert_eq!(outcome, StopOutcome::NotRunning);
        assert!(signaller.sent().is_empty());
    }

    #[test]
    fn stop_with_dead_pid_sends_nothing() {
        let fixture = Fixture::new(MemoryPidStore::holding(99), ScriptedLiveness::dead());
        let (supervisor, pids, _, signaller) = fixture.supervisor();

        let outcome = supervisor.stop(&config()).unwrap();

        assert_eq!(outcome, StopOutcome::NotRunning);
        assert!(signaller.sent().is_empty());
        assert_eq!(pids.current(), Some(99));
    }

    #[test]
    fn strict_stop_reports_not_running_as_error() {
        let fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let err = supervisor
            .stop(&config().with_stop_policy(StopPolicy::Strict))
            .unwrap_err();

        assert!(matches!(err, CellError::NotRunning));
        assert!(signaller.sent().is_empty());
    }

    #[test]
    fn stop_returns_as_soon_as_process_is_gone() {
        // Alive for the pidfile check plus two polls, gone on the third poll.
        let fixture = Fixture::new(
            MemoryPidStore::holding(500),
            ScriptedLiveness::for_probes(500, 3),
        );
        let (supervisor, pids, liveness, signaller) = fixture.supervisor();

        let outcome = supervisor
            .stop(&config().with_stop_timeout(Duration::from_secs(10)))
            .unwrap();

        assert_eq!(outcome, StopOutcome::Stopped { pid: 500 });
        assert_eq!(signaller.sent(), vec![(500, TerminationSignal::Kill)]);
        assert_eq!(liveness.probes(), 4);
        // Stale pidfile stays in place unless removal is requested.
        assert_eq!(pids.current(), Some(500));
    }

    #[test]
    fn stop_times_out_softly() {
        let fixture = Fixture::new(MemoryPidStore::holding(600), ScriptedLiveness::forever(600));
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let config = config().with_stop_timeout(Duration::from_millis(60));
        let started = Instant::now();
        let outcome = supervisor.stop(&config).unwrap();
        let elapsed = started.elapsed();

        assert_eq!(outcome, StopOutcome::TimedOut { pid: 600 });
        assert!(!outcome.confirmed());
        assert_eq!(signaller.sent().len(), 1);
        assert!(elapsed >= Duration::from_millis(60));
        assert!(elapsed < Duration::from_secs(5), "waited {elapsed:?}");
    }

    #[test]
    fn huge_stop_timeout_waits_without_overflow() {
        let fixture = Fixture::new(
            MemoryPidStore::holding(650),
            ScriptedLiveness::for_probes(650, 3),
        );
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let config = config().with_stop_timeout(Duration::from_secs(u64::MAX));
        let outcome = supervisor.stop(&config).unwrap();

        assert_eq!(outcome, StopOutcome::Stopped { pid: 650 });
        assert_eq!(signaller.sent(), vec![(650, TerminationSignal::Kill)]);
    }

    #[test]
    fn huge_grace_period_waits_without_overflow() {
        let fixture = Fixture::new(
            MemoryPidStore::holding(651),
            ScriptedLiveness::for_probes(651, 2),
        );
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let config = config()
            .with_stop_timeout(Duration::MAX)
            .with_termination(TerminationMode::Graceful {
                grace: Duration::MAX,
            });
        let outcome = supervisor.stop(&config).unwrap();

        assert_eq!(outcome, StopOutcome::Stopped { pid: 651 });
        assert_eq!(signaller.sent(), vec![(651, TerminationSignal::Terminate)]);
    }

    #[test]
    fn stop_propagates_kill_failure() {
        let fixture = Fixture::new(MemoryPidStore::holding(700), ScriptedLiveness::forever(700));
        let (mut supervisor, _, _, _) = fixture.supervisor();
        supervisor.ports.signaller = Arc::new(RecordingSignaller {
            refuse: true,
            ..RecordingSignaller::default()
        });

        let err = supervisor.stop(&config()).unwrap_err();
        assert!(matches!(err, CellError::KillFailed { pid: 700, .. }));
    }

    #[test]
    fn graceful_stop_escalates_after_grace() {
        let fixture = Fixture::new(MemoryPidStore::holding(800), ScriptedLiveness::forever(800));
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let config = config()
            .with_stop_timeout(Duration::from_millis(80))
            .with_termination(TerminationMode::Graceful {
                grace: Duration::from_millis(20),
            });
        let outcome = supervisor.stop(&config).unwrap();

        assert_eq!(outcome, StopOutcome::TimedOut { pid: 800 });
        assert_eq!(
            signaller.sent(),
            vec![
                (800, TerminationSignal::Terminate),
                (800, TerminationSignal::Kill)
            ]
        );
    }

    #[test]
    fn graceful_stop_skips_kill_when_term_suffices() {
        let fixture = Fixture::new(
            MemoryPidStore::holding(801),
            ScriptedLiveness::for_probes(801, 2),
        );
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let config = config().with_termination(TerminationMode::Graceful {
            grace: Duration::from_secs(5),
        });
        let outcome = supervisor.stop(&config).unwrap();

        assert_eq!(outcome, StopOutcome::Stopped { pid: 801 });
        assert_eq!(signaller.sent(), vec![(801, TerminationSignal::Terminate)]);
    }

    #[test]
    fn confirmed_stop_can_remove_pidfile() {
        let fixture = Fixture::new(
            MemoryPidStore::holding(900),
            ScriptedLiveness::for_probes(900, 1),
        );
        let (supervisor, pids, _, _) = fixture.supervisor();

        let outcome = supervisor
            .stop(&config().with_pidfile_removal(true))
            .unwrap();

        assert_eq!(outcome, StopOutcome::Stopped { pid: 900 });
        assert_eq!(pids.current(), None);
    }

    #[test]
    fn restart_of_stopped_cell_starts_fresh() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        fixture.spawner = spawner_returning(1001, 1);
        let (supervisor, pids, _, signaller) = fixture.supervisor();

        let outcome = supervisor.restart(&config()).unwrap();

        assert!(matches!(outcome.stop, Ok(StopOutcome::NotRunning)));
        assert_eq!(outcome.pid, 1001);
        assert_eq!(pids.current(), Some(1001));
        assert!(signaller.sent().is_empty());
    }

    #[test]
    fn restart_stops_then_starts() {
        // Alive for the stop's pidfile check, gone on the first poll.
        let mut fixture = Fixture::new(
            MemoryPidStore::holding(1100),
            ScriptedLiveness::for_probes(1100, 1),
        );
        fixture.spawner = spawner_returning(1101, 1);
        let (supervisor, pids, _, signaller) = fixture.supervisor();

        let outcome = supervisor.restart(&config()).unwrap();

        assert!(matches!(outcome.stop, Ok(StopOutcome::Stopped { pid: 1100 })));
        assert_eq!(signaller.sent(), vec![(1100, TerminationSignal::Kill)]);
        assert_eq!(outcome.pid, 1101);
        assert_eq!(pids.current(), Some(1101));
    }

    #[test]
    fn restart_after_timed_out_stop_hits_already_running() {
        let fixture = Fixture::new(MemoryPidStore::holding(1200), ScriptedLiveness::forever(1200));
        let (supervisor, _, _, signaller) = fixture.supervisor();

        let err = supervisor
            .restart(&config().with_stop_timeout(Duration::from_millis(10)))
            .unwrap_err();

        assert!(matches!(err, CellError::AlreadyRunning { pid: 1200 }));
        assert_eq!(signaller.sent().len(), 1);
    }

    #[test]
    fn restart_ignores_strict_not_running() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        fixture.spawner = spawner_returning(1300, 1);
        let (supervisor, _, _, _) = fixture.supervisor();

        let outcome = supervisor
            .restart(&config().with_stop_policy(StopPolicy::Strict))
            .unwrap();

        assert!(matches!(outcome.stop, Err(CellError::NotRunning)));
        assert_eq!(outcome.pid, 1300);
    }

    #[test]
    fn status_reports_live_pid() {
        let fixture = Fixture::new(MemoryPidStore::holding(1400), ScriptedLiveness::forever(1400));
        let (supervisor, pids, _, _) = fixture.supervisor();

        let status = supervisor.status(&config()).unwrap();

        assert!(status.running);
        assert_eq!(status.pid, Some(1400));
        assert_eq!((status.uid, status.gid), (901, 902));
        assert_eq!(status.identity, "hlhv-queen");
        assert_eq!(pids.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn status_reports_stale_pid_as_stopped() {
        let fixture = Fixture::new(MemoryPidStore::holding(1500), ScriptedLiveness::dead());
        let (supervisor, pids, _, _) = fixture.supervisor();

        let status = supervisor.status(&config()).unwrap();

        assert!(!status.running);
        assert_eq!(status.pid, None);
        assert_eq!(pids.current(), Some(1500));
        assert_eq!(pids.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn status_with_unknown_identity_fails() {
        let mut fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        fixture.identities = unknown_identity();
        let (supervisor, _, liveness, _) = fixture.supervisor();

        let err = supervisor.status(&config()).unwrap_err();

        assert!(matches!(err, CellError::UnknownIdentity { .. }));
        assert_eq!(liveness.probes(), 0);
    }

    #[test]
    fn status_includes_process_details() {
        let fixture = Fixture::new(MemoryPidStore::holding(1600), ScriptedLiveness::forever(1600));
        let (mut supervisor, _, _, _) = fixture.supervisor();
        let mut inspector = MockProcessInspector::new();
        inspector.expect_inspect().returning(|_| {
            Some(ProcessDetails {
                name: "hlhv-queen".into(),
                executable: Some(PathBuf::from(PROGRAM)),
                started_at: 1_700_000_000,
            })
        });
        supervisor.ports.inspector = Arc::new(inspector);

        let status = supervisor.status(&config()).unwrap();
        assert_eq!(status.details.unwrap().started_at, 1_700_000_000);
    }

    #[test]
    fn executable_check_treats_foreign_process_as_stale() {
        let mut fixture = Fixture::new(MemoryPidStore::holding(1700), ScriptedLiveness::forever(1700));
        fixture.spawner = spawner_returning(1701, 1);
        let (mut supervisor, pids, _, _) = fixture.supervisor();
        let mut inspector = MockProcessInspector::new();
        inspector.expect_inspect().returning(|_| {
            Some(ProcessDetails {
                name: "sshd".into(),
                executable: Some(PathBuf::from("/usr/sbin/sshd")),
                started_at: 0,
            })
        });
        supervisor.ports.inspector = Arc::new(inspector);

        let pid = supervisor
            .start(&config().with_executable_check(true))
            .unwrap();

        assert_eq!(pid, 1701);
        assert_eq!(pids.current(), Some(1701));
    }

    #[test]
    fn operations_take_the_lock_when_enabled() {
        let fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let (mut supervisor, _, _, _) = fixture.supervisor();
        let mut lock = MockOperationLock::new();
        lock.expect_acquire()
            .times(1)
            .returning(|_| Ok(LockGuard::noop()));
        supervisor.ports.lock = Arc::new(lock);

        supervisor.stop(&config()).unwrap();
    }

    #[test]
    fn lock_failure_aborts_operation() {
        let fixture = Fixture::new(MemoryPidStore::default(), ScriptedLiveness::dead());
        let (mut supervisor, _, _, _) = fixture.supervisor();
        let mut lock = MockOperationLock::new();
        lock.expect_acquire().returning(|cell| {
            Err(CellError::Lock {
                path: cell.lock_path(),
                reason: "EACCES".into(),
            })
        });
        supervisor.ports.lock = Arc::new(lock);

        assert!(matches!(
            supervisor.start(&config()),
            Err(CellError::Lock { .. })
        ));
        // Disabled locking skips the port entirely.
        supervisor.stop(&config().with_lock(false)).unwrap();
    }

    fn failing_lock() -> MockOperationLock {
        let mut lock = MockOperationLock::new();
        lock.expect_acquire().returning(|cell| {
            Err(CellError::Lock {
                path: cell.lock_path(),
                reason: "Permission denied".into(),
            })
        });
        lock
    }

    #[test]
    fn stop_without_lock_access_still_reports_not_running() {
        let fixture = Fixture::new(MemoryPidStore::holding(1800), ScriptedLiveness::dead());
        let (mut supervisor, _, _, signaller) = fixture.supervisor();
        supervisor.ports.lock = Arc::new(failing_lock());

        assert_eq!(supervisor.stop(&config()).unwrap(), StopOutcome::NotRunning);
        assert!(matches!(
            supervisor.stop(&config().with_stop_policy(StopPolicy::Strict)),
            Err(CellError::NotRunning)
        ));
        assert!(signaller.sent().is_empty());
    }

    #[test]
    fn stop_without_lock_access_refuses_live_cell() {
        let fixture = Fixture::new(MemoryPidStore::holding(1801), ScriptedLiveness::forever(1801));
        let (mut supervisor, _, _, signaller) = fixture.supervisor();
        supervisor.ports.lock = Arc::new(failing_lock());

        assert!(matches!(
            supervisor.stop(&config()),
            Err(CellError::Lock { .. })
        ));
        assert!(signaller.sent().is_empty());
    }

    #[test]
    fn same_executable_falls_back_to_file_name() {
        assert!(same_executable(
            Path::new("/nonexistent/a/hlhv-queen"),
            Path::new("/nonexistent/b/hlhv-queen")
        ));
        assert!(!same_executable(
            Path::new("/nonexistent/sshd"),
            Path::new("/nonexistent/hlhv-queen")
        ));
    }
}
