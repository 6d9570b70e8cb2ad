//! Liveness from the `/proc` process table.

use std::fs;
use std::path::{Path, PathBuf};

use cellctl_core::ports::LivenessProbe;

/// Mount point of the process table on Linux.
pub const PROC_ROOT: &str = "/proc";

/// A pid is alive while `<root>/<pid>` exists and is not a zombie.
///
/// Zombies count as dead: they no longer run, and a killed child of the
/// controller stays a zombie until it is reaped.
#[derive(Debug, Clone)]
pub struct ProcTableProbe {
    root: PathBuf,
}

impl ProcTableProbe {
    pub fn new() -> Self {
        Self::with_root(PROC_ROOT)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Probe over `root` if it is a mounted directory.
    pub fn detect(root: &Path) -> Option<Self> {
        root.is_dir().then(|| Self::with_root(root))
    }
}

impl Default for ProcTableProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl LivenessProbe for ProcTableProbe {
    fn is_alive(&self, pid: u32) -> bool {
        if pid == 0 {
            return false;
        }
        let entry = self.root.join(pid.to_string());
        if !entry.exists() {
            return false;
        }
        // An unreadable stat file still means the entry exists.
        match fs::read_to_string(entry.join("stat")) {
            Ok(stat) => !is_zombie(&stat),
            Err(_) => true,
        }
    }
}

/// State letter from a `/proc/<pid>/stat` line.
///
/// The command name is parenthesised and may itself contain `)`, so the
/// state is the first field after the last `)`.
fn process_state(stat: &str) -> Option<char> {
    let rest = &stat[stat.rfind(')')? + 1..];
    rest.split_whitespace().next()?.chars().next()
}

fn is_zombie(stat: &str) -> bool {
    matches!(process_state(stat), Some('Z' | 'X' | 'x'))
}
