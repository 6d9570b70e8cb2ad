//! Main CLI parser and global options.
//!
//! Every option except the boolean switches can also be set through a
//! `CELLCTL_*` environment variable (or a `.env` file).

use std::path::PathBuf;

use clap::Parser;

use cellctl_core::paths::{DEFAULT_CELL, DEFAULT_LOG_ROOT, DEFAULT_RUN_DIR};

use crate::commands::Commands;

/// Controller for a single supervised cell.
#[derive(Parser, Debug)]
#[command(name = "cellctl")]
#[command(about = "Start, stop and inspect a supervised cell")]
#[command(version)]
pub struct Cli {
    /// Name of the cell to control
    #[arg(short = 'c', long, env = "CELLCTL_CELL", default_value = DEFAULT_CELL, global = true)]
    pub cell: String,

    /// Pidfile to use instead of <run-dir>/hlhv-<cell>.pid
    #[arg(short = 'p', long, env = "CELLCTL_PIDFILE", global = true)]
    pub pidfile: Option<PathBuf>,

    /// Directory holding default pidfiles
    #[arg(long = "run-dir", env = "CELLCTL_RUN_DIR", default_value = DEFAULT_RUN_DIR, global = true)]
    pub run_dir: PathBuf,

    /// Root of the per-cell log destinations
    #[arg(long = "log-root", env = "CELLCTL_LOG_ROOT", default_value = DEFAULT_LOG_ROOT, global = true)]
    pub log_root: PathBuf,

    /// Executable to run instead of searching PATH for hlhv-<cell>
    #[arg(long, env = "CELLCTL_EXECUTABLE", global = true)]
    pub executable: Option<PathBuf>,

    /// Seconds to wait for the cell to exit after signalling it
    #[arg(
        long = "stop-timeout",
        env = "CELLCTL_STOP_TIMEOUT",
        value_name = "SECS",
        default_value_t = 16,
        global = true
    )]
    pub stop_timeout: u64,

    /// Milliseconds between liveness checks while stopping
    #[arg(
        long = "poll-interval",
        env = "CELLCTL_POLL_INTERVAL",
        value_name = "MS",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub poll_interval: u64,

    /// Send SIGTERM first and escalate to SIGKILL after SECS
    #[arg(long, value_name = "SECS", global = true)]
    pub graceful: Option<u64>,

    /// Fail when stopping a cell that is not running
    #[arg(long = "strict-stop", global = true)]
    pub strict_stop: bool,

    /// Allow starting without root privileges
    #[arg(long = "no-privilege-check", global = true)]
    pub no_privilege_check: bool,

    /// Do not take the advisory lock next to the pidfile
    #[arg(long = "no-lock", global = true)]
    pub no_lock: bool,

    /// Delete the pidfile once a stop is confirmed
    #[arg(long = "remove-pidfile", global = true)]
    pub remove_pidfile: bool,

    /// Treat a pid running a different executable as stale
    #[arg(long = "verify-executable", global = true)]
    pub verify_executable: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
