//! Terminal rendering of operation results.

use std::fmt::Write as _;
use std::time::Duration;

use cellctl_core::domain::{CellStatus, StopOutcome};

/// Human-readable status block.
pub fn format_status(status: &CellStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "(i) cell {}:", status.identity);
    let _ = writeln!(out, "- running: {}", status.running);
    if let Some(pid) = status.pid {
        let _ = writeln!(out, "- pid:     {pid}");
    }
    let _ = writeln!(out, "- uid:     {}", status.uid);
    let _ = write!(out, "- gid:     {}", status.gid);

    if let Some(details) = &status.details {
        let _ = write!(out, "\n- name:    {}", details.name);
        if let Some(exe) = &details.executable {
            let _ = write!(out, "\n- exe:     {}", exe.display());
        }
        let _ = write!(out, "\n- started: {}", details.started_at);
    }
    out
}

/// Status as pretty-printed JSON.
pub fn status_json(status: &CellStatus) -> serde_json::Result<String> {
    serde_json::to_string_pretty(status)
}

/// Notice for a stop outcome worth mentioning, and whether it is a warning.
///
/// A confirmed stop is silent.
pub fn stop_notice(
    identity: &str,
    outcome: StopOutcome,
    timeout: Duration,
) -> Option<(String, bool)> {
    match outcome {
        StopOutcome::NotRunning => Some((format!("!!! cell {identity} is not running"), false)),
        StopOutcome::Stopped { .. } => None,
        StopOutcome::TimedOut { pid } => Some((
            format!(
                "!!! cell {identity} (pid {pid}) did not confirm exit within {}s",
                timeout.as_secs_f64()
            ),
            true,
        )),
    }
}
