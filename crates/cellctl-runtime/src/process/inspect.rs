//! Process details via `sysinfo`.

use std::path::Path;

use cellctl_core::domain::ProcessDetails;
use cellctl_core::ports::ProcessInspector;
use sysinfo::System;

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoInspector;

impl ProcessInspector for SysinfoInspector {
    fn inspect(&self, pid: u32) -> Option<ProcessDetails> {
        // Use new_all() to ensure processes are loaded
        let sys = System::new_all();
        let process = sys.process(sysinfo::Pid::from_u32(pid))?;

        Some(ProcessDetails {
            name: process.name().to_string_lossy().into_owned(),
            executable: process.exe().map(Path::to_path_buf),
            started_at: process.start_time(),
        })
    }
}
