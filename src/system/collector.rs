use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, Signal, System};

use super::kill::{KillResult, kill_pid};
use super::snapshot::{ProcessInfo, Snapshot};
use crate::format::format_uptime;

pub struct Collector {
    sys: System,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        // Prime the CPU counters so the first sample has a baseline to diff against.
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        Collector { sys }
    }

    pub fn sample(&mut self) -> Snapshot {
        self.sys.refresh_memory();
        self.sys.refresh_cpu_usage();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        self.build_snapshot()
    }

    pub fn kill(&mut self, pid: u32, signal: Signal) -> KillResult {
        kill_pid(&mut self.sys, pid, signal)
    }

    fn build_snapshot(&self) -> Snapshot {
        let total_memory = self.sys.total_memory();
        let mem = percent_of(self.sys.used_memory(), total_memory);

        let mut processes: Vec<ProcessInfo> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessInfo {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
                cpu: process.cpu_usage() as f64,
                mem: percent_of(process.memory(), total_memory),
            })
            .collect();
        sort_by_cpu_desc(&mut processes);

        Snapshot {
            cpu: Some(self.sys.global_cpu_usage() as f64),
            mem: Some(mem),
            uptime: Some(format_uptime(System::uptime())),
            processes,
        }
    }
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Busiest processes first, PID as the tie breaker so the table is stable.
pub fn sort_by_cpu_desc(processes: &mut [ProcessInfo]) {
    processes.sort_by(|a, b| {
        b.cpu
            .partial_cmp(&a.cpu)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.pid.cmp(&b.pid))
    });
}
