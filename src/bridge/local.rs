use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use sysinfo::Signal;

use super::{BridgeError, MetricsBackend};
use crate::system::collector::Collector;
use crate::system::kill::{KillResult, signal_name};
use crate::system::snapshot::Snapshot;

/// Samples the local machine through `sysinfo`.
///
/// Sampling walks every process, so it runs on the blocking pool; the
/// collector sits behind a mutex shared with kill requests.
pub struct SysinfoBackend {
    collector: Arc<Mutex<Collector>>,
    signal: Signal,
}

impl SysinfoBackend {
    pub fn new(signal: Signal) -> Self {
        Self {
            collector: Arc::new(Mutex::new(Collector::new())),
            signal,
        }
    }

    async fn sample(&self) -> Result<Snapshot, BridgeError> {
        let collector = Arc::clone(&self.collector);
        let started = Instant::now();
        let snapshot = tokio::task::spawn_blocking(move || {
            collector
                .lock()
                .map(|mut c| c.sample())
                .map_err(|_| BridgeError::Poisoned)
        })
        .await??;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            processes = snapshot.processes.len(),
            "sampled local system"
        );
        Ok(snapshot)
    }
}

impl MetricsBackend for SysinfoBackend {
    fn fetch_snapshot(&self) -> impl Future<Output = Option<Snapshot>> + Send {
        async move {
            match self.sample().await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::warn!(error = %e, "local sampling failed");
                    None
                }
            }
        }
    }

    fn kill_process(&self, pid: u32) {
        let collector = Arc::clone(&self.collector);
        let signal = self.signal;
        tokio::task::spawn_blocking(move || {
            let result = match collector.lock() {
                Ok(mut c) => c.kill(pid, signal),
                Err(_) => KillResult::Failed(pid, BridgeError::Poisoned.to_string()),
            };
            log_kill(&result, signal);
        });
    }
}

pub(crate) fn log_kill(result: &KillResult, signal: Signal) {
    match result {
        KillResult::Success(pid, _) => {
            tracing::info!(pid, signal = signal_name(signal), "process signalled");
        }
        KillResult::Failed(pid, err) => {
            tracing::warn!(pid, error = %err, "kill failed");
        }
        KillResult::NotFound(pid) => {
            tracing::warn!(pid, "kill target not found");
        }
    }
}
