use std::future::Future;
use std::path::{Path, PathBuf};

use sysinfo::{Signal, System};

use super::local::log_kill;
use super::{BridgeError, MetricsBackend};
use crate::system::kill::kill_pid;
use crate::system::snapshot::Snapshot;

/// Reads snapshots that a host process publishes as a JSON document.
///
/// The host rewrites the file on its own schedule; every fetch reads the
/// latest contents. Kill commands are delivered to the local process table.
pub struct JsonFileBackend {
    path: PathBuf,
    signal: Signal,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>, signal: Signal) -> Self {
        Self {
            path: path.into(),
            signal,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Snapshot, BridgeError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_snapshot(&path)).await?
    }
}

pub fn read_snapshot(path: &Path) -> Result<Snapshot, BridgeError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BridgeError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| BridgeError::Decode {
        path: path.display().to_string(),
        source,
    })
}

impl MetricsBackend for JsonFileBackend {
    fn fetch_snapshot(&self) -> impl Future<Output = Option<Snapshot>> + Send {
        async move {
            match self.load().await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::warn!(error = %e, "snapshot source unavailable");
                    None
                }
            }
        }
    }

    fn kill_process(&self, pid: u32) {
        let signal = self.signal;
        tokio::task::spawn_blocking(move || {
            let mut sys = System::new();
            let result = kill_pid(&mut sys, pid, signal);
            log_kill(&result, signal);
        });
    }
}
