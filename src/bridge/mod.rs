//! The capability the dashboard polls and sends commands through.

pub mod json_file;
pub mod local;

use std::future::Future;

use thiserror::Error;

use crate::system::snapshot::Snapshot;

pub use json_file::JsonFileBackend;
pub use local::SysinfoBackend;

pub trait MetricsBackend: Send + Sync + 'static {
    /// Resolves once with the latest snapshot, or `None` when nothing usable
    /// is available yet.
    fn fetch_snapshot(&self) -> impl Future<Output = Option<Snapshot>> + Send;

    /// Fire and forget; the outcome is never reported back to the caller.
    fn kill_process(&self, pid: u32);
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to read snapshot source {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot source {path} is not a valid snapshot document: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("sampling task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("collector lock poisoned")]
    Poisoned,
}
