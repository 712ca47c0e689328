use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One process entry as reported by the bridge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu: f64,
    pub mem: f64,
}

/// One poll's worth of metrics, as delivered over the bridge.
///
/// `cpu` and `mem` are optional so that a partially populated document from a
/// host that has not finished warming up can still be decoded; such a
/// snapshot is rejected by [`Snapshot::validate`] instead of failing to parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub mem: Option<f64>,
    #[serde(default)]
    pub uptime: Option<String>,
    #[serde(default)]
    pub processes: Vec<ProcessInfo>,
}

/// A snapshot that carries both required percentages.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub cpu: f64,
    pub mem: f64,
    pub uptime: Option<String>,
    pub processes: Vec<ProcessInfo>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot is missing the `{0}` field")]
    MissingField(&'static str),
}

impl Snapshot {
    pub fn validate(self) -> Result<Reading, SnapshotError> {
        let cpu = self.cpu.ok_or(SnapshotError::MissingField("cpu"))?;
        let mem = self.mem.ok_or(SnapshotError::MissingField("mem"))?;
        Ok(Reading {
            cpu,
            mem,
            uptime: self.uptime,
            processes: self.processes,
        })
    }
}
