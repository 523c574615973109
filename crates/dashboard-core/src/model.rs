//! Payload types carried by the dashboard streams.

use serde::{Deserialize, Serialize};

/// Snapshot of the mainnet as reported by the benchmarker master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainnetInfo {
    pub block_height: u64,
    #[serde(default)]
    pub algorithms: Vec<AlgorithmInfo>,
}

/// One algorithm listed on mainnet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmInfo {
    pub id: String,
    pub name: String,
    pub challenge_id: String,
    pub player_id: String,
    #[serde(default)]
    pub round_pushed: Option<u32>,
    #[serde(default)]
    pub adoption: Option<f64>,
    #[serde(default)]
    pub merge_points: Option<u32>,
}

/// Connection status of a benchmarker slave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaveStatus {
    Online,
    Busy,
    /// Anything the master reports that we do not recognise.
    #[serde(other)]
    Offline,
}

impl SlaveStatus {
    pub fn label(self) -> &'static str {
        match self {
            SlaveStatus::Online => "online",
            SlaveStatus::Busy => "busy",
            SlaveStatus::Offline => "offline",
        }
    }
}

/// Per-slave statistics shown by the slave monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaveInfo {
    pub name: String,
    #[serde(default)]
    pub ip: Option<String>,
    pub status: SlaveStatus,
    #[serde(default)]
    pub num_solutions: u64,
    #[serde(default)]
    pub num_benchmarks: u64,
    /// Unix timestamp in milliseconds.
    #[serde(default)]
    pub last_seen: Option<u64>,
}

pub type SlaveStats = Vec<SlaveInfo>;
