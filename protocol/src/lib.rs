//! Records the game host hands to its external consumer (the chat bot).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot of a round sent once the player asks to share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub seed: String,
    /// Mine count of the round
    pub bombs: u16,
    pub stake: f64,
    pub opened_safe: u16,
    /// Balance at the time of sending
    pub balance: f64,
    /// Milliseconds since the Unix epoch
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    Result(RoundReport),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("malformed host message: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostMessage {
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(data)?)
    }
}

impl From<RoundReport> for HostMessage {
    fn from(report: RoundReport) -> Self {
        Self::Result(report)
    }
}
