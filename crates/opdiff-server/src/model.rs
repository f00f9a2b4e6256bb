use serde::{Deserialize, Serialize};

use opdiff_engine::{Ack, ComparisonReport, DifferenceRun};

/// Body of `POST /v1/diff/{id}/left` and `/right`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiffRequest {
    /// Base64-encoded operand. A missing field reads as empty.
    #[serde(default)]
    pub payload: String,
}

/// Body of every diff endpoint response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<DifferenceRun>,
}

impl DiffResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            differences: Vec::new(),
        }
    }
}

impl From<Ack> for DiffResponse {
    fn from(ack: Ack) -> Self {
        Self::message(ack.message())
    }
}

impl From<ComparisonReport> for DiffResponse {
    fn from(report: ComparisonReport) -> Self {
        Self {
            message: report.message().to_string(),
            differences: report.outcome.into_runs(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
