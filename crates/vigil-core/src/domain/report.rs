//! Per-tick report types emitted by the analysis pipelines.

use serde::{Deserialize, Serialize};

use super::{AlertKind, FocusState};

/// Report for one edge-density detection tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Source of the analyzed frame (file path or source tag).
    pub source: String,
    /// Timestamp of analysis (RFC 3339).
    pub timestamp: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Edge density of the sampled region, in percent.
    pub edge_density: f32,
    /// Whether a face-like region was detected.
    pub detected: bool,
    /// Running count of positive detections in this session.
    pub score: u64,
}

/// Report for one distraction-monitor tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorReport {
    /// Zero-based tick index within the replayed trace.
    pub tick: usize,
    /// Timestamp of analysis (RFC 3339).
    pub timestamp: String,
    /// Session time of this tick in milliseconds.
    pub elapsed_ms: u64,
    /// Whether a face was present in this tick.
    pub face_detected: bool,
    /// Surfaced focus state after this tick.
    pub state: FocusState,
    /// Averaged eye aspect ratio, when a face was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_ratio: Option<f32>,
    /// Head yaw deviation, when a face was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaw_deviation: Option<f32>,
    /// Alert fired on this tick, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertKind>,
}

/// A single output record from either pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickRecord {
    /// Edge-density detection tick.
    Detection(DetectionReport),
    /// Distraction-monitor tick.
    Monitor(MonitorReport),
}

impl TickRecord {
    /// Returns true when this tick is noteworthy: a positive detection
    /// or a fired alert.
    #[must_use]
    pub const fn is_flagged(&self) -> bool {
        match self {
            Self::Detection(report) => report.detected,
            Self::Monitor(report) => report.alert.is_some(),
        }
    }
}
