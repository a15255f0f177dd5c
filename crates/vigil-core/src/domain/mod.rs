//! Core domain types for attention analysis.

mod frame;
mod landmarks;
mod report;
mod status;

pub use frame::FrameInfo;
pub use landmarks::{indices, LandmarkSet, Point3, MESH_LANDMARK_COUNT};
pub use report::{DetectionReport, MonitorReport, TickRecord};
pub use status::{AlertKind, FocusState};
