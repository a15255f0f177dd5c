//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod frame_source;
mod landmark_source;
mod report_output;
mod status;

pub use frame_source::FrameSource;
pub use landmark_source::LandmarkSource;
pub use report_output::ReportOutput;
pub use status::{MonitorEvent, StatusSink};
