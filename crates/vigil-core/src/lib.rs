//! Vigil Core - Domain logic for attention and presence analysis.
//!
//! This crate contains the core domain types, landmark geometry, the
//! edge-density presence detector, and the drowsiness/distraction
//! state machine.

pub mod domain;
pub mod geometry;
pub mod modules;
pub mod ports;

pub use domain::{
    AlertKind, DetectionReport, FocusState, FrameInfo, LandmarkSet, MonitorReport, Point3,
    TickRecord,
};
pub use modules::{
    DetectorSession, DistractionMonitor, EdgeDensityAnalysis, EdgeDensityConfig, FrameFeatures,
    MonitorConfig, TickOutcome,
};
pub use ports::{FrameSource, LandmarkSource, MonitorEvent, ReportOutput, StatusSink};
