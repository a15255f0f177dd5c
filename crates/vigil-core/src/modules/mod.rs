//! Evaluator modules for the two analysis pipelines.

mod edge_density;
mod monitor;

pub use edge_density::{DetectorSession, EdgeDensityAnalysis, EdgeDensityConfig};
pub use monitor::{DistractionMonitor, FrameFeatures, MonitorConfig, TickOutcome};
