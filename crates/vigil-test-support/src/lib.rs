//! Test support utilities for vigil.
//!
//! Provides mocks, synthetic frame and landmark builders, and
//! utilities for testing the analysis pipelines.
//!
//! # Example
//!
//! ```
//! use vigil_test_support::{MockFrameSource, SyntheticFrame, SyntheticFace};
//!
//! // Create synthetic test frames
//! let busy = SyntheticFrame::vertical_bars(128, 128, 1);
//! let flat = SyntheticFrame::uniform(128, 128, 128);
//! let source = MockFrameSource::new(vec![busy, flat]);
//!
//! // Create a landmark set with known features
//! let face = SyntheticFace::new().with_eye_ratio(0.1).build();
//! ```

mod builders;
mod mocks;

pub use builders::{SyntheticFace, SyntheticFrame};
pub use mocks::{MockFrameSource, MockLandmarkSource, MockReportOutput, MockStatusSink};
