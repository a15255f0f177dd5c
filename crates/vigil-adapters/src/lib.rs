//! Vigil Adapters - External adapters for vigil.
//!
//! This crate provides adapters for:
//! - Filesystem frame source (recorded camera frames as image files)
//! - JSONL landmark-trace source (recorded landmark detector output)

pub mod fs;
pub mod trace;

pub use fs::FsFrameSource;
pub use trace::JsonlLandmarkSource;
