//! Landmark source port: synchronous pull over a landmark producer.
//!
//! The external landmark detector is a black box that yields zero or
//! one face per frame. This port replaces its callback style with a
//! pull the pipeline polls once per tick; `Ok(None)` means no face was
//! detected in that tick, which is a valid state rather than an error.

use crate::domain::LandmarkSet;

/// Port for pulling per-tick landmark sets.
pub trait LandmarkSource: Send + Sync {
    /// Returns an iterator over per-tick landmark results.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a tick fails to decode.
    fn landmarks(
        &self,
    ) -> Box<dyn Iterator<Item = anyhow::Result<Option<LandmarkSet>>> + Send + '_>;

    /// Returns the total number of ticks, if known.
    fn count_hint(&self) -> Option<usize>;
}
