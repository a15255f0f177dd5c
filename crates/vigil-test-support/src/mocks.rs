//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use vigil_core::domain::{FrameInfo, LandmarkSet, TickRecord};
use vigil_core::ports::{FrameSource, LandmarkSource, MonitorEvent, ReportOutput, StatusSink};

/// Mock implementation of `FrameSource` for testing.
///
/// Yields pre-built frames and tracks iteration for assertions.
pub struct MockFrameSource {
    frames: Vec<FrameInfo>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockFrameSource {
    /// Creates a new mock source with the given frames.
    #[must_use]
    pub fn new(frames: Vec<FrameInfo>) -> Self {
        Self {
            frames,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameSource for MockFrameSource {
    fn frames(&self) -> Box<dyn Iterator<Item = anyhow::Result<FrameInfo>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(self.frames.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.frames.len())
    }
}

/// Mock implementation of `LandmarkSource` for testing.
///
/// Yields a scripted sequence of ticks: `Some(set)` for a face,
/// `None` for a no-face tick.
pub struct MockLandmarkSource {
    ticks: Vec<Option<LandmarkSet>>,
}

impl MockLandmarkSource {
    /// Creates a new mock source with the given tick sequence.
    #[must_use]
    pub fn new(ticks: Vec<Option<LandmarkSet>>) -> Self {
        Self { ticks }
    }
}

impl LandmarkSource for MockLandmarkSource {
    fn landmarks(
        &self,
    ) -> Box<dyn Iterator<Item = anyhow::Result<Option<LandmarkSet>>> + Send + '_> {
        Box::new(self.ticks.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.ticks.len())
    }
}

/// Mock implementation of `ReportOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockReportOutput {
    records: Arc<Mutex<Vec<TickRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockReportOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<TickRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockReportOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportOutput for MockReportOutput {
    fn write(&self, record: &TickRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `StatusSink` for testing.
///
/// Captures events for later assertions.
pub struct MockStatusSink {
    events: Arc<Mutex<Vec<MonitorEvent>>>,
}

impl MockStatusSink {
    /// Creates a new mock status sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<MonitorEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Alert` events.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, MonitorEvent::Alert { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, MonitorEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events().iter().find_map(|e| match e {
            MonitorEvent::Finished {
                processed,
                skipped,
                alerts,
            } => Some((*processed, *skipped, *alerts)),
            _ => None,
        })
    }
}

impl Default for MockStatusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for MockStatusSink {
    fn on_event(&self, event: MonitorEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
