//! Status presentation port for UI integration.

use crate::domain::{AlertKind, TickRecord};

/// Events emitted while a pipeline runs, for status display.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// A tick is about to be evaluated.
    Started {
        /// Label for the tick (file path or tick index).
        label: String,
        /// Index in the session (0-based).
        index: usize,
        /// Total ticks in the session, if known.
        total: Option<usize>,
    },
    /// A tick was evaluated.
    Tick {
        /// The resulting record.
        record: TickRecord,
    },
    /// An alert fired.
    Alert {
        /// Kind of alert.
        kind: AlertKind,
        /// Session time of the alert in milliseconds.
        elapsed_ms: u64,
    },
    /// A tick was skipped.
    Skipped {
        /// Label for the tick.
        label: String,
        /// Reason for skipping.
        reason: String,
    },
    /// The session ended.
    Finished {
        /// Ticks evaluated successfully.
        processed: usize,
        /// Ticks skipped.
        skipped: usize,
        /// Alerts fired during the session.
        alerts: usize,
    },
}

/// Port for receiving status events.
pub trait StatusSink: Send + Sync {
    /// Called when a status event occurs.
    fn on_event(&self, event: MonitorEvent);
}
