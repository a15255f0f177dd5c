//! Report output port for writing per-tick records.

use crate::domain::TickRecord;

/// Port for outputting tick records.
pub trait ReportOutput: Send + Sync {
    /// Writes a single tick record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, record: &TickRecord) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
