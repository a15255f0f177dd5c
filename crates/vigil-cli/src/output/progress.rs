//! Status presentation adapter using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use vigil_core::{MonitorEvent, StatusSink, TickRecord};

/// Status bar adapter for CLI output.
///
/// Alert lines always go to stderr (unless quiet); the bar itself is
/// optional.
pub struct StatusBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl StatusBar {
    /// Creates a new status bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of ticks, if known
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise show per-tick status
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
            };
        }

        let bar = if show_bar {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);

            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }

            Some(bar)
        } else {
            None
        };

        Self { bar, quiet }
    }
}

impl StatusSink for StatusBar {
    fn on_event(&self, event: MonitorEvent) {
        if self.quiet {
            return;
        }

        match event {
            MonitorEvent::Started {
                label,
                index,
                total,
            } => {
                if let Some(bar) = &self.bar {
                    if let Some(t) = total {
                        bar.set_length(t as u64);
                    }
                    bar.set_position(index as u64);
                    bar.set_message(label);
                }
            }
            MonitorEvent::Tick { record } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                } else if let TickRecord::Detection(report) = &record {
                    if report.detected {
                        eprintln!(
                            "{}: detected (edge density {:.1}%)",
                            report.source, report.edge_density
                        );
                    }
                }
            }
            MonitorEvent::Alert { kind, elapsed_ms } => {
                if let Some(bar) = &self.bar {
                    bar.suspend(|| eprintln!("ALERT [{elapsed_ms}ms]: {}", kind.message()));
                } else {
                    eprintln!("ALERT [{elapsed_ms}ms]: {}", kind.message());
                }
            }
            MonitorEvent::Skipped { label, reason } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
                eprintln!("WARN: Skipping {label}: {reason}");
            }
            MonitorEvent::Finished {
                processed,
                skipped,
                alerts,
            } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!(
                        "Done: {processed} processed, {skipped} skipped, {alerts} alert(s)"
                    ));
                }
            }
        }
    }
}
