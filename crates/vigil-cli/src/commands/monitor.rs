//! Monitor command - replay a landmark trace through the distraction
//! state machine.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info, warn};
use vigil_adapters::JsonlLandmarkSource;
use vigil_core::{
    DistractionMonitor, FrameFeatures, LandmarkSource, MonitorConfig, MonitorEvent, MonitorReport,
    ReportOutput, StatusSink, TickRecord,
};

use super::detect::OutputFormat;
use super::{iso_timestamp, ExitCode, RunSummary};
use crate::config::AppConfig;
use crate::output::{JsonOutput, StatusBar};

/// Hardcoded default values for monitor parameters.
mod defaults {
    pub const CLOSURE_THRESHOLD: f32 = 0.15;
    pub const SIDE_VIEW_THRESHOLD: f32 = 0.6;
    pub const BLINK_MS: u64 = 300;
    pub const COOLDOWN_MS: u64 = 3000;
    pub const TICK_MS: u64 = 100;
}

/// Parse and validate a ratio threshold (0.0-1.0).
fn parse_ratio(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse a positive millisecond count.
fn parse_positive_ms(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid millisecond count"))?;
    if value == 0 {
        Err(String::from("must be positive"))
    } else {
        Ok(value)
    }
}

/// Arguments for trace monitoring.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct MonitorArgs {
    /// Landmark trace file (JSONL, one tick per line)
    pub trace: PathBuf,

    /// Tick interval of the recorded trace in milliseconds
    #[arg(long, value_parser = parse_positive_ms)]
    pub tick_ms: Option<u64>,

    /// Eye aspect ratio below which eyes count as closed (0.0-1.0)
    #[arg(long, value_parser = parse_ratio)]
    pub closure_threshold: Option<f32>,

    /// Yaw deviation above which the head counts as turned (0.0-1.0)
    #[arg(long, value_parser = parse_ratio)]
    pub side_view_threshold: Option<f32>,

    /// Blink debounce window in milliseconds
    #[arg(long, value_parser = parse_positive_ms)]
    pub blink_ms: Option<u64>,

    /// Alert cooldown in milliseconds
    #[arg(long, value_parser = parse_positive_ms)]
    pub cooldown_ms: Option<u64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl MonitorArgs {
    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.tick_ms = args.tick_ms.or(config.monitor.tick_ms);
        args.closure_threshold = args.closure_threshold.or(config.monitor.closure_threshold);
        args.side_view_threshold = args
            .side_view_threshold
            .or(config.monitor.side_view_threshold);
        args.blink_ms = args.blink_ms.or(config.monitor.blink_ms);
        args.cooldown_ms = args.cooldown_ms.or(config.monitor.cooldown_ms);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get the trace tick interval with fallback to the default.
    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.unwrap_or(defaults::TICK_MS))
    }

    /// Build the monitor configuration from merged args.
    fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            closure_threshold: self
                .closure_threshold
                .unwrap_or(defaults::CLOSURE_THRESHOLD),
            side_view_threshold: self
                .side_view_threshold
                .unwrap_or(defaults::SIDE_VIEW_THRESHOLD),
            blink_duration: Duration::from_millis(self.blink_ms.unwrap_or(defaults::BLINK_MS)),
            alert_cooldown: Duration::from_millis(
                self.cooldown_ms.unwrap_or(defaults::COOLDOWN_MS),
            ),
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Run the monitor command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &MonitorArgs) -> Result<RunSummary> {
    info!("Replaying landmark trace: {}", args.trace.display());

    if !args.trace.is_file() {
        anyhow::bail!("Failed to open trace: {}", args.trace.display());
    }

    let source = JsonlLandmarkSource::new(&args.trace);
    let total = source.count_hint();
    let tick_interval = args.tick_interval();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let status = StatusBar::new(total.map(|t| t as u64), args.quiet, show_progress);
    let output = JsonOutput::stdout();

    let mut monitor = DistractionMonitor::new(args.monitor_config());

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut alerts = 0usize;
    let mut all_records: Vec<TickRecord> = Vec::new();

    for (index, tick_result) in source.landmarks().enumerate() {
        let now = tick_interval * u32::try_from(index).unwrap_or(u32::MAX);

        status.on_event(MonitorEvent::Started {
            label: format!("tick {index}"),
            index,
            total,
        });

        let landmarks = match tick_result {
            Ok(l) => l,
            Err(e) => {
                status.on_event(MonitorEvent::Skipped {
                    label: format!("tick {index}"),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        // Absence of a face is a valid no-detection tick: the machine
        // is left untouched.
        let report = match landmarks {
            None => {
                debug!("tick {index}: no face");
                MonitorReport {
                    tick: index,
                    timestamp: iso_timestamp(),
                    elapsed_ms: u64::try_from(now.as_millis()).unwrap_or(u64::MAX),
                    face_detected: false,
                    state: monitor.state().surfaced(),
                    eye_ratio: None,
                    yaw_deviation: None,
                    alert: None,
                }
            }
            Some(set) => {
                let Some(features) = FrameFeatures::from_landmarks(&set) else {
                    // Degenerate geometry: skip the frame, never a failure.
                    status.on_event(MonitorEvent::Skipped {
                        label: format!("tick {index}"),
                        reason: String::from("degenerate landmark geometry"),
                    });
                    skipped += 1;
                    continue;
                };

                let outcome = monitor.tick(features, now);
                let elapsed_ms = u64::try_from(now.as_millis()).unwrap_or(u64::MAX);

                if let Some(kind) = outcome.alert {
                    alerts += 1;
                    status.on_event(MonitorEvent::Alert { kind, elapsed_ms });
                }

                MonitorReport {
                    tick: index,
                    timestamp: iso_timestamp(),
                    elapsed_ms,
                    face_detected: true,
                    state: outcome.state.surfaced(),
                    eye_ratio: Some(features.eye_ratio),
                    yaw_deviation: Some(features.yaw_deviation),
                    alert: outcome.alert,
                }
            }
        };

        let record = TickRecord::Monitor(report);
        status.on_event(MonitorEvent::Tick {
            record: record.clone(),
        });

        match args.format() {
            OutputFormat::Jsonl => output.write(&record)?,
            OutputFormat::Json => all_records.push(record),
        }

        processed += 1;
    }

    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_records, args.pretty)?;
    }
    output.flush()?;

    status.on_event(MonitorEvent::Finished {
        processed,
        skipped,
        alerts,
    });

    if skipped > 0 {
        warn!("{skipped} tick(s) skipped");
    }

    let exit_code = if alerts > 0 {
        ExitCode::Flagged
    } else {
        ExitCode::Success
    };

    Ok(RunSummary {
        processed,
        skipped,
        flagged: alerts,
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio_bounds() {
        assert!(parse_ratio("0.0").is_ok());
        assert!(parse_ratio("1.0").is_ok());
        assert!(parse_ratio("1.5").is_err());
        assert!(parse_ratio("-0.1").is_err());
        assert!(parse_ratio("high").is_err());
    }

    #[test]
    fn test_parse_positive_ms() {
        assert!(parse_positive_ms("100").is_ok());
        assert!(parse_positive_ms("0").is_err());
        assert!(parse_positive_ms("-5").is_err());
        assert!(parse_positive_ms("soon").is_err());
    }
}
