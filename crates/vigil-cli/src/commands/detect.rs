//! Detect command - edge-density presence detection over recorded frames.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::{info, warn};
use vigil_adapters::FsFrameSource;
use vigil_core::{
    DetectionReport, DetectorSession, EdgeDensityConfig, FrameSource, MonitorEvent, ReportOutput,
    StatusSink, TickRecord,
};

use super::{iso_timestamp, ExitCode, RunSummary};
use crate::config::AppConfig;
use crate::output::{JsonOutput, StatusBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Hardcoded default values for thresholds.
mod defaults {
    pub const DIFF_THRESHOLD: f32 = 20.0;
    pub const DENSITY_THRESHOLD: f32 = 10.0;
}

/// Parse and validate a percentage threshold (0.0-100.0).
fn parse_percent(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=100.0"))
    }
}

/// Parse and validate a brightness delta (0.0-255.0).
fn parse_brightness(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=255.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=255.0"))
    }
}

/// Arguments for edge-density detection.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct DetectArgs {
    /// Frame files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Edge density percentage above which a frame counts as detected
    #[arg(long, value_parser = parse_percent)]
    pub density_threshold: Option<f32>,

    /// Brightness delta between adjacent pixels that counts as an edge
    #[arg(long, value_parser = parse_brightness)]
    pub diff_threshold: Option<f32>,

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

impl DetectArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Thresholds: CLI > config (accessor provides hardcoded fallback)
        args.density_threshold = args.density_threshold.or(config.detector.density_threshold);
        args.diff_threshold = args.diff_threshold.or(config.detector.diff_threshold);

        // Output format: CLI > config (accessor provides fallback)
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

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get density threshold with fallback to hardcoded default.
    fn density_threshold(&self) -> f32 {
        self.density_threshold
            .unwrap_or(defaults::DENSITY_THRESHOLD)
    }

    /// Get brightness-delta threshold with fallback to hardcoded default.
    fn diff_threshold(&self) -> f32 {
        self.diff_threshold.unwrap_or(defaults::DIFF_THRESHOLD)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Run the detect command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &DetectArgs) -> Result<RunSummary> {
    info!("Running detect command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let source = FsFrameSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let status = StatusBar::new(total.map(|t| t as u64), args.quiet, show_progress);
    let output = JsonOutput::stdout();

    let config = EdgeDensityConfig {
        diff_threshold: args.diff_threshold(),
        density_threshold: args.density_threshold(),
    };
    let mut session = DetectorSession::new(config);

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut flagged = 0usize;
    let mut all_records: Vec<TickRecord> = Vec::new();

    for (index, frame_result) in source.frames().enumerate() {
        let frame = match frame_result {
            Ok(frame) => frame,
            Err(e) => {
                // Note: error message contains the path via anyhow context
                status.on_event(MonitorEvent::Skipped {
                    label: format!("frame {index}"),
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        status.on_event(MonitorEvent::Started {
            label: frame.source.clone(),
            index,
            total,
        });

        let analysis = session.evaluate(&frame);
        if analysis.detected {
            flagged += 1;
        }

        let record = TickRecord::Detection(DetectionReport {
            source: frame.source,
            timestamp: iso_timestamp(),
            width: frame.width,
            height: frame.height,
            edge_density: analysis.edge_density,
            detected: analysis.detected,
            score: session.score(),
        });

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
        alerts: 0,
    });

    if skipped > 0 {
        warn!("{skipped} frame(s) skipped");
    }

    let exit_code = if flagged > 0 {
        ExitCode::Flagged
    } else {
        ExitCode::Success
    };

    Ok(RunSummary {
        processed,
        skipped,
        flagged,
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_bounds() {
        assert!(parse_percent("0").is_ok());
        assert!(parse_percent("100").is_ok());
        assert!(parse_percent("100.1").is_err());
        assert!(parse_percent("-1").is_err());
        assert!(parse_percent("ten").is_err());
    }

    #[test]
    fn test_parse_brightness_bounds() {
        assert!(parse_brightness("20").is_ok());
        assert!(parse_brightness("255").is_ok());
        assert!(parse_brightness("256").is_err());
    }
}
