//! CLI command definitions and handlers.

pub mod detect;
pub mod monitor;

use clap::{Parser, Subcommand};

/// Vigil - Attention and presence analysis over recorded camera sessions
#[derive(Parser)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared detect arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub detect: detect::DetectArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run edge-density presence detection over recorded frames
    Detect(detect::DetectArgs),
    /// Replay a landmark trace through the distraction monitor
    Monitor(monitor::MonitorArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Run completed with nothing flagged.
    Success,
    /// Run completed with detections or alerts.
    Flagged,
    /// Run failed.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::Flagged => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}

/// Summary of one pipeline run.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct RunSummary {
    /// Number of ticks processed.
    pub processed: usize,
    /// Number of ticks skipped.
    pub skipped: usize,
    /// Number of flagged ticks (detections or alerts).
    pub flagged: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
pub fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            tracing::debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
