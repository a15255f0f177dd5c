//! Configuration file support for vigil.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/vigil/config.toml` (lowest priority)
//! - Project-local: `.vigil.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Edge-density detector settings.
    pub detector: DetectorConfig,
    /// Distraction monitor settings.
    pub monitor: MonitorConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Edge-density detector configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Adjacent-pixel brightness delta that counts as an edge (0-255).
    pub diff_threshold: Option<f32>,
    /// Edge density percentage above which a frame is detected (0-100).
    pub density_threshold: Option<f32>,
}

/// Distraction monitor configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Eye aspect ratio below which eyes count as closed (0.0-1.0).
    pub closure_threshold: Option<f32>,
    /// Yaw deviation above which the head counts as turned (0.0-1.0).
    pub side_view_threshold: Option<f32>,
    /// Blink debounce window in milliseconds.
    pub blink_ms: Option<u64>,
    /// Alert cooldown in milliseconds.
    pub cooldown_ms: Option<u64>,
    /// Tick interval of the replayed trace in milliseconds.
    pub tick_ms: Option<u64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/vigil/config.toml`
    /// 2. Project-local: `.vigil.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.detector.diff_threshold {
            if !(0.0..=255.0).contains(&t) {
                return Err(format!("detector.diff_threshold must be 0-255, got {t}"));
            }
        }
        if let Some(t) = self.detector.density_threshold {
            if !(0.0..=100.0).contains(&t) {
                return Err(format!("detector.density_threshold must be 0-100, got {t}"));
            }
        }
        if let Some(t) = self.monitor.closure_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("monitor.closure_threshold must be 0.0-1.0, got {t}"));
            }
        }
        if let Some(t) = self.monitor.side_view_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!(
                    "monitor.side_view_threshold must be 0.0-1.0, got {t}"
                ));
            }
        }
        if let Some(ms) = self.monitor.tick_ms {
            if ms == 0 {
                return Err(String::from("monitor.tick_ms must be positive"));
            }
        }

        // Output format validation
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Detector
        self.detector.diff_threshold = other
            .detector
            .diff_threshold
            .or(self.detector.diff_threshold);
        self.detector.density_threshold = other
            .detector
            .density_threshold
            .or(self.detector.density_threshold);

        // Monitor
        self.monitor.closure_threshold = other
            .monitor
            .closure_threshold
            .or(self.monitor.closure_threshold);
        self.monitor.side_view_threshold = other
            .monitor
            .side_view_threshold
            .or(self.monitor.side_view_threshold);
        self.monitor.blink_ms = other.monitor.blink_ms.or(self.monitor.blink_ms);
        self.monitor.cooldown_ms = other.monitor.cooldown_ms.or(self.monitor.cooldown_ms);
        self.monitor.tick_ms = other.monitor.tick_ms.or(self.monitor.tick_ms);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vigil").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.vigil.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".vigil.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
