//! JSONL landmark-trace adapter.
//!
//! Replays recorded output of an external landmark detector. Each line
//! is one tick: `{"landmarks": [[x, y, z], ...]}` for a detected face,
//! or `{"landmarks": null}` for a no-face tick. Malformed lines are
//! per-item errors; downstream skips them with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use vigil_core::{LandmarkSet, LandmarkSource};

/// One line of a landmark trace.
#[derive(Debug, Deserialize)]
struct TraceLine {
    landmarks: Option<Vec<[f32; 3]>>,
}

/// Landmark source backed by a JSONL trace file.
pub struct JsonlLandmarkSource {
    path: PathBuf,
}

impl JsonlLandmarkSource {
    /// Creates a source reading the given trace file.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn open(&self) -> Result<BufReader<File>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open trace: {}", self.path.display()))?;
        Ok(BufReader::new(file))
    }
}

impl LandmarkSource for JsonlLandmarkSource {
    fn landmarks(&self) -> Box<dyn Iterator<Item = Result<Option<LandmarkSet>>> + Send + '_> {
        let reader = match self.open() {
            Ok(r) => r,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };

        debug!("Replaying landmark trace: {}", self.path.display());

        Box::new(
            reader
                .lines()
                .enumerate()
                .filter(|(_, line)| match line {
                    Ok(text) => !text.trim().is_empty(),
                    Err(_) => true,
                })
                .map(|(number, line)| {
                    let text = line.with_context(|| format!("Failed to read trace line {number}"))?;
                    parse_line(&text, number)
                }),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        let reader = self.open().ok()?;
        Some(
            reader
                .lines()
                .map_while(Result::ok)
                .filter(|l| !l.trim().is_empty())
                .count(),
        )
    }
}

/// Parses one trace line into an optional landmark set.
fn parse_line(text: &str, number: usize) -> Result<Option<LandmarkSet>> {
    let line: TraceLine = serde_json::from_str(text)
        .with_context(|| format!("Malformed trace line {number}"))?;

    Ok(line.landmarks.map(LandmarkSet::from_coords))
}
