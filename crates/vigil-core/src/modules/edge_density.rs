//! Edge-density presence detection module.
//!
//! A crude "face-like region" signal: the fraction of adjacent-pixel
//! brightness deltas in the central region of a frame that exceed a
//! fixed threshold. High edge density means structured content in
//! front of the camera.

#![allow(clippy::cast_precision_loss)]

use tracing::debug;

use crate::domain::FrameInfo;

/// Configuration for edge-density detection.
#[derive(Debug, Clone)]
pub struct EdgeDensityConfig {
    /// Brightness delta between adjacent pixels that counts as an edge
    /// (0-255 scale).
    pub diff_threshold: f32,
    /// Edge density in percent above which a frame is classified as
    /// detected.
    pub density_threshold: f32,
}

impl Default for EdgeDensityConfig {
    fn default() -> Self {
        Self {
            diff_threshold: 20.0,
            density_threshold: 10.0,
        }
    }
}

/// Edge-density analysis of a single frame (internal).
#[derive(Debug, Clone, Copy)]
pub struct EdgeDensityAnalysis {
    /// Number of adjacent-pixel pairs counted as edges.
    pub edge_count: u64,
    /// Number of pixels sampled.
    pub pixel_count: u64,
    /// Edge density in percent.
    pub edge_density: f32,
    /// Whether the density cleared the detection threshold.
    pub detected: bool,
}

impl EdgeDensityAnalysis {
    /// Analyzes the central region of a frame.
    ///
    /// Brightness is the mean of R, G and B per pixel. Pixels are
    /// scanned in raster order over the region; each pixel after the
    /// first is compared against its predecessor in scan order.
    #[must_use]
    pub fn analyze(frame: &FrameInfo, config: &EdgeDensityConfig) -> Self {
        let rgb = frame.to_rgb8();
        let (width, height) = rgb.dimensions();

        // Sample the central half of the frame, as a webcam subject
        // tends to fill the middle of the picture.
        let x0 = width / 4;
        let y0 = height / 4;
        let region_w = (width / 2).max(1).min(width - x0);
        let region_h = (height / 2).max(1).min(height - y0);

        let mut edge_count = 0u64;
        let mut pixel_count = 0u64;
        let mut previous: Option<f32> = None;

        for y in y0..y0 + region_h {
            for x in x0..x0 + region_w {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                let brightness =
                    (f32::from(r) + f32::from(g) + f32::from(b)) / 3.0;
                if let Some(prev) = previous {
                    if (brightness - prev).abs() > config.diff_threshold {
                        edge_count += 1;
                    }
                }
                previous = Some(brightness);
                pixel_count += 1;
            }
        }

        let edge_density = if pixel_count == 0 {
            0.0
        } else {
            edge_count as f32 / pixel_count as f32 * 100.0
        };
        let detected = edge_density > config.density_threshold;

        debug!(
            "{}: edge_density={edge_density:.2}% ({edge_count}/{pixel_count}), detected={detected}",
            frame.source
        );

        Self {
            edge_count,
            pixel_count,
            edge_density,
            detected,
        }
    }
}

/// Running state of one detection session.
///
/// The analysis itself is pure; the session owns the score counter
/// that increments on each positive classification.
#[derive(Debug, Default)]
pub struct DetectorSession {
    config: EdgeDensityConfig,
    score: u64,
}

impl DetectorSession {
    /// Creates a session with the given configuration.
    #[must_use]
    pub const fn new(config: EdgeDensityConfig) -> Self {
        Self { config, score: 0 }
    }

    /// Returns the running detection score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Evaluates one frame, bumping the score on a positive
    /// classification.
    pub fn evaluate(&mut self, frame: &FrameInfo) -> EdgeDensityAnalysis {
        let analysis = EdgeDensityAnalysis::analyze(frame, &self.config);
        if analysis.detected {
            self.score += 1;
        }
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    fn frame_from_luma(img: GrayImage) -> FrameInfo {
        FrameInfo::new("test", DynamicImage::ImageLuma8(img))
    }

    #[test]
    fn test_default_config() {
        let config = EdgeDensityConfig::default();
        assert!((config.diff_threshold - 20.0).abs() < f32::EPSILON);
        assert!((config.density_threshold - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_uniform_frame_has_zero_density() {
        let img = GrayImage::from_fn(64, 64, |_, _| Luma([128u8]));
        let analysis =
            EdgeDensityAnalysis::analyze(&frame_from_luma(img), &EdgeDensityConfig::default());

        assert_eq!(analysis.edge_count, 0);
        assert!(analysis.edge_density.abs() < f32::EPSILON);
        assert!(!analysis.detected);
    }

    #[test]
    fn test_alternating_frame_is_detected() {
        // Columns alternate 0/255: every pair in scan order is an
        // edge, so density approaches 100%.
        let img = GrayImage::from_fn(64, 64, |x, _| {
            if x % 2 == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let analysis =
            EdgeDensityAnalysis::analyze(&frame_from_luma(img), &EdgeDensityConfig::default());

        assert!(
            analysis.edge_density > 99.0,
            "expected near-100%, got {}",
            analysis.edge_density
        );
        assert!(analysis.detected);
    }

    #[test]
    fn test_delta_at_threshold_is_not_an_edge() {
        // Alternating 100/120: delta is exactly 20, strictly-greater
        // comparison must not count it.
        let img = GrayImage::from_fn(64, 64, |x, _| {
            if x % 2 == 0 {
                Luma([100u8])
            } else {
                Luma([120u8])
            }
        });
        let analysis =
            EdgeDensityAnalysis::analyze(&frame_from_luma(img), &EdgeDensityConfig::default());
        assert_eq!(analysis.edge_count, 0);
    }

    #[test]
    fn test_samples_only_central_region() {
        // Busy border, flat center: the detector must not see the border.
        let img = GrayImage::from_fn(64, 64, |x, y| {
            let central = (16..48).contains(&x) && (16..48).contains(&y);
            if central {
                Luma([128u8])
            } else if (x + y) % 2 == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let analysis =
            EdgeDensityAnalysis::analyze(&frame_from_luma(img), &EdgeDensityConfig::default());

        assert_eq!(analysis.pixel_count, 32 * 32);
        assert_eq!(analysis.edge_count, 0);
        assert!(!analysis.detected);
    }

    #[test]
    fn test_tiny_frame_does_not_panic() {
        let img = GrayImage::from_fn(1, 1, |_, _| Luma([7u8]));
        let analysis =
            EdgeDensityAnalysis::analyze(&frame_from_luma(img), &EdgeDensityConfig::default());
        assert!(!analysis.detected);
        assert_eq!(analysis.pixel_count, 1);
    }

    #[test]
    fn test_session_score_increments_on_detection_only() {
        let mut session = DetectorSession::new(EdgeDensityConfig::default());

        let flat = GrayImage::from_fn(64, 64, |_, _| Luma([50u8]));
        let busy = GrayImage::from_fn(64, 64, |x, y| {
            if (x + y) % 2 == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });

        session.evaluate(&frame_from_luma(flat.clone()));
        assert_eq!(session.score(), 0);

        session.evaluate(&frame_from_luma(busy));
        assert_eq!(session.score(), 1);

        session.evaluate(&frame_from_luma(flat));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_custom_density_threshold() {
        let img = GrayImage::from_fn(64, 64, |x, y| {
            if (x + y) % 2 == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let config = EdgeDensityConfig {
            density_threshold: 100.0,
            ..Default::default()
        };
        // Density can approach but never exceed 100.
        let analysis = EdgeDensityAnalysis::analyze(&frame_from_luma(img), &config);
        assert!(!analysis.detected);
    }
}
