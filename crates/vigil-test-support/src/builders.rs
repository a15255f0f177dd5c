//! Synthetic frame and landmark builders for testing.

use image::{DynamicImage, GrayImage, Luma};
use vigil_core::domain::{indices, FrameInfo, LandmarkSet, Point3, MESH_LANDMARK_COUNT};

/// Builder for creating synthetic test frames.
///
/// Provides convenience methods for generating frames with known edge
/// density characteristics.
pub struct SyntheticFrame;

impl SyntheticFrame {
    /// Creates a uniform frame (zero edge density).
    #[must_use]
    pub fn uniform(width: u32, height: u32, value: u8) -> FrameInfo {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        FrameInfo::new("synthetic://uniform", DynamicImage::ImageLuma8(img))
    }

    /// Creates alternating vertical bars (near-100% edge density for
    /// `bar_width = 1`).
    #[must_use]
    pub fn vertical_bars(width: u32, height: u32, bar_width: u32) -> FrameInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            if (x / bar_width.max(1)) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        FrameInfo::new("synthetic://vertical_bars", DynamicImage::ImageLuma8(img))
    }

    /// Creates a smooth horizontal gradient (adjacent deltas below the
    /// edge threshold).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn gradient(width: u32, height: u32) -> FrameInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Luma([val])
        });
        FrameInfo::new("synthetic://gradient", DynamicImage::ImageLuma8(img))
    }

    /// Creates a frame with a busy central region and a flat border.
    #[must_use]
    pub fn busy_center(width: u32, height: u32) -> FrameInfo {
        let (x0, x1) = (width / 4, width * 3 / 4);
        let (y0, y1) = (height / 4, height * 3 / 4);
        let img = GrayImage::from_fn(width, height, |x, y| {
            let central = (x0..x1).contains(&x) && (y0..y1).contains(&y);
            if central && x % 2 == 0 {
                Luma([255u8])
            } else if central {
                Luma([0u8])
            } else {
                Luma([128u8])
            }
        });
        FrameInfo::new("synthetic://busy_center", DynamicImage::ImageLuma8(img))
    }
}

/// Builder for landmark sets with exact feature values.
///
/// Produces a full 468-point FaceMesh-shaped set where the EAR and yaw
/// points are laid out so that feature extraction yields the requested
/// eye ratio and yaw deviation exactly.
#[derive(Debug, Clone)]
pub struct SyntheticFace {
    eye_ratio: f32,
    yaw_deviation: f32,
}

impl SyntheticFace {
    /// Creates a face with open eyes looking forward.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            eye_ratio: 0.3,
            yaw_deviation: 0.0,
        }
    }

    /// Sets the eye aspect ratio both eyes will produce.
    #[must_use]
    pub const fn with_eye_ratio(mut self, ratio: f32) -> Self {
        self.eye_ratio = ratio;
        self
    }

    /// Sets the yaw deviation the nose/cheek points will produce.
    ///
    /// Values are clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_yaw_deviation(mut self, deviation: f32) -> Self {
        self.yaw_deviation = deviation.clamp(0.0, 1.0);
        self
    }

    /// Builds the landmark set.
    #[must_use]
    pub fn build(&self) -> LandmarkSet {
        let mut points = vec![Point3::default(); MESH_LANDMARK_COUNT];

        // Eye points: horizontal span of 1, vertical spans equal to the
        // target ratio, so EAR = (r + r) / (2 * 1) = r.
        for (slot, eye) in [indices::LEFT_EYE, indices::RIGHT_EYE].iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let oy = slot as f32 * 2.0;
            points[eye[0]] = Point3::new(0.0, oy, 0.0); // p1
            points[eye[1]] = Point3::new(0.25, oy + self.eye_ratio, 0.0); // p2
            points[eye[2]] = Point3::new(0.75, oy + self.eye_ratio, 0.0); // p3
            points[eye[3]] = Point3::new(1.0, oy, 0.0); // p4
            points[eye[4]] = Point3::new(0.75, oy, 0.0); // p5
            points[eye[5]] = Point3::new(0.25, oy, 0.0); // p6
        }

        // Yaw: cheek vector along x; nose vector at an angle whose
        // cosine is 1 - deviation, so 1 - |cos| = deviation.
        let cos = 1.0 - self.yaw_deviation;
        let sin = (1.0 - cos * cos).max(0.0).sqrt();
        points[indices::NOSE_TOP] = Point3::new(0.5, 0.2, 0.0);
        points[indices::NOSE_BOTTOM] = Point3::new(0.5 + cos, 0.2 + sin, 0.0);
        points[indices::LEFT_CHEEK] = Point3::new(0.2, 0.5, 0.0);
        points[indices::RIGHT_CHEEK] = Point3::new(0.8, 0.5, 0.0);

        LandmarkSet::new(points)
    }

    /// Serializes the face as one JSONL trace line.
    #[must_use]
    pub fn to_trace_line(&self) -> String {
        let coords: Vec<String> = self
            .build()
            .iter()
            .map(|p| format!("[{},{},{}]", p.x, p.y, p.z))
            .collect();
        format!("{{\"landmarks\": [{}]}}", coords.join(","))
    }

    /// Returns the trace line for a tick with no detected face.
    #[must_use]
    pub fn no_face_line() -> String {
        String::from("{\"landmarks\": null}")
    }
}

impl Default for SyntheticFace {
    fn default() -> Self {
        Self::new()
    }
}
