//! Frame data produced by a frame source.

/// A single decoded camera frame.
///
/// Ephemeral: produced once per sampling tick and owned by the
/// evaluator for the duration of one evaluation.
#[derive(Debug, Clone)]
pub struct FrameInfo {
    /// Label identifying where the frame came from (file path or source tag).
    pub source: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Decoded pixel data.
    pub image: image::DynamicImage,
}

impl FrameInfo {
    /// Creates frame info from a decoded image.
    #[must_use]
    pub fn new(source: impl Into<String>, image: image::DynamicImage) -> Self {
        let width = image.width();
        let height = image.height();
        Self {
            source: source.into(),
            width,
            height,
            image,
        }
    }

    /// Returns the frame as 8-bit RGB.
    #[must_use]
    pub fn to_rgb8(&self) -> image::RgbImage {
        self.image.to_rgb8()
    }
}
