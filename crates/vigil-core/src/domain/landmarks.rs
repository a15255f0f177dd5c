//! Face landmark points as produced by an external landmark detector.

/// Number of points in a full FaceMesh landmark set.
pub const MESH_LANDMARK_COUNT: usize = 468;

/// Well-known landmark indices (MediaPipe FaceMesh layout).
pub mod indices {
    /// Left eye points in EAR order p1..p6: verticals (p2,p6) and
    /// (p3,p5), horizontal (p1,p4).
    pub const LEFT_EYE: [usize; 6] = [159, 145, 33, 133, 160, 144];
    /// Right eye points in EAR order.
    pub const RIGHT_EYE: [usize; 6] = [386, 374, 362, 263, 387, 373];

    /// Top of the nose bridge.
    pub const NOSE_TOP: usize = 6;
    /// Tip of the nose.
    pub const NOSE_BOTTOM: usize = 4;
    /// Left cheek edge.
    pub const LEFT_CHEEK: usize = 234;
    /// Right cheek edge.
    pub const RIGHT_CHEEK: usize = 454;
}

/// A 3D point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl std::ops::Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// An ordered sequence of landmark points for one detected face.
///
/// Read-only to this system; produced externally once per frame.
#[derive(Debug, Clone, Default)]
pub struct LandmarkSet {
    points: Vec<Point3>,
}

impl LandmarkSet {
    /// Creates a landmark set from an ordered point sequence.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Creates a landmark set from raw `[x, y, z]` coordinate triples.
    #[must_use]
    pub fn from_coords(coords: impl IntoIterator<Item = [f32; 3]>) -> Self {
        Self {
            points: coords
                .into_iter()
                .map(|[x, y, z]| Point3::new(x, y, z))
                .collect(),
        }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point at the given mesh index, if present.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied()
    }

    /// Returns the six named points of one eye, if all are present.
    #[must_use]
    pub fn eye_points(&self, eye: [usize; 6]) -> Option<[Point3; 6]> {
        Some([
            self.point(eye[0])?,
            self.point(eye[1])?,
            self.point(eye[2])?,
            self.point(eye[3])?,
            self.point(eye[4])?,
            self.point(eye[5])?,
        ])
    }

    /// Iterates over all points in mesh order.
    pub fn iter(&self) -> impl Iterator<Item = Point3> + '_ {
        self.points.iter().copied()
    }
}
