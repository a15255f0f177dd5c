//! Landmark geometry primitives.
//!
//! Closed-form formulas over normalized 3D landmark points: Euclidean
//! distance, eye aspect ratio, and the nose/cheek yaw heuristic. All
//! functions are pure; degenerate inputs (zero-length denominators)
//! yield `None` so callers can skip the frame.

use crate::domain::Point3;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point3, b: Point3) -> f32 {
    magnitude(a - b)
}

/// Dot product of two vectors.
#[must_use]
pub fn dot(a: Point3, b: Point3) -> f32 {
    a.x.mul_add(b.x, a.y.mul_add(b.y, a.z * b.z))
}

/// Magnitude of a vector.
#[must_use]
pub fn magnitude(v: Point3) -> f32 {
    dot(v, v).sqrt()
}

/// Eye aspect ratio from six eye landmarks in EAR order.
///
/// `(dist(p2,p6) + dist(p3,p5)) / (2 · dist(p1,p4))` where p1/p4 span
/// the eye horizontally and p2/p6, p3/p5 span it vertically. Returns
/// `None` when the horizontal span is degenerate.
#[must_use]
pub fn eye_aspect_ratio(points: [Point3; 6]) -> Option<f32> {
    let [p1, p2, p3, p4, p5, p6] = points;
    let vertical1 = distance(p2, p6);
    let vertical2 = distance(p3, p5);
    let horizontal = distance(p1, p4);
    if horizontal <= f32::EPSILON {
        return None;
    }
    Some((vertical1 + vertical2) / (2.0 * horizontal))
}

/// Head yaw deviation from nose and cheek landmarks.
///
/// `1 − |dot(noseVec, cheekVec)| / (|noseVec|·|cheekVec|)`: zero when
/// the vectors are parallel, approaching one as they approach
/// perpendicular. Returns `None` when either vector has zero magnitude.
#[must_use]
pub fn yaw_deviation(
    nose_top: Point3,
    nose_bottom: Point3,
    left_cheek: Point3,
    right_cheek: Point3,
) -> Option<f32> {
    let nose = nose_bottom - nose_top;
    let cheek = right_cheek - left_cheek;
    let denominator = magnitude(nose) * magnitude(cheek);
    if denominator <= f32::EPSILON {
        return None;
    }
    Some(1.0 - (dot(nose, cheek) / denominator).abs())
}
