//! Geometry helpers over normalized landmark coordinates.

use crate::{constants::DISTANCE_SCALE, landmarks::LandmarkPoint};

/// Angle at vertex `b` between the arms towards `a` and `c`, in degrees.
///
/// Computed as the absolute difference of the two polar angles, so the
/// result lies in `[0, 360)` and is not folded back into `[0, 180]`.
#[must_use]
pub fn angle(a: LandmarkPoint, b: LandmarkPoint, c: LandmarkPoint) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    radians.to_degrees().abs()
}

/// Euclidean distance between the first two points, rescaled from `[0, 1]`
/// onto `[0, DISTANCE_SCALE]`.
///
/// Returns `None` when fewer than two points are given.
#[must_use]
pub fn distance(points: &[LandmarkPoint]) -> Option<f64> {
    let [p1, p2, ..] = points else {
        return None;
    };
    let length = (p2.x - p1.x).hypot(p2.y - p1.y);
    Some(interp(length, (0.0, 1.0), (0.0, DISTANCE_SCALE)))
}

/// Linear map of `value` from one interval onto another.
///
/// Values outside the source interval extrapolate along the same line.
#[must_use]
pub fn interp(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let (from_lo, from_hi) = from;
    let (to_lo, to_hi) = to;
    to_lo + (value - from_lo) * (to_hi - to_lo) / (from_hi - from_lo)
}
