//! Coordinate conversion helpers.

pub mod safe_cast;

use crate::{landmarks::LandmarkPoint, Result};
use safe_cast::{f64_to_i32, f64_to_i32_clamp};

/// Scale a normalized point onto a `width` x `height` pixel grid, truncating
/// toward zero.
///
/// # Errors
///
/// Returns an error if either scaled coordinate is not representable as `i32`
pub fn scale_to_pixels(point: LandmarkPoint, width: u32, height: u32) -> Result<(i32, i32)> {
    let x = f64_to_i32(point.x * f64::from(width))?;
    let y = f64_to_i32(point.y * f64::from(height))?;
    Ok((x, y))
}

/// Like [`scale_to_pixels`] but clamps into the grid, for drawing
#[must_use]
pub fn clamp_to_pixels(point: LandmarkPoint, width: i32, height: i32) -> (i32, i32) {
    let x = f64_to_i32_clamp(point.x * f64::from(width), 0, (width - 1).max(0));
    let y = f64_to_i32_clamp(point.y * f64::from(height), 0, (height - 1).max(0));
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_truncates_toward_zero() {
        let (x, y) = scale_to_pixels(LandmarkPoint::new(0.4999, 0.75), 1000, 800).unwrap();
        assert_eq!((x, y), (499, 600));
    }

    #[test]
    fn test_scale_rejects_non_finite() {
        assert!(scale_to_pixels(LandmarkPoint::new(f64::NAN, 0.5), 1920, 1080).is_err());
    }

    #[test]
    fn test_clamp_keeps_points_on_canvas() {
        assert_eq!(clamp_to_pixels(LandmarkPoint::new(1.2, -0.1), 640, 480), (639, 0));
        assert_eq!(clamp_to_pixels(LandmarkPoint::new(0.5, 0.5), 640, 480), (320, 240));
    }
}
