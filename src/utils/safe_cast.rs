//! Checked float to integer conversions for pixel coordinates

use crate::{Error, Result};

/// Convert f64 to i32, truncating toward zero
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Clamp and convert f64 to i32, non-finite values map to `min`
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i32_clamp(value: f64, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    (value.clamp(f64::from(min), f64::from(max)) as i32).clamp(min, max)
}

/// Clamp an i32 coordinate into `[0, extent)` and narrow it to the X11 `i16`
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamped into i16 range first
pub fn i32_to_screen_i16(value: i32, extent: u32) -> i16 {
    let max = i32::try_from(extent.saturating_sub(1))
        .unwrap_or(i32::MAX)
        .min(i32::from(i16::MAX));
    value.clamp(0, max) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_f64_to_i32() {
        assert_eq!(f64_to_i32(42.9).unwrap(), 42);
        assert_eq!(f64_to_i32(-42.9).unwrap(), -42);
        assert_eq!(f64_to_i32(0.9999).unwrap(), 0);

        assert!(f64_to_i32(f64::INFINITY).is_err());
        assert!(f64_to_i32(f64::NAN).is_err());
        assert!(f64_to_i32(2147483648.0).is_err());
    }

    #[test]
    fn test_f64_to_i32_clamp() {
        assert_eq!(f64_to_i32_clamp(50.0, 0, 100), 50);
        assert_eq!(f64_to_i32_clamp(-10.0, 0, 100), 0);
        assert_eq!(f64_to_i32_clamp(150.0, 0, 100), 100);
        assert_eq!(f64_to_i32_clamp(f64::NAN, 0, 100), 0);
        assert_eq!(f64_to_i32_clamp(5.0, 100, 0), 5);
    }

    #[test]
    fn test_i32_to_screen_i16() {
        assert_eq!(i32_to_screen_i16(-5, 1920), 0);
        assert_eq!(i32_to_screen_i16(5000, 1920), 1919);
        assert_eq!(i32_to_screen_i16(100_000, 100_000), i16::MAX);
        assert_eq!(i32_to_screen_i16(10, 0), 0);
    }

    proptest! {
        #[test]
        fn prop_clamp_always_within_bounds(value in any::<f64>(), min in any::<i32>(), max in any::<i32>()) {
            let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
            let result = f64_to_i32_clamp(value, min, max);
            prop_assert!(result >= lo && result <= hi);
        }
    }
}
