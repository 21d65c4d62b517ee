//! Checked conversions between landmark floats, pixel coordinates and image dimensions

use crate::{Error, Result};

/// Convert an image dimension to a signed pixel coordinate
///
/// # Errors
///
/// Returns an error if the value exceeds i32::MAX
pub fn u32_to_i32(value: u32) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Dimension {value} too large to fit in i32")))
}

/// Convert a pixel coordinate to an unsigned image index
///
/// # Errors
///
/// Returns an error if the value is negative
pub fn i32_to_u32(value: i32) -> Result<u32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Coordinate {value} is negative")))
}

/// Truncate a landmark coordinate to a pixel, saturating at the i32 range.
///
/// Non-finite values map to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // `as` saturates for out-of-range floats
pub fn landmark_to_pixel(value: f32) -> i32 {
    if value.is_finite() {
        value.trunc() as i32
    } else {
        0
    }
}

/// Truncate a non-negative layout value to a pixel count, clamped to `[min, max]`
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i32_clamp(value: f64, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(f64::from(min), f64::from(max));
    (clamped.trunc() as i32).clamp(min, max)
}
