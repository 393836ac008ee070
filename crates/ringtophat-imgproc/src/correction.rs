use std::f64::consts::PI;

use crate::error::RingTophatError;
use crate::morphology::{disk, ring};

/// Ratio of a pixel count to an ideal area, or NaN when the ideal area is zero.
fn area_ratio(actual: usize, desired: f64) -> f64 {
    if desired == 0.0 {
        return f64::NAN;
    }
    actual as f64 / desired
}

/// Return the area correction factor due to pixelation of a disk.
///
/// The factor is the number of pixels in [`disk`] divided by `π·radius²`. It can
/// be used to rescale a sum over the discrete disk to the continuous integral.
///
/// For `radius = 0` the ideal area is zero and the factor is NaN.
///
/// # Example
///
/// ```rust
/// use ringtophat_imgproc::correction::disk_pixel_correction;
///
/// let factor = disk_pixel_correction(1);
/// assert_eq!(factor, 5.0 / std::f64::consts::PI);
/// assert!(disk_pixel_correction(0).is_nan());
/// ```
pub fn disk_pixel_correction(radius: usize) -> f64 {
    let actual = disk(radius).count();
    let desired = PI * (radius as f64).powi(2);
    let pixel_correction = area_ratio(actual, desired);
    log::debug!("pixel_correction = {pixel_correction}");
    pixel_correction
}

/// Return the area correction factor due to pixelation of a ring.
///
/// The factor is the number of pixels in [`ring`] divided by `π·(r_out² - r_in²)`.
///
/// For `r_in == r_out` the ideal area is zero and the factor is NaN.
///
/// # Errors
///
/// Returns [`RingTophatError::InvertedRing`] if `r_in > r_out`.
pub fn ring_pixel_correction(r_in: usize, r_out: usize) -> Result<f64, RingTophatError> {
    let actual = ring(r_in, r_out)?.count();
    let desired = PI * ((r_out as f64).powi(2) - (r_in as f64).powi(2));
    let pixel_correction = area_ratio(actual, desired);
    log::debug!("pixel_correction = {pixel_correction}");
    Ok(pixel_correction)
}
