use ndarray::{Array2, ArrayView2};

use crate::error::RingTophatError;
use crate::filter::{Correlator, DirectCorrelator, Sample};
use crate::morphology::{disk, ring};
use crate::padding::BoundaryMode;

/// The boundary mode used when callers have no preference.
pub const DEFAULT_MODE: BoundaryMode = BoundaryMode::Constant;

/// Correlate an image with a disk of the given radius.
///
/// Each output pixel is the sum of the image over the [`disk`] centered on it.
///
/// # Arguments
///
/// * `image` - The source image with shape (H, W).
/// * `radius` - The disk radius in pixels.
/// * `mode` - The boundary handling mode, usually [`DEFAULT_MODE`].
///
/// # Returns
///
/// A new image with the same shape as `image`.
///
/// # Example
///
/// ```rust
/// use ndarray::Array2;
/// use ringtophat_imgproc::tophat::{tophat_correlate, DEFAULT_MODE};
///
/// let image = Array2::<f64>::ones((5, 5));
/// let dst = tophat_correlate(image.view(), 1, DEFAULT_MODE).unwrap();
/// assert_eq!(dst[[2, 2]], 5.0);
/// assert_eq!(dst[[0, 0]], 3.0);
/// ```
pub fn tophat_correlate<T: Sample>(
    image: ArrayView2<T>,
    radius: usize,
    mode: BoundaryMode,
) -> Result<Array2<T>, RingTophatError> {
    tophat_correlate_with(&DirectCorrelator::default(), image, radius, mode)
}

/// Correlate an image with a disk of the given radius using `correlator`.
pub fn tophat_correlate_with<T: Sample, C: Correlator>(
    correlator: &C,
    image: ArrayView2<T>,
    radius: usize,
    mode: BoundaryMode,
) -> Result<Array2<T>, RingTophatError> {
    log::debug!(
        "tophat_correlate shape = {:?}, radius = {radius}",
        image.dim()
    );
    let structure = disk(radius);
    correlator.correlate_element(image, &structure, mode)
}

/// Correlate an image with a ring of the given radii.
///
/// Each output pixel is the sum of the image over the [`ring`] centered on it.
///
/// # Arguments
///
/// * `image` - The source image with shape (H, W).
/// * `r_in` - The inner ring radius in pixels.
/// * `r_out` - The outer ring radius in pixels.
/// * `mode` - The boundary handling mode, usually [`DEFAULT_MODE`].
///
/// # Errors
///
/// Returns [`RingTophatError::InvertedRing`] if `r_in > r_out`.
pub fn ring_correlate<T: Sample>(
    image: ArrayView2<T>,
    r_in: usize,
    r_out: usize,
    mode: BoundaryMode,
) -> Result<Array2<T>, RingTophatError> {
    ring_correlate_with(&DirectCorrelator::default(), image, r_in, r_out, mode)
}

/// Correlate an image with a ring of the given radii using `correlator`.
pub fn ring_correlate_with<T: Sample, C: Correlator>(
    correlator: &C,
    image: ArrayView2<T>,
    r_in: usize,
    r_out: usize,
    mode: BoundaryMode,
) -> Result<Array2<T>, RingTophatError> {
    log::debug!(
        "ring_correlate shape = {:?}, r_in = {r_in}, r_out = {r_out}",
        image.dim()
    );
    let structure = ring(r_in, r_out)?;
    correlator.correlate_element(image, &structure, mode)
}
