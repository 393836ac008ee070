use ndarray::{Array2, ArrayView2};

use super::{Correlator, Sample};
use crate::error::RingTophatError;
use crate::morphology::StructuringElement;
use crate::padding::{BoundaryMode, Padded};
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Correlator that sums every active offset of the kernel at every pixel.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use ringtophat_imgproc::filter::{Correlator, DirectCorrelator};
/// use ringtophat_imgproc::morphology::disk;
/// use ringtophat_imgproc::padding::BoundaryMode;
///
/// let image = array![[0, 0, 0], [0, 1, 0], [0, 0, 0]];
/// let dst = DirectCorrelator::default()
///     .correlate_element(image.view(), &disk(1), BoundaryMode::Constant)
///     .unwrap();
/// assert_eq!(dst, array![[0, 1, 0], [1, 1, 1], [0, 1, 0]]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectCorrelator {
    /// How the output rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl DirectCorrelator {
    /// Create a direct correlator with the given execution strategy.
    pub fn new(strategy: ExecutionStrategy) -> Self {
        Self { strategy }
    }

    /// Correlate `image` with a weighted kernel.
    ///
    /// # Arguments
    ///
    /// * `image` - The source image with shape (H, W).
    /// * `weights` - The kernel with odd height and width, centered on its middle cell.
    /// * `mode` - The boundary handling mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the kernel is empty or has an even dimension.
    pub fn correlate_weights<T: Sample>(
        &self,
        image: ArrayView2<T>,
        weights: ArrayView2<T>,
        mode: BoundaryMode,
    ) -> Result<Array2<T>, RingTophatError> {
        let (k_height, k_width) = weights.dim();
        if k_height == 0 || k_width == 0 {
            return Err(RingTophatError::EmptyKernel);
        }
        if k_height % 2 == 0 || k_width % 2 == 0 {
            return Err(RingTophatError::EvenSizedKernel(k_height, k_width));
        }

        // the image is padded by the larger half-size, the smaller axis is shifted into place
        let pad = (k_height / 2).max(k_width / 2);
        let row_shift = pad - k_height / 2;
        let col_shift = pad - k_width / 2;
        let taps: Vec<(usize, usize, T)> = weights
            .indexed_iter()
            .filter(|(_, w)| !w.is_zero())
            .map(|((i, j), &w)| (i + row_shift, j + col_shift, w))
            .collect();

        self.sum_taps(image, pad, &taps, mode)
    }

    /// Sum `weight * padded[y + row][x + col]` over `taps` for every output pixel.
    fn sum_taps<T: Sample>(
        &self,
        image: ArrayView2<T>,
        pad: usize,
        taps: &[(usize, usize, T)],
        mode: BoundaryMode,
    ) -> Result<Array2<T>, RingTophatError> {
        if image.is_empty() {
            return Ok(Array2::zeros(image.dim()));
        }

        let (height, width) = image.dim();
        let padded = Padded::new(image, pad, mode, self.strategy)?;

        let mut data = vec![T::zero(); height * width];
        for_each_row_mut(&mut data, width, self.strategy, |y, row| {
            for (x, dst) in row.iter_mut().enumerate() {
                *dst = taps.iter().fold(T::zero(), |acc, &(ky, kx, w)| {
                    acc.acc_add(w.acc_mul(padded.row(y + ky)[x + kx]))
                });
            }
        })?;

        Ok(Array2::from_shape_vec((height, width), data)?)
    }
}

impl Correlator for DirectCorrelator {
    fn correlate_element<T: Sample>(
        &self,
        image: ArrayView2<T>,
        element: &StructuringElement,
        mode: BoundaryMode,
    ) -> Result<Array2<T>, RingTophatError> {
        let r = element.radius() as isize;
        let taps: Vec<(usize, usize, T)> = element
            .offsets()
            .into_iter()
            .map(|(dy, dx)| ((dy + r) as usize, (dx + r) as usize, T::one()))
            .collect();
        self.sum_taps(image, element.radius(), &taps, mode)
    }
}

/// Correlate an image with a weighted kernel.
///
/// Equivalent to a convolution for point-symmetric kernels such as disks and rings.
///
/// # Arguments
///
/// * `image` - The source image with shape (H, W).
/// * `weights` - The kernel with odd height and width.
/// * `mode` - The boundary handling mode.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use ringtophat_imgproc::filter::correlate;
/// use ringtophat_imgproc::padding::BoundaryMode;
///
/// let image = array![[1.0, 2.0, 3.0]];
/// let weights = array![[1.0, 0.0, -1.0]];
/// let dst = correlate(image.view(), weights.view(), BoundaryMode::Nearest).unwrap();
/// assert_eq!(dst, array![[-1.0, -2.0, -1.0]]);
/// ```
pub fn correlate<T: Sample>(
    image: ArrayView2<T>,
    weights: ArrayView2<T>,
    mode: BoundaryMode,
) -> Result<Array2<T>, RingTophatError> {
    DirectCorrelator::default().correlate_weights(image, weights, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::{disk, ring};
    use ndarray::array;

    #[test]
    fn test_correlate_disk_constant() -> Result<(), RingTophatError> {
        let image = Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as i64);
        let dst = DirectCorrelator::default().correlate_element(
            image.view(),
            &disk(1),
            BoundaryMode::Constant,
        )?;
        assert_eq!(
            dst,
            array![
                [5, 8, 12, 12],
                [17, 25, 30, 27],
                [21, 32, 36, 28],
            ]
        );
        Ok(())
    }

    #[test]
    fn test_correlate_ring_nearest() -> Result<(), RingTophatError> {
        let image = Array2::from_elem((4, 5), 2.0f64);
        let element = ring(1, 2)?;
        let dst = DirectCorrelator::default().correlate_element(
            image.view(),
            &element,
            BoundaryMode::Nearest,
        )?;
        assert!(dst.iter().all(|&v| v == 2.0 * element.count() as f64));
        Ok(())
    }

    #[test]
    fn test_correlate_weights_matches_element() -> Result<(), RingTophatError> {
        let image = Array2::from_shape_fn((6, 7), |(i, j)| ((i * 7 + j) % 5) as i32);
        let element = ring(1, 3)?;
        let correlator = DirectCorrelator::new(ExecutionStrategy::Serial);
        for mode in [BoundaryMode::Constant, BoundaryMode::Wrap] {
            let by_element = correlator.correlate_element(image.view(), &element, mode)?;
            let by_weights =
                correlator.correlate_weights(image.view(), element.to_weights().view(), mode)?;
            assert_eq!(by_element, by_weights);
        }
        Ok(())
    }

    #[test]
    fn test_correlate_weights_rectangular() -> Result<(), RingTophatError> {
        let image = array![[1, 2, 3], [4, 5, 6]];
        let weights = array![[1], [0], [1]];
        let dst = correlate(image.view(), weights.view(), BoundaryMode::Constant)?;
        assert_eq!(dst, array![[4, 5, 6], [1, 2, 3]]);
        Ok(())
    }

    #[test]
    fn test_correlate_weights_invalid() {
        let image = Array2::<f32>::zeros((3, 3));
        assert_eq!(
            correlate(image.view(), Array2::zeros((2, 3)).view(), BoundaryMode::Constant),
            Err(RingTophatError::EvenSizedKernel(2, 3))
        );
        assert_eq!(
            correlate(image.view(), Array2::zeros((0, 0)).view(), BoundaryMode::Constant),
            Err(RingTophatError::EmptyKernel)
        );
    }

    #[test]
    fn test_correlate_wraps_narrow_integers() -> Result<(), RingTophatError> {
        let image = Array2::<u8>::from_elem((8, 8), 200);
        let dst = DirectCorrelator::default().correlate_element(
            image.view(),
            &disk(1),
            BoundaryMode::Constant,
        )?;
        // 5 * 200 wraps to 232, the corners see 3 * 200 = 600 which wraps to 88
        assert_eq!(dst[[4, 4]], 232);
        assert_eq!(dst[[0, 0]], 88);

        let weights = array![[0u8, 0, 0], [0, 2, 0], [0, 0, 0]];
        let dst = correlate(image.view(), weights.view(), BoundaryMode::Constant)?;
        assert!(dst.iter().all(|&v| v == 144));
        Ok(())
    }

    #[test]
    fn test_correlate_empty_image() -> Result<(), RingTophatError> {
        let image = Array2::<f64>::zeros((0, 4));
        let dst = DirectCorrelator::default().correlate_element(
            image.view(),
            &disk(2),
            BoundaryMode::Wrap,
        )?;
        assert_eq!(dst.dim(), (0, 4));
        Ok(())
    }
}
