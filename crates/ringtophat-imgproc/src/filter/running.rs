use ndarray::{Array2, ArrayView2};

use super::{Correlator, Sample};
use crate::error::RingTophatError;
use crate::morphology::StructuringElement;
use crate::padding::{BoundaryMode, Padded};
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Correlator that updates a running sum while sliding along each row.
///
/// The first window of every output row is summed in full. Each step to the right
/// then only subtracts the samples leaving the left end of every horizontal run of
/// the element and adds the samples entering its right end, so the cost per pixel
/// grows with the element perimeter instead of its area.
///
/// For integer samples the result is identical to [`super::DirectCorrelator`]. For
/// floating point samples it can differ by rounding. Windows holding NaN or infinite
/// samples are summed in full, so the sum recovers once those samples leave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningSumCorrelator {
    /// How the output rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl RunningSumCorrelator {
    /// Create a running sum correlator with the given execution strategy.
    pub fn new(strategy: ExecutionStrategy) -> Self {
        Self { strategy }
    }
}

impl Correlator for RunningSumCorrelator {
    fn correlate_element<T: Sample>(
        &self,
        image: ArrayView2<T>,
        element: &StructuringElement,
        mode: BoundaryMode,
    ) -> Result<Array2<T>, RingTophatError> {
        if image.is_empty() {
            return Ok(Array2::zeros(image.dim()));
        }

        let (height, width) = image.dim();
        let r = element.radius();
        let padded = Padded::new(image, r, mode, self.strategy)?;

        // (padded row offset, first column, last column) of every run
        let runs: Vec<(usize, usize, usize)> = element
            .runs()
            .into_iter()
            .map(|run| {
                let r = r as isize;
                (
                    (run.dy + r) as usize,
                    (run.start + r) as usize,
                    (run.end + r) as usize,
                )
            })
            .collect();

        // full sum of the window whose left edge sits at padded column x
        let window_sum = |y: usize, x: usize| {
            runs.iter().fold(T::zero(), |acc, &(ky, start, end)| {
                padded.row(y + ky)[x + start..=x + end]
                    .iter()
                    .fold(acc, |acc, &v| acc.acc_add(v))
            })
        };

        let mut data = vec![T::zero(); height * width];
        for_each_row_mut(&mut data, width, self.strategy, |y, row| {
            let mut acc = window_sum(y, 0);
            row[0] = acc;

            for (x, dst) in row.iter_mut().enumerate().skip(1) {
                if acc.is_finite_sample() {
                    for &(ky, start, end) in runs.iter() {
                        let src = padded.row(y + ky);
                        acc = acc.acc_sub(src[x - 1 + start]).acc_add(src[x + end]);
                    }
                }
                // NaN and infinities never cancel out of a running sum
                if !acc.is_finite_sample() {
                    acc = window_sum(y, x);
                }
                *dst = acc;
            }
        })?;

        Ok(Array2::from_shape_vec((height, width), data)?)
    }
}
