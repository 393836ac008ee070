//! Sliding-window correlation of images with structuring elements and kernels.

use ndarray::{Array2, ArrayView2};

use crate::error::RingTophatError;
use crate::morphology::StructuringElement;
use crate::padding::BoundaryMode;

mod direct;
pub use direct::{correlate, DirectCorrelator};

mod running;
pub use running::RunningSumCorrelator;

/// Numeric sample types that can be correlated.
///
/// Sums are accumulated in the sample type itself. Integer sums wrap around on
/// overflow in every build profile, floating point sums follow IEEE 754.
pub trait Sample: num_traits::Num + Copy + Send + Sync {
    /// Add two samples, wrapping around for integers.
    fn acc_add(self, rhs: Self) -> Self;

    /// Subtract two samples, wrapping around for integers.
    fn acc_sub(self, rhs: Self) -> Self;

    /// Multiply two samples, wrapping around for integers.
    fn acc_mul(self, rhs: Self) -> Self;

    /// Whether the sample is neither infinite nor NaN. Always true for integers.
    fn is_finite_sample(self) -> bool;
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn acc_add(self, rhs: Self) -> Self {
                    num_traits::WrappingAdd::wrapping_add(&self, &rhs)
                }

                #[inline]
                fn acc_sub(self, rhs: Self) -> Self {
                    num_traits::WrappingSub::wrapping_sub(&self, &rhs)
                }

                #[inline]
                fn acc_mul(self, rhs: Self) -> Self {
                    num_traits::WrappingMul::wrapping_mul(&self, &rhs)
                }

                #[inline]
                fn is_finite_sample(self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn acc_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn acc_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn acc_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline]
                fn is_finite_sample(self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_integer_sample!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_float_sample!(f32, f64);

/// A sliding-window correlation with a binary structuring element.
///
/// Every output pixel is the sum of the image samples at the active offsets of
/// the element centered on that pixel, with out of bounds samples resolved by
/// the [`BoundaryMode`]. The output has the same shape as the input.
pub trait Correlator {
    /// Correlate `image` with `element`.
    ///
    /// # Arguments
    ///
    /// * `image` - The source image with shape (H, W).
    /// * `element` - The structuring element, used as 0/1 weights.
    /// * `mode` - The boundary handling mode.
    fn correlate_element<T: Sample>(
        &self,
        image: ArrayView2<T>,
        element: &StructuringElement,
        mode: BoundaryMode,
    ) -> Result<Array2<T>, RingTophatError>;
}
