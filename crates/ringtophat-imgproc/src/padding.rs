use ndarray::{Array2, ArrayView2};
use num_traits::Zero;

use crate::error::RingTophatError;
use crate::parallel::{for_each_row_mut, ExecutionStrategy};

/// Boundary handling for samples that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundaryMode {
    /// Fill the border with zeros.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    #[default]
    Constant,

    /// Repeat the outermost row or column of pixels.
    ///
    /// Example: ...d c b a | a a a a...
    Nearest,

    /// Reflect about the edge, starting with the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// Reflect about the center of the edge pixel, starting with the pixel next to it.
    ///
    /// Example: ...d c b a | b c d e...
    Mirror,

    /// Wrap the content from the opposite side.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl BoundaryMode {
    /// Maps index `i` to an index within `[0, len)` according to the boundary mode.
    ///
    /// Returns `None` for out of range indices in [`BoundaryMode::Constant`], where the
    /// sample is the fill value. `len` must be non-zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ringtophat_imgproc::padding::BoundaryMode;
    ///
    /// assert_eq!(BoundaryMode::Constant.map_index(-1, 4), None);
    /// assert_eq!(BoundaryMode::Nearest.map_index(-1, 4), Some(0));
    /// assert_eq!(BoundaryMode::Reflect.map_index(-1, 4), Some(0));
    /// assert_eq!(BoundaryMode::Mirror.map_index(-1, 4), Some(1));
    /// assert_eq!(BoundaryMode::Wrap.map_index(-1, 4), Some(3));
    /// ```
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if (0..len as isize).contains(&i) {
            return Some(i as usize);
        }
        let n = len as isize;
        let mapped = match self {
            BoundaryMode::Constant => return None,
            BoundaryMode::Nearest => i.clamp(0, n - 1),
            // a reflected image repeats with period 2n, a mirrored one with 2n - 2
            BoundaryMode::Reflect => {
                let m = i.rem_euclid(2 * n);
                if m < n {
                    m
                } else {
                    2 * n - 1 - m
                }
            }
            BoundaryMode::Mirror if n == 1 => 0,
            BoundaryMode::Mirror => {
                let m = i.rem_euclid(2 * n - 2);
                if m < n {
                    m
                } else {
                    2 * n - 2 - m
                }
            }
            BoundaryMode::Wrap => i.rem_euclid(n),
        };
        Some(mapped as usize)
    }
}

/// A row-major image padded by the same amount on every side.
pub(crate) struct Padded<T> {
    data: Vec<T>,
    width: usize,
}

impl<T: Copy> Padded<T> {
    /// Pad `image` by `pad` pixels on every side. `image` must not be empty.
    pub(crate) fn new(
        image: ArrayView2<T>,
        pad: usize,
        mode: BoundaryMode,
        strategy: ExecutionStrategy,
    ) -> Result<Self, RingTophatError>
    where
        T: Zero + Send + Sync,
    {
        let (height, width) = image.dim();
        let new_width = width + 2 * pad;
        let new_height = height + 2 * pad;
        let mut data = vec![T::zero(); new_width * new_height];

        // columns are mapped once and reused for every row
        let cols: Vec<Option<usize>> = (0..new_width)
            .map(|x| mode.map_index(x as isize - pad as isize, width))
            .collect();

        for_each_row_mut(&mut data, new_width, strategy, |y, row| {
            if let Some(src_y) = mode.map_index(y as isize - pad as isize, height) {
                let src_row = image.row(src_y);
                for (dst, col) in row.iter_mut().zip(cols.iter()) {
                    if let Some(src_x) = col {
                        *dst = src_row[*src_x];
                    }
                }
            }
        })?;

        Ok(Self {
            data,
            width: new_width,
        })
    }

    /// The padded row `y`.
    #[inline]
    pub(crate) fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub(crate) fn into_array(self) -> Result<Array2<T>, RingTophatError> {
        let height = self.data.len() / self.width.max(1);
        Ok(Array2::from_shape_vec((height, self.width), self.data)?)
    }
}

/// Creates a new image with `pad` pixels of border on every side, filled
/// according to `mode`.
///
/// # Arguments
///
/// * `image` - The source image with shape (H, W).
/// * `pad` - The border width in pixels.
/// * `mode` - The boundary handling mode.
///
/// # Returns
///
/// An image with shape (H + 2 * pad, W + 2 * pad). An empty image stays empty.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use ringtophat_imgproc::padding::{spatial_padding, BoundaryMode};
///
/// let image = array![[1, 2], [3, 4]];
/// let padded = spatial_padding(image.view(), 1, BoundaryMode::Nearest).unwrap();
/// assert_eq!(padded.dim(), (4, 4));
/// assert_eq!(padded[[0, 0]], 1);
/// assert_eq!(padded[[3, 3]], 4);
/// ```
pub fn spatial_padding<T>(
    image: ArrayView2<T>,
    pad: usize,
    mode: BoundaryMode,
) -> Result<Array2<T>, RingTophatError>
where
    T: Copy + Zero + Send + Sync,
{
    if image.is_empty() {
        return Ok(Array2::from_elem(image.dim(), T::zero()));
    }
    Padded::new(image, pad, mode, ExecutionStrategy::default())?.into_array()
}
