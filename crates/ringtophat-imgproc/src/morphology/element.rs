use ndarray::Array2;

use super::radius::Radius;
use crate::error::RingTophatError;

/// A horizontal run of consecutive active cells in a structuring element.
///
/// Offsets are relative to the element center, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Row offset from the center.
    pub dy: isize,
    /// Column offset of the first active cell.
    pub start: isize,
    /// Column offset of the last active cell.
    pub end: isize,
}

/// A binary structuring element.
///
/// The element is a square boolean mask with an odd side length `2 * radius + 1`,
/// so it has a single center pixel and correlating with it does not shift the image.
///
/// # Example
///
/// ```rust
/// use ringtophat_imgproc::morphology::disk;
///
/// let element = disk(1);
/// assert_eq!(element.side(), 3);
/// assert_eq!(element.radius(), 1);
/// assert_eq!(element.count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    mask: Array2<bool>,
    radius: usize,
}

impl StructuringElement {
    /// Create a structuring element from a boolean mask.
    ///
    /// # Arguments
    ///
    /// * `mask` - A square boolean mask with an odd side length.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask is empty, not square or has an even side length.
    pub fn from_mask(mask: Array2<bool>) -> Result<Self, RingTophatError> {
        let (rows, cols) = mask.dim();
        if rows == 0 || cols == 0 {
            return Err(RingTophatError::EmptyKernel);
        }
        if rows != cols {
            return Err(RingTophatError::NonSquareKernel(rows, cols));
        }
        if rows % 2 == 0 {
            return Err(RingTophatError::EvenSizedKernel(rows, cols));
        }
        Ok(Self {
            mask,
            radius: rows / 2,
        })
    }

    /// Build an element by evaluating `f(x, y)` on the index grid of `radius`.
    fn from_grid_fn(radius: Radius, f: impl Fn(i64, i64) -> bool) -> Self {
        let r = radius.get() as i64;
        let mask = Array2::from_shape_fn((radius.side(), radius.side()), |(i, j)| {
            f(j as i64 - r, i as i64 - r)
        });
        Self {
            mask,
            radius: radius.get(),
        }
    }

    /// The radius of the element, i.e. the offset of the center pixel.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The side length of the element.
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    /// The number of active cells.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }

    /// Whether the cell at `(row, col)` is active. Out of range cells are inactive.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.mask.get((row, col)).copied().unwrap_or(false)
    }

    /// A view of the underlying mask.
    pub fn as_array(&self) -> &Array2<bool> {
        &self.mask
    }

    /// Consume the element and return the mask.
    pub fn into_array(self) -> Array2<bool> {
        self.mask
    }

    /// The `(dy, dx)` offsets of the active cells relative to the center, in row-major order.
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let r = self.radius as isize;
        self.mask
            .indexed_iter()
            .filter(|(_, v)| **v)
            .map(|((i, j), _)| (i as isize - r, j as isize - r))
            .collect()
    }

    /// The maximal horizontal runs of active cells, row by row.
    pub fn runs(&self) -> Vec<Run> {
        let r = self.radius as isize;
        let mut runs = Vec::new();
        for (i, row) in self.mask.outer_iter().enumerate() {
            let mut start = None;
            for (j, &v) in row.iter().enumerate() {
                match (v, start) {
                    (true, None) => start = Some(j),
                    (false, Some(s)) => {
                        runs.push(Run {
                            dy: i as isize - r,
                            start: s as isize - r,
                            end: j as isize - 1 - r,
                        });
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(s) = start {
                runs.push(Run {
                    dy: i as isize - r,
                    start: s as isize - r,
                    end: row.len() as isize - 1 - r,
                });
            }
        }
        runs
    }

    /// The mask as 0/1 weights.
    pub fn to_weights<T: num_traits::Zero + num_traits::One + Clone>(&self) -> Array2<T> {
        self.mask.mapv(|v| if v { T::one() } else { T::zero() })
    }
}

/// Get the arrays of offsets for a symmetric structure.
///
/// Returns `(x, y)` grids of side `2 * radius + 1` holding the column and row
/// offset of every cell from the center, in `[-radius, +radius]`.
///
/// # Example
///
/// ```rust
/// use ringtophat_imgproc::morphology::index_grid;
///
/// let (x, y) = index_grid(1);
/// assert_eq!(x.row(0).to_vec(), vec![-1, 0, 1]);
/// assert_eq!(y.column(0).to_vec(), vec![-1, 0, 1]);
/// ```
pub fn index_grid(radius: usize) -> (Array2<i64>, Array2<i64>) {
    let radius = Radius::new(radius);
    let r = radius.get() as i64;
    let shape = (radius.side(), radius.side());
    let x = Array2::from_shape_fn(shape, |(_, j)| j as i64 - r);
    let y = Array2::from_shape_fn(shape, |(i, _)| i as i64 - r);
    (x, y)
}

/// Generate a binary disk.
///
/// A cell at offset `(x, y)` from the center is active iff `x² + y² <= radius²`.
///
/// # Arguments
///
/// * `radius` - The disk radius in pixels. Use [`Radius`] to normalize float input.
pub fn disk(radius: usize) -> StructuringElement {
    let radius = Radius::new(radius);
    let r2 = (radius.get() as i64).pow(2);
    StructuringElement::from_grid_fn(radius, |x, y| x * x + y * y <= r2)
}

/// Generate a binary ring.
///
/// A cell at offset `(x, y)` from the center is active iff
/// `r_in² <= x² + y² <= r_out²`. Both bounds are inclusive, so a disk of radius
/// `r_in` and a ring starting at `r_in` share their boundary pixels.
///
/// # Arguments
///
/// * `r_in` - The inner radius in pixels.
/// * `r_out` - The outer radius in pixels. The element side is `2 * r_out + 1`.
///
/// # Errors
///
/// Returns [`RingTophatError::InvertedRing`] if `r_in > r_out`.
///
/// # Example
///
/// ```rust
/// use ringtophat_imgproc::morphology::{disk, ring};
///
/// let element = ring(0, 3).unwrap();
/// assert_eq!(element, disk(3));
/// ```
pub fn ring(r_in: usize, r_out: usize) -> Result<StructuringElement, RingTophatError> {
    let (r_in, r_out) = (Radius::new(r_in), Radius::new(r_out));
    if r_in > r_out {
        return Err(RingTophatError::InvertedRing {
            inner: r_in.get(),
            outer: r_out.get(),
        });
    }
    let inner2 = (r_in.get() as i64).pow(2);
    let outer2 = (r_out.get() as i64).pow(2);
    Ok(StructuringElement::from_grid_fn(r_out, |x, y| {
        let d2 = x * x + y * y;
        inner2 <= d2 && d2 <= outer2
    }))
}
