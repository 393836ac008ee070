use crate::error::RingTophatError;

/// A non-negative integer radius in pixels.
///
/// Floating point radii are truncated toward zero, so `Radius::try_from(10.7f64)`
/// is a radius of 10. Negative and non-finite values are rejected.
///
/// # Example
///
/// ```rust
/// use ringtophat_imgproc::morphology::Radius;
///
/// let radius = Radius::try_from(10.7f64).unwrap();
/// assert_eq!(radius.get(), 10);
///
/// assert!(Radius::try_from(-1.0f64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Radius(usize);

impl Radius {
    /// Create a radius from an integer number of pixels.
    pub const fn new(radius: usize) -> Self {
        Self(radius)
    }

    /// Get the radius in pixels.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Side length of the square grid spanning `[-radius, +radius]`.
    pub const fn side(self) -> usize {
        2 * self.0 + 1
    }
}

impl From<usize> for Radius {
    fn from(radius: usize) -> Self {
        Self(radius)
    }
}

impl From<Radius> for usize {
    fn from(radius: Radius) -> Self {
        radius.0
    }
}

impl TryFrom<f64> for Radius {
    type Error = RingTophatError;

    fn try_from(radius: f64) -> Result<Self, Self::Error> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(RingTophatError::InvalidRadius(radius));
        }
        Ok(Self(radius.trunc() as usize))
    }
}

impl TryFrom<f32> for Radius {
    type Error = RingTophatError;

    fn try_from(radius: f32) -> Result<Self, Self::Error> {
        Self::try_from(radius as f64)
    }
}

impl TryFrom<i64> for Radius {
    type Error = RingTophatError;

    fn try_from(radius: i64) -> Result<Self, Self::Error> {
        usize::try_from(radius)
            .map(Self)
            .map_err(|_| RingTophatError::InvalidRadius(radius as f64))
    }
}

impl TryFrom<i32> for Radius {
    type Error = RingTophatError;

    fn try_from(radius: i32) -> Result<Self, Self::Error> {
        Self::try_from(radius as i64)
    }
}

impl std::fmt::Display for Radius {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
