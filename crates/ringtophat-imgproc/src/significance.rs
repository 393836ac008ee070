//! Ring background estimation and on/off significance maps.
//!
//! The on region is a disk around every pixel and the off region a ring around
//! it. The ring sum scaled by the exposure ratio `alpha` estimates the background
//! in the disk, and the Li & Ma (1983, eq. 17) formula turns the on and off sums
//! into a significance.

use ndarray::{Array2, ArrayView2, Zip};
use num_traits::ToPrimitive;

use crate::error::RingTophatError;
use crate::filter::{Correlator, Sample};
use crate::morphology::{disk, ring, StructuringElement};
use crate::padding::BoundaryMode;

/// Geometry of the on disk and off ring used for background estimation.
///
/// # Example
///
/// ```rust
/// use ringtophat_imgproc::significance::RingBackground;
///
/// let config = RingBackground::new(2, 4, 6).unwrap();
/// assert_eq!(config.alpha().unwrap(), 13.0 / 68.0);
///
/// assert!(RingBackground::new(4, 4, 6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingBackground {
    /// Radius of the on region disk.
    pub on_radius: usize,
    /// Inner radius of the off region ring.
    pub off_inner: usize,
    /// Outer radius of the off region ring.
    pub off_outer: usize,
    /// Scale the sums near the image border by the fraction of the region inside
    /// the image. Only applies with [`BoundaryMode::Constant`].
    pub rescale_edges: bool,
}

impl RingBackground {
    /// Create a validated configuration with edge rescaling enabled.
    ///
    /// # Errors
    ///
    /// Returns an error unless `on_radius < off_inner <= off_outer`.
    pub fn new(
        on_radius: usize,
        off_inner: usize,
        off_outer: usize,
    ) -> Result<Self, RingTophatError> {
        let config = Self {
            on_radius,
            off_inner,
            off_outer,
            rescale_edges: true,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set whether sums near the border are rescaled.
    pub fn with_rescale_edges(mut self, rescale_edges: bool) -> Self {
        self.rescale_edges = rescale_edges;
        self
    }

    /// Check that the on disk and off ring do not overlap.
    pub fn validate(&self) -> Result<(), RingTophatError> {
        if self.off_inner > self.off_outer {
            return Err(RingTophatError::InvertedRing {
                inner: self.off_inner,
                outer: self.off_outer,
            });
        }
        if self.on_radius >= self.off_inner {
            return Err(RingTophatError::OverlappingRegions {
                on: self.on_radius,
                off_inner: self.off_inner,
            });
        }
        Ok(())
    }

    /// The on region structuring element.
    pub fn on_element(&self) -> StructuringElement {
        disk(self.on_radius)
    }

    /// The off region structuring element.
    pub fn off_element(&self) -> Result<StructuringElement, RingTophatError> {
        ring(self.off_inner, self.off_outer)
    }

    /// The ratio of on to off region pixels.
    ///
    /// Computed from the discretized elements rather than the ideal areas.
    pub fn alpha(&self) -> Result<f64, RingTophatError> {
        self.validate()?;
        let on = self.on_element().count();
        let off = self.off_element()?.count();
        Ok(on as f64 / off as f64)
    }
}

/// The per-pixel results of a ring background estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundMaps {
    /// Sum over the on disk.
    pub on: Array2<f64>,
    /// Sum over the off ring.
    pub off: Array2<f64>,
    /// Ratio of on to off region pixels.
    pub alpha: f64,
    /// Background expected in the on disk, `alpha * off`.
    pub background: Array2<f64>,
    /// Excess over the background, `on - background`.
    pub excess: Array2<f64>,
    /// Li & Ma significance of the excess.
    pub significance: Array2<f64>,
}

/// Li & Ma (1983, eq. 17) significance of `n_on` counts given `n_off` background
/// counts and an exposure ratio `alpha`.
///
/// The result is negative when `n_on < alpha * n_off`. Zero counts contribute
/// nothing to the log-likelihood, and no counts at all give zero.
///
/// # Example
///
/// ```rust
/// use ringtophat_imgproc::significance::li_ma_significance;
///
/// assert!(li_ma_significance(20.0, 100.0, 0.2).abs() < 1e-6);
/// assert!(li_ma_significance(40.0, 100.0, 0.2) > 0.0);
/// assert!(li_ma_significance(10.0, 100.0, 0.2) < 0.0);
/// ```
pub fn li_ma_significance(n_on: f64, n_off: f64, alpha: f64) -> f64 {
    let total = n_on + n_off;
    if total <= 0.0 || alpha <= 0.0 {
        return 0.0;
    }

    let term_on = if n_on > 0.0 {
        n_on * ((1.0 + alpha) / alpha * (n_on / total)).ln()
    } else {
        0.0
    };
    let term_off = if n_off > 0.0 {
        n_off * ((1.0 + alpha) * (n_off / total)).ln()
    } else {
        0.0
    };

    let significance = (2.0 * (term_on + term_off).abs()).sqrt();
    if n_on < alpha * n_off {
        -significance
    } else {
        significance
    }
}

/// Scale each sum by `count / coverage` where `coverage` is the number of region
/// pixels inside the image. Sums with no coverage are left unchanged.
fn rescale_by_coverage<C: Correlator>(
    correlator: &C,
    sums: &mut Array2<f64>,
    element: &StructuringElement,
) -> Result<(), RingTophatError> {
    let ones = Array2::<f64>::ones(sums.dim());
    let coverage = correlator.correlate_element(ones.view(), element, BoundaryMode::Constant)?;
    let count = element.count() as f64;
    Zip::from(sums).and(&coverage).for_each(|sum, &covered| {
        if covered > 0.0 {
            *sum *= count / covered;
        }
    });
    Ok(())
}

/// Estimate the background with a ring around every pixel and compute the
/// significance of the excess in the disk.
///
/// # Arguments
///
/// * `image` - The source counts image with shape (H, W). Counts are expected to be non-negative.
/// * `config` - The on and off region geometry.
/// * `mode` - The boundary handling mode.
/// * `correlator` - The correlation primitive.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the correlation fails.
pub fn ring_background<T, C>(
    image: ArrayView2<T>,
    config: &RingBackground,
    mode: BoundaryMode,
    correlator: &C,
) -> Result<BackgroundMaps, RingTophatError>
where
    T: Sample + ToPrimitive,
    C: Correlator,
{
    config.validate()?;
    log::debug!(
        "ring_background shape = {:?}, on = {}, off = [{}, {}]",
        image.dim(),
        config.on_radius,
        config.off_inner,
        config.off_outer
    );

    let counts = image.mapv(|v| v.to_f64().unwrap_or(f64::NAN));
    let on_element = config.on_element();
    let off_element = config.off_element()?;

    let mut on = correlator.correlate_element(counts.view(), &on_element, mode)?;
    let mut off = correlator.correlate_element(counts.view(), &off_element, mode)?;

    if config.rescale_edges && mode == BoundaryMode::Constant {
        rescale_by_coverage(correlator, &mut on, &on_element)?;
        rescale_by_coverage(correlator, &mut off, &off_element)?;
    }

    let alpha = on_element.count() as f64 / off_element.count() as f64;
    log::debug!("alpha = {alpha}");

    let background = off.mapv(|v| alpha * v);
    let excess = &on - &background;
    let significance = Zip::from(&on)
        .and(&off)
        .map_collect(|&n_on, &n_off| li_ma_significance(n_on, n_off, alpha));

    Ok(BackgroundMaps {
        on,
        off,
        alpha,
        background,
        excess,
        significance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DirectCorrelator, RunningSumCorrelator};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_li_ma_reference_values() {
        assert_relative_eq!(
            li_ma_significance(100.0, 400.0, 0.2),
            1.951080660194946,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            li_ma_significance(130.0, 400.0, 0.2),
            4.603876116964644,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            li_ma_significance(50.0, 400.0, 0.2),
            -3.3293101536565306,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_li_ma_zero_counts() {
        assert_eq!(li_ma_significance(0.0, 0.0, 0.5), 0.0);
        assert_relative_eq!(
            li_ma_significance(10.0, 0.0, 0.5),
            4.687456215620814,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            li_ma_significance(0.0, 10.0, 0.5),
            -2.8476836485402113,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ring_background_config() {
        assert_eq!(
            RingBackground::new(5, 3, 8),
            Err(RingTophatError::OverlappingRegions { on: 5, off_inner: 3 })
        );
        assert_eq!(
            RingBackground::new(1, 9, 8),
            Err(RingTophatError::InvertedRing { inner: 9, outer: 8 })
        );
        let config = RingBackground::new(1, 2, 3).map(|c| c.with_rescale_edges(false));
        assert_eq!(config.map(|c| c.rescale_edges), Ok(false));
    }

    #[test]
    fn test_ring_background_uniform() -> Result<(), RingTophatError> {
        let image = Array2::<u16>::from_elem((20, 24), 3);
        let config = RingBackground::new(2, 4, 7)?;
        for mode in [BoundaryMode::Constant, BoundaryMode::Nearest] {
            let maps = ring_background(image.view(), &config, mode, &DirectCorrelator::default())?;
            assert_eq!(maps.alpha, config.alpha()?);
            for (&excess, &significance) in maps.excess.iter().zip(maps.significance.iter()) {
                assert_abs_diff_eq!(excess, 0.0, epsilon = 1e-9);
                assert_abs_diff_eq!(significance, 0.0, epsilon = 1e-5);
            }
        }
        Ok(())
    }

    #[test]
    fn test_ring_background_without_rescale() -> Result<(), RingTophatError> {
        let image = Array2::<f64>::ones((20, 20));
        let config = RingBackground::new(2, 4, 7)?.with_rescale_edges(false);
        let maps = ring_background(
            image.view(),
            &config,
            BoundaryMode::Constant,
            &DirectCorrelator::default(),
        )?;
        // the ring loses more of its area than the disk in the corner
        assert!(maps.excess[[0, 0]] > 0.0);
        assert_abs_diff_eq!(maps.excess[[10, 10]], 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_ring_background_point_source() -> Result<(), RingTophatError> {
        let mut image = Array2::<u32>::from_elem((31, 31), 1);
        image[[15, 15]] = 50;
        let config = RingBackground::new(2, 5, 9)?;
        let direct = ring_background(
            image.view(),
            &config,
            BoundaryMode::Nearest,
            &DirectCorrelator::default(),
        )?;
        let running = ring_background(
            image.view(),
            &config,
            BoundaryMode::Nearest,
            &RunningSumCorrelator::default(),
        )?;
        assert_eq!(direct, running);

        assert_abs_diff_eq!(direct.excess[[15, 15]], 49.0, epsilon = 1e-9);
        assert!(direct.significance[[15, 15]] > 5.0);
        // the source sits in the ring of pixels 6 away, raising their background
        assert!(direct.significance[[15, 21]] < 0.0);
        Ok(())
    }
}
