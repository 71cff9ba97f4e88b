use log::{debug, warn};
use num_traits::ToPrimitive;
use rand::Rng;
use std::fmt;
use std::num::NonZeroUsize;

use super::sampler::{seeded_rng, PointSampler};
use crate::error::{Error, Result};

/// Number of points used when the caller does not choose one.
pub const DEFAULT_POINTS: usize = 1000;

/// A real function of one variable that can be integrated.
///
/// It must be evaluable independently at any `x` in `[0, domain_bound]`.
/// The estimate is unbiased only when the function is non-negative and does
/// not exceed the rectangle height on that interval; this is assumed, not
/// enforced. A panic inside `evaluate` unwinds straight through the
/// estimator.
pub trait Integrand {
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64 + ?Sized,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A strictly positive number of sample points.
///
/// Zero, negative, fractional and non-finite counts are unrepresentable once
/// constructed; every conversion rejects them with [`Error::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleCount(NonZeroUsize);

impl SampleCount {
    pub fn new(count: usize) -> Result<Self> {
        NonZeroUsize::new(count).map(SampleCount).ok_or_else(|| {
            Error::invalid(
                "sample_count",
                format!("must be a positive integer, got {count}"),
            )
        })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for SampleCount {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_POINTS - 1))
    }
}

impl TryFrom<usize> for SampleCount {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self> {
        Self::new(count)
    }
}

impl TryFrom<i64> for SampleCount {
    type Error = Error;

    fn try_from(count: i64) -> Result<Self> {
        let count = count.to_usize().ok_or_else(|| {
            Error::invalid(
                "sample_count",
                format!("must be a positive integer, got {count}"),
            )
        })?;
        Self::new(count)
    }
}

impl TryFrom<f64> for SampleCount {
    type Error = Error;

    fn try_from(count: f64) -> Result<Self> {
        if !count.is_finite() || count.fract() != 0.0 {
            return Err(Error::invalid(
                "sample_count",
                format!("must be a positive integer, got {count}"),
            ));
        }
        let whole = count.to_usize().ok_or_else(|| {
            Error::invalid(
                "sample_count",
                format!("must be a positive integer, got {count}"),
            )
        })?;
        Self::new(whole)
    }
}

/// Sampling parameters for a single estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplingConfig {
    /// Points drawn in the bounding rectangle
    pub sample_count: SampleCount,
    /// Fixed seed for a reproducible estimate; `None` uses fresh entropy
    pub seed: Option<u64>,
}

/// Outcome of one hit-or-miss estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationResult {
    /// Area estimate, within `[0, rectangle_area]`
    pub estimate: f64,
    /// Points with `y <= f(x)`
    pub under_curve_count: usize,
    pub sample_count: usize,
    pub rectangle_area: f64,
    /// Evaluations where `f(x)` exceeded the rectangle height. Non-zero means
    /// the estimate is biased low.
    pub ceiling_exceedances: usize,
}

impl EstimationResult {
    /// Fraction of points that landed under the curve.
    pub fn hit_ratio(&self) -> f64 {
        self.under_curve_count as f64 / self.sample_count as f64
    }

    /// Binomial standard error of the estimate, `A * sqrt(p (1 - p) / n)`.
    pub fn standard_error(&self) -> f64 {
        let p = self.hit_ratio();
        self.rectangle_area * (p * (1.0 - p) / self.sample_count as f64).sqrt()
    }
}

/// A validated integration problem over `[0, domain_bound]`.
///
/// The request borrows nothing and owns no generator; each call to
/// [`IntegrationRequest::estimate`] builds its own.
#[derive(Clone)]
pub struct IntegrationRequest<F> {
    domain_bound: f64,
    rect_height: f64,
    rectangle_area: f64,
    function: F,
    config: SamplingConfig,
}

impl<F> fmt::Debug for IntegrationRequest<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrationRequest")
            .field("domain_bound", &self.domain_bound)
            .field("rect_height", &self.rect_height)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Accepts finite positive bounds narrow enough for the uniform sampler's scale.
fn check_bound(name: &'static str, value: f64) -> Result<f64> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::invalid(
            name,
            format!("must be finite and strictly positive, got {value}"),
        ));
    }
    if !(value / (1.0 - f64::EPSILON)).is_finite() {
        return Err(Error::invalid(
            name,
            format!("{value} is too large to sample uniformly"),
        ));
    }
    Ok(value)
}

impl<F: Integrand> IntegrationRequest<F> {
    /// Creates a request sampling the rectangle `[0, domain_bound] x [0, rect_height]`
    /// with [`SamplingConfig::default`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if either bound is not finite and strictly
    /// positive, or if the rectangle area overflows.
    pub fn new(domain_bound: f64, rect_height: f64, function: F) -> Result<Self> {
        let domain_bound = check_bound("domain_bound", domain_bound)?;
        let rect_height = check_bound("rect_height", rect_height)?;
        let rectangle_area = domain_bound * rect_height;
        if !rectangle_area.is_finite() {
            return Err(Error::invalid(
                "rect_height",
                format!("rectangle area {domain_bound} x {rect_height} is not finite"),
            ));
        }
        Ok(Self {
            domain_bound,
            rect_height,
            rectangle_area,
            function,
            config: SamplingConfig::default(),
        })
    }

    /// Creates a request whose rectangle height is `function(domain_bound)`.
    ///
    /// Correct for non-decreasing integrands such as `sqrt`, where the
    /// maximum sits at the right end of the interval.
    pub fn bounded_by_endpoint(domain_bound: f64, function: F) -> Result<Self> {
        let domain_bound = check_bound("domain_bound", domain_bound)?;
        let rect_height = function.evaluate(domain_bound);
        Self::new(domain_bound, rect_height, function)
    }

    pub fn with_sample_count(mut self, sample_count: SampleCount) -> Self {
        self.config.sample_count = sample_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_config(mut self, config: SamplingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn domain_bound(&self) -> f64 {
        self.domain_bound
    }

    pub fn rect_height(&self) -> f64 {
        self.rect_height
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn config(&self) -> SamplingConfig {
        self.config
    }

    pub fn rectangle_area(&self) -> f64 {
        self.rectangle_area
    }

    /// Runs the estimate with a generator created for this call only.
    ///
    /// With a seed configured, repeated calls return bit-identical results.
    pub fn estimate(&self) -> EstimationResult {
        let mut rng = seeded_rng(self.config.seed);
        self.estimate_with_rng(&mut rng)
    }

    /// Runs the estimate drawing from `rng`; the configured seed is ignored.
    pub fn estimate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> EstimationResult {
        self.estimate_points(self.config.sample_count, rng)
    }

    pub(crate) fn estimate_points<R: Rng + ?Sized>(
        &self,
        sample_count: SampleCount,
        rng: &mut R,
    ) -> EstimationResult {
        let sample_count = sample_count.get();
        debug!(
            "hit-or-miss over [0, {}] x [0, {}] with {} points",
            self.domain_bound, self.rect_height, sample_count
        );

        let mut under_curve_count = 0usize;
        let mut ceiling_exceedances = 0usize;
        for point in PointSampler::new(rng, self.domain_bound, self.rect_height, sample_count) {
            let fx = self.function.evaluate(point.x);
            if fx > self.rect_height {
                ceiling_exceedances += 1;
            }
            if point.y <= fx {
                under_curve_count += 1;
            }
        }

        if ceiling_exceedances > 0 {
            warn!(
                "integrand exceeded rect_height {} at {} of {} points; estimate is biased low",
                self.rect_height, ceiling_exceedances, sample_count
            );
        }

        let rectangle_area = self.rectangle_area;
        let estimate = (under_curve_count as f64 / sample_count as f64) * rectangle_area;
        debug!(
            "hit-or-miss estimate {} ({} of {} under curve)",
            estimate, under_curve_count, sample_count
        );

        EstimationResult {
            estimate,
            under_curve_count,
            sample_count,
            rectangle_area,
            ceiling_exceedances,
        }
    }
}

/// Estimates `∫₀^domain_bound f(x) dx` by rejection sampling in the rectangle
/// `[0, domain_bound] x [0, rect_height]`.
///
/// # Arguments
///
/// * `domain_bound` - Upper limit of integration, lower limit is 0
/// * `rect_height` - Height of the bounding rectangle; should bound `f` from above
/// * `f` - Non-negative function to integrate
/// * `sample_count` - Number of points, see [`DEFAULT_POINTS`]
/// * `seed` - Optional seed for a reproducible estimate
///
/// # Errors
///
/// [`Error::InvalidArgument`] for a zero `sample_count` or a non-positive bound.
/// Validation happens before any random number is drawn.
///
/// # Examples
///
/// ```
/// use mc_integral::estimate_integral;
///
/// // ∫₀¹ √x dx = 2/3
/// let area = estimate_integral(1.0, 1.0, f64::sqrt, 100_000, Some(42)).unwrap();
/// assert!((area - 2.0 / 3.0).abs() < 0.01);
/// ```
pub fn estimate_integral<F: Integrand>(
    domain_bound: f64,
    rect_height: f64,
    f: F,
    sample_count: usize,
    seed: Option<u64>,
) -> Result<f64> {
    let config = SamplingConfig {
        sample_count: SampleCount::new(sample_count)?,
        seed,
    };
    let request = IntegrationRequest::new(domain_bound, rect_height, f)?.with_config(config);
    Ok(request.estimate().estimate)
}
