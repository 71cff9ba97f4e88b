use log::debug;

use super::hit_or_miss::{EstimationResult, Integrand, IntegrationRequest};
use crate::error::{Error, Result};

/// A high-accuracy integration routine used as the yardstick for an estimate.
///
/// Implementations return `∫_lower^upper f(x) dx` with an error assumed to
/// be negligible next to the Monte Carlo error.
pub trait ReferenceIntegral {
    fn reference_integral<F: Integrand + ?Sized>(
        &self,
        function: &F,
        lower: f64,
        upper: f64,
    ) -> f64;
}

/// Percentage difference `|reference - estimate| / reference * 100`.
///
/// The sign follows `reference`: a negative reference yields a negative
/// percentage. Take `abs()` of the result for a pure magnitude.
///
/// # Errors
///
/// [`Error::DivisionUndefined`] when `reference` is exactly zero.
///
/// # Examples
///
/// ```
/// use mc_integral::relative_difference;
///
/// let percent = relative_difference(8.0, 7.6).unwrap();
/// assert!((percent - 5.0).abs() < 1e-9);
/// ```
pub fn relative_difference(reference: f64, estimate: f64) -> Result<f64> {
    if reference == 0.0 {
        return Err(Error::DivisionUndefined { estimate });
    }
    Ok((reference - estimate).abs() / reference * 100.0)
}

/// An estimate next to its reference value, with everything a report or a
/// plot needs as plain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub domain_bound: f64,
    pub rect_height: f64,
    pub estimation: EstimationResult,
    pub reference: f64,
    /// Relative difference in percent
    pub difference_percent: f64,
}

/// Estimates `request` and compares it with `oracle` over `[0, domain_bound]`.
pub fn compare<F, O>(request: &IntegrationRequest<F>, oracle: &O) -> Result<Comparison>
where
    F: Integrand,
    O: ReferenceIntegral,
{
    let estimation = request.estimate();
    let reference = oracle.reference_integral(request.function(), 0.0, request.domain_bound());
    let difference_percent = relative_difference(reference, estimation.estimate)?;
    debug!(
        "estimate {} vs reference {} ({}% apart)",
        estimation.estimate, reference, difference_percent
    );

    Ok(Comparison {
        domain_bound: request.domain_bound(),
        rect_height: request.rect_height(),
        estimation,
        reference,
        difference_percent,
    })
}
