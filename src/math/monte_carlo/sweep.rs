//! Independent estimates run in parallel.
//!
//! Each task owns a ChaCha20 generator keyed by the caller's seed and set to
//! its own stream, so results depend only on the inputs and never on how
//! rayon schedules the work.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use super::hit_or_miss::{EstimationResult, Integrand, IntegrationRequest, SampleCount};
use crate::error::{Error, Result};

fn stream_rng(seed: u64, stream: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Estimates the same integral once per entry of `sample_counts`.
///
/// Results come back in the order of `sample_counts`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if either bound is not finite and strictly positive.
pub fn convergence_sweep<F>(
    domain_bound: f64,
    rect_height: f64,
    function: F,
    sample_counts: &[SampleCount],
    seed: u64,
) -> Result<Vec<EstimationResult>>
where
    F: Integrand + Sync,
{
    let request = IntegrationRequest::new(domain_bound, rect_height, function)?;
    Ok(sample_counts
        .par_iter()
        .enumerate()
        .map(|(i, &count)| {
            let mut rng = stream_rng(seed, i as u64);
            request.estimate_points(count, &mut rng)
        })
        .collect())
}

/// Runs `repeats` independent estimates of `request`, one stream each.
///
/// The request's own seed is not used; `seed` keys every repetition.
pub fn repeated_estimates<F>(
    request: &IntegrationRequest<F>,
    repeats: usize,
    seed: u64,
) -> Result<Vec<EstimationResult>>
where
    F: Integrand + Sync,
{
    if repeats == 0 {
        return Err(Error::invalid("repeats", "must be at least 1"));
    }
    Ok((0..repeats)
        .into_par_iter()
        .map(|i| request.estimate_with_rng(&mut stream_rng(seed, i as u64)))
        .collect())
}

/// Mean of `|estimate - truth|` over `results`; `None` when empty.
pub fn mean_absolute_error(results: &[EstimationResult], truth: f64) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    let total: f64 = results.iter().map(|r| (r.estimate - truth).abs()).sum();
    Some(total / results.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn counts(values: &[usize]) -> Vec<SampleCount> {
        values.iter().map(|&n| SampleCount::new(n).unwrap()).collect()
    }

    #[test]
    fn test_sweep_preserves_order_and_counts() {
        let sizes = counts(&[10, 100, 1000, 5000]);
        let results = convergence_sweep(1.0, 1.0, |x: f64| x, &sizes, 42).unwrap();
        let seen: Vec<usize> = results.iter().map(|r| r.sample_count).collect();
        assert_eq!(seen, vec![10, 100, 1000, 5000]);
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let sizes = counts(&[500, 500, 500, 2000]);
        let a = convergence_sweep(2.0, 4.0, |x: f64| x * x, &sizes, 7).unwrap();
        let b = convergence_sweep(2.0, 4.0, |x: f64| x * x, &sizes, 7).unwrap();
        assert_eq!(a, b);
        // Equal sizes still draw from different streams.
        assert!(a[0] != a[1] || a[1] != a[2]);
    }

    #[test]
    fn test_sweep_validates_bounds() {
        let sizes = counts(&[10]);
        assert!(convergence_sweep(0.0, 1.0, |x: f64| x, &sizes, 1).is_err());
    }

    #[test]
    fn test_repeated_estimates() {
        let request = IntegrationRequest::new(1.0, 1.0, |x: f64| x)
            .unwrap()
            .with_sample_count(SampleCount::new(2000).unwrap());
        let results = repeated_estimates(&request, 16, 3).unwrap();
        assert_eq!(results.len(), 16);
        assert_eq!(results, repeated_estimates(&request, 16, 3).unwrap());

        let mae = mean_absolute_error(&results, 0.5).unwrap();
        // Standard error per estimate is 0.5 / sqrt(2000) ≈ 0.011.
        assert!(mae < 0.03, "mean absolute error {mae}");
        assert!(repeated_estimates(&request, 0, 3).is_err());
    }

    #[test]
    fn test_mean_absolute_error() {
        assert_eq!(mean_absolute_error(&[], 1.0), None);
        let r = |estimate| EstimationResult {
            estimate,
            under_curve_count: 0,
            sample_count: 1,
            rectangle_area: 1.0,
            ceiling_exceedances: 0,
        };
        assert_abs_diff_eq!(mean_absolute_error(&[r(0.5), r(1.5)], 1.0).unwrap(), 0.5);
    }
}
