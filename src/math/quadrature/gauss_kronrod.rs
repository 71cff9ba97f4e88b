//! Adaptive Gauss-Kronrod quadrature (7-point Gauss, 15-point Kronrod).
//!
//! Used as the reference value against which Monte Carlo estimates are
//! compared. The interval with the largest error estimate is bisected until
//! the summed error meets the tolerance or the subdivision limit is hit.
//! End points are never evaluated, which keeps integrable singularities and
//! functions like `sqrt` at 0 well behaved.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::math::monte_carlo::{Integrand, ReferenceIntegral};

/// Kronrod abscissae on `[0, 1]`; the negative half is symmetric.
/// Odd-numbered entries are the Kronrod extension, even ones the Gauss nodes.
const KRONROD_NODES: [f64; 8] = [
    0.0,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.586_087_235_467_691_130_294_144_838_258_730,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.991_455_371_120_812_639_206_854_697_526_329,
];

const KRONROD_WEIGHTS: [f64; 8] = [
    0.209_482_141_084_727_828_012_999_174_891_714,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.022_935_322_010_529_224_963_732_008_058_970,
];

/// Gauss weights for `KRONROD_NODES[0, 2, 4, 6]`.
const GAUSS_WEIGHTS: [f64; 4] = [
    0.417_959_183_673_469_387_755_102_040_816_327,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.129_484_966_168_869_693_270_611_432_679_082,
];

/// Tolerances and limits for [`GaussKronrod`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureConfig {
    /// Absolute error target
    pub abs_tolerance: f64,
    /// Relative error target
    pub rel_tolerance: f64,
    /// Maximum number of subintervals
    pub max_subdivisions: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: 1.49e-8,
            rel_tolerance: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

impl QuadratureConfig {
    /// Checks that at least one tolerance is positive and the limit is non-zero.
    pub fn validate(&self) -> Result<()> {
        let usable = |t: f64| t.is_finite() && t >= 0.0;
        if !usable(self.abs_tolerance) || !usable(self.rel_tolerance) {
            return Err(Error::invalid(
                "tolerance",
                "tolerances must be finite and non-negative",
            ));
        }
        if self.abs_tolerance == 0.0 && self.rel_tolerance == 0.0 {
            return Err(Error::invalid(
                "tolerance",
                "at least one tolerance must be positive",
            ));
        }
        if self.max_subdivisions == 0 {
            return Err(Error::invalid("max_subdivisions", "must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome of an adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    pub value: f64,
    /// Sum of the per-interval |Kronrod - Gauss| differences
    pub error_estimate: f64,
    pub evaluations: usize,
    pub subdivisions: usize,
    /// Whether the tolerance was met within the subdivision limit
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

fn apply_rule<F: Integrand + ?Sized>(f: &F, lower: f64, upper: f64) -> Segment {
    let center = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);

    let f_center = f.evaluate(center);
    let mut kronrod = KRONROD_WEIGHTS[0] * f_center;
    let mut gauss = GAUSS_WEIGHTS[0] * f_center;

    for i in 1..KRONROD_NODES.len() {
        let dx = half * KRONROD_NODES[i];
        let pair = f.evaluate(center - dx) + f.evaluate(center + dx);
        kronrod += KRONROD_WEIGHTS[i] * pair;
        if i % 2 == 0 {
            gauss += GAUSS_WEIGHTS[i / 2] * pair;
        }
    }

    Segment {
        lower,
        upper,
        value: half * kronrod,
        error: (half * (kronrod - gauss)).abs(),
    }
}

const EVALUATIONS_PER_SEGMENT: usize = 2 * KRONROD_NODES.len() - 1;

/// Globally adaptive G7/K15 integrator.
///
/// # Examples
///
/// ```
/// use mc_integral::GaussKronrod;
///
/// let quad = GaussKronrod::default();
/// let result = quad.integrate(&f64::sqrt, 0.0, 1.0).unwrap();
/// assert!((result.value - 2.0 / 3.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussKronrod {
    config: QuadratureConfig,
}

impl GaussKronrod {
    pub fn new(config: QuadratureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> QuadratureConfig {
        self.config
    }

    /// Integrates `f` over `[lower, upper]`. Reversed limits flip the sign.
    pub fn integrate<F: Integrand + ?Sized>(
        &self,
        f: &F,
        lower: f64,
        upper: f64,
    ) -> Result<QuadratureResult> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(Error::invalid(
                "limits",
                format!("integration limits must be finite, got [{lower}, {upper}]"),
            ));
        }
        if lower == upper {
            return Ok(QuadratureResult {
                value: 0.0,
                error_estimate: 0.0,
                evaluations: 0,
                subdivisions: 0,
                converged: true,
            });
        }
        if lower > upper {
            let flipped = self.integrate(f, upper, lower)?;
            return Ok(QuadratureResult {
                value: -flipped.value,
                ..flipped
            });
        }

        let mut segments = vec![apply_rule(f, lower, upper)];
        let mut evaluations = EVALUATIONS_PER_SEGMENT;

        loop {
            let value: f64 = segments.iter().map(|s| s.value).sum();
            let error: f64 = segments.iter().map(|s| s.error).sum();
            let target = self
                .config
                .abs_tolerance
                .max(self.config.rel_tolerance * value.abs());

            let converged = error <= target;
            if converged || segments.len() >= self.config.max_subdivisions {
                if !converged {
                    warn!(
                        "quadrature on [{}, {}] stopped at {} subintervals with error {} > {}",
                        lower,
                        upper,
                        segments.len(),
                        error,
                        target
                    );
                }
                debug!(
                    "quadrature on [{}, {}] = {} (error {}, {} evaluations)",
                    lower, upper, value, error, evaluations
                );
                return Ok(QuadratureResult {
                    value,
                    error_estimate: error,
                    evaluations,
                    subdivisions: segments.len(),
                    converged,
                });
            }

            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.error.total_cmp(&b.error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let segment = segments.swap_remove(worst);
            let mid = 0.5 * (segment.lower + segment.upper);
            segments.push(apply_rule(f, segment.lower, mid));
            segments.push(apply_rule(f, mid, segment.upper));
            evaluations += 2 * EVALUATIONS_PER_SEGMENT;
        }
    }
}

impl ReferenceIntegral for GaussKronrod {
    /// Adaptive value on `[lower, upper]`. Invalid limits give NaN, which the
    /// comparison then reports as a NaN difference rather than a silent zero.
    fn reference_integral<F: Integrand + ?Sized>(
        &self,
        function: &F,
        lower: f64,
        upper: f64,
    ) -> f64 {
        self.integrate(function, lower, upper)
            .map(|r| r.value)
            .unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{E, PI};

    #[test]
    fn test_polynomial_is_exact() {
        let result = GaussKronrod::default()
            .integrate(&|x: f64| x * x, 0.0, 1.0)
            .unwrap();
        assert_abs_diff_eq!(result.value, 1.0 / 3.0, epsilon = 1e-14);
        assert_eq!(result.subdivisions, 1);
        assert_eq!(result.evaluations, 15);
        assert!(result.converged);
    }

    #[test]
    fn test_sine_and_exponential() {
        let quad = GaussKronrod::default();
        let sine = quad.integrate(&f64::sin, 0.0, PI).unwrap();
        assert_abs_diff_eq!(sine.value, 2.0, epsilon = 1e-12);
        let exp = quad.integrate(&f64::exp, 0.0, 1.0).unwrap();
        assert_abs_diff_eq!(exp.value, E - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sqrt_needs_refinement_near_zero() {
        let result = GaussKronrod::default()
            .integrate(&f64::sqrt, 0.0, 5.55)
            .unwrap();
        assert_relative_eq!(
            result.value,
            2.0 / 3.0 * 5.55f64.powf(1.5),
            max_relative = 1e-8
        );
        assert!(result.subdivisions > 1);
        assert!(result.converged);
    }

    #[test]
    fn test_reversed_and_empty_limits() {
        let quad = GaussKronrod::default();
        let forward = quad.integrate(&|x: f64| x, 0.0, 2.0).unwrap();
        let backward = quad.integrate(&|x: f64| x, 2.0, 0.0).unwrap();
        assert_relative_eq!(backward.value, -forward.value);
        assert_eq!(quad.integrate(&|x: f64| x, 1.0, 1.0).unwrap().value, 0.0);
        assert!(quad.integrate(&|x: f64| x, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_subdivision_limit_reports_non_convergence() {
        let quad = GaussKronrod::new(QuadratureConfig {
            abs_tolerance: 1e-15,
            rel_tolerance: 0.0,
            max_subdivisions: 2,
        })
        .unwrap();
        let result = quad.integrate(&|x: f64| 1.0 / x.sqrt(), 0.0, 1.0).unwrap();
        assert!(!result.converged);
        assert_eq!(result.subdivisions, 2);
    }

    #[test]
    fn test_config_validation() {
        assert!(QuadratureConfig::default().validate().is_ok());
        let bad = [
            QuadratureConfig {
                abs_tolerance: -1.0,
                ..Default::default()
            },
            QuadratureConfig {
                abs_tolerance: 0.0,
                rel_tolerance: 0.0,
                ..Default::default()
            },
            QuadratureConfig {
                max_subdivisions: 0,
                ..Default::default()
            },
            QuadratureConfig {
                rel_tolerance: f64::NAN,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(GaussKronrod::new(config).is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_reference_integral_trait() {
        let quad = GaussKronrod::default();
        assert_relative_eq!(
            quad.reference_integral(&f64::sqrt, 0.0, 1.0),
            2.0 / 3.0,
            max_relative = 1e-8
        );
        assert!(quad.reference_integral(&f64::sqrt, 0.0, f64::NAN).is_nan());
    }
}
