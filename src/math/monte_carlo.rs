//! Hit-or-miss Monte Carlo integration.
//!
//! Points are drawn uniformly inside the bounding rectangle
//! `[0, domain_bound] x [0, rect_height]`; the fraction landing on or below
//! the curve, scaled by the rectangle area, estimates the integral of a
//! non-negative function over `[0, domain_bound]`.
//!
//! # Examples
//!
//! ```rust
//! use mc_integral::math::monte_carlo::IntegrationRequest;
//!
//! let request = IntegrationRequest::new(1.0, 1.0, f64::sqrt)
//!     .unwrap()
//!     .with_seed(7);
//! let result = request.estimate();
//! assert!(result.estimate >= 0.0 && result.estimate <= 1.0);
//! ```

pub mod comparison;
pub mod hit_or_miss;
pub mod sampler;
pub mod sweep;


pub use comparison::{compare, relative_difference, Comparison, ReferenceIntegral};
pub use hit_or_miss::{
    estimate_integral, EstimationResult, Integrand, IntegrationRequest, SampleCount,
    SamplingConfig, DEFAULT_POINTS,
};
pub use sampler::{seeded_rng, PointSampler, SamplePoint};
pub use sweep::{convergence_sweep, mean_absolute_error, repeated_estimates};
