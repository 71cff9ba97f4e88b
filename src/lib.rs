pub mod error;
pub mod math;

pub use error::{Error, Result};
pub use math::monte_carlo::{
    compare, estimate_integral, relative_difference, Comparison, EstimationResult, Integrand,
    IntegrationRequest, ReferenceIntegral, SampleCount, SamplingConfig, DEFAULT_POINTS,
};
pub use math::quadrature::{GaussKronrod, QuadratureConfig, QuadratureResult};
