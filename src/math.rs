pub mod monte_carlo;
pub mod quadrature;

pub use monte_carlo::{
    compare, convergence_sweep, estimate_integral, relative_difference, repeated_estimates,
    Comparison, EstimationResult, Integrand, IntegrationRequest, PointSampler, ReferenceIntegral,
    SampleCount, SamplePoint, SamplingConfig,
};

pub use quadrature::{GaussKronrod, QuadratureConfig, QuadratureResult};
