pub mod gauss_kronrod;

pub use gauss_kronrod::{GaussKronrod, QuadratureConfig, QuadratureResult};
