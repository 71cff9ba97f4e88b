//! Error type shared by the estimator, the comparison helper and the quadrature oracle.

use thiserror::Error;

/// Result type for every fallible operation in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to the caller.
///
/// Validation failures are raised before any random number is drawn, so a
/// rejected call performs no partial work.
///
/// # Examples
/// ```
/// use mc_integral::{relative_difference, Error};
///
/// let err = relative_difference(0.0, 1.5).unwrap_err();
/// assert!(matches!(err, Error::DivisionUndefined { .. }));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A call parameter is outside its documented domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        name: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The relative difference was requested against a zero reference.
    #[error("relative difference is undefined for a zero reference (estimate = {estimate})")]
    DivisionUndefined {
        /// The estimate that could not be compared
        estimate: f64,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
