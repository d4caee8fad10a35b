// elevmap_core/src/error.rs

use thiserror::Error;

/// Failure of a single variance computation.
///
/// These are per-call errors: a malformed input batch does not poison the
/// processor, the next cloud is processed normally.
#[derive(Debug, Error, PartialEq)]
pub enum MeasurementError {
    #[error("cannot compute variances for an empty point cloud")]
    EmptyPointCloud,

    #[error("robot pose covariance is invalid: {reason}")]
    InvalidPoseCovariance { reason: &'static str },

    #[error("computed variance for point {index} is not finite")]
    NonFiniteVariance { index: usize },
}

/// A variant-specific sensor parameter outside its domain.
///
/// Raised at configuration time only; a processor whose parameters passed
/// validation cannot produce this error later.
#[derive(Debug, Error, PartialEq)]
#[error("parameter '{name}' must be {constraint}, got {value}")]
pub struct ParameterError {
    pub name: &'static str,
    pub constraint: &'static str,
    pub value: f64,
}
