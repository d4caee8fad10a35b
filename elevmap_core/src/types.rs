// elevmap_core/src/types.rs

use nalgebra::{DVector, Matrix6};

// --- Core Type Aliases ---

/// Covariance over the robot's 6-DOF pose at the capture time of a scan.
/// Rows/columns 0..2 are translation, 3..5 rotation. Must be symmetric with
/// a non-negative diagonal.
pub type PoseCovariance = Matrix6<f64>;

/// Per-point variance estimates. Index `i` is the variance for point `i` of
/// the cloud the vector was computed from.
pub type VarianceVector = DVector<f64>;
