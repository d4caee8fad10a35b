// elevmap_core/src/models/sensor/mod.rs

pub mod laser;
pub mod perfect;
pub mod stereo;
pub mod structured_light;

use nalgebra::{Isometry3, Matrix3, RowVector3};

use crate::error::{MeasurementError, ParameterError};
use crate::messages::{Point, PointCloud};
use crate::types::{PoseCovariance, VarianceVector};

pub use laser::LaserSensorModel;
pub use perfect::PerfectSensorModel;
pub use stereo::StereoSensorModel;
pub use structured_light::StructuredLightSensorModel;

/// Numerical floor for the non-ideal sensor models. A variance of exactly
/// zero would cancel the Kalman-style fusion step downstream.
pub const MIN_VARIANCE: f64 = 1e-9;

// =========================================================================
// == Shared Configuration ==
// =========================================================================

/// Sensor-independent configuration, shared by every sensor processor.
/// Owned by the enclosing pipeline and cloned into each processor at
/// configuration time.
#[derive(Debug, Clone)]
pub struct GeneralParameters {
    /// Frame of the robot base, the body the pose covariance refers to.
    pub robot_base_frame_id: String,
    /// Frame of the elevation map the variances are fused into.
    pub map_frame_id: String,
    /// Points closer to the sensor origin than this are dropped by `filter`.
    pub min_range: f64,
    /// Points farther from the sensor origin than this are dropped by `filter`.
    pub max_range: f64,
}

impl GeneralParameters {
    pub fn new(robot_base_frame_id: impl Into<String>, map_frame_id: impl Into<String>) -> Self {
        Self {
            robot_base_frame_id: robot_base_frame_id.into(),
            map_frame_id: map_frame_id.into(),
            min_range: 0.0,
            max_range: f64::INFINITY,
        }
    }

    pub fn with_range(mut self, min_range: f64, max_range: f64) -> Self {
        self.min_range = min_range;
        self.max_range = max_range;
        self
    }
}

// =========================================================================
// == Sensor Model Variants ==
// =========================================================================

/// The closed set of per-sensor noise models.
///
/// One variant per sensor family; dispatch is an exhaustive `match`, so a
/// new family cannot be added without the factory learning about it.
#[derive(Debug, Clone)]
pub enum SensorModel {
    Perfect(PerfectSensorModel),
    Laser(LaserSensorModel),
    Stereo(StereoSensorModel),
    StructuredLight(StructuredLightSensorModel),
}

impl SensorModel {
    /// The configuration tag this variant is constructed from.
    pub fn type_tag(&self) -> &'static str {
        match self {
            SensorModel::Perfect(_) => "perfect",
            SensorModel::Laser(_) => "laser",
            SensorModel::Stereo(_) => "stereo",
            SensorModel::StructuredLight(_) => "structured_light",
        }
    }

    /// Verifies every parameter of the variant. Part of the one-shot
    /// configuration step; parameters are never re-checked per call.
    pub fn validate(&self) -> Result<(), ParameterError> {
        match self {
            SensorModel::Perfect(model) => model.validate(),
            SensorModel::Laser(model) => model.validate(),
            SensorModel::Stereo(model) => model.validate(),
            SensorModel::StructuredLight(model) => model.validate(),
        }
    }

    /// The sensor-intrinsic height variance for one point, before the
    /// pose-uncertainty contribution is added.
    fn intrinsic_variance(&self, point: &Point) -> f64 {
        match self {
            SensorModel::Perfect(model) => model.min_variance,
            // Rangefinder noise scales with the full measurement distance.
            SensorModel::Laser(model) => model.intrinsic_variance(point.position.coords.norm()),
            // Disparity-based sensors degrade with depth along the optical axis.
            SensorModel::Stereo(model) => model.intrinsic_variance(point.position.z),
            SensorModel::StructuredLight(model) => model.intrinsic_variance(point.position.z),
        }
    }
}

// =========================================================================
// == Sensor Processor ==
// =========================================================================

/// A configured measurement-uncertainty model for one input source.
///
/// Built once by the factory at pipeline startup and read-only afterwards:
/// `compute_variances` takes `&self` and keeps no scratch state, so one
/// processor may serve concurrent calls on distinct clouds.
#[derive(Debug, Clone)]
pub struct SensorProcessor {
    general: GeneralParameters,
    /// Pose of the sensor frame in the robot base frame (mounting extrinsic).
    base_from_sensor: Isometry3<f64>,
    model: SensorModel,
}

impl SensorProcessor {
    pub fn new(
        general: GeneralParameters,
        base_from_sensor: Isometry3<f64>,
        model: SensorModel,
    ) -> Self {
        Self {
            general,
            base_from_sensor,
            model,
        }
    }

    pub fn general(&self) -> &GeneralParameters {
        &self.general
    }

    pub fn model(&self) -> &SensorModel {
        &self.model
    }

    /// Drops points whose range from the sensor origin falls outside the
    /// accepted `[min_range, max_range]` window. Order of the surviving
    /// points is preserved.
    pub fn filter(&self, point_cloud: &PointCloud) -> PointCloud {
        let points = point_cloud
            .points
            .iter()
            .filter(|point| {
                let range = point.position.coords.norm();
                range >= self.general.min_range && range <= self.general.max_range
            })
            .copied()
            .collect();

        PointCloud {
            frame_id: point_cloud.frame_id.clone(),
            timestamp: point_cloud.timestamp,
            points,
        }
    }

    /// Computes the height variance of every point in the cloud from the
    /// sensor's intrinsic noise model and the robot pose covariance.
    ///
    /// Pure function of the two inputs and the processor's configuration:
    /// identical inputs yield identical outputs. The returned vector has
    /// exactly one entry per input point, every entry finite and positive.
    pub fn compute_variances(
        &self,
        point_cloud: &PointCloud,
        robot_pose_covariance: &PoseCovariance,
    ) -> Result<VarianceVector, MeasurementError> {
        if point_cloud.is_empty() {
            return Err(MeasurementError::EmptyPointCloud);
        }
        validate_pose_covariance(robot_pose_covariance)?;

        let variances = match &self.model {
            // The idealized sensor reports its floor for every point and
            // ignores the pose uncertainty beyond the shape check above.
            SensorModel::Perfect(model) => {
                VarianceVector::from_element(point_cloud.len(), model.min_variance)
            }
            model => {
                // Height direction in the map frame (P).
                let height_projection = RowVector3::new(0.0, 0.0, 1.0);

                // Rotational block of the pose covariance (Sigma_q).
                let rotation_covariance: Matrix3<f64> =
                    robot_pose_covariance.fixed_view::<3, 3>(3, 3).into_owned();

                let mut variances = VarianceVector::zeros(point_cloud.len());
                for (i, point) in point_cloud.points.iter().enumerate() {
                    // Lever arm of the point about the base origin.
                    let lever_arm = self.base_from_sensor * point.position;

                    // Rotation Jacobian (J_q): how base attitude errors move
                    // the point's height, linearized about the level pose.
                    let rotation_jacobian = height_projection * lever_arm.coords.cross_matrix();

                    // Error propagation law: J_q * Sigma_q * J_q^T.
                    let pose_variance = (rotation_jacobian
                        * rotation_covariance
                        * rotation_jacobian.transpose())[(0, 0)];

                    let variance =
                        (model.intrinsic_variance(point) + pose_variance).max(MIN_VARIANCE);
                    if !variance.is_finite() {
                        return Err(MeasurementError::NonFiniteVariance { index: i });
                    }
                    variances[i] = variance;
                }
                variances
            }
        };

        Ok(variances)
    }
}

/// Rejects covariance matrices that would corrupt the propagation: any
/// non-finite entry, a negative diagonal entry, or asymmetry beyond the
/// tolerance expected from transport rounding.
fn validate_pose_covariance(covariance: &PoseCovariance) -> Result<(), MeasurementError> {
    if covariance.iter().any(|entry| !entry.is_finite()) {
        return Err(MeasurementError::InvalidPoseCovariance {
            reason: "matrix contains a non-finite entry",
        });
    }
    if (0..6).any(|i| covariance[(i, i)] < 0.0) {
        return Err(MeasurementError::InvalidPoseCovariance {
            reason: "diagonal contains a negative entry",
        });
    }

    let tolerance = 1e-9 * covariance.amax().max(1.0);
    for i in 0..6 {
        for j in (i + 1)..6 {
            if (covariance[(i, j)] - covariance[(j, i)]).abs() > tolerance {
                return Err(MeasurementError::InvalidPoseCovariance {
                    reason: "matrix is not symmetric",
                });
            }
        }
    }
    Ok(())
}

// --- Parameter domain helpers used by the variant models ---

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError {
            name,
            constraint: "finite and positive",
            value,
        })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError {
            name,
            constraint: "finite and non-negative",
            value,
        })
    }
}
