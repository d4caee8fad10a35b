// elevmap_core/src/models/sensor/structured_light.rs

use serde::Deserialize;

use crate::error::ParameterError;
use crate::models::sensor::{check_non_negative, check_positive};

/// Noise model for structured-light depth sensors (Kinect-class devices).
///
/// Empirical depth-accuracy curve after Nguyen et al.: the normal (depth)
/// deviation is a constant term, a quadratic bowl around the device's
/// best-accuracy depth, and a power-law tail; the lateral deviation grows
/// linearly with depth.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredLightSensorModel {
    /// Depth deviation at the best-accuracy depth, in meters.
    pub normal_factor_a: f64,
    /// Quadratic growth away from the best-accuracy depth.
    pub normal_factor_b: f64,
    /// Best-accuracy depth of the device, in meters.
    pub normal_factor_c: f64,
    /// Power-law tail coefficient.
    pub normal_factor_d: f64,
    /// Power-law tail exponent.
    pub normal_factor_e: f64,
    /// Lateral error per meter of depth.
    pub lateral_factor: f64,
}

impl StructuredLightSensorModel {
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_positive("normal_factor_a", self.normal_factor_a)?;
        check_non_negative("normal_factor_b", self.normal_factor_b)?;
        check_non_negative("normal_factor_c", self.normal_factor_c)?;
        check_non_negative("normal_factor_d", self.normal_factor_d)?;
        check_non_negative("normal_factor_e", self.normal_factor_e)?;
        check_non_negative("lateral_factor", self.lateral_factor)
    }

    /// Intrinsic variance at the given depth along the optical axis.
    /// Increasing for depths beyond the best-accuracy depth.
    pub(crate) fn intrinsic_variance(&self, depth: f64) -> f64 {
        let offset = depth - self.normal_factor_c;
        let normal_deviation = self.normal_factor_a
            + self.normal_factor_b * offset * offset
            + self.normal_factor_d * depth.powf(self.normal_factor_e);
        let lateral_deviation = self.lateral_factor * depth;
        normal_deviation.powi(2) + lateral_deviation.powi(2)
    }
}
