// elevmap_core/src/models/sensor/stereo.rs

use serde::Deserialize;

use crate::error::ParameterError;
use crate::models::sensor::{check_non_negative, check_positive};

/// Noise model for stereo camera pairs.
///
/// Depth is triangulated from disparity, so its error grows with the square
/// of the depth: sigma_z = z^2 * sigma_d / (f * b). The lateral error grows
/// linearly with depth through the pixel footprint.
#[derive(Debug, Clone, Deserialize)]
pub struct StereoSensorModel {
    /// Focal length of the rectified pair, in pixels.
    pub focal_length: f64,
    /// Stereo baseline, in meters.
    pub baseline: f64,
    /// Disparity matching uncertainty, in pixels.
    pub disparity_std: f64,
    /// Lateral error per meter of depth.
    pub lateral_factor: f64,
}

impl StereoSensorModel {
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_positive("focal_length", self.focal_length)?;
        check_positive("baseline", self.baseline)?;
        check_positive("disparity_std", self.disparity_std)?;
        check_non_negative("lateral_factor", self.lateral_factor)
    }

    /// Intrinsic variance at the given depth along the optical axis.
    pub(crate) fn intrinsic_variance(&self, depth: f64) -> f64 {
        let depth_deviation = depth * depth * self.disparity_std / (self.focal_length * self.baseline);
        let lateral_deviation = self.lateral_factor * depth;
        depth_deviation.powi(2) + lateral_deviation.powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> StereoSensorModel {
        StereoSensorModel {
            focal_length: 700.0,
            baseline: 0.12,
            disparity_std: 0.5,
            lateral_factor: 0.01,
        }
    }

    #[test]
    fn valid_parameters_pass() {
        assert!(model().validate().is_ok());
    }

    #[test]
    fn zero_baseline_is_rejected() {
        let mut bad = model();
        bad.baseline = 0.0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn variance_is_strictly_increasing_in_depth() {
        let model = model();
        let mut previous = model.intrinsic_variance(0.3);
        for depth in [0.5, 1.0, 2.0, 4.0, 8.0] {
            let variance = model.intrinsic_variance(depth);
            assert!(variance > previous);
            previous = variance;
        }
    }

    #[test]
    fn depth_term_dominates_at_long_range() {
        // Doubling a large depth should far more than double the variance.
        let model = model();
        let near = model.intrinsic_variance(5.0);
        let far = model.intrinsic_variance(10.0);
        assert!(far > 4.0 * near);
    }
}
