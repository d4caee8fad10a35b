// elevmap_core/src/models/sensor/laser.rs

use serde::Deserialize;

use crate::error::ParameterError;
use crate::models::sensor::{check_non_negative, check_positive};

/// Noise model for laser range sensors.
///
/// Beam dispersion model: a fixed accuracy term from the beam footprint at
/// the exit aperture plus a term growing linearly with the measured
/// distance as the beam widens.
#[derive(Debug, Clone, Deserialize)]
pub struct LaserSensorModel {
    /// Beam radius at the sensor, in meters.
    pub min_radius: f64,
    /// Constant part of the beam dispersion, in meters.
    pub beam_constant: f64,
    /// Dispersion growth per meter of measured distance, in radians.
    pub beam_angle: f64,
}

impl LaserSensorModel {
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_positive("min_radius", self.min_radius)?;
        check_non_negative("beam_constant", self.beam_constant)?;
        check_positive("beam_angle", self.beam_angle)
    }

    /// Intrinsic variance at the given measurement distance. Strictly
    /// increasing in the distance.
    pub(crate) fn intrinsic_variance(&self, distance: f64) -> f64 {
        let dispersion = self.beam_constant + self.beam_angle * distance;
        self.min_radius.powi(2) + dispersion.powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LaserSensorModel {
        LaserSensorModel {
            min_radius: 0.02,
            beam_constant: 0.01,
            beam_angle: 0.005,
        }
    }

    #[test]
    fn valid_parameters_pass() {
        assert!(model().validate().is_ok());
    }

    #[test]
    fn non_finite_beam_angle_is_rejected() {
        let mut bad = model();
        bad.beam_angle = f64::NAN;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn negative_beam_constant_is_rejected() {
        let mut bad = model();
        bad.beam_constant = -0.1;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn variance_is_strictly_increasing_in_range() {
        let model = model();
        let mut previous = model.intrinsic_variance(0.0);
        for range in [0.5, 1.0, 2.0, 5.0, 10.0, 30.0] {
            let variance = model.intrinsic_variance(range);
            assert!(variance > previous);
            previous = variance;
        }
    }

    #[test]
    fn variance_at_zero_range_is_the_aperture_term() {
        let model = model();
        let expected = 0.02_f64.powi(2) + 0.01_f64.powi(2);
        assert!((model.intrinsic_variance(0.0) - expected).abs() < 1e-15);
    }
}
