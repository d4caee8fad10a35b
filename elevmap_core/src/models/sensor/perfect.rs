// elevmap_core/src/models/sensor/perfect.rs

use serde::Deserialize;

use crate::error::ParameterError;
use crate::models::sensor::check_positive;

/// Noise model for an idealized sensor, used for simulation and
/// ground-truth inputs. Every point gets the same small variance so the
/// downstream fusion step still has something to weigh against.
#[derive(Debug, Clone, Deserialize)]
pub struct PerfectSensorModel {
    /// Constant variance assigned to every point.
    #[serde(default = "default_min_variance")]
    pub min_variance: f64,
}

fn default_min_variance() -> f64 {
    1e-6
}

impl Default for PerfectSensorModel {
    fn default() -> Self {
        Self {
            min_variance: default_min_variance(),
        }
    }
}

impl PerfectSensorModel {
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_positive("min_variance", self.min_variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_floor_is_valid() {
        assert!(PerfectSensorModel::default().validate().is_ok());
    }

    #[test]
    fn zero_floor_is_rejected() {
        let model = PerfectSensorModel { min_variance: 0.0 };
        assert!(model.validate().is_err());
    }
}
