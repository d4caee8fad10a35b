// elevmap_input/src/factory.rs

//! Builds the concrete sensor processor variant named by a source's
//! `sensor_processor` block. Construction and parameter validation are one
//! atomic step: either a fully validated processor comes back, or nothing.

use figment::value::Value;
use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use elevmap_core::models::sensor::{
    GeneralParameters, LaserSensorModel, PerfectSensorModel, SensorModel, SensorProcessor,
    StereoSensorModel, StructuredLightSensorModel,
};

use crate::error::ConfigError;
use crate::input::kind_name;

/// Mounting extrinsic of a sensor: the pose of the sensor frame in the
/// robot base frame. Identity when the block is omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MountingConfig {
    /// Sensor origin in the base frame, meters.
    #[serde(default)]
    pub translation: [f64; 3],
    /// Roll, pitch, yaw of the sensor frame, radians.
    #[serde(default)]
    pub rotation_rpy: [f64; 3],
}

impl MountingConfig {
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let [x, y, z] = self.translation;
        let [roll, pitch, yaw] = self.rotation_rpy;
        Isometry3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        )
    }
}

/// Dispatches over the closed variant set and reads the variant's
/// parameters from the block. An unknown tag is a hard configuration
/// error; there is no fallback variant.
pub fn build_sensor_processor(
    source_name: &str,
    block: &Value,
    general: &GeneralParameters,
) -> Result<SensorProcessor, ConfigError> {
    let table = block.as_dict().ok_or_else(|| ConfigError::WrongKind {
        name: source_name.to_string(),
        key: "sensor_processor",
        expected: "table",
        found: kind_name(block),
    })?;

    let type_value = table.get("type").ok_or_else(|| ConfigError::MissingKey {
        name: source_name.to_string(),
        key: "sensor_processor.type",
    })?;
    let sensor_type = type_value.as_str().ok_or_else(|| ConfigError::WrongKind {
        name: source_name.to_string(),
        key: "sensor_processor.type",
        expected: "string",
        found: kind_name(type_value),
    })?;

    let model = match sensor_type {
        "perfect" => SensorModel::Perfect(read_parameters::<PerfectSensorModel>(source_name, block)?),
        "laser" => SensorModel::Laser(read_parameters::<LaserSensorModel>(source_name, block)?),
        "stereo" => SensorModel::Stereo(read_parameters::<StereoSensorModel>(source_name, block)?),
        "structured_light" => SensorModel::StructuredLight(read_parameters::<
            StructuredLightSensorModel,
        >(source_name, block)?),
        _ => {
            return Err(ConfigError::UnknownSensorType {
                name: source_name.to_string(),
                sensor_type: sensor_type.to_string(),
            })
        }
    };
    model
        .validate()
        .map_err(|error| ConfigError::SensorParameters {
            name: source_name.to_string(),
            reason: error.to_string(),
        })?;

    let base_from_sensor = match table.get("mounting") {
        None => Isometry3::identity(),
        Some(value) => read_parameters::<MountingConfig>(source_name, value)?.to_isometry(),
    };

    Ok(SensorProcessor::new(general.clone(), base_from_sensor, model))
}

/// Deserializes a parameter record from the block. Missing required fields
/// and malformed values reject here, before any processor exists.
fn read_parameters<T: DeserializeOwned>(
    source_name: &str,
    block: &Value,
) -> Result<T, ConfigError> {
    block
        .deserialize()
        .map_err(|error| ConfigError::SensorParameters {
            name: source_name.to_string(),
            reason: error.to_string(),
        })
}
