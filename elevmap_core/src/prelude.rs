// elevmap_core/src/prelude.rs

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::messages::{Point, PointCloud};
pub use crate::types::{PoseCovariance, VarianceVector};

// --- Sensor Models and Their Configuration ---
pub use crate::models::sensor::{GeneralParameters, SensorModel, SensorProcessor};
pub use crate::models::sensor::{
    LaserSensorModel, PerfectSensorModel, StereoSensorModel, StructuredLightSensorModel,
};

// --- Errors ---
pub use crate::error::{MeasurementError, ParameterError};
