// elevmap_input/src/error.rs

use thiserror::Error;

/// Configuration-time failures of an input source description.
///
/// Every variant names the offending source so log lines stay actionable
/// when a pipeline configures many inputs at once. None of these are fatal
/// to the process: a misconfigured source is disabled, never defaulted.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("input source '{name}' must be specified as a table, but is {found}")]
    NotATable { name: String, found: &'static str },

    #[error("could not configure input source '{name}' because no '{key}' was given")]
    MissingKey { name: String, key: &'static str },

    #[error(
        "could not configure input source '{name}' because '{key}' has the wrong type: \
         expected {expected}, found {found}"
    )]
    WrongKind {
        name: String,
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("input source '{name}': queue_size must be a non-negative integer, got {value}")]
    InvalidQueueSize { name: String, value: i64 },

    #[error("input source '{name}': the sensor type '{sensor_type}' is not available")]
    UnknownSensorType { name: String, sensor_type: String },

    #[error("input source '{name}': invalid sensor processor parameters: {reason}")]
    SensorParameters { name: String, reason: String },

    #[error("input sources tried to subscribe to '{topic}' multiple times ('{name}' dropped)")]
    DuplicateTopic { name: String, topic: String },

    #[error("failed to load input source configuration: {reason}")]
    LoadFailed { reason: String },
}
