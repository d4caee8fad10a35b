// elevmap_input/src/input.rs

//! One configured data channel: identity, topic, queue policy and the
//! sensor processor that models its uncertainty.

use figment::value::{Dict, Num, Value};
use serde::de::DeserializeOwned;

use elevmap_core::models::sensor::{GeneralParameters, SensorProcessor};

use crate::error::ConfigError;
use crate::factory;
use crate::topics::TopicResolver;

/// The kinds a required description key may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    String,
    Integer,
    Boolean,
    Table,
}

impl Kind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Table => "table",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => matches!(value, Value::String(..)),
            Kind::Integer => matches!(value, Value::Num(_, num) if is_integer(num)),
            Kind::Boolean => matches!(value, Value::Bool(..)),
            Kind::Table => matches!(value, Value::Dict(..)),
        }
    }
}

/// Required keys of an input source description, in declaration order. The
/// first offending key determines the reported error.
const REQUIRED_MEMBERS: [(&str, Kind); 5] = [
    ("type", Kind::String),
    ("topic", Kind::String),
    ("queue_size", Kind::Integer),
    ("publish_on_update", Kind::Boolean),
    ("sensor_processor", Kind::Table),
];

fn is_integer(num: &Num) -> bool {
    !matches!(num, Num::F32(_) | Num::F64(_))
}

/// Human-readable kind of a configuration value, for error messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(..) => "string",
        Value::Char(..) => "character",
        Value::Bool(..) => "boolean",
        Value::Num(_, num) if is_integer(num) => "integer",
        Value::Num(..) => "floating-point number",
        Value::Empty(..) => "empty",
        Value::Dict(..) => "table",
        Value::Array(..) => "array",
    }
}

/// An input source feeds sensor data into the elevation mapping callbacks.
/// It holds the declarative channel description together with the sensor
/// processor that turns the channel's point clouds into variance estimates.
///
/// Values of this type only exist fully configured: `configure` validates
/// the complete description before constructing anything, so there is no
/// half-configured state to observe.
#[derive(Debug)]
pub struct InputSource {
    name: String,
    data_type: String,
    topic: String,
    queue_size: u32,
    publish_on_update: bool,
    sensor_processor: SensorProcessor,
}

impl InputSource {
    /// Validates `description` and builds the source and its sensor
    /// processor in one atomic step.
    ///
    /// Checks run in declaration order over the required keys; for each key
    /// absence is reported before a kind mismatch, and the first failing
    /// key wins.
    pub fn configure(
        name: &str,
        description: &Value,
        general: &GeneralParameters,
    ) -> Result<Self, ConfigError> {
        let table = description.as_dict().ok_or_else(|| ConfigError::NotATable {
            name: name.to_string(),
            found: kind_name(description),
        })?;

        // Configuration guards: every required key must exist with the
        // declared kind before any value is committed.
        for (key, kind) in REQUIRED_MEMBERS {
            let value = table.get(key).ok_or_else(|| ConfigError::MissingKey {
                name: name.to_string(),
                key,
            })?;
            if !kind.matches(value) {
                return Err(ConfigError::WrongKind {
                    name: name.to_string(),
                    key,
                    expected: kind.name(),
                    found: kind_name(value),
                });
            }
        }

        let data_type: String = committed_key(name, table, "type", Kind::String)?;
        let topic: String = committed_key(name, table, "topic", Kind::String)?;
        let raw_queue_size: i64 = committed_key(name, table, "queue_size", Kind::Integer)?;
        let queue_size =
            u32::try_from(raw_queue_size).map_err(|_| ConfigError::InvalidQueueSize {
                name: name.to_string(),
                value: raw_queue_size,
            })?;
        let publish_on_update: bool =
            committed_key(name, table, "publish_on_update", Kind::Boolean)?;

        // The nested block was guarded as a table above.
        let sensor_processor = factory::build_sensor_processor(
            name,
            &table["sensor_processor"],
            general,
        )?;

        Ok(Self {
            name: name.to_string(),
            data_type,
            topic,
            queue_size,
            publish_on_update,
            sensor_processor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared data type of this source. Free-form, logged only.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// The unqualified topic name as configured.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn queue_size(&self) -> u32 {
        self.queue_size
    }

    pub fn publish_on_update(&self) -> bool {
        self.publish_on_update
    }

    pub fn sensor_processor(&self) -> &SensorProcessor {
        &self.sensor_processor
    }

    /// The topic this source subscribes to, in its fully-qualified runtime
    /// form. Resolution is delegated to the transport collaborator.
    pub fn subscribed_topic(&self, resolver: &dyn TopicResolver) -> String {
        resolver.resolve(&self.topic)
    }
}

/// Extracts a key whose presence and kind were already guarded. Kept as a
/// fallible path so a figment regression surfaces as an error instead of a
/// silently defaulted value.
fn committed_key<T: DeserializeOwned>(
    name: &str,
    table: &Dict,
    key: &'static str,
    kind: Kind,
) -> Result<T, ConfigError> {
    table[key].deserialize().map_err(|_| ConfigError::WrongKind {
        name: name.to_string(),
        key,
        expected: kind.name(),
        found: kind_name(&table[key]),
    })
}
