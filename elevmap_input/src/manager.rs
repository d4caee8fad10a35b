// elevmap_input/src/manager.rs

//! Configures the full set of input sources of a pipeline and keeps the
//! ones that validated.

use std::collections::HashSet;
use std::path::Path;

use figment::providers::{Format, Toml};
use figment::value::Value;
use figment::Figment;
use tracing::{debug, error, warn};

use elevmap_core::models::sensor::GeneralParameters;

use crate::error::ConfigError;
use crate::input::{kind_name, InputSource};
use crate::topics::TopicResolver;

/// The configured input sources of one pipeline.
#[derive(Debug, Default)]
pub struct InputSourceManager {
    sources: Vec<InputSource>,
}

impl InputSourceManager {
    /// Configures one source per entry of the given table (source name ->
    /// description).
    ///
    /// A source that fails validation is disabled, not defaulted: it is
    /// skipped and its error collected, while the remaining sources still
    /// configure. Duplicate subscribed topics are kept only once; later
    /// duplicates are dropped and reported.
    pub fn from_value(
        value: &Value,
        general: &GeneralParameters,
        resolver: &dyn TopicResolver,
    ) -> (Self, Vec<ConfigError>) {
        let mut sources: Vec<InputSource> = Vec::new();
        let mut errors: Vec<ConfigError> = Vec::new();

        let Some(table) = value.as_dict() else {
            errors.push(ConfigError::NotATable {
                name: "input_sources".to_string(),
                found: kind_name(value),
            });
            return (Self { sources }, errors);
        };
        if table.is_empty() {
            warn!("list of input sources is empty, not subscribing to any inputs");
        }

        let mut subscribed_topics: HashSet<String> = HashSet::new();
        for (name, description) in table {
            match InputSource::configure(name, description, general) {
                Ok(source) => {
                    let topic = source.subscribed_topic(resolver);
                    if subscribed_topics.insert(topic.clone()) {
                        debug!(
                            source = %source.name(),
                            data_type = %source.data_type(),
                            topic = %topic,
                            queue_size = source.queue_size(),
                            publish_on_update = source.publish_on_update(),
                            processor = source.sensor_processor().model().type_tag(),
                            "configured input source"
                        );
                        sources.push(source);
                    } else {
                        warn!(
                            "the input sources specification tried to subscribe to {} \
                             multiple times, only subscribing once",
                            topic
                        );
                        errors.push(ConfigError::DuplicateTopic {
                            name: name.clone(),
                            topic,
                        });
                    }
                }
                Err(config_error) => {
                    error!("{config_error}");
                    errors.push(config_error);
                }
            }
        }

        (Self { sources }, errors)
    }

    pub fn sources(&self) -> &[InputSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Loads the `input_sources` table from a TOML file.
pub fn load_sources(path: impl AsRef<Path>) -> Result<Value, ConfigError> {
    Figment::new()
        .merge(Toml::file(path.as_ref()))
        .extract_inner::<Value>("input_sources")
        .map_err(|error| ConfigError::LoadFailed {
            reason: error.to_string(),
        })
}
