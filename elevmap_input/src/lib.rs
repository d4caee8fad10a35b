// elevmap_input/src/lib.rs

//! Declarative input-source configuration for the elevation mapping
//! pipeline. Each input source binds a topic and queue policy to the
//! sensor processor that models its measurement uncertainty; descriptions
//! are validated here and the matching processor variant is built by the
//! factory.

pub mod error;
pub mod factory;
pub mod input;
pub mod manager;
pub mod topics;

pub use error::ConfigError;
pub use input::InputSource;
pub use manager::InputSourceManager;
pub use topics::{NamespaceResolver, TopicResolver};
