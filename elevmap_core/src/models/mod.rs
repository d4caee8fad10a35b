// elevmap_core/src/models/mod.rs

pub mod sensor;
