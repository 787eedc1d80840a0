pub mod mapping_config;

pub use mapping_config::{EntityConfig, MappingConfig};
