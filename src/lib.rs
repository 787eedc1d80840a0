pub mod config;
pub mod entity;
pub mod resolve;
pub mod utils;

pub use config::MappingConfig;
pub use entity::{field, lookup, lookup_all, require, FieldPath, Record};
pub use resolve::{resolve, try_resolve, Absence, OptionalExt};
pub use utils::error::{IntegrationError, Result};
