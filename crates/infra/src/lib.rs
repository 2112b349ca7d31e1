//! Infrastructure layer: storage adapters, config.

pub mod config;
pub mod in_memory;


pub use config::{ConfigError, DemoConfig};
pub use in_memory::InMemoryCatalog;
