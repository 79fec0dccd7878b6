//! Configuration loading and management for the pay component engine.
//!
//! This module loads the engine settings (standard hours, special tax
//! rates) and the pay component catalogue from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use pay_component_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} components", config.components().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ComponentsConfig, EngineConfig, EngineMetadata, SpecialTaxRates};
