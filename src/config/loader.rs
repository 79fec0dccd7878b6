//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! settings and the pay component catalogue from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::PayComponent;

use super::types::{ComponentsConfig, EngineConfig, EngineMetadata, SpecialTaxRates};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml      # Metadata, standard hours, special tax rates
/// └── components.yaml  # The pay component catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use pay_component_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let housing = loader.get_component("HOUSING").unwrap();
/// println!("{} is {:?}", housing.name, housing.calculation_type);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    engine: EngineConfig,
    components: Vec<PayComponent>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML,
    /// if any component fails validation, or if two components share a
    /// code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pay_component_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), pay_component_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineConfig>(&path.join("engine.yaml"))?;
        let catalogue = Self::load_yaml::<ComponentsConfig>(&path.join("components.yaml"))?;

        let loader = Self::from_parts(engine, catalogue.components)?;
        info!(
            path = %path.display(),
            name = %loader.engine.metadata.name,
            components = loader.components.len(),
            "Loaded engine configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from already-parsed parts, applying the same
    /// validation as [`ConfigLoader::load`].
    pub fn from_parts(engine: EngineConfig, components: Vec<PayComponent>) -> EngineResult<Self> {
        if engine.standard_hours == 0 {
            return Err(EngineError::invalid_input(
                "standard_hours",
                "must be greater than zero",
            ));
        }

        let mut seen = HashSet::new();
        for component in &components {
            component.validate()?;
            if !seen.insert(component.code.as_str()) {
                return Err(EngineError::InvalidComponent {
                    code: component.code.clone(),
                    message: "duplicate component code".to_string(),
                });
            }
        }

        Ok(Self { engine, components })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.engine.metadata
    }

    /// Returns the configured special tax rates.
    pub fn special_tax(&self) -> &SpecialTaxRates {
        &self.engine.special_tax
    }

    /// Returns every component in the catalogue, in file order.
    pub fn components(&self) -> &[PayComponent] {
        &self.components
    }

    /// Gets a component by its code.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pay_component_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let pension = loader.get_component("PENSION")?;
    /// println!("{}", pension.name);
    /// # Ok::<(), pay_component_engine::error::EngineError>(())
    /// ```
    pub fn get_component(&self, code: &str) -> EngineResult<&PayComponent> {
        self.components
            .iter()
            .find(|c| c.code == code)
            .ok_or_else(|| EngineError::ComponentNotFound {
                code: code.to_string(),
            })
    }
}
