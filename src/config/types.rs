//! Configuration types for the pay component engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_STANDARD_HOURS;
use crate::models::PayComponent;

/// Metadata about the configured engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of the configuration (e.g. a company or
    /// payroll group).
    pub name: String,
    /// The version of the configuration.
    pub version: String,
}

/// Flat special tax rates, as percentages.
///
/// Overtime and bonus amounts are taxed at these rates instead of being
/// added to ordinary progressive taxable income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTaxRates {
    /// Flat rate for overtime, in percent.
    #[serde(rename = "overtime_rate")]
    pub overtime: Decimal,
    /// Flat rate for bonuses, in percent.
    #[serde(rename = "bonus_rate")]
    pub bonus: Decimal,
}

impl Default for SpecialTaxRates {
    fn default() -> Self {
        Self {
            overtime: Decimal::from(5),
            bonus: Decimal::from(5),
        }
    }
}

/// Engine settings from engine.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Configuration metadata.
    pub metadata: EngineMetadata,
    /// Hours in a standard pay period, used by overtime authoring.
    #[serde(default = "default_standard_hours")]
    pub standard_hours: u32,
    /// Special tax rates for overtime and bonuses.
    #[serde(default)]
    pub special_tax: SpecialTaxRates,
}

fn default_standard_hours() -> u32 {
    DEFAULT_STANDARD_HOURS
}

/// Component catalogue file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsConfig {
    /// The pay components, in file order.
    pub components: Vec<PayComponent>,
}
