//! Capped percentage calculation.
//!
//! This module computes a percentage of basic or gross salary, optionally
//! clamped between a minimum and a maximum amount, and authors the
//! equivalent formula for components whose caps must travel with them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::formula::Variable;
use crate::models::CalculationType;

use super::round_money;

/// Decimal places the rate is written with in generated formulas.
const FORMULA_RATE_PLACES: u32 = 4;

/// The salary a percentage is taken of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageBase {
    /// Basic salary (PCT_BASIC).
    Basic,
    /// Gross salary (PCT_GROSS).
    Gross,
}

impl PercentageBase {
    /// The calculation type a cap-less percentage component is stored as.
    pub fn calculation_type(&self) -> CalculationType {
        match self {
            PercentageBase::Basic => CalculationType::PctBasic,
            PercentageBase::Gross => CalculationType::PctGross,
        }
    }

    /// The formula variable for this base.
    pub fn variable(&self) -> Variable {
        match self {
            PercentageBase::Basic => Variable::Basic,
            PercentageBase::Gross => Variable::Gross,
        }
    }
}

/// Computes `base × pct / 100`, clamped by the optional caps and rounded to
/// currency precision.
///
/// # Arguments
///
/// * `base` - The salary the percentage is taken of
/// * `pct` - The percentage (5.5 means 5.5%)
/// * `min` - Optional floor
/// * `max` - Optional ceiling
///
/// # Errors
///
/// Returns `InvalidInput` when a cap is negative or `min` exceeds `max`, and `Overflow` when the
/// product exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::percentage;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// assert_eq!(percentage(dec("5000"), dec("5.5"), None, None).unwrap(), dec("275.00"));
/// assert_eq!(
///     percentage(dec("5000"), dec("5.5"), None, Some(dec("250"))).unwrap(),
///     dec("250.00")
/// );
/// ```
pub fn percentage(
    base: Decimal,
    pct: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> EngineResult<Decimal> {
    check_caps(min, max)?;

    let raw = base
        .checked_mul(pct)
        .ok_or_else(|| EngineError::overflow("percentage"))?
        / Decimal::ONE_HUNDRED;

    let clamped = match (min, max) {
        (Some(lo), Some(hi)) => raw.clamp(lo, hi),
        (None, Some(hi)) => raw.min(hi),
        (Some(lo), None) => raw.max(lo),
        (None, None) => raw,
    };

    Ok(round_money(clamped))
}

/// Writes the formula for a capped percentage.
///
/// Caps wrap the product as `max(min(x, max), min)`; absent caps are left out.
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::{PercentageBase, percentage_formula};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// let formula = percentage_formula(
///     PercentageBase::Basic,
///     dec("5.5"),
///     Some(dec("100")),
///     Some(dec("500")),
/// )
/// .unwrap();
/// assert_eq!(formula, "max(min(basic * 0.0550, 500), 100)");
/// ```
pub fn percentage_formula(
    base: PercentageBase,
    pct: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> EngineResult<String> {
    if pct.is_sign_negative() && !pct.is_zero() {
        return Err(EngineError::invalid_input("percentage", "must not be negative"));
    }
    check_caps(min, max)?;

    let mut rate = (pct / Decimal::ONE_HUNDRED).normalize();
    if rate.scale() < FORMULA_RATE_PLACES {
        rate.rescale(FORMULA_RATE_PLACES);
    }

    let mut formula = format!("{} * {}", base.variable().name(), rate);
    if let Some(hi) = max {
        formula = format!("min({}, {})", formula, hi.normalize());
    }
    if let Some(lo) = min {
        formula = format!("max({}, {})", formula, lo.normalize());
    }
    Ok(formula)
}

/// Caps must be non-negative; formula text has no unary minus.
fn check_caps(min: Option<Decimal>, max: Option<Decimal>) -> EngineResult<()> {
    for (field, cap) in [("min", min), ("max", max)] {
        if let Some(cap) = cap {
            if cap < Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    field,
                    format!("cap {} must not be negative", cap),
                ));
            }
        }
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(EngineError::invalid_input(
                "min",
                format!("minimum {} exceeds maximum {}", lo, hi),
            ));
        }
    }
    Ok(())
}
