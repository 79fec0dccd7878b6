//! Overtime rate calculation.
//!
//! Overtime components pay an hourly-equivalent of basic salary times a
//! multiplier for every overtime hour. This module produces the per-hour
//! rate and the formula stored on the component; hour counts come from
//! time tracking and are applied by the caller.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Standard working hours in a monthly pay period.
pub const DEFAULT_STANDARD_HOURS: u32 = 176;

/// Computes `(basic / standard_hours) × multiplier`, the pay for one
/// overtime hour.
///
/// # Errors
///
/// Returns `InvalidInput` when `standard_hours` is zero or `multiplier` is
/// negative.
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::{DEFAULT_STANDARD_HOURS, overtime_rate};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = overtime_rate(
///     Decimal::from(3520),
///     Decimal::from_str("1.5").unwrap(),
///     DEFAULT_STANDARD_HOURS,
/// )
/// .unwrap();
/// assert_eq!(rate, Decimal::from(30));
/// ```
pub fn overtime_rate(
    basic: Decimal,
    multiplier: Decimal,
    standard_hours: u32,
) -> EngineResult<Decimal> {
    check_inputs(multiplier, standard_hours)?;

    let hourly = basic / Decimal::from(standard_hours);
    hourly
        .checked_mul(multiplier)
        .ok_or_else(|| EngineError::overflow("overtime rate"))
}

/// Writes the overtime formula, e.g. `basic / 176 * 1.5`.
pub fn overtime_formula(multiplier: Decimal, standard_hours: u32) -> EngineResult<String> {
    check_inputs(multiplier, standard_hours)?;
    Ok(format!(
        "basic / {} * {}",
        standard_hours,
        multiplier.normalize()
    ))
}

fn check_inputs(multiplier: Decimal, standard_hours: u32) -> EngineResult<()> {
    if standard_hours == 0 {
        return Err(EngineError::invalid_input(
            "standard_hours",
            "must be greater than zero",
        ));
    }
    if multiplier < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "multiplier",
            "must not be negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::evaluate_formula;
    use crate::models::NumericContext;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_time_and_a_half() {
        assert_eq!(
            overtime_rate(dec("3520"), dec("1.5"), 176).unwrap(),
            dec("30")
        );
    }

    #[test]
    fn test_double_time_custom_hours() {
        assert_eq!(
            overtime_rate(dec("4000"), dec("2"), 160).unwrap(),
            dec("50")
        );
    }

    #[test]
    fn test_zero_standard_hours_rejected() {
        let err = overtime_rate(dec("3520"), dec("1.5"), 0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidInput { ref field, .. } if field == "standard_hours"
        ));
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        assert!(overtime_rate(dec("3520"), dec("-1"), 176).is_err());
        assert!(overtime_formula(dec("-1"), 176).is_err());
    }

    #[test]
    fn test_formula_format() {
        assert_eq!(overtime_formula(dec("1.5"), 176).unwrap(), "basic / 176 * 1.5");
        assert_eq!(overtime_formula(dec("2.00"), 160).unwrap(), "basic / 160 * 2");
    }

    #[test]
    fn test_formula_evaluates_to_rate() {
        let formula = overtime_formula(dec("1.5"), DEFAULT_STANDARD_HOURS).unwrap();
        let ctx = NumericContext::new(dec("3520"), dec("4000")).unwrap();
        let result = evaluate_formula(&formula, &ctx);
        assert_eq!(result.value, Some(dec("30.00")));
    }

    #[test]
    fn test_fractional_rate_is_not_rounded() {
        let rate = overtime_rate(dec("1000"), dec("1.5"), 176).unwrap();
        assert!(rate > dec("8.52") && rate < dec("8.53"));
    }
}
