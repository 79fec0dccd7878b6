//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Minor-unit precision of the payroll currency.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds to currency precision, half up, and fixes the scale at two places
/// so `500` renders as `500.00`.
///
/// Ties go toward positive infinity for both signs: `2.345` becomes `2.35`
/// and `-2.345` becomes `-2.34`.
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round_money(Decimal::from_str("-2.345").unwrap()).to_string(), "-2.34");
/// assert_eq!(round_money(Decimal::from(500)).to_string(), "500.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let strategy = if amount.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    let mut rounded = amount.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, strategy);
    rounded.rescale(CURRENCY_DECIMAL_PLACES);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("888.4878867")), dec("888.49"));
    }

    #[test]
    fn test_negative_midpoint_rounds_up() {
        assert_eq!(round_money(dec("-0.125")), dec("-0.12"));
        assert_eq!(round_money(dec("-2.345")), dec("-2.34"));
    }

    #[test]
    fn test_negative_values_off_midpoint_round_to_nearest() {
        assert_eq!(round_money(dec("-2.346")), dec("-2.35"));
        assert_eq!(round_money(dec("-2.344")), dec("-2.34"));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_money(dec("33.3333")), dec("33.33"));
    }

    #[test]
    fn test_scale_is_two() {
        assert_eq!(round_money(dec("100")).to_string(), "100.00");
        assert_eq!(round_money(dec("27.5")).to_string(), "27.50");
        assert_eq!(round_money(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let once = round_money(dec("1234.5678"));
        assert_eq!(round_money(once), once);
    }
}
