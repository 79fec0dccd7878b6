//! Tax and contribution classification.
//!
//! Maps a computed amount and its component's [`TaxTreatment`] onto the
//! deltas payroll processing accumulates: ordinary taxable income, the SSNIT
//! contribution base, and net pay.
//!
//! [`TaxTreatment`]: crate::models::TaxTreatment

use rust_decimal::Decimal;

use crate::config::SpecialTaxRates;
use crate::models::{ComponentType, PayComponent, TaxEffect};

/// Classifies an amount using the default special tax rates.
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::classify;
/// use pay_component_engine::models::{
///     CalculationType, ComponentType, PayComponent, TaxTreatment,
/// };
/// use rust_decimal::Decimal;
///
/// let mut overtime = PayComponent::new(
///     "OT",
///     "Overtime",
///     ComponentType::Earning,
///     CalculationType::Formula,
/// );
/// overtime.tax_treatment = TaxTreatment::overtime();
///
/// let effect = classify(&overtime, Decimal::from(300));
/// assert_eq!(effect.taxable_delta, Decimal::ZERO);
/// assert!(effect.special_tax_rate.is_some());
/// assert_eq!(effect.net_delta, Decimal::from(300));
/// ```
pub fn classify(component: &PayComponent, amount: Decimal) -> TaxEffect {
    classify_with_rates(component, amount, &SpecialTaxRates::default())
}

/// Classifies an amount with explicit special tax rates.
///
/// Precedence: overtime, then bonus (both taxed at a flat rate outside
/// ordinary income), then `is_taxable`. `reduces_taxable` then lowers taxable
/// income for deductions. SSNIT and net pay are signed by component type.
pub fn classify_with_rates(
    component: &PayComponent,
    amount: Decimal,
    rates: &SpecialTaxRates,
) -> TaxEffect {
    let treatment = &component.tax_treatment;
    let is_deduction = component.component_type == ComponentType::Deduction;

    // A deduction never adds to taxable income; `reduces_taxable` below is
    // its only effect on PAYE, so `is_taxable` is ignored for it.
    let (mut taxable_delta, special_tax_rate) = if treatment.is_overtime() {
        (Decimal::ZERO, Some(rates.overtime))
    } else if treatment.is_bonus() {
        (Decimal::ZERO, Some(rates.bonus))
    } else if treatment.is_taxable() && !is_deduction {
        (amount, None)
    } else {
        (Decimal::ZERO, None)
    };

    if treatment.reduces_taxable() && is_deduction {
        taxable_delta -= amount;
    }

    let ssnit_delta = if treatment.affects_ssnit() {
        match component.component_type {
            ComponentType::Earning => amount,
            ComponentType::Deduction => -amount,
            ComponentType::Employer => Decimal::ZERO,
        }
    } else {
        Decimal::ZERO
    };

    let net_delta = if is_deduction { -amount } else { amount };

    TaxEffect {
        taxable_delta,
        ssnit_delta,
        net_delta,
        special_tax_rate,
        payslip_visible: component.show_on_payslip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalculationType, TaxFlags, TaxTreatment};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn component(component_type: ComponentType, treatment: TaxTreatment) -> PayComponent {
        let mut component =
            PayComponent::new("TEST", "Test", component_type, CalculationType::Fixed);
        component.default_amount = Some(dec("100"));
        component.tax_treatment = treatment;
        component
    }

    #[test]
    fn test_overtime_uses_special_rate_and_skips_taxable() {
        let overtime = component(
            ComponentType::Earning,
            TaxTreatment::new(TaxFlags {
                is_overtime: true,
                is_taxable: true,
                ..TaxFlags::default()
            })
            .unwrap(),
        );
        let effect = classify(&overtime, dec("450.00"));
        assert_eq!(effect.taxable_delta, Decimal::ZERO);
        assert_eq!(effect.special_tax_rate, Some(SpecialTaxRates::default().overtime));
        assert_eq!(effect.net_delta, dec("450.00"));
    }

    #[test]
    fn test_bonus_uses_bonus_rate() {
        let bonus = component(ComponentType::Earning, TaxTreatment::bonus());
        let rates = SpecialTaxRates {
            overtime: dec("5"),
            bonus: dec("7.5"),
        };
        let effect = classify_with_rates(&bonus, dec("1000"), &rates);
        assert_eq!(effect.taxable_delta, Decimal::ZERO);
        assert_eq!(effect.special_tax_rate, Some(dec("7.5")));
    }

    #[test]
    fn test_taxable_earning_adds_to_taxable_income() {
        let housing = component(ComponentType::Earning, TaxTreatment::taxable());
        let effect = classify(&housing, dec("800"));
        assert_eq!(effect.taxable_delta, dec("800"));
        assert_eq!(effect.special_tax_rate, None);
        assert_eq!(effect.ssnit_delta, Decimal::ZERO);
    }

    #[test]
    fn test_non_taxable_earning() {
        let allowance = component(ComponentType::Earning, TaxTreatment::default());
        let effect = classify(&allowance, dec("200"));
        assert_eq!(effect.taxable_delta, Decimal::ZERO);
        assert_eq!(effect.net_delta, dec("200"));
    }

    #[test]
    fn test_pre_tax_deduction_reduces_taxable_income() {
        let pension = component(
            ComponentType::Deduction,
            TaxTreatment::default().with_reduces_taxable().with_ssnit(),
        );
        let effect = classify(&pension, dec("275"));
        assert_eq!(effect.taxable_delta, dec("-275"));
        assert_eq!(effect.ssnit_delta, dec("-275"));
        assert_eq!(effect.net_delta, dec("-275"));
    }

    #[test]
    fn test_reduces_taxable_ignored_for_earnings() {
        let earning = component(
            ComponentType::Earning,
            TaxTreatment::taxable().with_reduces_taxable(),
        );
        let effect = classify(&earning, dec("100"));
        assert_eq!(effect.taxable_delta, dec("100"));
    }

    #[test]
    fn test_taxable_flag_ignored_for_deductions() {
        let deduction = component(ComponentType::Deduction, TaxTreatment::taxable());
        let effect = classify(&deduction, dec("50"));
        assert_eq!(effect.taxable_delta, Decimal::ZERO);
        assert_eq!(effect.net_delta, dec("-50"));
    }

    #[test]
    fn test_ssnit_earning_adds_to_base() {
        let basic_adjustment = component(
            ComponentType::Earning,
            TaxTreatment::taxable().with_ssnit(),
        );
        let effect = classify(&basic_adjustment, dec("300"));
        assert_eq!(effect.ssnit_delta, dec("300"));
        assert_eq!(effect.taxable_delta, dec("300"));
    }

    #[test]
    fn test_employer_component_is_positive_and_outside_ssnit_base() {
        let employer = component(ComponentType::Employer, TaxTreatment::default().with_ssnit());
        let effect = classify(&employer, dec("650"));
        assert_eq!(effect.net_delta, dec("650"));
        assert_eq!(effect.ssnit_delta, Decimal::ZERO);
        assert_eq!(effect.taxable_delta, Decimal::ZERO);
    }

    #[test]
    fn test_payslip_visibility_follows_component() {
        let mut hidden = component(ComponentType::Employer, TaxTreatment::default());
        hidden.show_on_payslip = false;
        assert!(!classify(&hidden, dec("1")).payslip_visible);
        assert!(classify(&component(ComponentType::Earning, TaxTreatment::default()), dec("1")).payslip_visible);
    }
}
