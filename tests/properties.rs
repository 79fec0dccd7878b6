//! Property tests for formula evaluation and the amount calculators.

use proptest::prelude::*;
use rust_decimal::Decimal;

use pay_component_engine::calculation::{
    PercentageBase, amortization_schedule, percentage, percentage_formula, round_money,
};
use pay_component_engine::formula::{evaluate_formula, parse};
use pay_component_engine::models::{LoanAmortizationSpec, LoanMethod, NumericContext};

fn money() -> impl Strategy<Value = Decimal> {
    (0_i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn percent() -> impl Strategy<Value = Decimal> {
    (0_i64..10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn context() -> impl Strategy<Value = NumericContext> {
    (money(), money()).prop_map(|(basic, gross)| NumericContext { basic, gross })
}

const FORMULAS: &[&str] = &[
    "basic * 0.055",
    "max(min(basic * 0.0550, 500), 100)",
    "basic / 176 * 1.5",
    "round(gross * 0.02)",
    "gross - basic if gross > basic else 0",
    "abs(basic - gross) / (gross + 1)",
];

proptest! {
    #[test]
    fn prop_evaluation_is_deterministic(ctx in context(), index in 0..FORMULAS.len()) {
        let formula = FORMULAS[index];
        let first = evaluate_formula(formula, &ctx);
        let second = evaluate_formula(formula, &ctx);
        prop_assert_eq!(&first, &second, "formula={}", formula);
        prop_assert!(first.valid, "formula={} failed: {:?}", formula, first.message);
    }

    #[test]
    fn prop_round_money_is_idempotent(cents in any::<i64>(), scale in 0_u32..10) {
        let amount = Decimal::new(cents, scale);
        let once = round_money(amount);
        prop_assert_eq!(round_money(once), once);
        prop_assert_eq!(once.scale(), 2);
        prop_assert!((once - amount).abs() <= Decimal::new(5, 3));
    }

    #[test]
    fn prop_capped_percentage_stays_within_caps(
        base in money(),
        pct in percent(),
        a in money(),
        b in money(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let amount = percentage(base, pct, Some(lo), Some(hi)).unwrap();
        prop_assert!(amount >= round_money(lo), "{} < {}", amount, lo);
        prop_assert!(amount <= round_money(hi), "{} > {}", amount, hi);
    }

    #[test]
    fn prop_authored_percentage_formula_matches_direct_calculation(
        ctx in context(),
        pct in percent(),
        a in money(),
        b in money(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let formula = percentage_formula(PercentageBase::Gross, pct, Some(lo), Some(hi)).unwrap();

        let via_formula = evaluate_formula(&formula, &ctx).value.map(round_money);
        let direct = percentage(ctx.gross, pct, Some(lo), Some(hi)).unwrap();
        prop_assert_eq!(via_formula, Some(direct), "formula={}", formula);
    }

    #[test]
    fn prop_amortization_schedule_repays_exactly(
        principal in (100_i64..100_000_000).prop_map(|c| Decimal::new(c, 2)),
        annual_rate in (0_i64..3_600).prop_map(|r| Decimal::new(r, 2)),
        term_months in 1_u32..=60,
    ) {
        let spec = LoanAmortizationSpec {
            principal,
            annual_rate,
            term_months,
            method: LoanMethod::Amortization,
        };
        let rows = amortization_schedule(&spec).unwrap();

        prop_assert_eq!(rows.len(), term_months as usize);
        let repaid: Decimal = rows.iter().map(|r| r.principal).sum();
        prop_assert_eq!(repaid, principal);
        prop_assert!(rows.last().unwrap().closing_balance.is_zero());
        for row in &rows {
            prop_assert_eq!(row.payment, row.interest + row.principal);
        }
    }

    #[test]
    fn prop_parser_never_panics(input in "\\PC{0,40}") {
        let _ = parse(&input);
    }

    #[test]
    fn prop_parser_rejects_unknown_identifiers(name in "[a-z_]{3,12}") {
        prop_assume!(!["basic", "gross", "min", "max", "round", "abs", "if", "else"].contains(&name.as_str()));
        let formula = format!("basic * {}", name);
        prop_assert!(parse(&formula).is_err());
    }
}
