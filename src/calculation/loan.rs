//! Loan amortization.
//!
//! Staff loans are turned into a recurring deduction when the component is
//! authored. Three methods are supported:
//!
//! - `AMORTIZATION`: the standard equal-installment payment.
//! - `REDUCING_BALANCE`: a formula for interest on the outstanding balance,
//!   which varies per period and is tracked outside the engine.
//! - `REDUCING_BALANCE_EQUAL_PRINCIPAL`: equal principal plus an average
//!   interest estimate, fixed once at authoring time.
//!
//! The last two methods deliberately differ in fidelity: one yields a live
//! per-balance formula, the other a single averaged amount.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{LoanAmortizationSpec, LoanMethod};

use super::round_money;

/// Decimal places the monthly rate is written with in reducing-balance formulas.
const FORMULA_RATE_PLACES: u32 = 8;

/// The authored repayment for a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LoanPayment {
    /// A flat monthly amount, stored as a FIXED `default_amount`.
    Fixed(Decimal),
    /// A formula, stored as a FORMULA component.
    Formula(String),
}

impl LoanPayment {
    /// The payment as formula text; a fixed payment becomes a plain literal.
    pub fn to_formula(&self) -> String {
        match self {
            LoanPayment::Fixed(amount) => amount.to_string(),
            LoanPayment::Formula(formula) => formula.clone(),
        }
    }
}

/// One period of a repayment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based period number.
    pub period: u32,
    /// Balance before the payment.
    pub opening_balance: Decimal,
    /// Total paid this period.
    pub payment: Decimal,
    /// Interest portion.
    pub interest: Decimal,
    /// Principal portion.
    pub principal: Decimal,
    /// Balance after the payment.
    pub closing_balance: Decimal,
}

/// Computes the authored repayment for a loan.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive principal, a negative rate or a
/// term outside 1 to [`MAX_TERM_MONTHS`], and `Overflow` if the payment
/// leaves the decimal range.
///
/// [`MAX_TERM_MONTHS`]: crate::models::MAX_TERM_MONTHS
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::{LoanPayment, loan_payment};
/// use pay_component_engine::models::{LoanAmortizationSpec, LoanMethod};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let spec = LoanAmortizationSpec {
///     principal: Decimal::from(10000),
///     annual_rate: Decimal::from(12),
///     term_months: 12,
///     method: LoanMethod::Amortization,
/// };
/// assert_eq!(
///     loan_payment(&spec).unwrap(),
///     LoanPayment::Fixed(Decimal::from_str("888.49").unwrap())
/// );
/// ```
pub fn loan_payment(spec: &LoanAmortizationSpec) -> EngineResult<LoanPayment> {
    spec.validate()?;

    match spec.method {
        LoanMethod::Amortization => amortized_payment(spec).map(round_money).map(LoanPayment::Fixed),
        LoanMethod::ReducingBalance => Ok(LoanPayment::Formula(reducing_balance_formula(spec))),
        LoanMethod::ReducingBalanceEqualPrincipal => {
            let monthly_principal = spec.principal / Decimal::from(spec.term_months);
            let average_interest = (spec.principal / Decimal::TWO)
                .checked_mul(spec.monthly_rate())
                .ok_or_else(|| EngineError::overflow("average interest"))?;
            monthly_principal
                .checked_add(average_interest)
                .map(|payment| LoanPayment::Fixed(round_money(payment)))
                .ok_or_else(|| EngineError::overflow("equal principal payment"))
        }
    }
}

/// Builds the period-by-period schedule for a loan.
///
/// `AMORTIZATION` pays the rounded installment each month;
/// `REDUCING_BALANCE_EQUAL_PRINCIPAL` pays equal principal plus interest on
/// the true declining balance. Interest is rounded per period and the last
/// period absorbs the remaining balance, so the schedule always closes at
/// exactly zero. `REDUCING_BALANCE` has no schedule of its own because its
/// balance is tracked outside the engine.
pub fn amortization_schedule(spec: &LoanAmortizationSpec) -> EngineResult<Vec<ScheduleRow>> {
    spec.validate()?;

    let rate = spec.monthly_rate();
    let installment = match spec.method {
        LoanMethod::Amortization => Some(round_money(amortized_payment(spec)?)),
        LoanMethod::ReducingBalanceEqualPrincipal => None,
        LoanMethod::ReducingBalance => {
            return Err(EngineError::invalid_input(
                "method",
                "reducing balance loans have no fixed schedule",
            ));
        }
    };
    let equal_principal = round_money(spec.principal / Decimal::from(spec.term_months));

    let mut rows = Vec::with_capacity(spec.term_months as usize);
    let mut balance = spec.principal;

    for period in 1..=spec.term_months {
        let interest = round_money(
            balance
                .checked_mul(rate)
                .ok_or_else(|| EngineError::overflow("schedule interest"))?,
        );
        let last = period == spec.term_months;

        let principal = match installment {
            _ if last => balance,
            Some(payment) => (payment - interest).min(balance),
            None => equal_principal.min(balance),
        };
        let closing_balance = balance - principal;
        let payment = interest
            .checked_add(principal)
            .ok_or_else(|| EngineError::overflow("schedule payment"))?;

        rows.push(ScheduleRow {
            period,
            opening_balance: balance,
            payment,
            interest,
            principal,
            closing_balance,
        });
        balance = closing_balance;
    }

    Ok(rows)
}

/// `principal × r(1+r)^n / ((1+r)^n − 1)`, or `principal / n` at zero rate.
fn amortized_payment(spec: &LoanAmortizationSpec) -> EngineResult<Decimal> {
    let rate = spec.monthly_rate();
    let months = Decimal::from(spec.term_months);

    if rate.is_zero() {
        return Ok(spec.principal / months);
    }

    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(spec.term_months))
        .ok_or_else(|| EngineError::overflow("compounding factor"))?;

    let numerator = spec
        .principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| EngineError::overflow("amortization payment"))?;
    numerator
        .checked_div(factor - Decimal::ONE)
        .ok_or_else(|| EngineError::overflow("amortization payment"))
}

fn reducing_balance_formula(spec: &LoanAmortizationSpec) -> String {
    let rate = spec.monthly_rate().round_dp(FORMULA_RATE_PLACES).normalize();
    format!("{} * {}", spec.principal.normalize(), rate)
}
