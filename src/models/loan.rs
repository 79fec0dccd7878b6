//! Loan amortization inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest loan term accepted, in months.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// The repayment method for a staff loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanMethod {
    /// Equal total installment every month.
    Amortization,
    /// Interest only, charged on the outstanding balance.
    ReducingBalance,
    /// Equal principal plus an average interest estimate.
    ReducingBalanceEqualPrincipal,
}

/// A loan to be turned into a recurring deduction at authoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAmortizationSpec {
    /// Amount borrowed. Must be positive.
    pub principal: Decimal,
    /// Annual interest rate in percent. Must not be negative.
    pub annual_rate: Decimal,
    /// Number of monthly installments, from 1 to [`MAX_TERM_MONTHS`].
    pub term_months: u32,
    /// Repayment method.
    pub method: LoanMethod,
}

impl LoanAmortizationSpec {
    /// Checks principal, rate and term.
    pub fn validate(&self) -> EngineResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "principal",
                "must be greater than zero",
            ));
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "annual_rate",
                "must not be negative",
            ));
        }
        if self.term_months == 0 {
            return Err(EngineError::invalid_input(
                "term_months",
                "must be at least 1",
            ));
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(EngineError::invalid_input(
                "term_months",
                format!("must not exceed {}", MAX_TERM_MONTHS),
            ));
        }
        Ok(())
    }

    /// Monthly interest rate as a fraction (`annual_rate / 100 / 12`).
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate / Decimal::ONE_HUNDRED / Decimal::from(12)
    }
}
