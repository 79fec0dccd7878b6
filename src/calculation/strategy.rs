//! Authoring-time calculation strategies.
//!
//! Authoring tools describe a component's calculation as a
//! [`CalculationStrategy`]. Authoring collapses it into the
//! `calculation_type` plus the one authoritative amount field that is
//! persisted on the component, after which the dispatcher no longer knows
//! which generator produced it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::formula::parse;
use crate::models::{CalculationType, LoanAmortizationSpec, PayComponent};

use super::{
    DEFAULT_STANDARD_HOURS, LoanPayment, PercentageBase, loan_payment, overtime_formula,
    percentage_formula, round_money,
};

/// How an author wants a component calculated.
///
/// # Example
///
/// ```
/// use pay_component_engine::calculation::CalculationStrategy;
/// use pay_component_engine::models::CalculationType;
///
/// let strategy: CalculationStrategy = serde_json::from_str(
///     r#"{"strategy": "overtime", "multiplier": "1.5"}"#,
/// )
/// .unwrap();
/// let authored = strategy.author().unwrap();
/// assert_eq!(authored.calculation_type, CalculationType::Formula);
/// assert_eq!(authored.formula.as_deref(), Some("basic / 176 * 1.5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CalculationStrategy {
    /// A flat amount.
    Fixed {
        /// The amount paid or deducted each period.
        amount: Decimal,
    },
    /// A percentage of basic or gross, optionally capped.
    Percentage {
        /// The salary the percentage is taken of.
        base: PercentageBase,
        /// Percent, e.g. 5.5.
        percentage: Decimal,
        /// Optional floor.
        #[serde(default)]
        min: Option<Decimal>,
        /// Optional ceiling.
        #[serde(default)]
        max: Option<Decimal>,
    },
    /// An overtime hourly rate.
    Overtime {
        /// Rate multiplier, e.g. 1.5.
        multiplier: Decimal,
        /// Hours in a standard period; the configured default when absent.
        #[serde(default)]
        standard_hours: Option<u32>,
    },
    /// A staff loan repayment.
    Loan(LoanAmortizationSpec),
    /// A hand-written formula.
    Custom {
        /// The formula text.
        formula: String,
    },
}

/// The persisted result of authoring a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredCalculation {
    /// The calculation type to store.
    pub calculation_type: CalculationType,
    /// Set for FIXED.
    pub default_amount: Option<Decimal>,
    /// Set for PCT_BASIC / PCT_GROSS.
    pub percentage_value: Option<Decimal>,
    /// Set for FORMULA.
    pub formula: Option<String>,
}

impl AuthoredCalculation {
    fn fixed(amount: Decimal) -> Self {
        Self {
            calculation_type: CalculationType::Fixed,
            default_amount: Some(amount),
            percentage_value: None,
            formula: None,
        }
    }

    fn percentage(calculation_type: CalculationType, pct: Decimal) -> Self {
        Self {
            calculation_type,
            default_amount: None,
            percentage_value: Some(pct),
            formula: None,
        }
    }

    fn formula(formula: String) -> Self {
        Self {
            calculation_type: CalculationType::Formula,
            default_amount: None,
            percentage_value: None,
            formula: Some(formula),
        }
    }

    /// Writes the calculation onto a component, clearing the fields that are
    /// not authoritative for the new type.
    pub fn apply_to(&self, component: &mut PayComponent) {
        component.calculation_type = self.calculation_type;
        component.default_amount = self.default_amount;
        component.percentage_value = self.percentage_value;
        component.formula = self.formula.clone();
    }
}

impl CalculationStrategy {
    /// Authors the strategy with a 176-hour standard period.
    pub fn author(&self) -> EngineResult<AuthoredCalculation> {
        self.author_with_standard_hours(DEFAULT_STANDARD_HOURS)
    }

    /// Authors the strategy, using `standard_hours` for overtime strategies
    /// that do not name their own.
    pub fn author_with_standard_hours(
        &self,
        standard_hours: u32,
    ) -> EngineResult<AuthoredCalculation> {
        let authored = match self {
            CalculationStrategy::Fixed { amount } => {
                if *amount < Decimal::ZERO {
                    return Err(EngineError::invalid_input("amount", "must not be negative"));
                }
                AuthoredCalculation::fixed(round_money(*amount))
            }
            CalculationStrategy::Percentage {
                base,
                percentage,
                min,
                max,
            } => {
                let formula = percentage_formula(*base, *percentage, *min, *max)?;
                if min.is_none() && max.is_none() {
                    AuthoredCalculation::percentage(base.calculation_type(), *percentage)
                } else {
                    AuthoredCalculation::formula(formula)
                }
            }
            CalculationStrategy::Overtime {
                multiplier,
                standard_hours: own_hours,
            } => AuthoredCalculation::formula(overtime_formula(
                *multiplier,
                own_hours.unwrap_or(standard_hours),
            )?),
            CalculationStrategy::Loan(spec) => match loan_payment(spec)? {
                LoanPayment::Fixed(amount) => AuthoredCalculation::fixed(amount),
                LoanPayment::Formula(formula) => AuthoredCalculation::formula(formula),
            },
            CalculationStrategy::Custom { formula } => {
                parse(formula)?;
                AuthoredCalculation::formula(formula.trim().to_string())
            }
        };

        debug!(
            calculation_type = ?authored.calculation_type,
            "Authored calculation strategy"
        );
        Ok(authored)
    }
}
