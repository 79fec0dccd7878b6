//! Calculation dispatch.
//!
//! Selects the calculator for a component's `calculation_type` and returns
//! its contribution for one employee and period, rounded to currency
//! precision.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::formula::{eval, parse};
use crate::models::{CalculationType, EvaluationResult, NumericContext, PayComponent};

use super::{percentage, round_money};

/// Computes a component's amount.
///
/// FIXED returns `default_amount`; PCT_BASIC and PCT_GROSS take
/// `percentage_value` percent of the matching salary; FORMULA parses and
/// evaluates `formula`. Failures come back as an invalid
/// [`EvaluationResult`], never a panic.
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::compute_amount;
/// use pay_component_engine::models::{CalculationType, ComponentType, NumericContext, PayComponent};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut pension = PayComponent::new(
///     "PENSION",
///     "Pension",
///     ComponentType::Deduction,
///     CalculationType::PctBasic,
/// );
/// pension.percentage_value = Some(Decimal::from_str("5.5").unwrap());
///
/// let ctx = NumericContext::new(Decimal::from(5000), Decimal::from(6000)).unwrap();
/// let result = compute_amount(&pension, &ctx);
/// assert_eq!(result.value, Some(Decimal::from_str("275.00").unwrap()));
/// ```
pub fn compute_amount(component: &PayComponent, ctx: &NumericContext) -> EvaluationResult {
    try_compute_amount(component, ctx).into()
}

/// Like [`compute_amount`] but returns the error itself.
pub fn try_compute_amount(component: &PayComponent, ctx: &NumericContext) -> EngineResult<Decimal> {
    debug!(
        code = %component.code,
        calculation_type = ?component.calculation_type,
        "Computing component amount"
    );

    let raw = match component.calculation_type {
        CalculationType::Fixed => component
            .default_amount
            .ok_or_else(|| missing(component, "default_amount"))?,
        CalculationType::PctBasic => percentage(ctx.basic, percentage_value(component)?, None, None)?,
        CalculationType::PctGross => percentage(ctx.gross, percentage_value(component)?, None, None)?,
        CalculationType::Formula => {
            let formula = component
                .formula
                .as_deref()
                .ok_or_else(|| missing(component, "formula"))?;
            eval(&parse(formula)?, ctx)?
        }
    };

    Ok(round_money(raw))
}

fn percentage_value(component: &PayComponent) -> EngineResult<Decimal> {
    component
        .percentage_value
        .ok_or_else(|| missing(component, "percentage_value"))
}

fn missing(component: &PayComponent, field: &str) -> EngineError {
    EngineError::InvalidComponent {
        code: component.code.clone(),
        message: format!("{:?} component has no {}", component.calculation_type, field),
    }
}
