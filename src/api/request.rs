//! Request types for the pay component engine API.
//!
//! `/formulas/validate` takes a [`FormulaValidationRequest`] and
//! `/strategies/author` a [`CalculationStrategy`] directly; only the
//! component run needs its own request shape.
//!
//! [`FormulaValidationRequest`]: crate::formula::FormulaValidationRequest
//! [`CalculationStrategy`]: crate::calculation::CalculationStrategy

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::NumericContext;

/// Request body for the `/components/compute` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The employee's basic salary for the period.
    pub basic: Decimal,
    /// The employee's gross salary for the period.
    pub gross: Decimal,
    /// Component codes to compute; the whole active catalogue when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<String>>,
}

impl ComputeRequest {
    /// Validates the salaries and builds the evaluation context.
    pub fn context(&self) -> EngineResult<NumericContext> {
        NumericContext::new(self.basic, self.gross)
    }
}
