//! The numeric context a component is computed against.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Basic and gross salary for one employee and pay period.
///
/// `gross >= basic` is expected but is left to the caller.
///
/// # Example
///
/// ```
/// use pay_component_engine::models::NumericContext;
/// use rust_decimal::Decimal;
///
/// let ctx = NumericContext::new(Decimal::new(5000, 0), Decimal::new(6500, 0)).unwrap();
/// assert_eq!(ctx.basic, Decimal::new(5000, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericContext {
    /// Basic salary for the period.
    pub basic: Decimal,
    /// Gross salary for the period.
    pub gross: Decimal,
}

impl NumericContext {
    /// Creates a context, rejecting negative salaries.
    pub fn new(basic: Decimal, gross: Decimal) -> EngineResult<Self> {
        let ctx = Self { basic, gross };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Checks that both salaries are non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.basic.is_sign_negative() && !self.basic.is_zero() {
            return Err(EngineError::invalid_input("basic", "must not be negative"));
        }
        if self.gross.is_sign_negative() && !self.gross.is_zero() {
            return Err(EngineError::invalid_input("gross", "must not be negative"));
        }
        Ok(())
    }
}
