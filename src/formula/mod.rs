//! The pay component formula language.
//!
//! Formulas are data, not code: a fixed grammar of decimal literals, the
//! variables `basic` and `gross`, the operators `+ - * /`, the functions
//! `min`, `max`, `round` and `abs`, and `value if test else other`
//! conditionals. Strings are parsed into an [`Expr`] tree and interpreted by
//! [`evaluate`]; nothing outside the grammar can execute.
//!
//! # Example
//!
//! ```
//! use pay_component_engine::formula::evaluate_formula;
//! use pay_component_engine::models::NumericContext;
//! use rust_decimal::Decimal;
//!
//! let ctx = NumericContext::new(Decimal::new(200, 0), Decimal::new(200, 0)).unwrap();
//! let result = evaluate_formula("max(min(basic * 0.0550, 500), 100)", &ctx);
//! assert_eq!(result.value, Some(Decimal::new(100, 0)));
//! ```

mod ast;
mod evaluator;
mod lexer;
mod parser;
mod validation;

pub use ast::{BinaryOp, CmpOp, Condition, Expr, Function, Variable};
pub use evaluator::{eval, evaluate};
pub use parser::{MAX_NESTING_DEPTH, parse};
pub use validation::{FormulaValidationRequest, FormulaValidationResponse, validate_formula};

use crate::models::{EvaluationResult, NumericContext};

/// Parses and evaluates a formula in one step.
pub fn evaluate_formula(formula: &str, ctx: &NumericContext) -> EvaluationResult {
    parse(formula).and_then(|ast| eval(&ast, ctx)).into()
}
