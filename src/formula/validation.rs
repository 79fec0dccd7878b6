//! Formula validation for authoring tools.
//!
//! A candidate formula is parsed and evaluated against sample inputs before
//! a component is saved.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_money;
use crate::models::NumericContext;

use super::{eval, parse};

/// Request to check a formula against sample salaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaValidationRequest {
    /// The candidate formula.
    pub formula: String,
    /// Sample basic salary.
    pub test_basic: Decimal,
    /// Sample gross salary.
    pub test_gross: Decimal,
}

/// Outcome of a formula validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaValidationResponse {
    /// True when the formula parsed and evaluated.
    pub valid: bool,
    /// The sample result, rounded to currency precision.
    pub result: Option<Decimal>,
    /// The error message when invalid.
    pub error: Option<String>,
}

impl FormulaValidationResponse {
    fn rejected(message: String) -> Self {
        Self {
            valid: false,
            result: None,
            error: Some(message),
        }
    }
}

/// Parses `request.formula` and evaluates it against the sample salaries.
///
/// # Examples
///
/// ```
/// use pay_component_engine::formula::{FormulaValidationRequest, validate_formula};
/// use rust_decimal::Decimal;
///
/// let response = validate_formula(&FormulaValidationRequest {
///     formula: "basic * 0.1".to_string(),
///     test_basic: Decimal::new(5000, 0),
///     test_gross: Decimal::new(6000, 0),
/// });
/// assert!(response.valid);
/// assert_eq!(response.result, Some(Decimal::new(50000, 2)));
/// ```
pub fn validate_formula(request: &FormulaValidationRequest) -> FormulaValidationResponse {
    let ctx = NumericContext {
        basic: request.test_basic,
        gross: request.test_gross,
    };
    if let Err(err) = ctx.validate() {
        return FormulaValidationResponse::rejected(err.to_string());
    }

    let outcome = parse(&request.formula).and_then(|ast| eval(&ast, &ctx));
    match outcome {
        Ok(value) => FormulaValidationResponse {
            valid: true,
            result: Some(round_money(value)),
            error: None,
        },
        Err(err) => FormulaValidationResponse::rejected(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(formula: &str, basic: &str, gross: &str) -> FormulaValidationRequest {
        FormulaValidationRequest {
            formula: formula.to_string(),
            test_basic: dec(basic),
            test_gross: dec(gross),
        }
    }

    #[test]
    fn test_valid_formula_returns_rounded_result() {
        let response = validate_formula(&request("basic / 3", "100", "100"));
        assert!(response.valid);
        assert_eq!(response.result, Some(dec("33.33")));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let response = validate_formula(&request("basic * (2", "100", "100"));
        assert!(!response.valid);
        assert_eq!(response.result, None);
        assert!(response.error.unwrap().contains("unbalanced parentheses"));
    }

    #[test]
    fn test_division_by_zero_is_reported() {
        let response = validate_formula(&request("basic / 0", "100", "100"));
        assert!(!response.valid);
        assert_eq!(response.error.as_deref(), Some("Division by zero"));
    }

    #[test]
    fn test_very_long_formula_is_reported() {
        let formula = vec!["1"; 100_000].join("+");
        let response = validate_formula(&request(&formula, "100", "100"));
        assert!(!response.valid);
        assert_eq!(response.result, None);
        assert!(response.error.unwrap().contains("more than 256 operators"));
    }

    #[test]
    fn test_negative_sample_rejected() {
        let response = validate_formula(&request("basic", "-1", "100"));
        assert!(!response.valid);
        assert!(response.error.unwrap().contains("basic"));
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let request: FormulaValidationRequest = serde_json::from_str(
            r#"{"formula": "gross * 0.05", "test_basic": "1000", "test_gross": "1200"}"#,
        )
        .unwrap();
        let response = validate_formula(&request);
        assert_eq!(response.result, Some(dec("60.00")));
    }
}
