//! Formula evaluation against a numeric context.
//!
//! Arithmetic is exact decimal arithmetic with checked operations, so a
//! formula either yields a value or a typed error; it never panics or
//! produces an infinity.

use rust_decimal::Decimal;

use crate::calculation::round_money;
use crate::error::{EngineError, EngineResult};
use crate::models::{EvaluationResult, NumericContext};

use super::ast::{BinaryOp, Condition, Expr, Function, Variable};

/// Evaluates a parsed formula.
///
/// # Examples
///
/// ```
/// use pay_component_engine::formula::{evaluate, parse};
/// use pay_component_engine::models::NumericContext;
/// use rust_decimal::Decimal;
///
/// let ast = parse("basic / 176 * 1.5").unwrap();
/// let ctx = NumericContext::new(Decimal::new(3520, 0), Decimal::new(4000, 0)).unwrap();
///
/// let result = evaluate(&ast, &ctx);
/// assert!(result.valid);
/// assert_eq!(result.value, Some(Decimal::new(30, 0)));
/// ```
pub fn evaluate(ast: &Expr, ctx: &NumericContext) -> EvaluationResult {
    eval(ast, ctx).into()
}

/// Evaluates a parsed formula, returning the decimal value or the error.
pub fn eval(expr: &Expr, ctx: &NumericContext) -> EngineResult<Decimal> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Variable(Variable::Basic) => Ok(ctx.basic),
        Expr::Variable(Variable::Gross) => Ok(ctx.gross),
        Expr::Call { function, args } => call(*function, args, ctx),
        Expr::Binary { op, left, right } => {
            let left = eval(left, ctx)?;
            let right = eval(right, ctx)?;
            apply(*op, left, right)
        }
        Expr::Conditional {
            test,
            then,
            otherwise,
        } => {
            // Only the chosen branch is evaluated.
            if holds(test, ctx)? {
                eval(then, ctx)
            } else {
                eval(otherwise, ctx)
            }
        }
    }
}

fn holds(condition: &Condition, ctx: &NumericContext) -> EngineResult<bool> {
    match condition {
        Condition::Truthy(value) => Ok(!eval(value, ctx)?.is_zero()),
        Condition::Compare { op, left, right } => {
            let left = eval(left, ctx)?;
            let right = eval(right, ctx)?;
            Ok(op.compare(left, right))
        }
    }
}

fn call(function: Function, args: &[Expr], ctx: &NumericContext) -> EngineResult<Decimal> {
    let values = args
        .iter()
        .map(|arg| eval(arg, ctx))
        .collect::<EngineResult<Vec<_>>>()?;

    match (function, values.as_slice()) {
        (Function::Min, [a, b]) => Ok((*a).min(*b)),
        (Function::Max, [a, b]) => Ok((*a).max(*b)),
        (Function::Round, [x]) => Ok(round_money(*x)),
        (Function::Abs, [x]) => Ok(x.abs()),
        _ => Err(EngineError::ArgumentCount {
            function: function.name().to_string(),
            expected: function.arity(),
            found: values.len(),
        }),
    }
}

fn apply(op: BinaryOp, left: Decimal, right: Decimal) -> EngineResult<Decimal> {
    match op {
        BinaryOp::Add => left
            .checked_add(right)
            .ok_or_else(|| EngineError::overflow("addition")),
        BinaryOp::Sub => left
            .checked_sub(right)
            .ok_or_else(|| EngineError::overflow("subtraction")),
        BinaryOp::Mul => left
            .checked_mul(right)
            .ok_or_else(|| EngineError::overflow("multiplication")),
        BinaryOp::Div => {
            if right.is_zero() {
                return Err(EngineError::DivisionByZero);
            }
            left.checked_div(right)
                .ok_or_else(|| EngineError::overflow("division"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formula::parse;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ctx(basic: &str, gross: &str) -> NumericContext {
        NumericContext::new(dec(basic), dec(gross)).unwrap()
    }

    fn run(formula: &str, basic: &str, gross: &str) -> EngineResult<Decimal> {
        eval(&parse(formula).unwrap(), &ctx(basic, gross))
    }

    #[test]
    fn test_variables_resolve_from_context() {
        assert_eq!(run("basic", "5000", "6500").unwrap(), dec("5000"));
        assert_eq!(run("gross", "5000", "6500").unwrap(), dec("6500"));
        assert_eq!(run("gross - basic", "5000", "6500").unwrap(), dec("1500"));
    }

    #[test]
    fn test_capped_percentage_formula_clamps_to_min() {
        let value = run("max(min(basic * 0.0550, 500), 100)", "200", "200").unwrap();
        assert_eq!(value, dec("100"));
    }

    #[test]
    fn test_capped_percentage_formula_clamps_to_max() {
        let value = run("max(min(basic * 0.0550, 500), 100)", "20000", "20000").unwrap();
        assert_eq!(value, dec("500"));
    }

    #[test]
    fn test_capped_percentage_formula_inside_caps() {
        let value = run("max(min(basic * 0.0550, 500), 100)", "5000", "5000").unwrap();
        assert_eq!(value, dec("275.00"));
    }

    #[test]
    fn test_overtime_formula() {
        assert_eq!(run("basic / 176 * 1.5", "3520", "3520").unwrap(), dec("30"));
    }

    #[test]
    fn test_decimal_arithmetic_is_exact() {
        assert_eq!(run("0.1 + 0.2", "0", "0").unwrap(), dec("0.3"));
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        assert_eq!(
            run("basic / 0", "5000", "5000"),
            Err(EngineError::DivisionByZero)
        );
        assert_eq!(
            run("basic / (gross - basic)", "5000", "5000"),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_division_by_zero_result_shape() {
        let result = evaluate(&parse("basic / 0").unwrap(), &ctx("1", "1"));
        assert!(!result.valid);
        assert_eq!(result.value, None);
        assert_eq!(result.error, Some(ErrorKind::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let formula = "79228162514264337593543950335 * 10";
        assert!(matches!(
            run(formula, "0", "0"),
            Err(EngineError::Overflow { .. })
        ));
    }

    #[test]
    fn test_round_is_half_up_to_two_places() {
        assert_eq!(run("round(2.345)", "0", "0").unwrap(), dec("2.35"));
        assert_eq!(run("round(2.344)", "0", "0").unwrap(), dec("2.34"));
        assert_eq!(run("round(basic / 3)", "100", "0").unwrap(), dec("33.33"));
    }

    #[test]
    fn test_round_negative_midpoint_goes_up() {
        assert_eq!(run("round(0 - 2.345)", "0", "0").unwrap(), dec("-2.34"));
        assert_eq!(run("round(basic - gross)", "1.005", "2.01").unwrap(), dec("-1.00"));
    }

    #[test]
    fn test_hand_built_call_with_wrong_arity_is_an_error() {
        let ast = Expr::Call {
            function: Function::Min,
            args: vec![Expr::Variable(Variable::Basic)],
        };
        let result = eval(&ast, &ctx("1", "1"));
        assert_eq!(
            result,
            Err(EngineError::ArgumentCount {
                function: "min".to_string(),
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(evaluate(&ast, &ctx("1", "1")).error, Some(ErrorKind::ArgumentCount));
    }

    #[test]
    fn test_abs() {
        assert_eq!(run("abs(basic - gross)", "100", "250").unwrap(), dec("150"));
    }

    #[test]
    fn test_conditional_picks_branch() {
        let formula = "basic * 0.1 if basic > 1000 else 50";
        assert_eq!(run(formula, "2000", "2000").unwrap(), dec("200.0"));
        assert_eq!(run(formula, "1000", "1000").unwrap(), dec("50"));
    }

    #[test]
    fn test_conditional_comparisons() {
        assert_eq!(run("1 if basic == gross else 0", "5", "5").unwrap(), dec("1"));
        assert_eq!(run("1 if basic != gross else 0", "5", "5").unwrap(), dec("0"));
        assert_eq!(run("1 if basic <= 5 else 0", "5", "5").unwrap(), dec("1"));
        assert_eq!(run("1 if basic >= 6 else 0", "5", "5").unwrap(), dec("0"));
        assert_eq!(run("1 if basic < 6 else 0", "5", "5").unwrap(), dec("1"));
    }

    #[test]
    fn test_truthy_condition() {
        assert_eq!(run("1 if gross - basic else 2", "5", "5").unwrap(), dec("2"));
        assert_eq!(run("1 if gross - basic else 2", "5", "6").unwrap(), dec("1"));
    }

    #[test]
    fn test_error_on_untaken_branch_is_not_reported() {
        let formula = "basic if basic > 0 else basic / 0";
        assert_eq!(run(formula, "100", "100").unwrap(), dec("100"));
        assert_eq!(run(formula, "0", "0"), Err(EngineError::DivisionByZero));
    }

    #[test]
    fn test_error_in_condition_is_reported() {
        assert_eq!(
            run("1 if basic / 0 > 1 else 2", "1", "1"),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let ast = parse("round(max(basic * 0.055, gross / 7) + 12.5)").unwrap();
        let context = ctx("4321.09", "5432.10");
        let first = evaluate(&ast, &context);
        for _ in 0..10 {
            assert_eq!(evaluate(&ast, &context), first);
        }
    }
}
