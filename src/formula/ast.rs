//! Abstract syntax tree for pay component formulas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A variable a formula may read from the numeric context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// Basic salary.
    Basic,
    /// Gross salary.
    Gross,
}

impl Variable {
    /// Resolves an identifier to a variable.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "basic" => Some(Variable::Basic),
            "gross" => Some(Variable::Gross),
            _ => None,
        }
    }

    /// The identifier used in formulas.
    pub fn name(&self) -> &'static str {
        match self {
            Variable::Basic => "basic",
            Variable::Gross => "gross",
        }
    }
}

/// A whitelisted function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    /// Lesser of two values.
    Min,
    /// Greater of two values.
    Max,
    /// Round to currency precision, half away from zero.
    Round,
    /// Absolute value.
    Abs,
}

impl Function {
    /// Resolves an identifier to a function.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(Function::Min),
            "max" => Some(Function::Max),
            "round" => Some(Function::Round),
            "abs" => Some(Function::Abs),
            _ => None,
        }
    }

    /// The identifier used in formulas.
    pub fn name(&self) -> &'static str {
        match self {
            Function::Min => "min",
            Function::Max => "max",
            Function::Round => "round",
            Function::Abs => "abs",
        }
    }

    /// The exact number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Function::Min | Function::Max => 2,
            Function::Round | Function::Abs => 1,
        }
    }
}

/// An arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

/// A comparison operator used in conditional tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl CmpOp {
    /// Applies the comparison.
    pub fn compare(&self, left: Decimal, right: Decimal) -> bool {
        match self {
            CmpOp::Lt => left < right,
            CmpOp::Le => left <= right,
            CmpOp::Gt => left > right,
            CmpOp::Ge => left >= right,
            CmpOp::Eq => left == right,
            CmpOp::Ne => left != right,
        }
    }
}

/// The test of a conditional expression.
///
/// A bare value is true when it is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// `value` alone.
    Truthy(Expr),
    /// `left op right`.
    Compare {
        /// The comparison operator.
        op: CmpOp,
        /// Left operand.
        left: Expr,
        /// Right operand.
        right: Expr,
    },
}

/// A parsed formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A decimal literal.
    Number(Decimal),
    /// `basic` or `gross`.
    Variable(Variable),
    /// A whitelisted function call with arity already checked.
    Call {
        /// The function.
        function: Function,
        /// The arguments.
        args: Vec<Expr>,
    },
    /// Arithmetic on two operands.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `then if test else otherwise`.
    Conditional {
        /// The test.
        test: Box<Condition>,
        /// Value when the test holds.
        then: Box<Expr>,
        /// Value when it does not.
        otherwise: Box<Expr>,
    },
}
