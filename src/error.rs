//! Error types for the Pay Component Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while authoring or computing
//! pay components.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for the Pay Component Calculation Engine.
///
/// All fallible operations in the engine return this error type. Errors are
/// values: nothing in the engine panics on malformed formulas or inputs.
///
/// # Example
///
/// ```
/// use pay_component_engine::error::EngineError;
///
/// let error = EngineError::ParseError {
///     position: 6,
///     message: "unexpected end of input".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Formula parse error at position 6: unexpected end of input"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A formula string could not be parsed.
    #[error("Formula parse error at position {position}: {message}")]
    ParseError {
        /// Byte offset into the formula where the problem was detected.
        position: usize,
        /// A description of the parse error.
        message: String,
    },

    /// A formula divided by zero during evaluation.
    #[error("Division by zero")]
    DivisionByZero,

    /// An arithmetic operation exceeded the decimal range.
    #[error("Arithmetic overflow in {operation}")]
    Overflow {
        /// The operation that overflowed.
        operation: String,
    },

    /// An expression tree called a function with the wrong number of
    /// arguments. Parsed formulas never do; hand-built trees can.
    #[error("{function}() expects {expected} argument(s), got {found}")]
    ArgumentCount {
        /// The function name.
        function: String,
        /// The function's arity.
        expected: usize,
        /// The number of arguments supplied.
        found: usize,
    },

    /// An authoring input (loan terms, overtime hours, percentage) was invalid.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pay component definition failed save-time validation.
    #[error("Invalid pay component '{code}': {message}")]
    InvalidComponent {
        /// The component code.
        code: String,
        /// A description of the problem.
        message: String,
    },

    /// No pay component with the given code exists in the catalogue.
    #[error("Pay component not found: {code}")]
    ComponentNotFound {
        /// The code that was not found.
        code: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns the serialisable tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ParseError { .. } => ErrorKind::ParseError,
            EngineError::DivisionByZero => ErrorKind::DivisionByZero,
            EngineError::Overflow { .. } => ErrorKind::Overflow,
            EngineError::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            EngineError::InvalidInput { .. } => ErrorKind::InvalidInput,
            EngineError::InvalidComponent { .. } => ErrorKind::InvalidComponent,
            EngineError::ComponentNotFound { .. } => ErrorKind::ComponentNotFound,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Config
            }
        }
    }

    pub(crate) fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn overflow(operation: impl Into<String>) -> Self {
        EngineError::Overflow {
            operation: operation.into(),
        }
    }
}

/// Coarse error classification carried on [`crate::models::EvaluationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed formula.
    ParseError,
    /// Division by zero at evaluation time.
    DivisionByZero,
    /// Decimal range exceeded.
    Overflow,
    /// Function applied to the wrong number of arguments.
    ArgumentCount,
    /// Invalid authoring input.
    InvalidInput,
    /// Component failed validation.
    InvalidComponent,
    /// Unknown component code.
    ComponentNotFound,
    /// Configuration could not be loaded.
    Config,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
