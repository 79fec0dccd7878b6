//! Pay Component Calculation Engine
//!
//! This crate turns a pay component's configured calculation method (fixed
//! amount, percentage of basic or gross with optional caps, loan
//! repayment, overtime rate, or a free-form formula) plus an employee's
//! basic and gross salary into an exact monetary amount, together with the
//! tax and contribution classification payroll processing needs.
//!
//! Formulas are written in a small arithmetic language that is parsed into
//! an AST and interpreted with checked decimal arithmetic; nothing is ever
//! evaluated as host code.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod formula;
pub mod models;
