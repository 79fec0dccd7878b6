//! Core data models for the Pay Component Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod component;
mod context;
mod loan;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, ComponentLine, ComponentRun, EvaluationResult, RunTotals,
    TaxEffect,
};
pub use component::{CalculationType, ComponentType, PayComponent, TaxFlags, TaxTreatment};
pub use context::NumericContext;
pub use loan::{LoanAmortizationSpec, LoanMethod, MAX_TERM_MONTHS};
