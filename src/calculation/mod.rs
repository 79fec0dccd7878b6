//! Calculation logic for the Pay Component Calculation Engine.
//!
//! This module contains the amount calculators (fixed, percentage, formula),
//! the authoring generators for percentage, overtime and loan strategies,
//! tax/contribution classification, and the component run that ties them
//! together for one employee and period.

mod classifier;
mod component_run;
mod dispatcher;
mod loan;
mod overtime;
mod percentage;
mod rounding;
mod strategy;

pub use classifier::{classify, classify_with_rates};
pub use component_run::{
    ENGINE_VERSION, WARNING_APPROVAL_REQUIRED, WARNING_EVALUATION_FAILED, WARNING_TOTAL_OVERFLOW,
    run_components, run_components_with_rates,
};
pub use dispatcher::{compute_amount, try_compute_amount};
pub use loan::{LoanPayment, ScheduleRow, amortization_schedule, loan_payment};
pub use overtime::{DEFAULT_STANDARD_HOURS, overtime_formula, overtime_rate};
pub use percentage::{PercentageBase, percentage, percentage_formula};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_money};
pub use strategy::{AuthoredCalculation, CalculationStrategy};
