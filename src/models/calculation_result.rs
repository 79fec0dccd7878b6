//! Calculation result models for the Pay Component Calculation Engine.
//!
//! This module contains [`EvaluationResult`], the per-component outcome of a
//! computation, [`TaxEffect`], the classifier's output, and the
//! [`ComponentRun`] structures that aggregate many components for one
//! employee and period together with an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult, ErrorKind};

use super::{ComponentType, NumericContext};

/// The outcome of evaluating one formula or computing one component.
///
/// # Example
///
/// ```
/// use pay_component_engine::error::{EngineError, ErrorKind};
/// use pay_component_engine::models::EvaluationResult;
/// use rust_decimal::Decimal;
///
/// let ok = EvaluationResult::success(Decimal::new(27500, 2));
/// assert!(ok.valid);
///
/// let failed = EvaluationResult::failure(&EngineError::DivisionByZero);
/// assert!(!failed.valid);
/// assert_eq!(failed.error, Some(ErrorKind::DivisionByZero));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// True when `value` holds a result.
    pub valid: bool,
    /// The computed amount.
    pub value: Option<Decimal>,
    /// The error classification when evaluation failed.
    pub error: Option<ErrorKind>,
    /// Human-readable error message when evaluation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EvaluationResult {
    /// A successful result.
    pub fn success(value: Decimal) -> Self {
        Self {
            valid: true,
            value: Some(value),
            error: None,
            message: None,
        }
    }

    /// A failed result.
    pub fn failure(error: &EngineError) -> Self {
        Self {
            valid: false,
            value: None,
            error: Some(error.kind()),
            message: Some(error.to_string()),
        }
    }

    /// The value, or zero when evaluation failed.
    pub fn value_or_zero(&self) -> Decimal {
        self.value.unwrap_or(Decimal::ZERO)
    }
}

impl From<EngineResult<Decimal>> for EvaluationResult {
    fn from(result: EngineResult<Decimal>) -> Self {
        match result {
            Ok(value) => EvaluationResult::success(value),
            Err(err) => EvaluationResult::failure(&err),
        }
    }
}

/// How a computed amount moves taxable income, the SSNIT base and net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxEffect {
    /// Change to ordinary (PAYE) taxable income.
    pub taxable_delta: Decimal,
    /// Change to the statutory contribution base.
    pub ssnit_delta: Decimal,
    /// Change to the employee's net pay.
    pub net_delta: Decimal,
    /// Flat percentage rate when the amount is taxed outside PAYE.
    pub special_tax_rate: Option<Decimal>,
    /// Whether the amount appears as a payslip line.
    pub payslip_visible: bool,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the rule applied (e.g. "compute_amount").
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// The component this step belongs to.
    pub component_code: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during a component run.
///
/// Warnings never abort the run; they are left for the caller to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// The component the warning concerns.
    pub component_code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a component run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// One computed component within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLine {
    /// The component code.
    pub code: String,
    /// The component name.
    pub name: String,
    /// Earning, deduction or employer.
    pub component_type: ComponentType,
    /// The computed amount, zero when evaluation failed.
    pub amount: Decimal,
    /// The raw evaluation outcome.
    pub evaluation: EvaluationResult,
    /// Tax and contribution effect of `amount`.
    pub tax_effect: TaxEffect,
    /// Whether the amount needs approval before payment.
    pub requires_approval: bool,
}

/// Aggregated totals for a component run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Sum of earning amounts.
    pub earnings: Decimal,
    /// Sum of deduction amounts.
    pub deductions: Decimal,
    /// Sum of employer contribution amounts.
    pub employer_contributions: Decimal,
    /// Net change to ordinary taxable income.
    pub taxable_income: Decimal,
    /// Net change to the SSNIT contribution base.
    pub ssnit_base: Decimal,
    /// Net change to take-home pay.
    pub net_pay: Decimal,
    /// Amounts taxed at a flat special rate (overtime, bonus).
    pub specially_taxed: Decimal,
}

/// All components computed for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The inputs the components were computed against.
    pub context: NumericContext,
    /// One line per active component, in display order.
    pub lines: Vec<ComponentLine>,
    /// Aggregated totals.
    pub totals: RunTotals,
    /// True when any line failed or needs approval.
    pub has_warnings: bool,
    /// Complete audit trace.
    pub audit_trace: AuditTrace,
}
