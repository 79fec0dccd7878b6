//! Computing a set of components for one employee and period.
//!
//! A failing row never aborts the run: its amount defaults to zero, a
//! warning is recorded, and the run is flagged so the caller can decide
//! whether to block finalization.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SpecialTaxRates;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ComponentLine, ComponentRun, ComponentType,
    NumericContext, PayComponent, RunTotals,
};

use super::{classify_with_rates, compute_amount};

/// Version stamped on every run.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Warning code for a row whose evaluation failed.
pub const WARNING_EVALUATION_FAILED: &str = "EVALUATION_FAILED";

/// Warning code for a row whose amount needs approval.
pub const WARNING_APPROVAL_REQUIRED: &str = "APPROVAL_REQUIRED";

/// Warning code for a row that pushed a run total past the decimal range.
pub const WARNING_TOTAL_OVERFLOW: &str = "TOTAL_OVERFLOW";

/// Runs every active component with the default special tax rates.
pub fn run_components(components: &[PayComponent], ctx: &NumericContext) -> ComponentRun {
    run_components_with_rates(components, ctx, &SpecialTaxRates::default())
}

/// Computes and classifies every active component, in display order.
///
/// # Examples
///
/// ```
/// use pay_component_engine::calculation::run_components;
/// use pay_component_engine::models::{
///     CalculationType, ComponentType, NumericContext, PayComponent,
/// };
/// use rust_decimal::Decimal;
///
/// let mut broken = PayComponent::new(
///     "BROKEN",
///     "Broken",
///     ComponentType::Earning,
///     CalculationType::Formula,
/// );
/// broken.formula = Some("basic / 0".to_string());
///
/// let ctx = NumericContext::new(Decimal::from(1000), Decimal::from(1000)).unwrap();
/// let run = run_components(&[broken], &ctx);
///
/// assert!(run.has_warnings);
/// assert_eq!(run.lines[0].amount, Decimal::ZERO);
/// ```
pub fn run_components_with_rates(
    components: &[PayComponent],
    ctx: &NumericContext,
    rates: &SpecialTaxRates,
) -> ComponentRun {
    let start_time = Instant::now();
    let run_id = Uuid::new_v4();

    let mut active: Vec<&PayComponent> = components.iter().filter(|c| c.is_active).collect();
    active.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.code.cmp(&b.code))
    });

    let mut lines = Vec::with_capacity(active.len());
    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let mut totals = RunTotals::default();
    let mut step_number: u32 = 1;

    for component in active {
        let evaluation = compute_amount(component, ctx);
        let amount = evaluation.value_or_zero();

        steps.push(AuditStep {
            step_number,
            rule_id: "compute_amount".to_string(),
            rule_name: "Compute Amount".to_string(),
            component_code: component.code.clone(),
            input: serde_json::json!({
                "calculation_type": component.calculation_type,
                "default_amount": component.default_amount,
                "percentage_value": component.percentage_value,
                "formula": component.formula,
                "basic": ctx.basic,
                "gross": ctx.gross
            }),
            output: serde_json::json!({
                "valid": evaluation.valid,
                "amount": amount,
                "error": evaluation.error
            }),
            reasoning: match &evaluation.message {
                None => format!("{} computed as {}", component.code, amount),
                Some(message) => format!(
                    "{} failed ({}); amount defaulted to zero",
                    component.code, message
                ),
            },
        });
        step_number += 1;

        if !evaluation.valid {
            let message = evaluation
                .message
                .clone()
                .unwrap_or_else(|| "evaluation failed".to_string());
            warn!(
                run_id = %run_id,
                component = %component.code,
                error = %message,
                "Component evaluation failed"
            );
            warnings.push(AuditWarning {
                code: WARNING_EVALUATION_FAILED.to_string(),
                component_code: component.code.clone(),
                message,
                severity: "high".to_string(),
            });
        }

        let requires_approval = component.needs_approval(amount);
        if requires_approval {
            warnings.push(AuditWarning {
                code: WARNING_APPROVAL_REQUIRED.to_string(),
                component_code: component.code.clone(),
                message: match component.approval_threshold {
                    Some(threshold) => format!(
                        "{} exceeds approval threshold {}",
                        amount, threshold
                    ),
                    None => "component requires approval".to_string(),
                },
                severity: "medium".to_string(),
            });
        }

        let tax_effect = classify_with_rates(component, amount, rates);
        steps.push(AuditStep {
            step_number,
            rule_id: "classify".to_string(),
            rule_name: "Tax/Contribution Classification".to_string(),
            component_code: component.code.clone(),
            input: serde_json::json!({
                "amount": amount,
                "component_type": component.component_type,
                "flags": component.tax_treatment
            }),
            output: serde_json::to_value(&tax_effect).unwrap_or_default(),
            reasoning: classification_reasoning(component, &tax_effect.special_tax_rate),
        });
        step_number += 1;

        let type_total = match component.component_type {
            ComponentType::Earning => &mut totals.earnings,
            ComponentType::Deduction => &mut totals.deductions,
            ComponentType::Employer => &mut totals.employer_contributions,
        };
        let mut overflowed = !accumulate(type_total, amount);
        overflowed |= !accumulate(&mut totals.taxable_income, tax_effect.taxable_delta);
        overflowed |= !accumulate(&mut totals.ssnit_base, tax_effect.ssnit_delta);
        overflowed |= !accumulate(&mut totals.net_pay, tax_effect.net_delta);
        if tax_effect.special_tax_rate.is_some() {
            overflowed |= !accumulate(&mut totals.specially_taxed, amount);
        }
        if overflowed {
            warn!(
                run_id = %run_id,
                component = %component.code,
                amount = %amount,
                "Run total overflowed"
            );
            warnings.push(AuditWarning {
                code: WARNING_TOTAL_OVERFLOW.to_string(),
                component_code: component.code.clone(),
                message: format!(
                    "{} could not be added to the run totals without overflow",
                    amount
                ),
                severity: "high".to_string(),
            });
        }

        lines.push(ComponentLine {
            code: component.code.clone(),
            name: component.name.clone(),
            component_type: component.component_type,
            amount,
            evaluation,
            tax_effect,
            requires_approval,
        });
    }

    let duration_us = start_time.elapsed().as_micros() as u64;
    let has_warnings = !warnings.is_empty();

    info!(
        run_id = %run_id,
        components = lines.len(),
        warnings = warnings.len(),
        net_pay = %totals.net_pay,
        duration_us,
        "Component run completed"
    );

    ComponentRun {
        run_id,
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        context: *ctx,
        lines,
        totals,
        has_warnings,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}

/// Adds `delta` to `total`; on overflow the total keeps its previous value.
fn accumulate(total: &mut Decimal, delta: Decimal) -> bool {
    match total.checked_add(delta) {
        Some(sum) => {
            *total = sum;
            true
        }
        None => false,
    }
}

fn classification_reasoning(component: &PayComponent, special_rate: &Option<Decimal>) -> String {
    let treatment = &component.tax_treatment;
    match special_rate {
        Some(rate) if treatment.is_overtime() => {
            format!("Overtime taxed at flat {}%, excluded from PAYE income", rate)
        }
        Some(rate) => format!("Bonus taxed at flat {}%, excluded from PAYE income", rate),
        None if treatment.is_taxable() && component.component_type != ComponentType::Deduction => {
            "Added to PAYE taxable income".to_string()
        }
        None if treatment.reduces_taxable()
            && component.component_type == ComponentType::Deduction =>
        {
            "Deducted from PAYE taxable income before tax".to_string()
        }
        None => "No effect on PAYE taxable income".to_string(),
    }
}
