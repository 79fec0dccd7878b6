//! Pay component model and related types.
//!
//! This module defines [`PayComponent`], the read-only definition the engine
//! computes against, together with its type tags and the validated
//! [`TaxTreatment`] policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::formula::parse;

/// Whether a component pays the employee, deducts from them, or is an
/// employer-side contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    /// Adds to the employee's pay.
    Earning,
    /// Subtracts from the employee's pay.
    Deduction,
    /// Paid by the employer.
    Employer,
}

/// How a component's amount is determined at computation time.
///
/// # Example
///
/// ```
/// use pay_component_engine::models::CalculationType;
///
/// let json = serde_json::to_string(&CalculationType::PctBasic).unwrap();
/// assert_eq!(json, "\"PCT_BASIC\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationType {
    /// `default_amount` verbatim.
    Fixed,
    /// `percentage_value` percent of basic salary.
    PctBasic,
    /// `percentage_value` percent of gross salary.
    PctGross,
    /// `formula` evaluated against the numeric context.
    Formula,
}

/// The raw tax and contribution flags as they are persisted.
///
/// Use [`TaxTreatment::new`] to turn these into a validated policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxFlags {
    /// Adds to ordinary taxable income.
    #[serde(default)]
    pub is_taxable: bool,
    /// Deducted from taxable income before tax (deductions only).
    #[serde(default)]
    pub reduces_taxable: bool,
    /// Overtime pay, taxed at a flat special rate.
    #[serde(default)]
    pub is_overtime: bool,
    /// Bonus pay, taxed at a flat special rate.
    #[serde(default)]
    pub is_bonus: bool,
    /// Moves the statutory contribution (SSNIT) base.
    #[serde(default)]
    pub affects_ssnit: bool,
    /// A statutory component (e.g. the contribution itself).
    #[serde(default)]
    pub is_statutory: bool,
}

/// Validated tax/contribution policy for a component.
///
/// Overtime and bonus are mutually exclusive, and either one forces
/// `is_taxable` off since those amounts are taxed at a flat rate downstream.
///
/// # Example
///
/// ```
/// use pay_component_engine::models::{TaxFlags, TaxTreatment};
///
/// let treatment = TaxTreatment::new(TaxFlags {
///     is_overtime: true,
///     is_taxable: true,
///     ..TaxFlags::default()
/// })
/// .unwrap();
/// assert!(treatment.is_overtime());
/// assert!(!treatment.is_taxable());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaxFlags", into = "TaxFlags")]
pub struct TaxTreatment {
    flags: TaxFlags,
}

impl TaxTreatment {
    /// Builds a treatment from raw flags, enforcing the overtime/bonus rules.
    pub fn new(mut flags: TaxFlags) -> EngineResult<Self> {
        if flags.is_overtime && flags.is_bonus {
            return Err(EngineError::invalid_input(
                "is_overtime",
                "a component cannot be both overtime and bonus",
            ));
        }
        if flags.is_overtime || flags.is_bonus {
            flags.is_taxable = false;
        }
        Ok(Self { flags })
    }

    /// Ordinary taxable earning.
    pub fn taxable() -> Self {
        Self {
            flags: TaxFlags {
                is_taxable: true,
                ..TaxFlags::default()
            },
        }
    }

    /// Overtime pay (flat special rate).
    pub fn overtime() -> Self {
        Self {
            flags: TaxFlags {
                is_overtime: true,
                ..TaxFlags::default()
            },
        }
    }

    /// Bonus pay (flat special rate).
    pub fn bonus() -> Self {
        Self {
            flags: TaxFlags {
                is_bonus: true,
                ..TaxFlags::default()
            },
        }
    }

    /// Returns a copy with `affects_ssnit` set.
    pub fn with_ssnit(mut self) -> Self {
        self.flags.affects_ssnit = true;
        self
    }

    /// Returns a copy with `reduces_taxable` set.
    pub fn with_reduces_taxable(mut self) -> Self {
        self.flags.reduces_taxable = true;
        self
    }

    /// The underlying flags.
    pub fn flags(&self) -> TaxFlags {
        self.flags
    }

    /// Whether the amount is ordinary taxable income.
    pub fn is_taxable(&self) -> bool {
        self.flags.is_taxable
    }

    /// Whether a deduction is taken before tax.
    pub fn reduces_taxable(&self) -> bool {
        self.flags.reduces_taxable
    }

    /// Whether the amount is taxed at the overtime rate.
    pub fn is_overtime(&self) -> bool {
        self.flags.is_overtime
    }

    /// Whether the amount is taxed at the bonus rate.
    pub fn is_bonus(&self) -> bool {
        self.flags.is_bonus
    }

    /// Whether the amount moves the SSNIT base.
    pub fn affects_ssnit(&self) -> bool {
        self.flags.affects_ssnit
    }

    /// Whether the component is a statutory deduction.
    pub fn is_statutory(&self) -> bool {
        self.flags.is_statutory
    }
}

impl TryFrom<TaxFlags> for TaxTreatment {
    type Error = EngineError;

    fn try_from(flags: TaxFlags) -> EngineResult<Self> {
        TaxTreatment::new(flags)
    }
}

impl From<TaxTreatment> for TaxFlags {
    fn from(treatment: TaxTreatment) -> Self {
        treatment.flags
    }
}

fn default_true() -> bool {
    true
}

/// A configured pay component.
///
/// Exactly one of `default_amount`, `percentage_value` and `formula` is
/// authoritative, selected by `calculation_type`. The engine never mutates a
/// component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayComponent {
    /// Unique code, immutable once referenced by transactions.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Earning, deduction or employer contribution.
    pub component_type: ComponentType,
    /// Free-form grouping (e.g. "allowance", "loan", "statutory").
    #[serde(default)]
    pub category: String,
    /// Which of the amount fields is authoritative.
    pub calculation_type: CalculationType,
    /// Amount for FIXED components.
    #[serde(default)]
    pub default_amount: Option<Decimal>,
    /// Percent for PCT_BASIC / PCT_GROSS components.
    #[serde(default)]
    pub percentage_value: Option<Decimal>,
    /// Expression for FORMULA components.
    #[serde(default)]
    pub formula: Option<String>,
    /// Tax and contribution policy.
    #[serde(flatten)]
    pub tax_treatment: TaxTreatment,
    /// Applies every period until removed.
    #[serde(default = "default_true")]
    pub is_recurring: bool,
    /// Scaled by days worked in partial periods.
    #[serde(default)]
    pub is_prorated: bool,
    /// Amounts need sign-off before payment.
    #[serde(default)]
    pub requires_approval: bool,
    /// Amount above which approval is needed; `None` means always.
    #[serde(default)]
    pub approval_threshold: Option<Decimal>,
    /// Shown as a payslip line.
    #[serde(default = "default_true")]
    pub show_on_payslip: bool,
    /// Ordering on payslips and in component runs.
    #[serde(default)]
    pub display_order: i32,
    /// Inactive components are kept for history but never computed.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl PayComponent {
    /// Creates an active, recurring, payslip-visible component with no amount fields set.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        component_type: ComponentType,
        calculation_type: CalculationType,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            component_type,
            category: String::new(),
            calculation_type,
            default_amount: None,
            percentage_value: None,
            formula: None,
            tax_treatment: TaxTreatment::default(),
            is_recurring: true,
            is_prorated: false,
            requires_approval: false,
            approval_threshold: None,
            show_on_payslip: true,
            display_order: 0,
            is_active: true,
        }
    }

    /// Save-time validation.
    ///
    /// Checks identity fields, that the authoritative amount field for the
    /// calculation type is present and non-negative, and that a FORMULA
    /// component's expression parses.
    pub fn validate(&self) -> EngineResult<()> {
        if self.code.trim().is_empty() {
            return Err(self.invalid("code must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(self.invalid("name must not be empty"));
        }

        match self.calculation_type {
            CalculationType::Fixed => match self.default_amount {
                Some(amount) if amount.is_sign_negative() => {
                    Err(self.invalid("default_amount must not be negative"))
                }
                Some(_) => Ok(()),
                None => Err(self.invalid("FIXED components require default_amount")),
            },
            CalculationType::PctBasic | CalculationType::PctGross => {
                match self.percentage_value {
                    Some(pct) if pct.is_sign_negative() => {
                        Err(self.invalid("percentage_value must not be negative"))
                    }
                    Some(_) => Ok(()),
                    None => Err(self.invalid("percentage components require percentage_value")),
                }
            }
            CalculationType::Formula => match self.formula.as_deref() {
                Some(formula) => parse(formula)
                    .map(|_| ())
                    .map_err(|err| self.invalid(format!("formula rejected: {}", err))),
                None => Err(self.invalid("FORMULA components require formula")),
            },
        }
    }

    /// Returns true if `amount` needs approval before it is paid.
    pub fn needs_approval(&self, amount: Decimal) -> bool {
        if !self.requires_approval {
            return false;
        }
        match self.approval_threshold {
            Some(threshold) => amount > threshold,
            None => true,
        }
    }

    fn invalid(&self, message: impl Into<String>) -> EngineError {
        EngineError::InvalidComponent {
            code: self.code.clone(),
            message: message.into(),
        }
    }
}
