//! Calculation result models.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures: pay lines, allowance payments, totals and the audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// The category of pay for a pay line.
///
/// Categories distinguish ordinary time, casual-loaded time, weekend penalty
/// time and the two overtime tiers. Dispatch over categories is always an
/// exhaustive match so that adding a category is a compile-time exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayCategory {
    /// Ordinary weekday hours for permanent employees.
    Ordinary,
    /// Ordinary weekday hours for casual employees (casual loading applied).
    OrdinaryCasual,
    /// Saturday penalty hours for permanent employees.
    Saturday,
    /// Saturday penalty hours for casual employees.
    SaturdayCasual,
    /// Sunday penalty hours for permanent employees.
    Sunday,
    /// Sunday penalty hours for casual employees.
    SundayCasual,
    /// Overtime at the tier-1 (150%) rate.
    Overtime150,
    /// Overtime at the tier-2 / weekend flat (200%) rate.
    Overtime200,
}

impl PayCategory {
    /// Returns true for the weekday ordinary categories.
    pub fn is_ordinary(self) -> bool {
        matches!(self, PayCategory::Ordinary | PayCategory::OrdinaryCasual)
    }

    /// Returns true for the overtime categories.
    pub fn is_overtime(self) -> bool {
        matches!(self, PayCategory::Overtime150 | PayCategory::Overtime200)
    }

    /// Returns true for the non-overtime weekend penalty categories.
    pub fn is_penalty(self) -> bool {
        matches!(
            self,
            PayCategory::Saturday
                | PayCategory::SaturdayCasual
                | PayCategory::Sunday
                | PayCategory::SundayCasual
        )
    }
}

/// A single line item in a pay calculation.
///
/// A pay line carries the raw base rate and the multiplier separately so the
/// non-compounding rule stays auditable: the charged rate is always
/// `base_rate × multiplier`, never a loaded rate multiplied again.
///
/// # Example
///
/// ```
/// use pay_engine::models::{PayLine, PayCategory};
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
/// use std::str::FromStr;
///
/// let line = PayLine {
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     category: PayCategory::Ordinary,
///     hours: Decimal::from_str("8.0").unwrap(),
///     base_rate: Decimal::from_str("28.54").unwrap(),
///     multiplier: Decimal::ONE,
///     amount: Decimal::from_str("228.32").unwrap(),
///     clause_ref: "22.1".to_string(),
/// };
/// assert_eq!(line.amount, line.hours * line.base_rate * line.multiplier);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// The calendar date this pay line applies to.
    pub date: NaiveDate,
    /// The category of pay.
    pub category: PayCategory,
    /// The number of hours paid on this line.
    pub hours: Decimal,
    /// The raw base hourly rate, before any loading or penalty.
    pub base_rate: Decimal,
    /// The single multiplier chosen by rule precedence for these hours.
    pub multiplier: Decimal,
    /// The total amount: hours × base_rate × multiplier, decimal-exact.
    pub amount: Decimal,
    /// Reference to the rule clause that authorizes this pay line.
    pub clause_ref: String,
}

/// An allowance payment.
///
/// Allowances are additional payments for specific conditions or expenses;
/// the amount may be capped at a weekly maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowancePayment {
    /// The kind of allowance (e.g., "laundry").
    #[serde(rename = "type")]
    pub allowance_type: String,
    /// A description of the allowance.
    pub description: String,
    /// The number of units the allowance accrued over (e.g., shifts).
    pub units: Decimal,
    /// The rate per unit.
    pub rate: Decimal,
    /// The total amount after any cap.
    pub amount: Decimal,
    /// Reference to the rule clause that authorizes this allowance.
    pub clause_ref: String,
}

/// Aggregated totals for a pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayTotals {
    /// The total gross pay (sum of all pay lines and allowances).
    pub gross_pay: Decimal,
    /// Total weekday ordinary hours.
    pub ordinary_hours: Decimal,
    /// Total overtime hours.
    pub overtime_hours: Decimal,
    /// Total weekend penalty hours (non-overtime).
    pub penalty_hours: Decimal,
    /// Total value of all allowances.
    pub allowances_total: Decimal,
}

/// A single step in the audit trace recording a rule application.
///
/// Input and output are structured snapshots of the values that produced the
/// step, never references into mutable state, so the trace remains valid
/// after the calculation returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, strictly increasing in causal order.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the rule clause.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that do not prevent calculation but may
/// require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The ordered sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a pay calculation.
///
/// Captures every pay line, allowance, the totals and the complete audit
/// trace. Apart from the `calculation_id`, `timestamp` and the trace's
/// elapsed duration, the result is a pure function of the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The pay period for this calculation.
    pub pay_period: PayPeriod,
    /// Individual pay lines making up the calculation.
    pub pay_lines: Vec<PayLine>,
    /// Allowance payments included in the calculation.
    pub allowances: Vec<AllowancePayment>,
    /// Aggregated totals.
    pub totals: PayTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
