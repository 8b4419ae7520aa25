//! Tag-gated, per-shift allowances with weekly caps.
//!
//! Allowance kinds are a typed enumeration rather than ad-hoc string
//! matching: each kind knows its table key, gating tag, clause and
//! eligibility check, so adding a kind is a compile-time exercise.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RuleSet;
use crate::models::{AllowancePayment, Employee};

use super::audit::AuditTrail;

/// The kinds of allowance the engine can pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowanceKind {
    /// Per-shift laundry allowance for employees who launder their own
    /// uniforms, capped weekly.
    Laundry,
}

impl AllowanceKind {
    /// Every allowance kind, in the order they are evaluated.
    pub const ALL: [AllowanceKind; 1] = [AllowanceKind::Laundry];

    /// The key this kind is configured under in the allowance table.
    pub fn key(self) -> &'static str {
        match self {
            AllowanceKind::Laundry => "laundry",
        }
    }

    /// The employee tag that gates eligibility for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            AllowanceKind::Laundry => "laundry_allowance",
        }
    }

    /// The clause that authorizes this kind.
    pub fn clause(self) -> &'static str {
        match self {
            AllowanceKind::Laundry => "15.2(b)",
        }
    }

    /// The human-readable description carried on the payment.
    pub fn description(self) -> &'static str {
        match self {
            AllowanceKind::Laundry => "Laundry Allowance",
        }
    }

    /// Whether the employee is eligible for this kind.
    pub fn eligible(self, employee: &Employee) -> bool {
        employee.has_tag(self.tag())
    }
}

/// Computes every allowance the employee is eligible for.
///
/// For each kind: an ineligible employee produces nothing at all (no
/// payment, no zero-amount record, no audit step). For an eligible
/// employee, the raw amount is `shift_count × per-shift rate`, clamped at
/// the weekly cap; the audit step records units, rate, the raw amount and,
/// when the cap bit, by how much it was clamped. A kind that is eligible
/// but missing from the allowance table yields an audit warning instead of
/// a payment.
pub fn compute_allowances(
    employee: &Employee,
    shift_count: u32,
    effective_date: NaiveDate,
    rules: &RuleSet,
    audit: &mut AuditTrail,
) -> Vec<AllowancePayment> {
    let mut payments = Vec::new();

    for kind in AllowanceKind::ALL {
        if !kind.eligible(employee) {
            continue;
        }

        let Some(rate) = rules.get_allowance_rate(kind.key(), effective_date) else {
            audit.warn(
                "allowance_rate_missing",
                format!(
                    "No {} allowance rate effective on {} - allowance skipped",
                    kind.key(),
                    effective_date
                ),
                "low",
            );
            continue;
        };

        let units = Decimal::from(shift_count);
        let raw_amount = units * rate.per_shift;
        let cap_applied = raw_amount > rate.weekly_cap;
        let amount = raw_amount.min(rate.weekly_cap);

        let reasoning = if cap_applied {
            format!(
                "{} shifts × ${} = ${}, capped at weekly maximum ${} (clamped by ${})",
                shift_count,
                rate.per_shift.normalize(),
                raw_amount.normalize(),
                rate.weekly_cap.normalize(),
                (raw_amount - amount).normalize()
            )
        } else {
            format!(
                "{} shifts × ${} = ${}",
                shift_count,
                rate.per_shift.normalize(),
                amount.normalize()
            )
        };

        audit.record(
            &format!("{}_allowance", kind.key()),
            kind.description(),
            kind.clause(),
            serde_json::json!({
                "employee_id": employee.id,
                "tag": kind.tag(),
                "shift_count": shift_count,
                "per_shift_rate": rate.per_shift.normalize().to_string(),
                "weekly_cap": rate.weekly_cap.normalize().to_string()
            }),
            serde_json::json!({
                "units": units.normalize().to_string(),
                "raw_amount": raw_amount.normalize().to_string(),
                "amount": amount.normalize().to_string(),
                "cap_applied": cap_applied
            }),
            reasoning,
        );

        payments.push(AllowancePayment {
            allowance_type: kind.key().to_string(),
            description: kind.description().to_string(),
            units,
            rate: rate.per_shift,
            amount,
            clause_ref: kind.clause().to_string(),
        });
    }

    payments
}
