//! Daily overtime detection and pricing.
//!
//! Overtime is detected per calendar day, over the total hours the employee
//! worked on that date across all shifts and segments. Pricing resolves the
//! day type FIRST: weekday overtime is tiered, weekend overtime is a flat
//! rate from the first overtime hour. The tiering rule never applies to a
//! day that resolved to Saturday or Sunday.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RuleSet;
use crate::models::{Employee, PayCategory, PayLine};

use super::audit::AuditTrail;
use super::rates::ResolvedRates;
use super::segmenter::DayType;

/// The ordinary/overtime split of one calendar day's worked hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeSplit {
    /// Hours up to the daily threshold.
    pub ordinary_hours: Decimal,
    /// Hours exceeding the daily threshold.
    pub overtime_hours: Decimal,
}

/// Splits one day's total worked hours at the daily overtime threshold.
///
/// `ordinary = min(total, threshold)`, `overtime = max(0, total − threshold)`.
/// Records a `daily_overtime_detection` audit step (clause 22.1(c), 25.1).
pub fn split_daily_hours(
    date: NaiveDate,
    day_total_hours: Decimal,
    threshold: Decimal,
    audit: &mut AuditTrail,
) -> OvertimeSplit {
    let ordinary_hours = day_total_hours.min(threshold);
    let overtime_hours = (day_total_hours - threshold).max(Decimal::ZERO);

    let reasoning = if overtime_hours > Decimal::ZERO {
        format!(
            "{} hours worked on {} exceeds the {} hour daily threshold by {} hours, triggering overtime",
            day_total_hours.normalize(),
            date,
            threshold.normalize(),
            overtime_hours.normalize()
        )
    } else {
        format!(
            "{} hours worked on {} is within the {} hour daily threshold, no overtime triggered",
            day_total_hours.normalize(),
            date,
            threshold.normalize()
        )
    };

    audit.record(
        "daily_overtime_detection",
        "Daily Overtime Detection",
        "22.1(c), 25.1",
        serde_json::json!({
            "date": date.to_string(),
            "day_total_hours": day_total_hours.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        serde_json::json!({
            "ordinary_hours": ordinary_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string()
        }),
        reasoning,
    );

    OvertimeSplit {
        ordinary_hours,
        overtime_hours,
    }
}

/// Prices one day's overtime hours.
///
/// Day-type resolution is the engine's central tie-break and happens first,
/// as an explicit branch:
///
/// - **Weekday**: tier 1 covers the first tier-boundary (2) hours at 150%
///   (casual 187.5%); tier 2 covers the remainder at 200% (casual 250%).
///   Each tier present yields its own [`PayLine`] and audit step
///   (`overtime_tier_1`, `overtime_tier_2`).
/// - **Saturday / Sunday**: every overtime hour is paid at the flat weekend
///   rate of 200% (casual 250%) from the first overtime hour, as a single
///   pay line and a single `weekend_overtime` audit step. Tiering never
///   applies here, regardless of how many overtime hours accrue.
///
/// All multipliers apply to the raw base rate; the casual columns of the
/// overtime table are already inclusive of casual loading.
///
/// Returns an empty vec when `overtime_hours` is zero.
pub fn price_overtime(
    date: NaiveDate,
    day_type: DayType,
    overtime_hours: Decimal,
    employee: &Employee,
    rates: &ResolvedRates,
    rules: &RuleSet,
    audit: &mut AuditTrail,
) -> Vec<PayLine> {
    if overtime_hours <= Decimal::ZERO {
        return Vec::new();
    }

    match day_type {
        DayType::Weekday => {
            price_weekday_tiers(date, overtime_hours, employee, rates, rules, audit)
        }
        DayType::Saturday | DayType::Sunday => {
            vec![price_weekend_flat(
                date,
                day_type,
                overtime_hours,
                employee,
                rates,
                rules,
                audit,
            )]
        }
    }
}

/// Prices tiered weekday overtime (clause 25.1(a)(i)(A)).
fn price_weekday_tiers(
    date: NaiveDate,
    overtime_hours: Decimal,
    employee: &Employee,
    rates: &ResolvedRates,
    rules: &RuleSet,
    audit: &mut AuditTrail,
) -> Vec<PayLine> {
    let weekday = &rules.overtime().weekday;
    let tier_boundary = rules.overtime().weekday_tier_boundary();
    let base_rate = rates.base_rate;

    let tier1_multiplier = weekday.first_two_hours.multiplier(employee.employment_type);
    let tier2_multiplier = weekday.after_two_hours.multiplier(employee.employment_type);

    let tier1_hours = overtime_hours.min(tier_boundary);
    let tier2_hours = (overtime_hours - tier_boundary).max(Decimal::ZERO);

    let mut lines = Vec::new();

    if tier1_hours > Decimal::ZERO {
        let amount = tier1_hours * base_rate * tier1_multiplier;

        audit.record(
            "overtime_tier_1",
            "Weekday Overtime Tier 1",
            &weekday.clause,
            serde_json::json!({
                "date": date.to_string(),
                "hours": tier1_hours.normalize().to_string(),
                "base_rate": base_rate.normalize().to_string(),
                "employment_type": employee.employment_type.as_str()
            }),
            serde_json::json!({
                "multiplier": tier1_multiplier.normalize().to_string(),
                "amount": amount.normalize().to_string()
            }),
            overtime_reasoning(
                &format!("First {} hours of weekday overtime", tier1_hours.normalize()),
                tier1_hours,
                base_rate,
                tier1_multiplier,
                amount,
                employee.is_casual(),
            ),
        );

        lines.push(PayLine {
            date,
            category: PayCategory::Overtime150,
            hours: tier1_hours,
            base_rate,
            multiplier: tier1_multiplier,
            amount,
            clause_ref: weekday.clause.clone(),
        });
    }

    if tier2_hours > Decimal::ZERO {
        let amount = tier2_hours * base_rate * tier2_multiplier;

        audit.record(
            "overtime_tier_2",
            "Weekday Overtime Tier 2",
            &weekday.clause,
            serde_json::json!({
                "date": date.to_string(),
                "hours": tier2_hours.normalize().to_string(),
                "base_rate": base_rate.normalize().to_string(),
                "employment_type": employee.employment_type.as_str()
            }),
            serde_json::json!({
                "multiplier": tier2_multiplier.normalize().to_string(),
                "amount": amount.normalize().to_string()
            }),
            overtime_reasoning(
                &format!(
                    "Weekday overtime after the first {} hours",
                    tier_boundary.normalize()
                ),
                tier2_hours,
                base_rate,
                tier2_multiplier,
                amount,
                employee.is_casual(),
            ),
        );

        lines.push(PayLine {
            date,
            category: PayCategory::Overtime200,
            hours: tier2_hours,
            base_rate,
            multiplier: tier2_multiplier,
            amount,
            clause_ref: weekday.clause.clone(),
        });
    }

    lines
}

/// Prices flat weekend overtime (clause 25.1(a)(i)(B)).
fn price_weekend_flat(
    date: NaiveDate,
    day_type: DayType,
    overtime_hours: Decimal,
    employee: &Employee,
    rates: &ResolvedRates,
    rules: &RuleSet,
    audit: &mut AuditTrail,
) -> PayLine {
    let weekend = &rules.overtime().weekend;
    let base_rate = rates.base_rate;
    let multiplier = weekend.rates.multiplier(employee.employment_type);
    let amount = overtime_hours * base_rate * multiplier;

    audit.record(
        "weekend_overtime",
        &format!("{day_type} Overtime"),
        &weekend.clause,
        serde_json::json!({
            "date": date.to_string(),
            "day_type": day_type.to_string(),
            "hours": overtime_hours.normalize().to_string(),
            "base_rate": base_rate.normalize().to_string(),
            "employment_type": employee.employment_type.as_str()
        }),
        serde_json::json!({
            "multiplier": multiplier.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        overtime_reasoning(
            &format!("{day_type} overtime, flat rate from the first overtime hour"),
            overtime_hours,
            base_rate,
            multiplier,
            amount,
            employee.is_casual(),
        ),
    );

    PayLine {
        date,
        category: PayCategory::Overtime200,
        hours: overtime_hours,
        base_rate,
        multiplier,
        amount,
        clause_ref: weekend.clause.clone(),
    }
}

fn overtime_reasoning(
    prefix: &str,
    hours: Decimal,
    base_rate: Decimal,
    multiplier: Decimal,
    amount: Decimal,
    is_casual: bool,
) -> String {
    let percent = (multiplier * Decimal::from(100)).normalize();
    if is_casual {
        format!(
            "{prefix} at {percent}% (inclusive of casual loading): {} hours × ${} × {} = ${}",
            hours.normalize(),
            base_rate.normalize(),
            multiplier.normalize(),
            amount.normalize()
        )
    } else {
        format!(
            "{prefix} at {percent}%: {} hours × ${} × {} = ${}",
            hours.normalize(),
            base_rate.normalize(),
            multiplier.normalize(),
            amount.normalize()
        )
    }
}
