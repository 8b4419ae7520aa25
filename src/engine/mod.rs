//! The pay calculation engine.
//!
//! A pure function of its inputs and an immutable [`RuleSet`]: no I/O, no
//! shared mutable state. One calculation runs single-threaded end-to-end;
//! independent calculations may run fully in parallel against the same rule
//! set. Apart from the result envelope (calculation id, timestamp, elapsed
//! duration) identical inputs always produce identical pay lines, totals,
//! warnings and audit steps.

mod aggregate;
mod allowance;
mod audit;
mod overtime;
mod penalty;
mod rates;
mod segmenter;

pub use aggregate::aggregate;
pub use allowance::{AllowanceKind, compute_allowances};
pub use audit::AuditTrail;
pub use overtime::{OvertimeSplit, price_overtime, split_daily_hours};
pub use penalty::price_ordinary_hours;
pub use rates::{ResolvedRates, casual_loading_multiplier, resolve_rates};
pub use segmenter::{DayType, ShiftSegment, day_type_of, segment_shift};

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::RuleSet;
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, Employee, PayPeriod, Shift};

/// Calculates pay for one employee's shifts in one pay period.
///
/// The pipeline, in causal (and audit) order:
///
/// 1. validate the employee and every shift; any error aborts the whole
///    calculation, there is no partial result;
/// 2. resolve the base and casual rates (effective date = earliest shift
///    date, falling back to the period start);
/// 3. segment every shift at midnight boundaries;
/// 4. group segments by calendar date and, per day: detect overtime over the
///    day's total hours, price the ordinary hours per segment portion at the
///    day-type rate, then price the overtime (tiered on weekdays, flat on
///    weekends);
/// 5. compute allowances;
/// 6. aggregate totals and seal the audit trace.
///
/// Shifts dated outside the pay period are still paid but produce an audit
/// warning; the period is context, not a filter.
///
/// # Errors
///
/// Propagates validation errors ([`EngineError::InvalidEmployee`],
/// [`EngineError::InvalidShift`]), configuration errors
/// ([`EngineError::ClassificationNotFound`], [`EngineError::RateNotFound`])
/// and internal invariant violations ([`EngineError::CalculationError`]).
///
/// # Example
///
/// ```no_run
/// use pay_engine::config::RuleSetLoader;
/// use pay_engine::engine::calculate;
/// # use pay_engine::models::{Employee, EmploymentType, PayPeriod};
/// # use chrono::NaiveDate;
///
/// let rules = RuleSetLoader::load("./config/sample").unwrap();
/// # let employee = Employee {
/// #     id: "emp_001".to_string(),
/// #     employment_type: EmploymentType::FullTime,
/// #     classification_code: "care_level_3".to_string(),
/// #     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
/// #     employment_start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
/// #     base_hourly_rate: None,
/// #     tags: vec![],
/// # };
/// # let pay_period = PayPeriod {
/// #     start_date: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
/// #     end_date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
/// #     public_holidays: vec![],
/// # };
/// let result = calculate(&employee, &pay_period, &[], &rules).unwrap();
/// println!("gross pay: {}", result.totals.gross_pay);
/// ```
pub fn calculate(
    employee: &Employee,
    pay_period: &PayPeriod,
    shifts: &[Shift],
    rules: &RuleSet,
) -> EngineResult<CalculationResult> {
    let started = Instant::now();
    let mut audit = AuditTrail::new();

    employee.validate()?;
    for shift in shifts {
        shift.validate()?;
    }

    let effective_date = shifts
        .iter()
        .map(|s| s.date)
        .min()
        .unwrap_or(pay_period.start_date);

    let rates = resolve_rates(employee, effective_date, rules, &mut audit)?;

    // Segment every shift, then regroup the segments by calendar date so
    // overtime is detected over the whole day, not per shift. BTreeMap keeps
    // the day order deterministic.
    let mut days: BTreeMap<NaiveDate, Vec<ShiftSegment>> = BTreeMap::new();

    for shift in shifts {
        if !pay_period.contains_date(shift.date) {
            audit.warn(
                "shift_outside_period",
                format!(
                    "Shift '{}' dated {} falls outside the pay period {} - {}",
                    shift.id, shift.date, pay_period.start_date, pay_period.end_date
                ),
                "medium",
            );
        }

        let segments = segment_shift(shift)?;
        record_segmentation(&mut audit, shift, &segments);

        for segment in segments {
            days.entry(segment.date()).or_default().push(segment);
        }
    }

    let threshold = rules.overtime().daily_threshold();
    let mut pay_lines = Vec::new();

    for (date, segments) in &mut days {
        segments.sort_by_key(|s| s.start_time);
        let day_type = day_type_of(*date);
        let day_total: Decimal = segments.iter().map(|s| s.hours).sum();

        let split = split_daily_hours(*date, day_total, threshold, &mut audit);

        if split.ordinary_hours + split.overtime_hours != day_total {
            return Err(EngineError::CalculationError {
                message: format!(
                    "ordinary {} + overtime {} does not equal day total {} on {}",
                    split.ordinary_hours, split.overtime_hours, day_total, date
                ),
            });
        }

        // Ordinary hours fill the earliest segments first; the day's last
        // hours are the overtime.
        let mut ordinary_remaining = split.ordinary_hours;
        for segment in segments.iter() {
            let portion = segment.hours.min(ordinary_remaining);
            ordinary_remaining -= portion;

            if portion > Decimal::ZERO {
                pay_lines.push(price_ordinary_hours(
                    *date, day_type, portion, employee, &rates, rules, &mut audit,
                ));
            }
        }

        pay_lines.extend(price_overtime(
            *date,
            day_type,
            split.overtime_hours,
            employee,
            &rates,
            rules,
            &mut audit,
        ));
    }

    let allowances = compute_allowances(
        employee,
        shifts.len() as u32,
        effective_date,
        rules,
        &mut audit,
    );

    let totals = aggregate(&pay_lines, &allowances);

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id.clone(),
        pay_period: pay_period.clone(),
        pay_lines,
        allowances,
        totals,
        audit_trace: audit.into_trace(started.elapsed()),
    })
}

/// Records the segmentation audit step for one shift.
fn record_segmentation(audit: &mut AuditTrail, shift: &Shift, segments: &[ShiftSegment]) {
    let segment_snapshots: Vec<serde_json::Value> = segments
        .iter()
        .map(|s| {
            serde_json::json!({
                "day_type": s.day_type.to_string(),
                "hours": s.hours.normalize().to_string(),
                "start_time": s.start_time.to_string(),
                "end_time": s.end_time.to_string()
            })
        })
        .collect();

    let reasoning = if segments.len() <= 1 {
        match segments.first() {
            Some(only) => format!(
                "Shift is entirely within {} - no midnight crossing",
                only.day_type
            ),
            None => "Shift has no worked hours after break adjustment".to_string(),
        }
    } else {
        format!(
            "Shift crosses midnight: split into {} segments ({})",
            segments.len(),
            segments
                .iter()
                .map(|s| format!("{}: {}h", s.day_type, s.hours.normalize()))
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    audit.record(
        "shift_segmentation",
        "Shift Day Segmentation",
        "23",
        serde_json::json!({
            "shift_id": shift.id,
            "start_time": shift.start_time.to_string(),
            "end_time": shift.end_time.to_string(),
            "worked_hours": shift.worked_hours().normalize().to_string()
        }),
        serde_json::json!({
            "segment_count": segments.len(),
            "segments": segment_snapshots
        }),
        reasoning,
    );
}
