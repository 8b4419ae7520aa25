//! Integration tests for the pay calculation engine.
//!
//! Exercises the full pipeline against the shipped sample rule set:
//! ordinary hours, weekend penalties, overnight splitting, tiered weekday
//! overtime, flat weekend overtime, casual loading, allowances and the
//! audit trace.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use pay_engine::config::{RuleSet, RuleSetLoader};
use pay_engine::engine::calculate;
use pay_engine::error::EngineError;
use pay_engine::models::{
    Break, Employee, EmploymentType, PayCategory, PayPeriod, Shift,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_rules() -> RuleSet {
    RuleSetLoader::load("./config/sample").expect("Failed to load sample rule set")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn datetime(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn employee(employment_type: EmploymentType, tags: Vec<&str>) -> Employee {
    Employee {
        id: "emp_001".to_string(),
        employment_type,
        classification_code: "care_level_3".to_string(),
        date_of_birth: date("1985-03-15"),
        employment_start_date: date("2020-01-01"),
        base_hourly_rate: None,
        tags: tags.into_iter().map(String::from).collect(),
    }
}

fn shift(id: &str, day: &str, start: &str, end_day: &str, end: &str) -> Shift {
    Shift {
        id: id.to_string(),
        date: date(day),
        start_time: datetime(day, start),
        end_time: datetime(end_day, end),
        breaks: vec![],
    }
}

fn january_period() -> PayPeriod {
    PayPeriod {
        start_date: date("2026-01-12"),
        end_date: date("2026-01-25"),
        public_holidays: vec![],
    }
}

fn lines_of(result: &pay_engine::models::CalculationResult, category: PayCategory) -> Vec<&pay_engine::models::PayLine> {
    result
        .pay_lines
        .iter()
        .filter(|l| l.category == category)
        .collect()
}

// =============================================================================
// Scenario: ordinary weekday hours
// =============================================================================

/// Full-time, 8h Monday: one Ordinary line at multiplier 1.0, amount 228.32.
#[test]
fn test_fulltime_8h_monday() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    assert_eq!(result.pay_lines.len(), 1);
    let line = &result.pay_lines[0];
    assert_eq!(line.category, PayCategory::Ordinary);
    assert_eq!(line.hours, dec("8"));
    assert_eq!(line.base_rate, dec("28.54"));
    assert_eq!(line.multiplier, dec("1.0"));
    assert_eq!(line.amount, dec("228.32"));

    assert_eq!(result.totals.gross_pay, dec("228.32"));
    assert_eq!(result.totals.ordinary_hours, dec("8"));
    assert_eq!(result.totals.overtime_hours, dec("0"));
    assert_eq!(result.totals.penalty_hours, dec("0"));
}

/// Casual, 8h Monday: OrdinaryCasual at 1.25 on the base rate.
#[test]
fn test_casual_8h_monday() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00")];

    let result = calculate(
        &employee(EmploymentType::Casual, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let line = &result.pay_lines[0];
    assert_eq!(line.category, PayCategory::OrdinaryCasual);
    assert_eq!(line.multiplier, dec("1.25"));
    assert_eq!(line.amount, dec("285.40")); // 8 × 28.54 × 1.25
}

// =============================================================================
// Scenario: tiered weekday overtime
// =============================================================================

/// Full-time, 11h Monday: Ordinary 228.32, Overtime150 85.62, Overtime200
/// 57.08, total 371.02.
#[test]
fn test_fulltime_11h_monday_tiered_overtime() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-12", "07:00:00", "2026-01-12", "18:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    assert_eq!(result.pay_lines.len(), 3);

    let ordinary = lines_of(&result, PayCategory::Ordinary);
    assert_eq!(ordinary[0].hours, dec("8"));
    assert_eq!(ordinary[0].amount, dec("228.32"));

    let tier1 = lines_of(&result, PayCategory::Overtime150);
    assert_eq!(tier1[0].hours, dec("2"));
    assert_eq!(tier1[0].multiplier, dec("1.5"));
    assert_eq!(tier1[0].amount, dec("85.62"));

    let tier2 = lines_of(&result, PayCategory::Overtime200);
    assert_eq!(tier2[0].hours, dec("1"));
    assert_eq!(tier2[0].multiplier, dec("2.0"));
    assert_eq!(tier2[0].amount, dec("57.08"));

    assert_eq!(result.totals.gross_pay, dec("371.02"));
    assert_eq!(result.totals.ordinary_hours, dec("8"));
    assert_eq!(result.totals.overtime_hours, dec("3"));
}

/// Casual, 11h Monday: the overtime tiers are 1.875 and 2.5 on the raw base.
#[test]
fn test_casual_11h_monday_tiered_overtime() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-12", "07:00:00", "2026-01-12", "18:00:00")];

    let result = calculate(
        &employee(EmploymentType::Casual, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let tier1 = lines_of(&result, PayCategory::Overtime150);
    assert_eq!(tier1[0].multiplier, dec("1.875"));
    assert_eq!(tier1[0].base_rate, dec("28.54"));
    assert_eq!(tier1[0].amount, dec("107.025")); // 2 × 28.54 × 1.875

    let tier2 = lines_of(&result, PayCategory::Overtime200);
    assert_eq!(tier2[0].multiplier, dec("2.5"));
    assert_eq!(tier2[0].amount, dec("71.35")); // 1 × 28.54 × 2.5

    // 285.40 + 107.025 + 71.35
    assert_eq!(result.totals.gross_pay, dec("463.775"));
}

// =============================================================================
// Scenario: weekend penalties and weekend overtime
// =============================================================================

/// Full-time, 10h Saturday: ordinary 8h at 1.5 (342.48) plus 2h flat
/// weekend overtime at 2.0 (114.16), total 456.64.
#[test]
fn test_fulltime_10h_saturday() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-17", "07:00:00", "2026-01-17", "17:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    assert_eq!(result.pay_lines.len(), 2);

    let saturday = lines_of(&result, PayCategory::Saturday);
    assert_eq!(saturday[0].hours, dec("8"));
    assert_eq!(saturday[0].multiplier, dec("1.5"));
    assert_eq!(saturday[0].amount, dec("342.48"));

    let overtime = lines_of(&result, PayCategory::Overtime200);
    assert_eq!(overtime[0].hours, dec("2"));
    assert_eq!(overtime[0].multiplier, dec("2.0"));
    assert_eq!(overtime[0].amount, dec("114.16"));
    assert_eq!(overtime[0].clause_ref, "25.1(a)(i)(B)");

    // Weekday tiering must not fire on a Saturday.
    assert!(lines_of(&result, PayCategory::Overtime150).is_empty());

    assert_eq!(result.totals.gross_pay, dec("456.64"));
    assert_eq!(result.totals.penalty_hours, dec("8"));
    assert_eq!(result.totals.overtime_hours, dec("2"));
}

/// Weekend overtime is flat no matter how deep the overtime runs: a 14h
/// Sunday has all 6 overtime hours at 2.0, never a 1.5 tier.
#[test]
fn test_sunday_deep_overtime_never_tiered() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-18", "04:00:00", "2026-01-18", "18:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let sunday = lines_of(&result, PayCategory::Sunday);
    assert_eq!(sunday[0].hours, dec("8"));
    assert_eq!(sunday[0].multiplier, dec("1.75"));

    let overtime = lines_of(&result, PayCategory::Overtime200);
    assert_eq!(overtime.len(), 1);
    assert_eq!(overtime[0].hours, dec("6"));
    assert_eq!(overtime[0].multiplier, dec("2.0"));
    assert!(lines_of(&result, PayCategory::Overtime150).is_empty());
}

/// Saturday casual ordinary pay is base × 1.75, never base × 1.25 × 1.5.
#[test]
fn test_saturday_casual_loading_not_compounded() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-17", "09:00:00", "2026-01-17", "17:00:00")];

    let result = calculate(
        &employee(EmploymentType::Casual, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let line = &result.pay_lines[0];
    assert_eq!(line.category, PayCategory::SaturdayCasual);
    assert_eq!(line.base_rate, dec("28.54"));
    assert_eq!(line.multiplier, dec("1.75"));
    assert_eq!(line.amount, dec("399.56")); // 8 × 28.54 × 1.75

    let compounded = dec("8") * dec("28.54") * dec("1.25") * dec("1.5");
    assert_ne!(line.amount, compounded);
}

/// Sunday casual ordinary pay is base × 2.0.
#[test]
fn test_sunday_casual_flat_multiplier() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-18", "09:00:00", "2026-01-18", "15:00:00")];

    let result = calculate(
        &employee(EmploymentType::Casual, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let line = &result.pay_lines[0];
    assert_eq!(line.category, PayCategory::SundayCasual);
    assert_eq!(line.multiplier, dec("2.0"));
    assert_eq!(line.amount, dec("342.48")); // 6 × 28.54 × 2.0
}

// =============================================================================
// Scenario: overnight shifts
// =============================================================================

/// Saturday 22:00 to Sunday 06:00, full-time: Saturday 2h at 1.5 (85.62)
/// and Sunday 6h at 1.75 (299.67), total 385.29.
#[test]
fn test_overnight_saturday_to_sunday() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-17", "22:00:00", "2026-01-18", "06:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    assert_eq!(result.pay_lines.len(), 2);

    let saturday = lines_of(&result, PayCategory::Saturday);
    assert_eq!(saturday[0].hours, dec("2"));
    assert_eq!(saturday[0].amount, dec("85.62"));
    assert_eq!(saturday[0].date, date("2026-01-17"));

    let sunday = lines_of(&result, PayCategory::Sunday);
    assert_eq!(sunday[0].hours, dec("6"));
    assert_eq!(sunday[0].amount, dec("299.67"));
    assert_eq!(sunday[0].date, date("2026-01-18"));

    assert_eq!(result.totals.gross_pay, dec("385.29"));
}

/// Friday 22:00 to Saturday 06:00: the Friday side is ordinary weekday time,
/// the Saturday side attracts the penalty rate.
#[test]
fn test_overnight_friday_to_saturday() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-16", "22:00:00", "2026-01-17", "06:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let ordinary = lines_of(&result, PayCategory::Ordinary);
    assert_eq!(ordinary[0].hours, dec("2"));
    assert_eq!(ordinary[0].amount, dec("57.08")); // 2 × 28.54

    let saturday = lines_of(&result, PayCategory::Saturday);
    assert_eq!(saturday[0].hours, dec("6"));
    assert_eq!(saturday[0].amount, dec("256.86")); // 6 × 28.54 × 1.5
}

/// An unpaid break spanning midnight is apportioned to each side by
/// wall-clock overlap.
#[test]
fn test_overnight_shift_with_midnight_spanning_break() {
    let rules = load_rules();
    let mut s = shift("shift_001", "2026-01-17", "22:00:00", "2026-01-18", "06:00:00");
    s.breaks = vec![Break {
        start_time: datetime("2026-01-17", "23:30:00"),
        end_time: datetime("2026-01-18", "00:30:00"),
        is_paid: false,
    }];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &[s],
        &rules,
    )
    .unwrap();

    let saturday = lines_of(&result, PayCategory::Saturday);
    assert_eq!(saturday[0].hours, dec("1.5")); // 2h - 30min

    let sunday = lines_of(&result, PayCategory::Sunday);
    assert_eq!(sunday[0].hours, dec("5.5")); // 6h - 30min

    let total_hours: Decimal = result.pay_lines.iter().map(|l| l.hours).sum();
    assert_eq!(total_hours, dec("7"));
}

// =============================================================================
// Scenario: overtime across multiple shifts on one calendar day
// =============================================================================

/// Two shifts on the same Monday totalling 10h: overtime is detected over
/// the day, not per shift.
#[test]
fn test_split_shifts_same_day_trigger_overtime() {
    let rules = load_rules();
    let shifts = vec![
        shift("shift_am", "2026-01-12", "06:00:00", "2026-01-12", "12:00:00"),
        shift("shift_pm", "2026-01-12", "14:00:00", "2026-01-12", "18:00:00"),
    ];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    // 10h on the day: 8 ordinary (6 + 2 chronologically), 2h tier 1.
    assert_eq!(result.totals.ordinary_hours, dec("8"));
    assert_eq!(result.totals.overtime_hours, dec("2"));

    let tier1 = lines_of(&result, PayCategory::Overtime150);
    assert_eq!(tier1.len(), 1);
    assert_eq!(tier1[0].hours, dec("2"));
    assert!(lines_of(&result, PayCategory::Overtime200).is_empty());
}

// =============================================================================
// Scenario: allowances
// =============================================================================

/// Casual with the laundry tag, 6 shifts: 6 × 0.32 = 1.92 capped at 1.49.
#[test]
fn test_laundry_allowance_capped() {
    let rules = load_rules();
    let shifts: Vec<Shift> = (0..6)
        .map(|i| {
            let day = format!("2026-01-{}", 12 + i);
            shift(&format!("shift_{i:03}"), &day, "09:00:00", &day, "13:00:00")
        })
        .collect();

    let result = calculate(
        &employee(EmploymentType::Casual, vec!["laundry_allowance"]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    assert_eq!(result.allowances.len(), 1);
    let allowance = &result.allowances[0];
    assert_eq!(allowance.allowance_type, "laundry");
    assert_eq!(allowance.units, dec("6"));
    assert_eq!(allowance.rate, dec("0.32"));
    assert_eq!(allowance.amount, dec("1.49")); // capped, not 1.92
    assert_eq!(result.totals.allowances_total, dec("1.49"));

    let cap_step = result
        .audit_trace
        .steps
        .iter()
        .find(|s| s.rule_id == "laundry_allowance")
        .unwrap();
    assert_eq!(cap_step.output["cap_applied"], true);
    assert!(cap_step.reasoning.contains("capped at weekly maximum"));
}

/// Three tagged shifts stay under the cap.
#[test]
fn test_laundry_allowance_uncapped() {
    let rules = load_rules();
    let shifts: Vec<Shift> = (0..3)
        .map(|i| {
            let day = format!("2026-01-{}", 12 + i);
            shift(&format!("shift_{i:03}"), &day, "09:00:00", &day, "17:00:00")
        })
        .collect();

    let result = calculate(
        &employee(EmploymentType::FullTime, vec!["laundry_allowance"]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    assert_eq!(result.allowances[0].amount, dec("0.96"));
}

/// Without the tag there is no allowance record at all.
#[test]
fn test_no_laundry_tag_no_allowance() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    assert!(result.allowances.is_empty());
    assert_eq!(result.totals.allowances_total, dec("0"));
    assert!(
        !result
            .audit_trace
            .steps
            .iter()
            .any(|s| s.rule_id == "laundry_allowance")
    );
}

// =============================================================================
// A full fortnight, mixed categories
// =============================================================================

#[test]
fn test_full_week_mixed_categories() {
    let rules = load_rules();
    let shifts = vec![
        shift("mon", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00"), // 8h ordinary
        shift("wed", "2026-01-14", "07:00:00", "2026-01-14", "18:00:00"), // 11h: OT both tiers
        shift("sat", "2026-01-17", "09:00:00", "2026-01-17", "17:00:00"), // 8h Saturday
        shift("sun", "2026-01-18", "09:00:00", "2026-01-18", "13:00:00"), // 4h Sunday
    ];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    // mon 228.32 + wed (228.32 + 85.62 + 57.08) + sat 342.48 + sun 199.78
    let sunday_amount = dec("4") * dec("28.54") * dec("1.75");
    let expected = dec("228.32") + dec("228.32") + dec("85.62") + dec("57.08")
        + dec("342.48")
        + sunday_amount;
    assert_eq!(result.totals.gross_pay, expected);

    assert_eq!(result.totals.ordinary_hours, dec("16"));
    assert_eq!(result.totals.overtime_hours, dec("3"));
    assert_eq!(result.totals.penalty_hours, dec("12"));

    // gross == Σ lines + Σ allowances, exactly
    let line_sum: Decimal = result.pay_lines.iter().map(|l| l.amount).sum();
    let allowance_sum: Decimal = result.allowances.iter().map(|a| a.amount).sum();
    assert_eq!(result.totals.gross_pay, line_sum + allowance_sum);
}

// =============================================================================
// Audit trace
// =============================================================================

/// The audit trace for a 12h weekday shift walks the causal order with
/// strictly increasing step numbers.
#[test]
fn test_audit_trace_12h_weekday() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-14", "06:00:00", "2026-01-14", "18:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let rule_ids: Vec<&str> = result
        .audit_trace
        .steps
        .iter()
        .map(|s| s.rule_id.as_str())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "base_rate_lookup",
            "shift_segmentation",
            "daily_overtime_detection",
            "ordinary_hours",
            "overtime_tier_1",
            "overtime_tier_2",
        ]
    );

    for (i, step) in result.audit_trace.steps.iter().enumerate() {
        assert_eq!(step.step_number, (i + 1) as u32);
    }

    // Clause references per rule.
    assert_eq!(result.audit_trace.steps[0].clause_ref, "14.2");
    assert_eq!(result.audit_trace.steps[2].clause_ref, "22.1(c), 25.1");
    assert_eq!(result.audit_trace.steps[4].clause_ref, "25.1(a)(i)(A)");
}

/// Casual calculations include the casual loading step with the worked
/// reasoning string.
#[test]
fn test_audit_trace_casual_loading_step() {
    let rules = load_rules();
    let shifts = vec![shift("shift_001", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00")];

    let result = calculate(
        &employee(EmploymentType::Casual, vec![]),
        &january_period(),
        &shifts,
        &rules,
    )
    .unwrap();

    let loading = &result.audit_trace.steps[1];
    assert_eq!(loading.rule_id, "casual_loading");
    assert_eq!(loading.clause_ref, "10.4(b)");
    assert_eq!(loading.reasoning, "$28.54 × 1.25 = $35.675");
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_unknown_classification_fails_whole_calculation() {
    let rules = load_rules();
    let mut emp = employee(EmploymentType::FullTime, vec![]);
    emp.classification_code = "unknown_level".to_string();
    let shifts = vec![shift("shift_001", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00")];

    let result = calculate(&emp, &january_period(), &shifts, &rules);

    match result.unwrap_err() {
        EngineError::ClassificationNotFound { code } => assert_eq!(code, "unknown_level"),
        other => panic!("Expected ClassificationNotFound, got {:?}", other),
    }
}

#[test]
fn test_rate_override_bypasses_classification() {
    let rules = load_rules();
    let mut emp = employee(EmploymentType::FullTime, vec![]);
    emp.classification_code = "unlisted_code".to_string();
    emp.base_hourly_rate = Some(dec("30.00"));
    let shifts = vec![shift("shift_001", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00")];

    let result = calculate(&emp, &january_period(), &shifts, &rules).unwrap();

    assert_eq!(result.pay_lines[0].base_rate, dec("30.00"));
    assert_eq!(result.totals.gross_pay, dec("240.00"));
}

#[test]
fn test_invalid_shift_produces_no_partial_result() {
    let rules = load_rules();
    let shifts = vec![
        shift("shift_ok", "2026-01-12", "09:00:00", "2026-01-12", "17:00:00"),
        shift("shift_bad", "2026-01-13", "17:00:00", "2026-01-13", "09:00:00"),
    ];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &january_period(),
        &shifts,
        &rules,
    );

    assert!(matches!(
        result.unwrap_err(),
        EngineError::InvalidShift { .. }
    ));
}

#[test]
fn test_rate_lookup_respects_effective_date() {
    let rules = load_rules();
    // June 2025 predates the 2025-07-01 table; the 2024 rate applies.
    let period = PayPeriod {
        start_date: date("2025-06-01"),
        end_date: date("2025-06-14"),
        public_holidays: vec![],
    };
    let shifts = vec![shift("shift_001", "2025-06-02", "09:00:00", "2025-06-02", "17:00:00")];

    let result = calculate(
        &employee(EmploymentType::FullTime, vec![]),
        &period,
        &shifts,
        &rules,
    )
    .unwrap();

    assert_eq!(result.pay_lines[0].base_rate, dec("27.50"));
    assert_eq!(result.totals.gross_pay, dec("220.00"));
}
