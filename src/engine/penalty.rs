//! Ordinary-hours pricing: weekday rates and weekend penalty rates.
//!
//! Prices the ordinary (non-overtime) hours of a day segment. Weekend
//! multipliers for casuals are flat multipliers on the raw base rate; the
//! engine never compounds casual loading with a weekend penalty.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RuleSet;
use crate::models::{Employee, EmploymentType, PayCategory, PayLine};

use super::audit::AuditTrail;
use super::rates::{ResolvedRates, casual_loading_multiplier};
use super::segmenter::DayType;

/// Prices ordinary (non-overtime) hours on one calendar day.
///
/// The multiplier, category and clause are selected by an exhaustive match
/// over (day type × employment type):
///
/// | Day      | Full/part time   | Casual                  |
/// |----------|------------------|-------------------------|
/// | Weekday  | 1.00 `Ordinary`  | 1.25 `OrdinaryCasual`   |
/// | Saturday | 1.50 `Saturday`  | 1.75 `SaturdayCasual`   |
/// | Sunday   | 1.75 `Sunday`    | 2.00 `SundayCasual`     |
///
/// Saturday and Sunday multipliers come from the penalty table; the weekday
/// casual multiplier is the fixed casual loading. In every case the
/// multiplier applies to the raw base rate.
///
/// Records one audit step (`ordinary_hours`, `saturday_penalty` or
/// `sunday_penalty`) carrying the day type, hours and multiplier.
pub fn price_ordinary_hours(
    date: NaiveDate,
    day_type: DayType,
    hours: Decimal,
    employee: &Employee,
    rates: &ResolvedRates,
    rules: &RuleSet,
    audit: &mut AuditTrail,
) -> PayLine {
    let (rule_id, rule_name, multiplier, category, clause_ref) =
        match (day_type, employee.employment_type) {
            (DayType::Weekday, EmploymentType::FullTime | EmploymentType::PartTime) => (
                "ordinary_hours",
                "Ordinary Hours",
                Decimal::ONE,
                PayCategory::Ordinary,
                "22.1".to_string(),
            ),
            (DayType::Weekday, EmploymentType::Casual) => (
                "ordinary_hours",
                "Ordinary Hours",
                casual_loading_multiplier(),
                PayCategory::OrdinaryCasual,
                "10.4(b), 22.1".to_string(),
            ),
            (DayType::Saturday, EmploymentType::FullTime | EmploymentType::PartTime) => (
                "saturday_penalty",
                "Saturday Penalty Rate",
                rules.penalties().saturday.multiplier(employee.employment_type),
                PayCategory::Saturday,
                rules.penalties().saturday.clause.clone(),
            ),
            (DayType::Saturday, EmploymentType::Casual) => (
                "saturday_penalty",
                "Saturday Penalty Rate",
                rules.penalties().saturday.casual,
                PayCategory::SaturdayCasual,
                "23.2(a)".to_string(),
            ),
            (DayType::Sunday, EmploymentType::FullTime | EmploymentType::PartTime) => (
                "sunday_penalty",
                "Sunday Penalty Rate",
                rules.penalties().sunday.multiplier(employee.employment_type),
                PayCategory::Sunday,
                rules.penalties().sunday.clause.clone(),
            ),
            (DayType::Sunday, EmploymentType::Casual) => (
                "sunday_penalty",
                "Sunday Penalty Rate",
                rules.penalties().sunday.casual,
                PayCategory::SundayCasual,
                "23.2(b)".to_string(),
            ),
        };

    let base_rate = rates.base_rate;
    let amount = hours * base_rate * multiplier;

    audit.record(
        rule_id,
        rule_name,
        &clause_ref,
        serde_json::json!({
            "date": date.to_string(),
            "day_type": day_type.to_string(),
            "hours": hours.normalize().to_string(),
            "base_rate": base_rate.normalize().to_string(),
            "employment_type": employee.employment_type.as_str()
        }),
        serde_json::json!({
            "multiplier": multiplier.normalize().to_string(),
            "amount": amount.normalize().to_string(),
            "category": format!("{:?}", category)
        }),
        format!(
            "{}: {} hours × ${} × {} = ${}",
            rule_name,
            hours.normalize(),
            base_rate.normalize(),
            multiplier.normalize(),
            amount.normalize()
        ),
    );

    PayLine {
        date,
        category,
        hours,
        base_rate,
        multiplier,
        amount,
        clause_ref,
    }
}
