//! Base and casual rate resolution.
//!
//! Resolves an employee's base hourly rate (override or classification
//! lookup) and the casual-loaded rate.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RuleSet;
use crate::error::EngineResult;
use crate::models::{Employee, EmploymentType};

use super::audit::AuditTrail;

/// Returns the casual loading multiplier defined in clause 10.4(b).
///
/// The multiplier is 1.25 (25% loading).
pub fn casual_loading_multiplier() -> Decimal {
    Decimal::new(125, 2)
}

/// The rates resolved for one employee and effective date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRates {
    /// The raw base hourly rate.
    pub base_rate: Decimal,
    /// The casual-loaded rate: base × 1.25 exactly, no rounding. Equal to
    /// the base rate for non-casual employment types.
    pub casual_rate: Decimal,
}

impl ResolvedRates {
    /// Returns the rate ordinary weekday hours are paid at for the given
    /// employment type.
    pub fn ordinary_rate(&self, employment_type: EmploymentType) -> Decimal {
        match employment_type {
            EmploymentType::Casual => self.casual_rate,
            EmploymentType::FullTime | EmploymentType::PartTime => self.base_rate,
        }
    }
}

/// Resolves the base and casual-loaded hourly rates for an employee.
///
/// An employee-level rate override short-circuits the classification lookup;
/// otherwise the rate table is queried with a most-recent-effective-on-or-
/// before lookup.
///
/// Records a `base_rate_lookup` audit step (clause 14.2) and, for casual
/// employees, a `casual_loading` step (clause 10.4(b)).
///
/// # Errors
///
/// - [`EngineError::ClassificationNotFound`] if the classification code is
///   absent from the classification table
/// - [`EngineError::RateNotFound`] if no rate row is effective on or before
///   `effective_date` for that classification
///
/// [`EngineError::ClassificationNotFound`]: crate::error::EngineError::ClassificationNotFound
/// [`EngineError::RateNotFound`]: crate::error::EngineError::RateNotFound
pub fn resolve_rates(
    employee: &Employee,
    effective_date: NaiveDate,
    rules: &RuleSet,
    audit: &mut AuditTrail,
) -> EngineResult<ResolvedRates> {
    let base_rate = match employee.base_hourly_rate {
        Some(override_rate) => {
            audit.record(
                "base_rate_lookup",
                "Base Rate Lookup",
                "14.2",
                serde_json::json!({
                    "classification_code": employee.classification_code,
                    "employee_override_rate": override_rate.normalize().to_string(),
                    "effective_date": effective_date.to_string()
                }),
                serde_json::json!({
                    "rate": override_rate.normalize().to_string(),
                    "source": "employee_override"
                }),
                format!(
                    "Using employee override rate ${} instead of classification lookup",
                    override_rate.normalize()
                ),
            );
            override_rate
        }
        None => {
            let rate = rules.get_hourly_rate(&employee.classification_code, effective_date)?;
            let table_date = rules
                .rate_table_for(effective_date)
                .map(|t| t.effective_date.to_string())
                .unwrap_or_default();

            audit.record(
                "base_rate_lookup",
                "Base Rate Lookup",
                "14.2",
                serde_json::json!({
                    "classification_code": employee.classification_code,
                    "effective_date": effective_date.to_string()
                }),
                serde_json::json!({
                    "rate": rate.normalize().to_string(),
                    "source": "config",
                    "rate_effective_date": table_date
                }),
                format!(
                    "Looked up rate for classification '{}' effective {}: ${}",
                    employee.classification_code,
                    table_date,
                    rate.normalize()
                ),
            );
            rate
        }
    };

    let casual_rate = if employee.is_casual() {
        let loaded = base_rate * casual_loading_multiplier();
        audit.record(
            "casual_loading",
            "Casual Loading",
            "10.4(b)",
            serde_json::json!({
                "base_rate": base_rate.normalize().to_string(),
                "employment_type": employee.employment_type.as_str()
            }),
            serde_json::json!({
                "loaded_rate": loaded.normalize().to_string(),
                "multiplier": casual_loading_multiplier().normalize().to_string()
            }),
            format!(
                "${} × {} = ${}",
                base_rate.normalize(),
                casual_loading_multiplier().normalize(),
                loaded.normalize()
            ),
        );
        loaded
    } else {
        base_rate
    };

    Ok(ResolvedRates {
        base_rate,
        casual_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{test_employee, test_rules};
    use crate::error::EngineError;
    use crate::models::EmploymentType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn effective_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    // =========================================================================
    // RR-001: classification lookup
    // =========================================================================
    #[test]
    fn test_rr_001_classification_lookup() {
        let rules = test_rules();
        let employee = test_employee(EmploymentType::FullTime);
        let mut audit = AuditTrail::new();

        let rates = resolve_rates(&employee, effective_date(), &rules, &mut audit).unwrap();

        assert_eq!(rates.base_rate, dec("28.54"));
        assert_eq!(rates.casual_rate, dec("28.54"));
        assert_eq!(rates.ordinary_rate(EmploymentType::FullTime), dec("28.54"));

        assert_eq!(audit.steps().len(), 1);
        assert_eq!(audit.steps()[0].rule_id, "base_rate_lookup");
        assert_eq!(audit.steps()[0].clause_ref, "14.2");
        assert_eq!(audit.steps()[0].output["source"], "config");
    }

    // =========================================================================
    // RR-002: override short-circuits lookup
    // =========================================================================
    #[test]
    fn test_rr_002_override_short_circuits_lookup() {
        let rules = test_rules();
        let mut employee = test_employee(EmploymentType::FullTime);
        employee.base_hourly_rate = Some(dec("32.00"));
        let mut audit = AuditTrail::new();

        let rates = resolve_rates(&employee, effective_date(), &rules, &mut audit).unwrap();

        assert_eq!(rates.base_rate, dec("32.00"));
        assert_eq!(audit.steps()[0].output["source"], "employee_override");
    }

    // =========================================================================
    // RR-003: casual rate is base × 1.25 exactly
    // =========================================================================
    #[test]
    fn test_rr_003_casual_rate_exact() {
        let rules = test_rules();
        let employee = test_employee(EmploymentType::Casual);
        let mut audit = AuditTrail::new();

        let rates = resolve_rates(&employee, effective_date(), &rules, &mut audit).unwrap();

        // 28.54 × 1.25 = 35.675, unrounded
        assert_eq!(rates.base_rate, dec("28.54"));
        assert_eq!(rates.casual_rate, dec("35.675"));
        assert_eq!(rates.ordinary_rate(EmploymentType::Casual), dec("35.675"));
    }

    // =========================================================================
    // RR-004: casual loading step only for casuals
    // =========================================================================
    #[test]
    fn test_rr_004_casual_loading_step_only_for_casuals() {
        let rules = test_rules();
        let mut audit = AuditTrail::new();
        resolve_rates(
            &test_employee(EmploymentType::Casual),
            effective_date(),
            &rules,
            &mut audit,
        )
        .unwrap();

        assert_eq!(audit.steps().len(), 2);
        assert_eq!(audit.steps()[1].rule_id, "casual_loading");
        assert_eq!(audit.steps()[1].clause_ref, "10.4(b)");
        assert_eq!(audit.steps()[1].reasoning, "$28.54 × 1.25 = $35.675");

        let mut audit = AuditTrail::new();
        resolve_rates(
            &test_employee(EmploymentType::PartTime),
            effective_date(),
            &rules,
            &mut audit,
        )
        .unwrap();

        assert_eq!(audit.steps().len(), 1);
    }

    // =========================================================================
    // RR-005: unknown classification
    // =========================================================================
    #[test]
    fn test_rr_005_unknown_classification() {
        let rules = test_rules();
        let mut employee = test_employee(EmploymentType::FullTime);
        employee.classification_code = "unknown".to_string();
        let mut audit = AuditTrail::new();

        let result = resolve_rates(&employee, effective_date(), &rules, &mut audit);

        match result.unwrap_err() {
            EngineError::ClassificationNotFound { code } => assert_eq!(code, "unknown"),
            other => panic!("Expected ClassificationNotFound, got {:?}", other),
        }
    }

    // =========================================================================
    // RR-006: no rate effective before first table
    // =========================================================================
    #[test]
    fn test_rr_006_rate_not_found_for_early_date() {
        let rules = test_rules();
        let employee = test_employee(EmploymentType::FullTime);
        let mut audit = AuditTrail::new();
        let early = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        let result = resolve_rates(&employee, early, &rules, &mut audit);

        match result.unwrap_err() {
            EngineError::RateNotFound {
                classification,
                date,
            } => {
                assert_eq!(classification, "care_level_3");
                assert_eq!(date, early);
            }
            other => panic!("Expected RateNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_casual_loading_multiplier_is_exactly_1_25() {
        assert_eq!(casual_loading_multiplier(), dec("1.25"));
    }

    #[test]
    fn test_override_with_casual_loading() {
        let rules = test_rules();
        let mut employee = test_employee(EmploymentType::Casual);
        employee.base_hourly_rate = Some(dec("25.00"));
        let mut audit = AuditTrail::new();

        let rates = resolve_rates(&employee, effective_date(), &rules, &mut audit).unwrap();

        assert_eq!(rates.casual_rate, dec("31.25"));
        assert_eq!(audit.steps().len(), 2);
    }
}
