//! Rule set types.
//!
//! Strongly-typed wage rule tables, deserialized from YAML files by the
//! loader and consumed read-only by the engine for the lifetime of one
//! calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::EmploymentType;

/// Metadata identifying a rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetMetadata {
    /// The rule set code (e.g., "SAMPLE-01").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
    /// URL to the governing documentation.
    pub source_url: String,
}

/// A classification within the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    /// The human-readable name of the classification.
    pub name: String,
    /// A description of the classification.
    pub description: String,
    /// Reference to the clause defining this classification.
    pub clause: String,
}

/// Classifications configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationsConfig {
    /// Map of classification code to classification details.
    pub classifications: HashMap<String, Classification>,
}

/// Rate information for a specific classification.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationRate {
    /// The weekly rate for this classification.
    pub weekly: Decimal,
    /// The hourly rate for this classification.
    pub hourly: Decimal,
}

/// Per-shift rate and weekly cap for one allowance kind.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowanceRate {
    /// The allowance amount per shift.
    pub per_shift: Decimal,
    /// The maximum allowance per week.
    pub weekly_cap: Decimal,
}

/// Rate table for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// The date these rates take effect.
    pub effective_date: NaiveDate,
    /// Map of classification code to rates.
    pub rates: HashMap<String, ClassificationRate>,
    /// Allowance rates keyed by allowance kind (e.g., "laundry").
    #[serde(default)]
    pub allowances: HashMap<String, AllowanceRate>,
}

/// Penalty multipliers by employment type for one day type.
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyRates {
    /// Reference to the clause for these penalties.
    pub clause: String,
    /// Penalty multiplier for full-time employees.
    pub full_time: Decimal,
    /// Penalty multiplier for part-time employees.
    pub part_time: Decimal,
    /// Penalty multiplier for casual employees (flat on the base rate,
    /// already inclusive of casual loading).
    pub casual: Decimal,
}

impl PenaltyRates {
    /// Returns the multiplier for the given employment type.
    pub fn multiplier(&self, employment_type: EmploymentType) -> Decimal {
        match employment_type {
            EmploymentType::FullTime => self.full_time,
            EmploymentType::PartTime => self.part_time,
            EmploymentType::Casual => self.casual,
        }
    }
}

/// Overtime multipliers by employment type.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeRates {
    /// Overtime multiplier for full-time employees.
    pub full_time: Decimal,
    /// Overtime multiplier for part-time employees.
    pub part_time: Decimal,
    /// Overtime multiplier for casual employees (already inclusive of
    /// casual loading).
    pub casual: Decimal,
}

impl OvertimeRates {
    /// Returns the multiplier for the given employment type.
    pub fn multiplier(&self, employment_type: EmploymentType) -> Decimal {
        match employment_type {
            EmploymentType::FullTime => self.full_time,
            EmploymentType::PartTime => self.part_time,
            EmploymentType::Casual => self.casual,
        }
    }
}

/// Tiered weekday overtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekdayOvertime {
    /// Reference to the weekday overtime clause.
    pub clause: String,
    /// Rates for the first tier of overtime.
    pub first_two_hours: OvertimeRates,
    /// Rates after the tier boundary.
    pub after_two_hours: OvertimeRates,
}

/// Flat weekend overtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekendOvertime {
    /// Reference to the weekend overtime clause.
    pub clause: String,
    /// The flat rates applied from the first weekend overtime hour.
    pub rates: OvertimeRates,
}

fn default_daily_threshold() -> u32 {
    8
}

fn default_tier_boundary() -> u32 {
    2
}

/// Overtime table: daily threshold, weekday tiers and weekend flat rates.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeTable {
    /// Hours per calendar day before overtime starts.
    #[serde(default = "default_daily_threshold")]
    pub daily_threshold_hours: u32,
    /// Overtime hours paid at the first weekday tier before tier 2 starts.
    #[serde(default = "default_tier_boundary")]
    pub weekday_tier_boundary_hours: u32,
    /// Tiered weekday overtime rates.
    pub weekday: WeekdayOvertime,
    /// Flat weekend overtime rates.
    pub weekend: WeekendOvertime,
}

impl OvertimeTable {
    /// The daily overtime threshold as a decimal hour count.
    pub fn daily_threshold(&self) -> Decimal {
        Decimal::from(self.daily_threshold_hours)
    }

    /// The weekday tier-1 boundary as a decimal hour count.
    pub fn weekday_tier_boundary(&self) -> Decimal {
        Decimal::from(self.weekday_tier_boundary_hours)
    }
}

/// Weekend penalty table.
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyTable {
    /// Saturday penalty rates.
    pub saturday: PenaltyRates,
    /// Sunday penalty rates.
    pub sunday: PenaltyRates,
}

/// Structure of the penalties configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyConfig {
    /// Weekend penalty rates.
    pub penalties: PenaltyTable,
    /// Overtime table.
    pub overtime: OvertimeTable,
}

/// The complete rule set consumed by the engine.
///
/// Aggregates every table the engine needs; immutable after construction
/// and shared read-only across calculations.
#[derive(Debug, Clone)]
pub struct RuleSet {
    metadata: RuleSetMetadata,
    classifications: HashMap<String, Classification>,
    /// Rate tables sorted by effective date ascending.
    rates: Vec<RateTable>,
    penalties: PenaltyTable,
    overtime: OvertimeTable,
}

impl RuleSet {
    /// Creates a new rule set from its component tables.
    ///
    /// Rate tables are sorted by effective date so lookups can scan from the
    /// most recent.
    pub fn new(
        metadata: RuleSetMetadata,
        classifications: HashMap<String, Classification>,
        rates: Vec<RateTable>,
        penalties: PenaltyTable,
        overtime: OvertimeTable,
    ) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            classifications,
            rates: sorted_rates,
            penalties,
            overtime,
        }
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &RuleSetMetadata {
        &self.metadata
    }

    /// Returns all classifications.
    pub fn classifications(&self) -> &HashMap<String, Classification> {
        &self.classifications
    }

    /// Returns the weekend penalty table.
    pub fn penalties(&self) -> &PenaltyTable {
        &self.penalties
    }

    /// Returns the overtime table.
    pub fn overtime(&self) -> &OvertimeTable {
        &self.overtime
    }

    /// Returns all rate tables, sorted by effective date ascending.
    pub fn rates(&self) -> &[RateTable] {
        &self.rates
    }

    /// Looks up a classification by code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClassificationNotFound`] if the code is absent.
    pub fn get_classification(&self, code: &str) -> EngineResult<&Classification> {
        self.classifications
            .get(code)
            .ok_or_else(|| EngineError::ClassificationNotFound {
                code: code.to_string(),
            })
    }

    /// Returns the rate table most recently effective on or before `date`.
    pub fn rate_table_for(&self, date: NaiveDate) -> Option<&RateTable> {
        self.rates.iter().rfind(|r| r.effective_date <= date)
    }

    /// Looks up the hourly rate for a classification effective on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClassificationNotFound`] if the code is not in
    /// the classification table, or [`EngineError::RateNotFound`] if no rate
    /// row is effective on or before `date` for that classification.
    pub fn get_hourly_rate(&self, code: &str, date: NaiveDate) -> EngineResult<Decimal> {
        self.get_classification(code)?;

        self.rate_table_for(date)
            .and_then(|table| table.rates.get(code))
            .map(|r| r.hourly)
            .ok_or_else(|| EngineError::RateNotFound {
                classification: code.to_string(),
                date,
            })
    }

    /// Looks up the allowance rate for a kind key effective on `date`.
    ///
    /// Returns `None` when no rate table is effective or the kind is not
    /// configured; missing allowance rates are a warning condition, not an
    /// error.
    pub fn get_allowance_rate(&self, key: &str, date: NaiveDate) -> Option<&AllowanceRate> {
        self.rate_table_for(date)
            .and_then(|table| table.allowances.get(key))
    }
}
