//! Employee model and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment (typically 38 hours per week).
    FullTime,
    /// Part-time employment (less than 38 hours per week with regular pattern).
    PartTime,
    /// Casual employment (no guaranteed hours, attracts casual loading).
    Casual,
}

impl EmploymentType {
    /// Returns the snake_case label used in audit snapshots and config keys.
    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Casual => "casual",
        }
    }
}

/// Represents an employee whose shifts are being priced.
///
/// Immutable for the duration of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// The classification code (e.g., "care_level_3").
    pub classification_code: String,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// The date the employee started employment.
    pub employment_start_date: NaiveDate,
    /// Optional override for the base hourly rate. When present it
    /// short-circuits the classification rate lookup.
    pub base_hourly_rate: Option<Decimal>,
    /// Capability tags (e.g., allowance eligibility, qualifications).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Employee {
    /// Returns true if the employee is a casual worker.
    ///
    /// # Examples
    ///
    /// ```
    /// use pay_engine::models::{Employee, EmploymentType};
    /// use chrono::NaiveDate;
    ///
    /// let casual = Employee {
    ///     id: "emp_001".to_string(),
    ///     employment_type: EmploymentType::Casual,
    ///     classification_code: "care_level_3".to_string(),
    ///     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
    ///     employment_start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     base_hourly_rate: None,
    ///     tags: vec![],
    /// };
    /// assert!(casual.is_casual());
    /// ```
    pub fn is_casual(&self) -> bool {
        self.employment_type == EmploymentType::Casual
    }

    /// Returns true if the employee carries the given capability tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Checks the record for structural validity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] naming the offending field
    /// when:
    /// - `id` is empty
    /// - `classification_code` is empty and no rate override is present
    /// - `date_of_birth` is not before `employment_start_date`
    /// - `base_hourly_rate` is negative
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.classification_code.is_empty() && self.base_hourly_rate.is_none() {
            return Err(EngineError::InvalidEmployee {
                field: "classification_code".to_string(),
                reason: "must not be empty unless a rate override is provided".to_string(),
            });
        }
        if self.date_of_birth >= self.employment_start_date {
            return Err(EngineError::InvalidEmployee {
                field: "date_of_birth".to_string(),
                reason: "must precede employment start date".to_string(),
            });
        }
        if let Some(rate) = self.base_hourly_rate {
            if rate.is_sign_negative() {
                return Err(EngineError::InvalidEmployee {
                    field: "base_hourly_rate".to_string(),
                    reason: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }
}
