//! Shift model and related types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a break taken during a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    /// The start time of the break.
    pub start_time: NaiveDateTime,
    /// The end time of the break.
    pub end_time: NaiveDateTime,
    /// Whether the break is paid (true) or unpaid (false).
    pub is_paid: bool,
}

impl Break {
    /// Returns the duration of the break in minutes.
    pub(crate) fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Represents a work shift with timing information and breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The nominal calendar date of the shift.
    pub date: NaiveDate,
    /// The start time of the shift.
    pub start_time: NaiveDateTime,
    /// The end time of the shift (may fall on the following date).
    pub end_time: NaiveDateTime,
    /// Breaks taken during the shift.
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl Shift {
    /// Calculates the total worked hours for the shift.
    ///
    /// The wall-clock span of the shift minus unpaid breaks. Paid breaks are
    /// NOT subtracted.
    ///
    /// # Examples
    ///
    /// ```
    /// use pay_engine::models::Shift;
    /// use chrono::{NaiveDate, NaiveDateTime};
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start_time: NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     breaks: vec![],
    /// };
    /// assert_eq!(shift.worked_hours(), Decimal::new(80, 1)); // 8.0 hours
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        let total_minutes = (self.end_time - self.start_time).num_minutes();

        let unpaid_break_minutes: i64 = self
            .breaks
            .iter()
            .filter(|b| !b.is_paid)
            .map(|b| b.duration_minutes())
            .sum();

        let worked_minutes = total_minutes - unpaid_break_minutes;

        Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)
    }

    /// Checks the shift for structural validity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShift`] when:
    /// - the end time is not after the start time
    /// - a break has end before start, or lies outside the shift span
    /// - two breaks overlap each other
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_time <= self.start_time {
            return Err(self.invalid("end time is not after start time"));
        }

        for b in &self.breaks {
            if b.end_time <= b.start_time {
                return Err(self.invalid("break end time is not after break start time"));
            }
            if b.start_time < self.start_time || b.end_time > self.end_time {
                return Err(self.invalid("break lies outside the shift span"));
            }
        }

        // Breaks may arrive in any order; overlap is checked pairwise on the
        // sorted sequence.
        let mut sorted: Vec<&Break> = self.breaks.iter().collect();
        sorted.sort_by_key(|b| b.start_time);
        for pair in sorted.windows(2) {
            if pair[1].start_time < pair[0].end_time {
                return Err(self.invalid("breaks overlap each other"));
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: &str) -> EngineError {
        EngineError::InvalidShift {
            shift_id: self.id.clone(),
            reason: reason.to_string(),
        }
    }
}
