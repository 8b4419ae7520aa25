//! Pay period and public holiday models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a public holiday within a pay period.
///
/// Holidays are carried through the calculation context per region; no
/// holiday penalty rule is currently defined over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday.
    pub name: String,
    /// The region where this holiday applies (e.g., "national", "VIC").
    pub region: String,
}

/// Represents a pay period with its date range and associated public holidays.
///
/// # Example
///
/// ```
/// use pay_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     public_holidays: vec![],
/// };
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// Public holidays that fall within this pay period.
    #[serde(default)]
    pub public_holidays: Vec<PublicHoliday>,
}

impl PayPeriod {
    /// Checks whether a date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks whether a date is a public holiday within this pay period.
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.public_holidays.iter().any(|h| h.date == date)
    }
}
