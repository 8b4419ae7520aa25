//! Day-type classification and shift segmentation.
//!
//! Splits a shift at every midnight boundary it crosses and classifies each
//! segment by day type. Unpaid breaks are subtracted from whichever
//! segment(s) they fall into; a break that itself spans midnight is
//! apportioned to each side by wall-clock overlap.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Shift;

/// The type of day for penalty rate purposes.
///
/// Dispatch over day types is always an exhaustive match; the weekend
/// variants fully override the generic weekday rules wherever both could
/// apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a calendar date.
///
/// # Example
///
/// ```
/// use pay_engine::engine::{day_type_of, DayType};
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(day_type_of(saturday), DayType::Saturday);
/// ```
pub fn day_type_of(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// A portion of a shift lying within a single calendar day.
///
/// Segments are derived, never persisted. For a given shift they are
/// contiguous, chronologically ordered, and their hours sum to the shift's
/// worked hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSegment {
    /// The start time of this segment.
    pub start_time: NaiveDateTime,
    /// The end time of this segment (at most the following midnight).
    pub end_time: NaiveDateTime,
    /// The day type of the calendar day this segment lies in.
    pub day_type: DayType,
    /// Worked hours in this segment: wall-clock span minus the unpaid break
    /// time falling inside it.
    pub hours: Decimal,
}

impl ShiftSegment {
    /// The calendar date this segment lies in.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// Segments a shift at midnight boundaries.
///
/// A shift entirely within one calendar day yields one segment; a shift
/// crossing midnights yields one segment per calendar day touched. Each
/// segment's day type comes from the calendar date it lies in, not the
/// shift's nominal `date` field. Unpaid break time is subtracted from the
/// segment(s) it overlaps; paid breaks are never subtracted. Segments whose
/// hours come to zero are dropped.
///
/// # Errors
///
/// - [`EngineError::InvalidShift`] if the shift fails structural validation
/// - [`EngineError::CalculationError`] if the segment hours fail to sum to
///   the shift's worked hours (an internal invariant)
///
/// # Example
///
/// ```
/// use pay_engine::engine::{segment_shift, DayType};
/// use pay_engine::models::Shift;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// // A shift crossing Saturday midnight into Sunday
/// let shift = Shift {
///     id: "shift_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
///     start_time: NaiveDateTime::parse_from_str("2026-01-17 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end_time: NaiveDateTime::parse_from_str("2026-01-18 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     breaks: vec![],
/// };
///
/// let segments = segment_shift(&shift).unwrap();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].day_type, DayType::Saturday);
/// assert_eq!(segments[0].hours, Decimal::new(20, 1)); // 2.0 hours
/// assert_eq!(segments[1].day_type, DayType::Sunday);
/// assert_eq!(segments[1].hours, Decimal::new(60, 1)); // 6.0 hours
/// ```
pub fn segment_shift(shift: &Shift) -> EngineResult<Vec<ShiftSegment>> {
    shift.validate()?;

    let mut segments = Vec::new();
    let mut current_start = shift.start_time;

    while current_start < shift.end_time {
        let next_midnight = (current_start.date() + chrono::Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("no midnight follows {current_start}"),
            })?;

        let segment_end = next_midnight.min(shift.end_time);

        let span_minutes = (segment_end - current_start).num_minutes();
        let unpaid_minutes = unpaid_break_overlap_minutes(shift, current_start, segment_end);
        let hours = Decimal::new(span_minutes - unpaid_minutes, 0) / Decimal::new(60, 0);

        if hours > Decimal::ZERO {
            segments.push(ShiftSegment {
                start_time: current_start,
                end_time: segment_end,
                day_type: day_type_of(current_start.date()),
                hours,
            });
        }

        current_start = segment_end;
    }

    let segment_total: Decimal = segments.iter().map(|s| s.hours).sum();
    if segment_total != shift.worked_hours() {
        return Err(EngineError::CalculationError {
            message: format!(
                "segment hours {} do not sum to worked hours {} for shift '{}'",
                segment_total,
                shift.worked_hours(),
                shift.id
            ),
        });
    }

    Ok(segments)
}

/// Sums the minutes of unpaid break time overlapping the window
/// [`window_start`, `window_end`).
fn unpaid_break_overlap_minutes(
    shift: &Shift,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> i64 {
    shift
        .breaks
        .iter()
        .filter(|b| !b.is_paid)
        .map(|b| {
            let overlap_start = b.start_time.max(window_start);
            let overlap_end = b.end_time.min(window_end);
            if overlap_end > overlap_start {
                (overlap_end - overlap_start).num_minutes()
            } else {
                0
            }
        })
        .sum()
}
