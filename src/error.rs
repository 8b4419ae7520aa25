//! Error types for the pay calculation engine.
//!
//! Strongly-typed errors via `thiserror`. Any error aborts the entire
//! calculation for that employee and period; the engine never returns a
//! partial result.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the pay calculation engine.
///
/// Configuration errors (`ClassificationNotFound`, `RateNotFound`) mean rate
/// resolution could not complete. Validation errors (`InvalidShift`,
/// `InvalidEmployee`) mean the input was structurally invalid. A
/// `CalculationError` is an internal invariant violation and indicates a
/// defect, never an expected condition.
///
/// # Example
///
/// ```
/// use pay_engine::error::EngineError;
///
/// let error = EngineError::ClassificationNotFound {
///     code: "lvl_99".to_string(),
/// };
/// assert_eq!(error.to_string(), "Classification not found: lvl_99");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Classification code was not found in the rule set.
    #[error("Classification not found: {code}")]
    ClassificationNotFound {
        /// The classification code that was not found.
        code: String,
    },

    /// No rate row is effective on or before the given date.
    #[error("Rate not found for classification '{classification}' on date {date}")]
    RateNotFound {
        /// The classification code.
        classification: String,
        /// The date for which the rate was requested.
        date: NaiveDate,
    },

    /// A shift was structurally invalid (end before start, break out of
    /// bounds, overlapping breaks).
    #[error("Invalid shift '{shift_id}': {reason}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// What made the shift invalid.
        reason: String,
    },

    /// An employee record was structurally invalid.
    #[error("Invalid employee field '{field}': {reason}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// What made the field invalid.
        reason: String,
    },

    /// An internal invariant was violated during calculation.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the violated invariant.
        message: String,
    },
}

/// A type alias for Results that return [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;
