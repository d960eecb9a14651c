/// Error types for the time series core
use crate::interval::IntervalBase;
use thiserror::Error;

/// Main error type for time series operations.
///
/// Reads and writes outside the period of record are not errors: reads
/// return the missing value and writes are ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TsError {
    /// Allocation requested before both period bounds were set
    #[error("Period of record is not set: date1 and date2 are required before allocation")]
    MissingPeriod,

    /// Period start is after period end
    #[error("Period start {start} is after period end {end}")]
    InvalidPeriod { start: String, end: String },

    /// The interval multiplier is not supported for this granularity
    #[error("Interval multiplier {mult} is not supported for {base} time series")]
    UnsupportedInterval { base: IntervalBase, mult: u32 },

    /// Text could not be parsed as a date/time, or components are out of range
    #[error("Invalid date/time: {0}")]
    InvalidPosition(String),

    /// Text could not be parsed as a time series identifier
    #[error("Invalid time series identifier: {0}")]
    InvalidIdentifier(String),

    /// Text could not be parsed as an interval
    #[error("Unknown interval: {0}")]
    UnknownInterval(String),
}

/// Type alias for Results using TsError
pub type Result<T> = std::result::Result<T, TsError>;
