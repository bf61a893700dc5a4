//! Unified error handling for data containers.
//!
//! This module defines `DataError`, the error type shared by the scalar,
//! series, and interval containers. It covers construction-time shape
//! validation (series/interval length mismatches, unordered intervals) and
//! lookup failures. The alias `DataResult<T>` standardizes the return type
//! across container code.

use crate::model::types::TimePoint;

/// Crate-wide result alias for data-container operations.
pub type DataResult<T> = Result<T, DataError>;

/// Unified error type for data-container operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    // ---- Construction ----
    /// A series has a different length than the container's time vector.
    SeriesLengthMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// A value list has a different length than the interval list.
    IntervalLengthMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// An interval's lower endpoint exceeds its upper endpoint.
    InvalidInterval {
        index: usize,
        lo: TimePoint,
        hi: TimePoint,
    },

    /// Intervals overlap or are not in increasing order.
    UnorderedIntervals {
        index: usize,
    },

    // ---- Lookup ----
    /// A key is missing from the container.
    KeyNotFound {
        key: String,
    },

    /// A time point is not a member of the container's time vector.
    TimePointNotFound {
        time: TimePoint,
    },

    /// A time point is not covered by any interval.
    IntervalNotFound {
        time: TimePoint,
    },

    // ---- Concatenation ----
    /// Two series containers do not hold the same key set.
    KeySetMismatch {
        key: String,
    },
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Construction ----
            DataError::SeriesLengthMismatch { key, expected, actual } => {
                write!(
                    f,
                    "Series for key {key} has {actual} values but the time vector has \
                     {expected} points"
                )
            }
            DataError::IntervalLengthMismatch { key, expected, actual } => {
                write!(
                    f,
                    "Values for key {key} have length {actual} but there are {expected} intervals"
                )
            }
            DataError::InvalidInterval { index, lo, hi } => {
                write!(f, "Interval {index} has lower endpoint {lo} above upper endpoint {hi}")
            }
            DataError::UnorderedIntervals { index } => {
                write!(f, "Interval {index} overlaps or precedes the interval before it")
            }

            // ---- Lookup ----
            DataError::KeyNotFound { key } => {
                write!(f, "Container does not contain a key for {key}")
            }
            DataError::TimePointNotFound { time } => {
                write!(f, "Time point {time} is not in the container's time vector")
            }
            DataError::IntervalNotFound { time } => {
                write!(f, "Time point {time} is not covered by any interval")
            }

            // ---- Concatenation ----
            DataError::KeySetMismatch { key } => {
                write!(f, "Containers hold different key sets; mismatch at key {key}")
            }
        }
    }
}
