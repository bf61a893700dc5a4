//! Unified error handling for transfer operations.
//!
//! This module defines `TransferError`, the error type raised by the
//! variable linker and the container-loading functions. It groups
//! construction-time configuration failures (list length mismatches,
//! contradictory interval flags), missing-time resolution failures, and
//! passthrough wrappers for the model, noise, and data layers. Designed to
//! integrate with `anyhow::Error` via `From`, mirroring how inference errors
//! pass foreign failures through in one readable variant. The alias
//! `TransferResult<T>` standardizes the return type across transfer code.

use crate::data::errors::DataError;
use crate::model::errors::ModelError;
use crate::noise::errors::NoiseError;

/// Crate-wide result alias for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;

/// Unified error type for transfer operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferError {
    // ---- Linker construction ----
    /// Source and target variable lists differ in length.
    VariableListLengthMismatch {
        source_len: usize,
        target_len: usize,
    },

    // ---- Time resolution ----
    /// No source time points at the call site or in the constructor.
    MissingSourceTime,

    /// No target time points at the call site or in the constructor.
    MissingTargetTime,

    /// Noisy transfer with incompatible time point counts.
    TimePointCountMismatch {
        source_len: usize,
        target_len: usize,
    },

    // ---- Data shape ----
    /// A non-broadcast value list does not match the target time points.
    TargetLengthMismatch {
        component: String,
        expected: usize,
        actual: usize,
    },

    /// The extracted-data mapping is missing a source variable.
    MissingSourceData {
        id: u64,
    },

    /// Per-variable noise parameters do not cover the variable lists.
    NoiseParamsLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Per-variable bound pairs do not cover the variable lists.
    BoundListLengthMismatch {
        expected: usize,
        actual: usize,
    },

    // ---- Container loading ----
    /// Series time points differ from the requested load time points.
    SeriesTimeMismatch,

    /// `prefer_left` with the right endpoint excluded but not the left.
    PreferLeftExcludesLeft,

    /// `prefer_left = false` with the left endpoint excluded but not the
    /// right.
    PreferRightExcludesRight,

    // ---- Passthrough ----
    /// Wrapper for model-boundary failures.
    Model(ModelError),

    /// Wrapper for noise-application failures.
    Noise(NoiseError),

    /// Wrapper for data-container failures.
    Data(DataError),

    // ---- Anyhow catchall ----
    Anyhow(String),
}

impl std::error::Error for TransferError {}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Linker construction ----
            TransferError::VariableListLengthMismatch { source_len, target_len } => {
                write!(
                    f,
                    "DynamicVarLinker must be provided two lists of time-indexed variables \
                     of equal length. Got lengths {source_len} and {target_len}"
                )
            }

            // ---- Time resolution ----
            TransferError::MissingSourceTime => {
                write!(
                    f,
                    "Source time points were not provided in the transfer method or in \
                     the constructor."
                )
            }
            TransferError::MissingTargetTime => {
                write!(
                    f,
                    "Target time points were not provided in the transfer method or in \
                     the constructor."
                )
            }
            TransferError::TimePointCountMismatch { source_len, target_len } => {
                write!(
                    f,
                    "transfer_with_noise can only transfer data when lists of time points \
                     have the same length or the source list has length one. Got lengths \
                     {source_len} and {target_len}"
                )
            }

            // ---- Data shape ----
            TransferError::TargetLengthMismatch { component, expected, actual } => {
                write!(
                    f,
                    "Values for {component} have length {actual} but {expected} target \
                     time points were requested"
                )
            }
            TransferError::MissingSourceData { id } => {
                write!(f, "Extracted data is missing source variable {id}")
            }
            TransferError::NoiseParamsLengthMismatch { expected, actual } => {
                write!(f, "Expected {expected} noise parameters but got {actual}")
            }
            TransferError::BoundListLengthMismatch { expected, actual } => {
                write!(f, "Expected {expected} bound pairs but got {actual}")
            }

            // ---- Container loading ----
            TransferError::SeriesTimeMismatch => {
                write!(f, "Cannot load time series data when time sets have different lengths")
            }
            TransferError::PreferLeftExcludesLeft => {
                write!(
                    f,
                    "Cannot use prefer_left with exclude_right_endpoint and not \
                     exclude_left_endpoint."
                )
            }
            TransferError::PreferRightExcludesRight => {
                write!(
                    f,
                    "Cannot use prefer_left = false with exclude_left_endpoint and not \
                     exclude_right_endpoint."
                )
            }

            // ---- Passthrough ----
            TransferError::Model(err) => write!(f, "Transfer Error: {err}"),
            TransferError::Noise(err) => write!(f, "Transfer Error: {err}"),
            TransferError::Data(err) => write!(f, "Transfer Error: {err}"),

            // ---- Anyhow catchall ----
            TransferError::Anyhow(msg) => write!(f, "Transfer Error: {msg}"),
        }
    }
}

impl From<ModelError> for TransferError {
    fn from(err: ModelError) -> Self {
        TransferError::Model(err)
    }
}

impl From<NoiseError> for TransferError {
    fn from(err: NoiseError) -> Self {
        TransferError::Noise(err)
    }
}

impl From<DataError> for TransferError {
    fn from(err: DataError) -> Self {
        TransferError::Data(err)
    }
}

impl From<anyhow::Error> for TransferError {
    fn from(err: anyhow::Error) -> Self {
        TransferError::Anyhow(err.to_string())
    }
}
