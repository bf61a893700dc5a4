//! Unified error handling for estimation routines.
//!
//! This module defines `EstimationError`, the error type shared by
//! sample-point partitioning, the MHE component blocks, and the cost
//! expression builders. It groups partitioning failures, shape and semantic
//! failures of the augmentation step, and lookup failures of weight/setpoint
//! keying, with passthrough wrappers for the model and data layers. The
//! alias `EstimationResult<T>` standardizes the return type across
//! estimation code.

use crate::data::errors::DataError;
use crate::model::errors::ModelError;
use crate::model::types::TimePoint;

/// Crate-wide result alias for estimation operations.
pub type EstimationResult<T> = Result<T, EstimationError>;

/// Unified error type for estimation routines.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    // ---- Sample-point partitioning ----
    /// The sample-point set is empty.
    EmptySamplePoints,

    /// A time point lies beyond the last sample point.
    TimeBeyondLastSamplePoint {
        time: TimePoint,
        last: TimePoint,
    },

    /// A time point is not a member of the sample-point set.
    NotASamplePoint {
        time: TimePoint,
    },

    /// A time point is not a member of the fine time set.
    TimeNotInHorizon {
        time: TimePoint,
    },

    // ---- Augmentation ----
    /// A constraint targeted for disturbance is not an equality.
    NotAnEqualityConstraint {
        name: String,
    },

    /// A component index is outside the block's index set.
    IndexOutOfRange {
        index: usize,
        len: usize,
    },

    /// A measurement slot was read before a measurement was loaded.
    MeasurementNotSet {
        index: usize,
        time: TimePoint,
    },

    // ---- Cost assembly ----
    /// Weight data is missing an entry for a variable.
    MissingWeight {
        name: String,
    },

    /// Setpoint data is missing an entry for a variable.
    MissingSetpoint {
        name: String,
    },

    /// Setpoint series time points differ from the cost's time set.
    SetpointTimeMismatch,

    /// A ranged inequality has no single residual.
    RangedInequality {
        name: String,
    },

    /// A component handle has no name on its model, so it cannot key
    /// weight/setpoint data.
    UnnamedComponent {
        id: u64,
    },

    // ---- Passthrough ----
    /// Wrapper for model-boundary failures.
    Model(ModelError),

    /// Wrapper for data-container failures.
    Data(DataError),
}

impl std::error::Error for EstimationError {}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Sample-point partitioning ----
            EstimationError::EmptySamplePoints => {
                write!(f, "Sample point set is empty")
            }
            EstimationError::TimeBeyondLastSamplePoint { time, last } => {
                write!(f, "Time point {time} lies beyond the last sample point {last}")
            }
            EstimationError::NotASamplePoint { time } => {
                write!(f, "Time point {time} is not a sample point")
            }
            EstimationError::TimeNotInHorizon { time } => {
                write!(f, "Time point {time} is not in the fine time set")
            }

            // ---- Augmentation ----
            EstimationError::NotAnEqualityConstraint { name } => {
                write!(f, "Not an equality constraint: {name}")
            }
            EstimationError::IndexOutOfRange { index, len } => {
                write!(f, "Component index {index} is outside the index set of length {len}")
            }
            EstimationError::MeasurementNotSet { index, time } => {
                write!(f, "Measurement {index} has no value at sample point {time}")
            }

            // ---- Cost assembly ----
            EstimationError::MissingWeight { name } => {
                write!(f, "Tracking weight dictionary does not contain a key for variable {name}")
            }
            EstimationError::MissingSetpoint { name } => {
                write!(f, "Setpoint data dictionary does not contain a key for variable {name}")
            }
            EstimationError::SetpointTimeMismatch => {
                write!(
                    f,
                    "Mismatch in time points between time set and points in the setpoint \
                     data structure"
                )
            }
            EstimationError::RangedInequality { name } => {
                write!(
                    f,
                    "Cannot construct a residual expression from a ranged inequality. Error \
                     encountered processing constraint {name}"
                )
            }
            EstimationError::UnnamedComponent { id } => {
                write!(f, "Component handle {id} has no name on its model")
            }

            // ---- Passthrough ----
            EstimationError::Model(err) => write!(f, "Estimation Error: {err}"),
            EstimationError::Data(err) => write!(f, "Estimation Error: {err}"),
        }
    }
}

impl From<ModelError> for EstimationError {
    fn from(err: ModelError) -> Self {
        EstimationError::Model(err)
    }
}

impl From<DataError> for EstimationError {
    fn from(err: DataError) -> Self {
        EstimationError::Data(err)
    }
}
