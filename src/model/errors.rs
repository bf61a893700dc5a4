//! Unified error handling for the model boundary.
//!
//! This module defines `ModelError`, the error type shared by every
//! implementation of the model traits. It covers component lookup failures,
//! unknown time points, and reads of values that were never set. The alias
//! `ModelResult<T>` standardizes the return type across model code.

use crate::model::types::TimePoint;

/// Crate-wide result alias for model-boundary operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for model-boundary operations.
///
/// Every variant identifies the offending component or time point together
/// with the model it was looked up on, so the error is actionable without a
/// backtrace.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Component lookup ----
    /// A named variable could not be found on a model.
    ComponentNotFound {
        name: String,
        model: String,
    },

    /// A named constraint could not be found on a model.
    ConstraintNotFound {
        name: String,
        model: String,
    },

    /// A variable handle does not belong to this model.
    UnknownVariable {
        id: u64,
        model: String,
    },

    /// A constraint handle does not belong to this model.
    UnknownConstraint {
        id: u64,
        model: String,
    },

    // ---- Time indexing ----
    /// A time point is not a member of the model's time set.
    TimePointNotFound {
        time: TimePoint,
        model: String,
    },

    // ---- Values ----
    /// A value was read before ever being set.
    MissingValue {
        component: String,
        time: TimePoint,
    },
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Component lookup ----
            ModelError::ComponentNotFound { name, model } => {
                write!(f, "Cannot find a component {name} on model {model}")
            }
            ModelError::ConstraintNotFound { name, model } => {
                write!(f, "Cannot find a constraint {name} on model {model}")
            }
            ModelError::UnknownVariable { id, model } => {
                write!(f, "Variable handle {id} does not belong to model {model}")
            }
            ModelError::UnknownConstraint { id, model } => {
                write!(f, "Constraint handle {id} does not belong to model {model}")
            }

            // ---- Time indexing ----
            ModelError::TimePointNotFound { time, model } => {
                write!(f, "Time point {time} is not in the time set of model {model}")
            }

            // ---- Values ----
            ModelError::MissingValue { component, time } => {
                write!(f, "Component {component} has no value at time {time}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display formatting of the lookup error the rest of the crate relies
    //   on for its "cannot find component" contract.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the wording of the component lookup failure so boundary callers can
    // match on it.
    fn component_not_found_display_names_component_and_model() {
        let err = ModelError::ComponentNotFound {
            name: "conc[A]".to_string(),
            model: "plant".to_string(),
        };

        assert_eq!(err.to_string(), "Cannot find a component conc[A] on model plant");
    }
}
