//! Unified error handling for noise application.
//!
//! This module defines `NoiseError`, the error type raised by the bounded
//! noise sampler. It covers exhausted retry budgets under the discard
//! policy, immediate bound violations under the fail policy, and input
//! shape mismatches. The alias `NoiseResult<T>` standardizes the return
//! type across noise code.

/// Crate-wide result alias for noise operations.
pub type NoiseResult<T> = Result<T, NoiseError>;

/// Unified error type for noise application.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseError {
    // ---- Retry budget ----
    /// The discard policy redrew `max_discards` times in a row for one value
    /// and every draw violated a bound.
    MaxDiscards {
        value: f64,
        max_discards: usize,
    },

    // ---- Bound violation ----
    /// The fail policy saw a draw violate a bound.
    BoundViolated {
        value: f64,
        candidate: f64,
        bound: f64,
    },

    // ---- Input shape ----
    /// An input list length disagrees with the value list.
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl std::error::Error for NoiseError {}

impl std::fmt::Display for NoiseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Retry budget ----
            NoiseError::MaxDiscards { value, max_discards } => {
                write!(
                    f,
                    "Max number of discards ({max_discards}) exceeded when applying noise \
                     to value {value}"
                )
            }

            // ---- Bound violation ----
            NoiseError::BoundViolated { value, candidate, bound } => {
                write!(
                    f,
                    "Applying noise caused a bound to be violated: drew {candidate} from \
                     nominal {value} against bound {bound}"
                )
            }

            // ---- Input shape ----
            NoiseError::LengthMismatch { what, expected, actual } => {
                write!(f, "Expected {expected} {what} entries but got {actual}")
            }
        }
    }
}
