//! Bounded noise application with configurable bound-violation policies.
//!
//! Purpose
//! -------
//! Perturb a list of nominal values with an injected sampling function while
//! honoring per-value lower/upper bounds. Each value is treated
//! independently: its own noise parameter, its own bound pair, its own retry
//! budget. The sampling function is caller-supplied (`FnMut(nominal, spread)
//! -> value`), so randomness is always caller-owned and reproducible.
//!
//! Key behaviors
//! -------------
//! - [`get_violated_bounds`] classifies a candidate against a bound pair.
//! - [`apply_noise`] perturbs without bounds.
//! - [`apply_noise_with_bounds`] perturbs under one of three policies:
//!   - [`NoiseBoundOption::Discard`] redraws on violation, failing after the
//!     retry budget is exhausted for a single value;
//!   - [`NoiseBoundOption::Push`] clamps to the violated bound moved
//!     strictly inside by `bound_push`, accepting immediately;
//!   - [`NoiseBoundOption::Fail`] fails on the first violation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Outputs preserve the order and count of inputs; a failure for any value
//!   fails the whole call and produces no output.
//! - `values`, `noise_params`, and `bounds` must have equal lengths; a
//!   mismatch is a typed error rather than a silent zip.
//! - Retry budgets are per value; discards for one value never consume
//!   another value's budget.
//!
//! Conventions
//! -----------
//! - A bound pair `(None, None)` accepts the first draw unconditionally.
//! - With `bound_push = 0.0`, push clamps exactly onto the violated bound.

use crate::model::types::Bounds;
use crate::noise::errors::{NoiseError, NoiseResult};

/// What to do when a noised value violates one of its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseBoundOption {
    /// Redraw, up to `max_discards` consecutive violations per value.
    Discard,
    /// Clamp to the violated bound pushed strictly inside by `bound_push`.
    Push,
    /// Fail the whole call immediately.
    Fail,
}

/// Which bound a candidate violated, carrying the bound's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViolatedBound {
    /// The candidate fell below the lower bound.
    Lower(f64),
    /// The candidate rose above the upper bound.
    Upper(f64),
}

impl ViolatedBound {
    /// The violated bound's value.
    pub fn bound(self) -> f64 {
        match self {
            ViolatedBound::Lower(b) | ViolatedBound::Upper(b) => b,
        }
    }

    /// The violated bound moved strictly inside by `bound_push`.
    fn pushed(self, bound_push: f64) -> f64 {
        match self {
            ViolatedBound::Lower(b) => b + bound_push,
            ViolatedBound::Upper(b) => b - bound_push,
        }
    }
}

/// Options for [`apply_noise_with_bounds`].
///
/// The defaults are the discard policy with a budget of five consecutive
/// redraws per value and no bound push.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedNoiseOptions {
    /// Policy applied when a draw violates a bound.
    pub bound_option: NoiseBoundOption,
    /// Consecutive violations tolerated per value under the discard policy.
    pub max_discards: usize,
    /// Distance inside the violated bound used by the push policy.
    pub bound_push: f64,
}

impl Default for BoundedNoiseOptions {
    fn default() -> BoundedNoiseOptions {
        BoundedNoiseOptions {
            bound_option: NoiseBoundOption::Discard,
            max_discards: 5,
            bound_push: 0.0,
        }
    }
}

/// Classify `value` against a bound pair.
///
/// Returns `Some(ViolatedBound::Lower)` when `value` is below the lower
/// bound, `Some(ViolatedBound::Upper)` when above the upper bound, and
/// `None` when no bound is violated (including the unbounded case).
pub fn get_violated_bounds(value: f64, bounds: Bounds) -> Option<ViolatedBound> {
    let (lower, upper) = bounds;
    if let Some(lb) = lower {
        if value < lb {
            return Some(ViolatedBound::Lower(lb));
        }
    }
    if let Some(ub) = upper {
        if value > ub {
            return Some(ViolatedBound::Upper(ub));
        }
    }
    None
}

/// Perturb each value with its own noise parameter, without bounds.
///
/// `noise_function` receives `(nominal, parameter)` and returns the
/// perturbed value. Output order and count match the input.
pub fn apply_noise<F>(
    values: &[f64],
    noise_params: &[f64],
    mut noise_function: F,
) -> NoiseResult<Vec<f64>>
where
    F: FnMut(f64, f64) -> f64,
{
    if noise_params.len() != values.len() {
        return Err(NoiseError::LengthMismatch {
            what: "noise parameter",
            expected: values.len(),
            actual: noise_params.len(),
        });
    }

    Ok(values
        .iter()
        .zip(noise_params)
        .map(|(&value, &param)| noise_function(value, param))
        .collect())
}

/// Perturb each value with its own noise parameter and bound pair, under
/// the policy in `options`.
///
/// Each index is independent: its draws, its bound checks, and (under the
/// discard policy) its retry budget never interact with another index's.
/// Any failure aborts the whole call.
pub fn apply_noise_with_bounds<F>(
    values: &[f64],
    noise_params: &[f64],
    mut noise_function: F,
    bounds: &[Bounds],
    options: &BoundedNoiseOptions,
) -> NoiseResult<Vec<f64>>
where
    F: FnMut(f64, f64) -> f64,
{
    if noise_params.len() != values.len() {
        return Err(NoiseError::LengthMismatch {
            what: "noise parameter",
            expected: values.len(),
            actual: noise_params.len(),
        });
    }
    if bounds.len() != values.len() {
        return Err(NoiseError::LengthMismatch {
            what: "bound",
            expected: values.len(),
            actual: bounds.len(),
        });
    }

    let mut noised = Vec::with_capacity(values.len());
    for ((&value, &param), &bound_pair) in values.iter().zip(noise_params).zip(bounds) {
        let mut discards = 0;
        loop {
            let candidate = noise_function(value, param);
            let violated = match get_violated_bounds(candidate, bound_pair) {
                None => {
                    noised.push(candidate);
                    break;
                }
                Some(violated) => violated,
            };

            match options.bound_option {
                NoiseBoundOption::Discard => {
                    if discards >= options.max_discards {
                        return Err(NoiseError::MaxDiscards {
                            value,
                            max_discards: options.max_discards,
                        });
                    }
                    discards += 1;
                }
                NoiseBoundOption::Push => {
                    noised.push(violated.pushed(options.bound_push));
                    break;
                }
                NoiseBoundOption::Fail => {
                    return Err(NoiseError::BoundViolated {
                        value,
                        candidate,
                        bound: violated.bound(),
                    });
                }
            }
        }
    }
    Ok(noised)
}
