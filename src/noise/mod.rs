//! noise — bounded measurement-noise application.
//!
//! Purpose
//! -------
//! Perturb nominal values with an injected sampling function while honoring
//! per-value bounds under one of three violation policies (discard with a
//! retry budget, push inside the bound, fail). This is the engine behind
//! noisy plant-to-estimator transfers in
//! [`crate::transfer::DynamicVarLinker::transfer_with_noise`].
//!
//! Key behaviors
//! -------------
//! - [`bounded`] holds the policy machinery: [`get_violated_bounds`],
//!   [`apply_noise`], [`apply_noise_with_bounds`], and
//!   [`BoundedNoiseOptions`].
//! - [`sampling`] adapts the `rand` ecosystem into the
//!   `FnMut(nominal, spread) -> value` shape the entry points take, always
//!   borrowing a caller-owned generator.
//!
//! Invariants & assumptions
//! ------------------------
//! - No hidden randomness: every draw flows through the injected function,
//!   so a fixed seed and call order reproduce a run exactly.
//! - Failures produce no output; there is no partial per-index salvage.

pub mod bounded;
pub mod errors;
pub mod sampling;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bounded::{
    apply_noise, apply_noise_with_bounds, get_violated_bounds, BoundedNoiseOptions,
    NoiseBoundOption, ViolatedBound,
};
pub use self::errors::{NoiseError, NoiseResult};
