//! rust_horizon — rolling-horizon dynamic optimization utilities.
//!
//! Purpose
//! -------
//! Serve as the crate root for the data-movement and model-augmentation
//! machinery used by rolling-horizon workflows — model predictive control
//! and moving horizon estimation — over time-indexed process models. The
//! host optimization model and its solver stay outside this crate; they are
//! seen only through the narrow traits in [`model`].
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules ([`model`], [`data`], [`noise`],
//!   [`transfer`], [`estimation`]) as the public crate surface.
//! - [`transfer`] moves values between model instances (plant, controller,
//!   estimator) through a [`transfer::DynamicVarLinker`], with optional
//!   bounded noise injection from [`noise`].
//! - [`estimation`] constructs the extra components a moving horizon
//!   estimator needs — measurement/error slots and equations, disturbance
//!   terms spliced into existing equality constraints, sample-point
//!   partitioning, and quadratic objective expressions.
//! - [`data`] holds the scalar/series/interval containers that carry
//!   setpoints, weights, inputs, and results between cycles, keyed by
//!   component name.
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything is single-threaded and synchronous; the rolling-horizon
//!   driver sequences solves and transfers. No operation blocks, suspends,
//!   or performs I/O.
//! - Source models are never mutated by transfers (they are only ever
//!   borrowed shared); target values are fully overwritten at written time
//!   points.
//! - Randomness is caller-owned: noise flows through injected sampling
//!   functions, so a fixed seed and call order reproduce a run exactly.
//!
//! Conventions
//! -----------
//! - Time points are `f64`; time sets are ordered and reused verbatim, so
//!   membership is exact float equality.
//! - Errors are per-module enums (`ModelError`, `DataError`, `NoiseError`,
//!   `TransferError`, `EstimationError`) with `From` conversions across the
//!   seams; nothing here panics on bad input or retries internally.
//!
//! Downstream usage
//! ----------------
//! - Implement [`model::DynamicModel`] (and [`model::ConstraintSystem`] for
//!   estimation) for the host model type, then drive the rolling-horizon
//!   loop: solve the plant, `transfer_with_noise` measurements into the
//!   estimator's measurement slots, solve the estimator, and `transfer`
//!   estimates back to re-seed states.
//! - [`model::MemoryModel`] is a minimal reference implementation used by
//!   this crate's tests and demonstrations.
//!
//! Testing notes
//! -------------
//! - Unit tests live in `#[cfg(test)]` modules beside the code; the
//!   end-to-end rolling-horizon scenario (without a solver) lives in
//!   `tests/integration_mhe_pipeline.rs`.

pub mod data;
pub mod estimation;
pub mod model;
pub mod noise;
pub mod transfer;
