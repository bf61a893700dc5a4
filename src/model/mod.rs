//! model — the opaque-model boundary.
//!
//! Purpose
//! -------
//! Define the contract this crate has with host optimization models. The
//! host's algebraic representation and solver never appear here; the crate
//! sees a model only as a named collection of time-indexed scalar quantities
//! ([`DynamicModel`]) and, for estimation, of time-indexed constraints with
//! senses, residuals, and activation states ([`ConstraintSystem`]).
//!
//! Key behaviors
//! -------------
//! - [`types`] holds the handle and index vocabulary ([`VarId`], [`ConId`],
//!   [`ConstraintSense`], [`Bounds`], [`TimePoint`]).
//! - [`interface`] holds the two boundary traits.
//! - [`memory`] provides [`MemoryModel`], an in-memory reference
//!   implementation used by this crate's tests and demonstrations.
//! - [`errors`] centralizes lookup and value-access failures.
//!
//! Downstream usage
//! ----------------
//! - Host environments implement the traits for their own model types and
//!   gain the transfer and estimation machinery unchanged.
//! - Component blocks in [`crate::estimation`] implement [`DynamicModel`]
//!   over sample-point time sets, so everything that works on a model also
//!   works on a block.

pub mod errors;
pub mod interface;
pub mod memory;
pub mod types;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ModelError, ModelResult};
pub use self::interface::{ConstraintSystem, DynamicModel};
pub use self::memory::MemoryModel;
pub use self::types::{Bounds, ConId, ConstraintSense, TimePoint, VarId};
