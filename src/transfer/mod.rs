//! transfer — moving time-indexed values between model instances.
//!
//! Purpose
//! -------
//! Provide the data-movement layer of the rolling-horizon workflow: the
//! [`DynamicVarLinker`] pairs variables on two model instances once and then
//! transfers values between them repeatedly — plain or perturbed by the
//! bounded noise sampler — and the [`load`] functions write scalar, series,
//! and interval containers into a model by component name.
//!
//! Key behaviors
//! -------------
//! - Transfers resolve time points from the call site or the linker's
//!   constructor defaults, and fail before any mutation when neither is
//!   available.
//! - Length-one source data broadcasts across target time points; every
//!   other shape mismatch is an explicit configuration error.
//! - Source models are only ever borrowed shared, so transfer can never
//!   mutate them; targets are borrowed mutably and overwritten at every
//!   written point.
//!
//! Downstream usage
//! ----------------
//! - The rolling-horizon driver builds one linker per direction (plant
//!   measurements into estimator measurement slots, estimates back into
//!   measured states) and calls `transfer` / `transfer_with_noise` each
//!   cycle.

pub mod errors;
pub mod linker;
pub mod load;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{TransferError, TransferResult};
pub use self::linker::DynamicVarLinker;
pub use self::load::{
    load_data_from_interval, load_data_from_scalar, load_data_from_series, IntervalLoadOptions,
};
