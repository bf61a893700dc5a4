//! data — scalar, series, and interval containers keyed by component name.
//!
//! Purpose
//! -------
//! Provide the typed mappings the rolling-horizon workflow moves around:
//! time-invariant values ([`ScalarData`]), trajectories over a shared time
//! vector ([`TimeSeriesData`]), and piecewise-constant values over ordered
//! intervals ([`IntervalData`]). Keys are component-name strings that host
//! models resolve to handles at the boundary, so one container can address
//! any number of model instances.
//!
//! Key behaviors
//! -------------
//! - All shape validation happens at construction: a series or interval
//!   value list whose length disagrees with the shared time/interval vector
//!   is a fatal configuration error, never a silent truncation.
//! - [`nearest`] supplies the binary-search lookups (nearest index, nearest
//!   interval) used by interval loading and conversion.
//!
//! Downstream usage
//! ----------------
//! - The transfer module loads these containers into models
//!   ([`crate::transfer::load_data_from_scalar`] and friends).
//! - The estimation module keys tracking weights and setpoints by the same
//!   component names.

pub mod errors;
pub mod interval;
pub mod nearest;
pub mod scalar;
pub mod series;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{DataError, DataResult};
pub use self::interval::IntervalData;
pub use self::nearest::{find_nearest_index, find_nearest_interval_index};
pub use self::scalar::ScalarData;
pub use self::series::TimeSeriesData;
