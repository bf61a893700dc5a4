//! Core identifier and index types shared across the crate.
//!
//! Purpose
//! -------
//! Define the small vocabulary used at the model boundary: time points,
//! component handles, constraint senses, and variable bounds. Everything in
//! this module is a plain value type; no behavior beyond construction and
//! comparison lives here.
//!
//! Key behaviors
//! -------------
//! - [`VarId`] and [`ConId`] are opaque handles with stable identity: two
//!   handles to the same underlying component compare and hash identically,
//!   which makes them usable as mapping keys across heterogeneous containers.
//! - [`ConstraintSense`] classifies a time-indexed constraint by which bound
//!   it carries; [`ConstraintSense::Range`] is the two-sided case that has no
//!   single residual.
//!
//! Conventions
//! -----------
//! - Time points are `f64` and totally ordered within one model instance.
//!   Time sets are ordered slices constructed once and reused verbatim, so
//!   membership tests use exact float equality.
//! - [`Bounds`] follows the `(lower, upper)` convention with `None` meaning
//!   "unbounded on that side"; `(None, None)` is fully unbounded.

/// A point in a model's time set. Totally ordered, finite.
pub type TimePoint = f64;

/// Lower/upper bound pair for a scalar value; `None` means unbounded.
pub type Bounds = (Option<f64>, Option<f64>);

/// Opaque handle to a time-indexed variable within one container.
///
/// The id is assigned by the container that owns the variable and is stable
/// for the container's lifetime. Identity, not structure: two `VarId`s are
/// the same variable exactly when they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u64);

/// Opaque handle to a time-indexed constraint within one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConId(pub u64);

/// Which bound(s) a constraint carries at a given time point.
///
/// The residual convention is *body minus bound*: for `Equality` and
/// `LessEqual` the bound is the upper/target value, for `GreaterEqual` it is
/// the lower value. `Range` carries both bounds and therefore has no single
/// residual; operations that need one reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintSense {
    /// `body == target`.
    Equality,
    /// `body <= upper`.
    LessEqual,
    /// `body >= lower`.
    GreaterEqual,
    /// `lower <= body <= upper` with distinct bounds.
    Range,
}

impl ConstraintSense {
    /// Whether this sense is an equality.
    pub fn is_equality(self) -> bool {
        matches!(self, ConstraintSense::Equality)
    }
}
