//! Boundary traits for time-indexed optimization models.
//!
//! Purpose
//! -------
//! Express the contract this crate has with the host optimization model as
//! two narrow traits. The model itself — its algebraic representation, its
//! solver — stays opaque; the crate only ever asks it to find a named
//! time-indexed quantity, read or write a value at a time point, and report
//! a constraint's sense, residual, and activation state.
//!
//! Key behaviors
//! -------------
//! - [`DynamicModel`] is the variable-level contract: component lookup by
//!   name, value access by `(handle, time)`.
//! - [`ConstraintSystem`] extends it with constraint-level access used by
//!   the estimation module when splicing disturbances into existing
//!   equations.
//!
//! Invariants & assumptions
//! ------------------------
//! - Handles returned by `find_component` / `find_constraint` stay valid for
//!   the model's lifetime and identify the same component on every use.
//! - `time_points` is ordered and does not change while handles are live.
//! - Reads never mutate; all mutation goes through `set_var_value`, which
//!   takes `&mut self`. Transfer operations therefore cannot touch a source
//!   model by construction.
//!
//! Conventions
//! -----------
//! - `constraint_residual` is *body minus bound* (the equality target, the
//!   upper bound, or the lower bound depending on the sense), so an equality
//!   constraint is satisfied at a point exactly when its residual is zero
//!   there.
//!
//! Downstream usage
//! ----------------
//! - The transfer module is generic over `DynamicModel` on both ends of a
//!   transfer; the estimation module is generic over `ConstraintSystem` for
//!   disturbance construction and over `DynamicModel` for measurement and
//!   cost handling.
//! - Component blocks built by the estimation module implement
//!   `DynamicModel` themselves (over the sample-point time set), so linkers
//!   and cost builders address their slots with the same vocabulary.

use crate::model::errors::ModelResult;
use crate::model::types::{ConId, ConstraintSense, TimePoint, VarId};

/// Variable-level contract with a time-indexed model instance.
///
/// Implementors expose named, time-indexed scalar quantities. A handle
/// obtained from [`DynamicModel::find_component`] addresses the same
/// quantity for the life of the model.
pub trait DynamicModel {
    /// Name of this model instance, used in error messages.
    fn model_name(&self) -> &str;

    /// The ordered time set of this instance.
    fn time_points(&self) -> &[TimePoint];

    /// Look up a time-indexed variable by name. `None` when no such
    /// component exists; callers treat that as fatal.
    fn find_component(&self, name: &str) -> Option<VarId>;

    /// Name of the variable behind a handle, if the handle belongs to this
    /// model. Used to key weight/setpoint containers by component name.
    fn component_name(&self, var: VarId) -> Option<String>;

    /// Read the value of `var` at time `t`.
    fn var_value(&self, var: VarId, t: TimePoint) -> ModelResult<f64>;

    /// Overwrite the value of `var` at time `t`.
    fn set_var_value(&mut self, var: VarId, t: TimePoint, value: f64) -> ModelResult<()>;
}

/// Constraint-level contract, for models whose equations the estimation
/// module augments.
pub trait ConstraintSystem: DynamicModel {
    /// Look up a time-indexed constraint by name.
    fn find_constraint(&self, name: &str) -> Option<ConId>;

    /// Name of the constraint behind a handle, if it belongs to this model.
    fn constraint_name(&self, con: ConId) -> Option<String>;

    /// The sense of `con` at time `t`.
    fn constraint_sense(&self, con: ConId, t: TimePoint) -> ModelResult<ConstraintSense>;

    /// Body-minus-bound residual of `con` at time `t`, evaluated at the
    /// model's current variable values.
    fn constraint_residual(&self, con: ConId, t: TimePoint) -> ModelResult<f64>;

    /// Whether `con` is active at time `t`.
    fn constraint_is_active(&self, con: ConId, t: TimePoint) -> ModelResult<bool>;
}
