//! estimation — MHE model augmentation and estimation objectives.
//!
//! Purpose
//! -------
//! Build the components that turn a plain dynamic model into a moving
//! horizon estimator: sample-point partitioning of the fine time set,
//! measurement variables/errors/equations tied to measured states,
//! disturbance terms spliced into existing equality constraints, an
//! activation pass keeping the new components consistent with the
//! originals, and the quadratic cost expressions that penalize errors,
//! disturbances, and setpoint deviations.
//!
//! Key behaviors
//! -------------
//! - [`sample_points`] maps fine time points to coarse sample points
//!   (nearest at-or-after lookup).
//! - [`mhe`] constructs the [`MeasurementBlock`] and
//!   [`DisturbedConstraintBlock`] and mirrors activation states.
//! - [`costs`] assembles tracking and penalty expressions evaluated against
//!   a borrowed model.
//!
//! Conventions
//! -----------
//! - The augmentation functions run once at estimator construction, in
//!   order: measurement block, disturbance block, activation pass, cost
//!   assembly. The activation pass depends on both blocks existing.
//! - The host model is never modified; all new components live in owned
//!   blocks that themselves implement
//!   [`DynamicModel`](crate::model::DynamicModel) over the sample points.

pub mod costs;
pub mod errors;
pub mod mhe;
pub mod sample_points;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::costs::{
    get_constraint_residual_expression, get_cost_from_error_variables,
    get_quadratic_tracking_cost_at_time, get_tracking_cost_from_constant_setpoint,
    get_tracking_cost_from_piecewise_constant_setpoint,
    get_tracking_cost_from_time_varying_setpoint, ConstraintResidualExpression,
    TrackingCostExpression,
};
pub use self::errors::{EstimationError, EstimationResult};
pub use self::mhe::{
    activate_disturbed_constraints_based_on_original_constraints,
    construct_disturbed_model_constraints, construct_measurement_variables_constraints,
    DisturbedConstraintBlock, MeasurementBlock,
};
pub use self::sample_points::{curr_sample_point, curr_sample_point_index};
