//! MHE model augmentation: measurement and disturbance component blocks.
//!
//! Purpose
//! -------
//! Turn a plain dynamic model into an estimator by constructing the extra
//! components moving horizon estimation needs: per-sample-point measurement
//! values with error terms tied to measured states, and additive disturbance
//! terms spliced into existing equality constraints. The host model is never
//! modified; each construction returns an owned block holding the new slots
//! and equations, evaluated against a borrowed model.
//!
//! Key behaviors
//! -------------
//! - [`construct_measurement_variables_constraints`] builds a
//!   [`MeasurementBlock`]: measurement slots (default unset — they represent
//!   external inputs loaded each cycle), error slots (default `0.0`), and
//!   one equation `measurement[i,j] == measured_var[j] + error[i,j]` per
//!   measured variable `i` and sample point `j`.
//! - [`construct_disturbed_model_constraints`] builds a
//!   [`DisturbedConstraintBlock`]: disturbance slots (default `0.0`) per
//!   constraint and sample point, and one rebuilt equation per constraint
//!   and *fine* time point whose residual is the original constraint's
//!   residual plus the disturbance of the containing sample interval. Every
//!   targeted constraint must be an equality at every fine time point;
//!   validation runs before any block state exists, so a failed call leaves
//!   nothing behind.
//! - [`activate_disturbed_constraints_based_on_original_constraints`]
//!   mirrors the original constraints' activation states onto the rebuilt
//!   equations and fixes to zero every disturbance whose entire sample
//!   interval is inactive — an inactive constraint provides no information
//!   to identify its disturbance.
//!
//! Invariants & assumptions
//! ------------------------
//! - With all disturbances at zero, every rebuilt equation's residual equals
//!   the original constraint's residual at the same fine time point.
//! - Construction happens once, in order: measurement block, disturbance
//!   block, activation pass, cost assembly. The activation pass requires
//!   both blocks to exist.
//!
//! Conventions
//! -----------
//! - Both blocks implement [`DynamicModel`] over the sample-point time set,
//!   with components named `measurement[i]`, `error[i]`, and
//!   `disturbance[i]`. A linker can therefore write plant measurements
//!   straight into measurement slots, and cost builders key weights by
//!   these names.

use ndarray::Array2;

use crate::estimation::errors::{EstimationError, EstimationResult};
use crate::estimation::sample_points::curr_sample_point_index;
use crate::model::errors::{ModelError, ModelResult};
use crate::model::interface::{ConstraintSystem, DynamicModel};
use crate::model::types::{ConId, TimePoint, VarId};

fn check_index(index: usize, len: usize) -> EstimationResult<()> {
    if index >= len {
        return Err(EstimationError::IndexOutOfRange { index, len });
    }
    Ok(())
}

fn member_index(t: TimePoint, points: &[TimePoint]) -> Option<usize> {
    points.iter().position(|&x| x == t)
}

// ---------------------------------------------------------------------------
// Measurement block
// ---------------------------------------------------------------------------

/// Measurement components for an estimator: per measured variable `i` and
/// sample point `j`, a fixed measurement slot, a free error slot, and the
/// equation `measurement[i,j] == measured_var[j] + error[i,j]`.
#[derive(Debug, Clone)]
pub struct MeasurementBlock {
    sample_points: Vec<TimePoint>,
    measured_variables: Vec<VarId>,
    measurements: Array2<Option<f64>>,
    errors: Array2<f64>,
}

/// Build the measurement components for `measured_variables` over
/// `sample_points`.
///
/// Measurement slots start unset — they stand for external inputs the
/// rolling-horizon driver overwrites every cycle — and error slots start at
/// `0.0`.
pub fn construct_measurement_variables_constraints(
    sample_points: &[TimePoint],
    measured_variables: &[VarId],
) -> MeasurementBlock {
    let n = measured_variables.len();
    let m = sample_points.len();
    MeasurementBlock {
        sample_points: sample_points.to_vec(),
        measured_variables: measured_variables.to_vec(),
        measurements: Array2::from_elem((n, m), None),
        errors: Array2::from_elem((n, m), 0.0),
    }
}

impl MeasurementBlock {
    /// Number of measured variables.
    pub fn num_measured(&self) -> usize {
        self.measured_variables.len()
    }

    /// The index set `{0, ..., n-1}` over measured variables.
    pub fn measurement_set(&self) -> std::ops::Range<usize> {
        0..self.num_measured()
    }

    /// The sample points the block is indexed by.
    pub fn sample_points(&self) -> &[TimePoint] {
        &self.sample_points
    }

    /// The measured variables, in index order.
    pub fn measured_variables(&self) -> &[VarId] {
        &self.measured_variables
    }

    /// One equation per `(i, j)` pair.
    pub fn num_equations(&self) -> usize {
        self.num_measured() * self.sample_points.len()
    }

    fn sample_index(&self, t: TimePoint) -> EstimationResult<usize> {
        member_index(t, &self.sample_points).ok_or(EstimationError::NotASamplePoint { time: t })
    }

    /// The measurement slot value at `(i, sample point)`, `None` when no
    /// measurement has been loaded yet.
    pub fn measurement(&self, index: usize, t: TimePoint) -> EstimationResult<Option<f64>> {
        check_index(index, self.num_measured())?;
        let j = self.sample_index(t)?;
        Ok(self.measurements[[index, j]])
    }

    /// Overwrite the measurement slot at `(i, sample point)`.
    pub fn set_measurement(
        &mut self,
        index: usize,
        t: TimePoint,
        value: f64,
    ) -> EstimationResult<()> {
        check_index(index, self.num_measured())?;
        let j = self.sample_index(t)?;
        self.measurements[[index, j]] = Some(value);
        Ok(())
    }

    /// The error slot value at `(i, sample point)`.
    pub fn error_value(&self, index: usize, t: TimePoint) -> EstimationResult<f64> {
        check_index(index, self.num_measured())?;
        let j = self.sample_index(t)?;
        Ok(self.errors[[index, j]])
    }

    /// Overwrite the error slot at `(i, sample point)`.
    pub fn set_error(&mut self, index: usize, t: TimePoint, value: f64) -> EstimationResult<()> {
        check_index(index, self.num_measured())?;
        let j = self.sample_index(t)?;
        self.errors[[index, j]] = value;
        Ok(())
    }

    /// Residual of the measurement equation at `(i, sample point)`:
    /// `measurement[i,j] - (measured_var[j] + error[i,j])`, zero when the
    /// equation holds.
    ///
    /// Fails when no measurement has been loaded at that slot.
    pub fn measurement_residual<M: DynamicModel>(
        &self,
        model: &M,
        index: usize,
        t: TimePoint,
    ) -> EstimationResult<f64> {
        check_index(index, self.num_measured())?;
        let j = self.sample_index(t)?;
        let measurement = self.measurements[[index, j]]
            .ok_or(EstimationError::MeasurementNotSet { index, time: t })?;
        let measured = model.var_value(self.measured_variables[index], t)?;
        Ok(measurement - (measured + self.errors[[index, j]]))
    }
}

// The block's slots addressed as time-indexed variables over the sample
// points: `measurement[i]` takes ids `0..n`, `error[i]` takes ids `n..2n`.
impl DynamicModel for MeasurementBlock {
    fn model_name(&self) -> &str {
        "measurement_block"
    }

    fn time_points(&self) -> &[TimePoint] {
        &self.sample_points
    }

    fn find_component(&self, name: &str) -> Option<VarId> {
        let n = self.num_measured() as u64;
        for i in 0..self.num_measured() {
            if name == format!("measurement[{i}]") {
                return Some(VarId(i as u64));
            }
            if name == format!("error[{i}]") {
                return Some(VarId(n + i as u64));
            }
        }
        None
    }

    fn component_name(&self, var: VarId) -> Option<String> {
        let n = self.num_measured() as u64;
        if var.0 < n {
            Some(format!("measurement[{}]", var.0))
        } else if var.0 < 2 * n {
            Some(format!("error[{}]", var.0 - n))
        } else {
            None
        }
    }

    fn var_value(&self, var: VarId, t: TimePoint) -> ModelResult<f64> {
        let n = self.num_measured() as u64;
        let j = member_index(t, &self.sample_points).ok_or(ModelError::TimePointNotFound {
            time: t,
            model: self.model_name().to_string(),
        })?;
        if var.0 < n {
            self.measurements[[var.0 as usize, j]].ok_or(ModelError::MissingValue {
                component: format!("measurement[{}]", var.0),
                time: t,
            })
        } else if var.0 < 2 * n {
            Ok(self.errors[[(var.0 - n) as usize, j]])
        } else {
            Err(ModelError::UnknownVariable { id: var.0, model: self.model_name().to_string() })
        }
    }

    fn set_var_value(&mut self, var: VarId, t: TimePoint, value: f64) -> ModelResult<()> {
        let n = self.num_measured() as u64;
        let j = member_index(t, &self.sample_points).ok_or(ModelError::TimePointNotFound {
            time: t,
            model: self.model_name().to_string(),
        })?;
        if var.0 < n {
            self.measurements[[var.0 as usize, j]] = Some(value);
            Ok(())
        } else if var.0 < 2 * n {
            self.errors[[(var.0 - n) as usize, j]] = value;
            Ok(())
        } else {
            Err(ModelError::UnknownVariable { id: var.0, model: self.model_name().to_string() })
        }
    }
}

// ---------------------------------------------------------------------------
// Disturbed constraint block
// ---------------------------------------------------------------------------

/// Disturbance components for an estimator: per targeted equality
/// constraint `i` and sample point `j`, a free disturbance slot, and per
/// fine time point a rebuilt equation whose residual is the original
/// residual plus the disturbance of the containing sample interval.
#[derive(Debug, Clone)]
pub struct DisturbedConstraintBlock {
    fine_time: Vec<TimePoint>,
    sample_points: Vec<TimePoint>,
    constraints: Vec<ConId>,
    // Sample column of each fine time point, precomputed at construction.
    sample_of_fine: Vec<usize>,
    disturbances: Array2<f64>,
    disturbance_fixed: Array2<bool>,
    active: Array2<bool>,
}

/// Build disturbance components for `constraints` over `fine_time`
/// partitioned by `sample_points`.
///
/// Every targeted constraint must be an equality at every fine time point;
/// the first offender aborts the whole call with
/// [`EstimationError::NotAnEqualityConstraint`] before any block state is
/// created. Every fine time point must map into the sample horizon.
pub fn construct_disturbed_model_constraints<M: ConstraintSystem>(
    model: &M,
    fine_time: &[TimePoint],
    sample_points: &[TimePoint],
    constraints: &[ConId],
) -> EstimationResult<DisturbedConstraintBlock> {
    let sample_of_fine = fine_time
        .iter()
        .map(|&t| curr_sample_point_index(t, sample_points))
        .collect::<EstimationResult<Vec<usize>>>()?;

    for &con in constraints {
        for &t in fine_time {
            let sense = model.constraint_sense(con, t)?;
            if !sense.is_equality() {
                let name = model
                    .constraint_name(con)
                    .unwrap_or_else(|| format!("constraint {}", con.0));
                return Err(EstimationError::NotAnEqualityConstraint { name });
            }
        }
    }

    let n = constraints.len();
    Ok(DisturbedConstraintBlock {
        fine_time: fine_time.to_vec(),
        sample_points: sample_points.to_vec(),
        constraints: constraints.to_vec(),
        sample_of_fine,
        disturbances: Array2::from_elem((n, sample_points.len()), 0.0),
        disturbance_fixed: Array2::from_elem((n, sample_points.len()), false),
        active: Array2::from_elem((n, fine_time.len()), true),
    })
}

impl DisturbedConstraintBlock {
    /// Number of targeted constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The index set `{0, ..., n-1}` over targeted constraints.
    pub fn constraint_set(&self) -> std::ops::Range<usize> {
        0..self.num_constraints()
    }

    /// The fine time points the rebuilt equations are indexed by.
    pub fn fine_time(&self) -> &[TimePoint] {
        &self.fine_time
    }

    /// The sample points the disturbance slots are indexed by.
    pub fn sample_points(&self) -> &[TimePoint] {
        &self.sample_points
    }

    /// The original constraint handles, in index order.
    pub fn original_constraints(&self) -> &[ConId] {
        &self.constraints
    }

    fn sample_index(&self, t: TimePoint) -> EstimationResult<usize> {
        member_index(t, &self.sample_points).ok_or(EstimationError::NotASamplePoint { time: t })
    }

    fn fine_index(&self, t: TimePoint) -> EstimationResult<usize> {
        member_index(t, &self.fine_time).ok_or(EstimationError::TimeNotInHorizon { time: t })
    }

    /// The disturbance slot value at `(i, sample point)`.
    pub fn disturbance(&self, index: usize, t: TimePoint) -> EstimationResult<f64> {
        check_index(index, self.num_constraints())?;
        let j = self.sample_index(t)?;
        Ok(self.disturbances[[index, j]])
    }

    /// Overwrite the disturbance slot at `(i, sample point)`.
    pub fn set_disturbance(
        &mut self,
        index: usize,
        t: TimePoint,
        value: f64,
    ) -> EstimationResult<()> {
        check_index(index, self.num_constraints())?;
        let j = self.sample_index(t)?;
        self.disturbances[[index, j]] = value;
        Ok(())
    }

    /// Fix the disturbance slot at `(i, sample point)` to `value`.
    pub fn fix_disturbance(
        &mut self,
        index: usize,
        t: TimePoint,
        value: f64,
    ) -> EstimationResult<()> {
        check_index(index, self.num_constraints())?;
        let j = self.sample_index(t)?;
        self.disturbances[[index, j]] = value;
        self.disturbance_fixed[[index, j]] = true;
        Ok(())
    }

    /// Whether the disturbance slot at `(i, sample point)` is fixed.
    pub fn is_disturbance_fixed(&self, index: usize, t: TimePoint) -> EstimationResult<bool> {
        check_index(index, self.num_constraints())?;
        let j = self.sample_index(t)?;
        Ok(self.disturbance_fixed[[index, j]])
    }

    /// Residual of the rebuilt equation at `(i, fine time point)`:
    /// `original_residual(t) + disturbance[i, curr_sample_point(t)]`.
    ///
    /// With the disturbance at zero this is exactly the original
    /// constraint's residual.
    pub fn residual<M: ConstraintSystem>(
        &self,
        model: &M,
        index: usize,
        t: TimePoint,
    ) -> EstimationResult<f64> {
        check_index(index, self.num_constraints())?;
        let fine = self.fine_index(t)?;
        let original = model.constraint_residual(self.constraints[index], t)?;
        Ok(original + self.disturbances[[index, self.sample_of_fine[fine]]])
    }

    /// Whether the rebuilt equation at `(i, fine time point)` is active.
    pub fn is_active(&self, index: usize, t: TimePoint) -> EstimationResult<bool> {
        check_index(index, self.num_constraints())?;
        let fine = self.fine_index(t)?;
        Ok(self.active[[index, fine]])
    }

    /// Deactivate the rebuilt equation at `(i, fine time point)`.
    pub fn deactivate(&mut self, index: usize, t: TimePoint) -> EstimationResult<()> {
        check_index(index, self.num_constraints())?;
        let fine = self.fine_index(t)?;
        self.active[[index, fine]] = false;
        Ok(())
    }

    /// Activate the rebuilt equation at `(i, fine time point)`.
    pub fn activate(&mut self, index: usize, t: TimePoint) -> EstimationResult<()> {
        check_index(index, self.num_constraints())?;
        let fine = self.fine_index(t)?;
        self.active[[index, fine]] = true;
        Ok(())
    }
}

// The disturbance slots addressed as time-indexed variables over the sample
// points: `disturbance[i]` takes ids `0..n`.
impl DynamicModel for DisturbedConstraintBlock {
    fn model_name(&self) -> &str {
        "disturbance_block"
    }

    fn time_points(&self) -> &[TimePoint] {
        &self.sample_points
    }

    fn find_component(&self, name: &str) -> Option<VarId> {
        (0..self.num_constraints())
            .find(|&i| name == format!("disturbance[{i}]"))
            .map(|i| VarId(i as u64))
    }

    fn component_name(&self, var: VarId) -> Option<String> {
        if (var.0 as usize) < self.num_constraints() {
            Some(format!("disturbance[{}]", var.0))
        } else {
            None
        }
    }

    fn var_value(&self, var: VarId, t: TimePoint) -> ModelResult<f64> {
        let j = member_index(t, &self.sample_points).ok_or(ModelError::TimePointNotFound {
            time: t,
            model: self.model_name().to_string(),
        })?;
        if (var.0 as usize) < self.num_constraints() {
            Ok(self.disturbances[[var.0 as usize, j]])
        } else {
            Err(ModelError::UnknownVariable { id: var.0, model: self.model_name().to_string() })
        }
    }

    fn set_var_value(&mut self, var: VarId, t: TimePoint, value: f64) -> ModelResult<()> {
        let j = member_index(t, &self.sample_points).ok_or(ModelError::TimePointNotFound {
            time: t,
            model: self.model_name().to_string(),
        })?;
        if (var.0 as usize) < self.num_constraints() {
            self.disturbances[[var.0 as usize, j]] = value;
            Ok(())
        } else {
            Err(ModelError::UnknownVariable { id: var.0, model: self.model_name().to_string() })
        }
    }
}

// ---------------------------------------------------------------------------
// Activation pass
// ---------------------------------------------------------------------------

/// Mirror the original constraints' activation states onto the rebuilt
/// equations, and fix to zero every disturbance whose entire sample
/// interval is inactive.
///
/// For each `(i, t)`: the rebuilt equation is deactivated exactly when the
/// original constraint is inactive at `t`. For each `(i, j)`: when the
/// original is inactive at *every* fine time point mapping to sample point
/// `j`, `disturbance[i, j]` is fixed to `0.0` — an inactive constraint
/// provides no information to identify its disturbance.
pub fn activate_disturbed_constraints_based_on_original_constraints<M: ConstraintSystem>(
    model: &M,
    block: &mut DisturbedConstraintBlock,
) -> EstimationResult<()> {
    let fine_time = block.fine_time.clone();
    let constraints = block.constraints.clone();
    let n_samples = block.sample_points.len();

    for (i, &con) in constraints.iter().enumerate() {
        let activity = fine_time
            .iter()
            .map(|&t| model.constraint_is_active(con, t))
            .collect::<Result<Vec<bool>, _>>()?;

        for (fine, &is_active) in activity.iter().enumerate() {
            if !is_active {
                block.active[[i, fine]] = false;
            }
        }

        for j in 0..n_samples {
            let fine_in_sample: Vec<usize> = (0..fine_time.len())
                .filter(|&fine| block.sample_of_fine[fine] == j)
                .collect();
            let all_inactive = !fine_in_sample.is_empty()
                && fine_in_sample.iter().all(|&fine| !activity[fine]);
            if all_inactive {
                block.disturbances[[i, j]] = 0.0;
                block.disturbance_fixed[[i, j]] = true;
            }
        }
    }
    Ok(())
}
