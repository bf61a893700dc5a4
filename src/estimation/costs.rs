//! Quadratic cost expressions for estimation objectives.
//!
//! Purpose
//! -------
//! Assemble the objective terms of an estimator: penalties on error and
//! disturbance variables, tracking costs against constant, time-varying, or
//! piecewise-constant setpoints, and penalties on constraint residuals.
//! Every builder validates its weight/setpoint keys for *all* variables
//! before constructing anything, so a missing entry fails the call with
//! nothing built.
//!
//! Key behaviors
//! -------------
//! - A cost is an evaluator object indexed by time:
//!   [`TrackingCostExpression::value_at`] computes
//!   `sum_i w_i * (v_i[t] - setpoint_i[t])^2` against a borrowed model, and
//!   [`TrackingCostExpression::total`] sums it over the expression's time
//!   set. Error/disturbance penalties are the zero-setpoint case.
//! - Weights and setpoints are keyed by component name, resolved through
//!   the model the variables live on; the default weight is `1.0`.
//! - [`get_constraint_residual_expression`] penalizes squared constraint
//!   residuals and rejects ranged inequalities, which have no single
//!   residual.

use ndarray::Array2;

use crate::data::interval::IntervalData;
use crate::data::scalar::ScalarData;
use crate::data::series::TimeSeriesData;
use crate::estimation::errors::{EstimationError, EstimationResult};
use crate::model::interface::{ConstraintSystem, DynamicModel};
use crate::model::types::{ConId, ConstraintSense, TimePoint, VarId};

/// Weighted squared-deviation cost over a set of variables, indexed by
/// time.
#[derive(Debug, Clone)]
pub struct TrackingCostExpression {
    time: Vec<TimePoint>,
    variables: Vec<VarId>,
    weights: Vec<f64>,
    setpoints: Array2<f64>,
}

impl TrackingCostExpression {
    /// The time points the expression is indexed by.
    pub fn time_points(&self) -> &[TimePoint] {
        &self.time
    }

    /// The participating variables, in index order.
    pub fn variables(&self) -> &[VarId] {
        &self.variables
    }

    /// Evaluate the cost at one time point:
    /// `sum_i w_i * (v_i[t] - setpoint_i[t])^2`.
    pub fn value_at<M: DynamicModel>(&self, model: &M, t: TimePoint) -> EstimationResult<f64> {
        let idx = self
            .time
            .iter()
            .position(|&x| x == t)
            .ok_or(EstimationError::TimeNotInHorizon { time: t })?;

        let mut total = 0.0;
        for (i, &var) in self.variables.iter().enumerate() {
            let value = model.var_value(var, t)?;
            let deviation = value - self.setpoints[[i, idx]];
            total += self.weights[i] * deviation * deviation;
        }
        Ok(total)
    }

    /// Sum of [`TrackingCostExpression::value_at`] over every time point.
    pub fn total<M: DynamicModel>(&self, model: &M) -> EstimationResult<f64> {
        let mut total = 0.0;
        for &t in &self.time {
            total += self.value_at(model, t)?;
        }
        Ok(total)
    }
}

// Resolve each variable's name and weight up front; the first missing
// weight aborts before anything is built.
fn resolve_names_and_weights<M: DynamicModel>(
    model: &M,
    variables: &[VarId],
    weight_data: Option<&ScalarData>,
) -> EstimationResult<(Vec<String>, Vec<f64>)> {
    let mut names = Vec::with_capacity(variables.len());
    let mut weights = Vec::with_capacity(variables.len());
    for &var in variables {
        let name = model
            .component_name(var)
            .ok_or(EstimationError::UnnamedComponent { id: var.0 })?;
        let weight = match weight_data {
            None => 1.0,
            Some(data) => data
                .get_data_from_key(&name)
                .map_err(|_| EstimationError::MissingWeight { name: name.clone() })?,
        };
        names.push(name);
        weights.push(weight);
    }
    Ok((names, weights))
}

/// The weighted squared penalty `sum_i w_i * v_i[t]^2` on error-style
/// variables, indexed by `time`.
///
/// Default weight is `1.0`; explicit weights are keyed by component name
/// and must cover every variable.
pub fn get_cost_from_error_variables<M: DynamicModel>(
    model: &M,
    variables: &[VarId],
    time: &[TimePoint],
    weight_data: Option<&ScalarData>,
) -> EstimationResult<TrackingCostExpression> {
    let (_, weights) = resolve_names_and_weights(model, variables, weight_data)?;
    Ok(TrackingCostExpression {
        time: time.to_vec(),
        variables: variables.to_vec(),
        weights,
        setpoints: Array2::from_elem((variables.len(), time.len()), 0.0),
    })
}

/// One weighted squared tracking term: `w * (var[t] - setpoint)^2`.
pub fn get_quadratic_tracking_cost_at_time<M: DynamicModel>(
    model: &M,
    var: VarId,
    t: TimePoint,
    setpoint: f64,
    weight: Option<f64>,
) -> EstimationResult<f64> {
    let weight = weight.unwrap_or(1.0);
    let deviation = model.var_value(var, t)? - setpoint;
    Ok(weight * deviation * deviation)
}

/// Tracking cost against one constant setpoint per variable.
///
/// Setpoint and (when given) weight data must contain a key for every
/// variable; the first missing key aborts the call.
pub fn get_tracking_cost_from_constant_setpoint<M: DynamicModel>(
    model: &M,
    variables: &[VarId],
    time: &[TimePoint],
    setpoint_data: &ScalarData,
    weight_data: Option<&ScalarData>,
) -> EstimationResult<TrackingCostExpression> {
    let (names, weights) = resolve_names_and_weights(model, variables, weight_data)?;

    let mut setpoints = Array2::from_elem((variables.len(), time.len()), 0.0);
    for (i, name) in names.iter().enumerate() {
        let setpoint = setpoint_data
            .get_data_from_key(name)
            .map_err(|_| EstimationError::MissingSetpoint { name: name.clone() })?;
        for idx in 0..time.len() {
            setpoints[[i, idx]] = setpoint;
        }
    }

    Ok(TrackingCostExpression {
        time: time.to_vec(),
        variables: variables.to_vec(),
        weights,
        setpoints,
    })
}

/// Tracking cost against a setpoint trajectory per variable.
///
/// The setpoint series must be indexed by exactly the cost's time points.
pub fn get_tracking_cost_from_time_varying_setpoint<M: DynamicModel>(
    model: &M,
    variables: &[VarId],
    time: &[TimePoint],
    setpoint_data: &TimeSeriesData,
    weight_data: Option<&ScalarData>,
) -> EstimationResult<TrackingCostExpression> {
    if time != setpoint_data.get_time_points() {
        return Err(EstimationError::SetpointTimeMismatch);
    }
    let (names, weights) = resolve_names_and_weights(model, variables, weight_data)?;

    let mut setpoints = Array2::from_elem((variables.len(), time.len()), 0.0);
    for (i, name) in names.iter().enumerate() {
        let series = setpoint_data
            .get_data_from_key(name)
            .map_err(|_| EstimationError::MissingSetpoint { name: name.clone() })?;
        for (idx, &value) in series.iter().enumerate() {
            setpoints[[i, idx]] = value;
        }
    }

    Ok(TrackingCostExpression {
        time: time.to_vec(),
        variables: variables.to_vec(),
        weights,
        setpoints,
    })
}

/// Tracking cost against piecewise-constant setpoints, sampled onto the
/// cost's time points first.
pub fn get_tracking_cost_from_piecewise_constant_setpoint<M: DynamicModel>(
    model: &M,
    variables: &[VarId],
    time: &[TimePoint],
    setpoint_data: &IntervalData,
    weight_data: Option<&ScalarData>,
    tolerance: f64,
    prefer_left: bool,
) -> EstimationResult<TrackingCostExpression> {
    let series = setpoint_data.to_series(time, tolerance, prefer_left)?;
    get_tracking_cost_from_time_varying_setpoint(model, variables, time, &series, weight_data)
}

/// Weighted squared constraint residuals, indexed by constraint and time.
#[derive(Debug, Clone)]
pub struct ConstraintResidualExpression {
    time: Vec<TimePoint>,
    constraints: Vec<ConId>,
    weights: Vec<f64>,
}

impl ConstraintResidualExpression {
    /// The index set `{0, ..., n-1}` over constraints.
    pub fn constraint_set(&self) -> std::ops::Range<usize> {
        0..self.constraints.len()
    }

    /// The time points the expression is indexed by.
    pub fn time_points(&self) -> &[TimePoint] {
        &self.time
    }

    /// One term: `w_i * residual_i(t)^2`.
    pub fn value_at<M: ConstraintSystem>(
        &self,
        model: &M,
        index: usize,
        t: TimePoint,
    ) -> EstimationResult<f64> {
        let con = *self
            .constraints
            .get(index)
            .ok_or(EstimationError::IndexOutOfRange { index, len: self.constraints.len() })?;
        let residual = model.constraint_residual(con, t)?;
        Ok(self.weights[index] * residual * residual)
    }

    /// Sum of every constraint's term at one time point.
    pub fn total_at<M: ConstraintSystem>(
        &self,
        model: &M,
        t: TimePoint,
    ) -> EstimationResult<f64> {
        let mut total = 0.0;
        for index in self.constraint_set() {
            total += self.value_at(model, index, t)?;
        }
        Ok(total)
    }
}

/// Weighted squared-residual cost over a set of constraints.
///
/// Equality and one-sided inequality constraints are accepted; a ranged
/// inequality has no single residual and is rejected. Weights are keyed by
/// constraint name; the default is `1.0`.
pub fn get_constraint_residual_expression<M: ConstraintSystem>(
    model: &M,
    constraints: &[ConId],
    time: &[TimePoint],
    weight_data: Option<&ScalarData>,
) -> EstimationResult<ConstraintResidualExpression> {
    let mut weights = Vec::with_capacity(constraints.len());
    for &con in constraints {
        let name = model
            .constraint_name(con)
            .ok_or(EstimationError::UnnamedComponent { id: con.0 })?;
        for &t in time {
            if model.constraint_sense(con, t)? == ConstraintSense::Range {
                return Err(EstimationError::RangedInequality { name });
            }
        }
        let weight = match weight_data {
            None => 1.0,
            Some(data) => data
                .get_data_from_key(&name)
                .map_err(|_| EstimationError::MissingWeight { name: name.clone() })?,
        };
        weights.push(weight);
    }

    Ok(ConstraintResidualExpression {
        time: time.to_vec(),
        constraints: constraints.to_vec(),
        weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::memory::MemoryModel;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Error-variable costs with default and explicit weights, and the
    //   missing-weight failure.
    // - Constant and time-varying tracking costs, their key validation, and
    //   the setpoint time mismatch failure.
    // - Piecewise-constant tracking via interval sampling.
    // - Constraint residual costs and the ranged-inequality rejection.
    //
    // They intentionally DO NOT cover:
    // - Cost assembly over estimation blocks (exercised in the integration
    //   test).
    // -------------------------------------------------------------------------

    const TIME: [f64; 3] = [0.0, 1.0, 2.0];

    // v1[t] = t, v2[t] = 2 t over [0, 1, 2].
    fn make_model() -> (MemoryModel, Vec<VarId>) {
        let mut m = MemoryModel::new("m", TIME.to_vec());
        let v1 = m.add_variable_with("v1", |t| t);
        let v2 = m.add_variable_with("v2", |t| 2.0 * t);
        (m, vec![v1, v2])
    }

    #[test]
    // Purpose
    // -------
    // Verify the default-weight error cost: `v1[t]^2 + v2[t]^2` at each
    // time point.
    fn error_cost_without_weights() {
        let (model, vars) = make_model();

        let cost = get_cost_from_error_variables(&model, &vars, &TIME, None).unwrap();

        for &t in &TIME {
            let expected = t * t + (2.0 * t) * (2.0 * t);
            assert_eq!(cost.value_at(&model, t).unwrap(), expected);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify explicit weights keyed by component name:
    // `0.1 v1[t]^2 + 0.5 v2[t]^2`.
    fn error_cost_with_weights() {
        let (model, vars) = make_model();
        let weights = ScalarData::new([("v1", 0.1), ("v2", 0.5)]);

        let cost = get_cost_from_error_variables(&model, &vars, &TIME, Some(&weights)).unwrap();

        for &t in &TIME {
            let expected = 0.1 * t * t + 0.5 * (2.0 * t) * (2.0 * t);
            assert_eq!(cost.value_at(&model, t).unwrap(), expected);
        }
        let expected: f64 =
            TIME.iter().map(|&t| 0.1 * t * t + 0.5 * (2.0 * t) * (2.0 * t)).sum();
        assert_eq!(cost.total(&model).unwrap(), expected);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a weight map missing any variable fails up front, naming the
    // variable.
    fn error_cost_rejects_missing_weight() {
        let (model, vars) = make_model();
        let weights = ScalarData::new([("v1", 0.1)]);

        let err =
            get_cost_from_error_variables(&model, &vars, &TIME, Some(&weights)).unwrap_err();

        assert_eq!(err, EstimationError::MissingWeight { name: "v2".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Verify the single-term helper with and without a weight.
    fn quadratic_tracking_term() {
        let (model, vars) = make_model();

        let term =
            get_quadratic_tracking_cost_at_time(&model, vars[0], 2.0, 0.5, None).unwrap();
        assert_eq!(term, 2.25);

        let term =
            get_quadratic_tracking_cost_at_time(&model, vars[0], 2.0, 0.5, Some(10.0)).unwrap();
        assert_eq!(term, 22.5);
    }

    #[test]
    // Purpose
    // -------
    // Verify constant-setpoint tracking and its setpoint key validation.
    fn constant_setpoint_tracking() {
        let (model, vars) = make_model();
        let setpoints = ScalarData::new([("v1", 1.0), ("v2", 0.0)]);

        let cost =
            get_tracking_cost_from_constant_setpoint(&model, &vars, &TIME, &setpoints, None)
                .unwrap();
        for &t in &TIME {
            let expected = (t - 1.0) * (t - 1.0) + (2.0 * t) * (2.0 * t);
            assert_eq!(cost.value_at(&model, t).unwrap(), expected);
        }

        let incomplete = ScalarData::new([("v1", 1.0)]);
        let err =
            get_tracking_cost_from_constant_setpoint(&model, &vars, &TIME, &incomplete, None)
                .unwrap_err();
        assert_eq!(err, EstimationError::MissingSetpoint { name: "v2".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Verify time-varying tracking follows the trajectory and demands
    // matching time points.
    fn time_varying_setpoint_tracking() {
        let (model, vars) = make_model();
        let series = TimeSeriesData::new(
            [("v1", vec![0.0, 1.0, 2.0]), ("v2", vec![0.0, 0.0, 0.0])],
            TIME.to_vec(),
        )
        .unwrap();

        let cost =
            get_tracking_cost_from_time_varying_setpoint(&model, &vars, &TIME, &series, None)
                .unwrap();
        // v1 tracks its own trajectory exactly; only v2 contributes.
        for &t in &TIME {
            assert_eq!(cost.value_at(&model, t).unwrap(), (2.0 * t) * (2.0 * t));
        }

        let shifted = TimeSeriesData::new(
            [("v1", vec![0.0, 1.0]), ("v2", vec![0.0, 0.0])],
            vec![0.0, 1.0],
        )
        .unwrap();
        let err =
            get_tracking_cost_from_time_varying_setpoint(&model, &vars, &TIME, &shifted, None)
                .unwrap_err();
        assert_eq!(err, EstimationError::SetpointTimeMismatch);
    }

    #[test]
    // Purpose
    // -------
    // Verify piecewise-constant tracking samples the intervals onto the
    // cost's time points.
    //
    // Given
    // -----
    // - Setpoint 0.0 over [0, 1] and 2.0 over [1, 2] for `v1[t] = t`, with
    //   left preference on the shared boundary.
    //
    // Expect
    // ------
    // - Deviations `0, 1, 0` at `t = 0, 1, 2` (at `t = 1` the left
    //   interval's setpoint 0.0 applies).
    fn piecewise_constant_setpoint_tracking() {
        let (model, vars) = make_model();
        let intervals =
            IntervalData::new([("v1", vec![0.0, 2.0])], vec![(0.0, 1.0), (1.0, 2.0)]).unwrap();

        let cost = get_tracking_cost_from_piecewise_constant_setpoint(
            &model,
            &vars[..1],
            &TIME,
            &intervals,
            None,
            0.0,
            true,
        )
        .unwrap();

        assert_eq!(cost.value_at(&model, 0.0).unwrap(), 0.0);
        assert_eq!(cost.value_at(&model, 1.0).unwrap(), 1.0);
        assert_eq!(cost.value_at(&model, 2.0).unwrap(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify residual costs square the body-minus-bound residual and reject
    // ranged inequalities by name.
    fn constraint_residual_expression() {
        let (mut model, vars) = make_model();
        // v1 + 2 v2 == 10 -> residual 5 t - 10.
        let c = model.add_constraint(
            "c",
            vec![(vars[0], 1.0), (vars[1], 2.0)],
            -10.0,
            ConstraintSense::Equality,
        );

        let cost = get_constraint_residual_expression(&model, &[c], &TIME, None).unwrap();
        for &t in &TIME {
            let residual = 5.0 * t - 10.0;
            assert_eq!(cost.value_at(&model, 0, t).unwrap(), residual * residual);
            assert_eq!(cost.total_at(&model, t).unwrap(), residual * residual);
        }

        let ranged =
            model.add_constraint("r", vec![(vars[0], 1.0)], 0.0, ConstraintSense::Range);
        let err =
            get_constraint_residual_expression(&model, &[ranged], &TIME, None).unwrap_err();
        assert_eq!(err, EstimationError::RangedInequality { name: "r".to_string() });
    }
}
