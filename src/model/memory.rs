//! In-memory reference model for tests and demonstrations.
//!
//! Purpose
//! -------
//! Provide a minimal concrete implementation of [`DynamicModel`] and
//! [`ConstraintSystem`] so the transfer and estimation machinery can be
//! exercised without a host modeling environment. This is test tooling, not
//! a modeling language: variables are named scalar series over the model's
//! time set, and constraints are time-indexed linear forms with per-point
//! activation flags.
//!
//! Key behaviors
//! -------------
//! - Variables are created unset or initialized from a constant or a
//!   function of time; values may carry optional bounds for building noise
//!   bound lists.
//! - Constraints are stored pre-folded as `sum(coef * var[t]) + constant`
//!   against zero, so the residual convention of [`ConstraintSystem`]
//!   (body minus bound) is the stored form evaluated directly.
//! - Activation defaults to active at every time point and can be toggled
//!   per point or for the whole constraint.
//!
//! Invariants & assumptions
//! ------------------------
//! - Component names are unique within one model; registering a duplicate
//!   name replaces the lookup entry (the old handle stays valid).
//! - The time set is fixed at construction and shared by every component.
//!
//! Conventions
//! -----------
//! - Time membership uses exact float equality, matching how time sets are
//!   built once and reused across the crate.

use std::collections::HashMap;

use crate::model::errors::{ModelError, ModelResult};
use crate::model::interface::{ConstraintSystem, DynamicModel};
use crate::model::types::{Bounds, ConId, ConstraintSense, TimePoint, VarId};

#[derive(Debug, Clone)]
struct VariableRecord {
    name: String,
    values: Vec<Option<f64>>,
    bounds: Bounds,
}

#[derive(Debug, Clone)]
struct ConstraintRecord {
    name: String,
    terms: Vec<(VarId, f64)>,
    constant: f64,
    sense: ConstraintSense,
    active: Vec<bool>,
}

/// Minimal in-memory [`DynamicModel`] + [`ConstraintSystem`] implementation.
#[derive(Debug, Clone)]
pub struct MemoryModel {
    name: String,
    time: Vec<TimePoint>,
    variables: Vec<VariableRecord>,
    constraints: Vec<ConstraintRecord>,
    var_index: HashMap<String, VarId>,
    con_index: HashMap<String, ConId>,
}

impl MemoryModel {
    /// Create an empty model over the given ordered time set.
    pub fn new(name: &str, time: Vec<TimePoint>) -> MemoryModel {
        MemoryModel {
            name: name.to_string(),
            time,
            variables: Vec::new(),
            constraints: Vec::new(),
            var_index: HashMap::new(),
            con_index: HashMap::new(),
        }
    }

    /// Register a variable, optionally initialized to a constant at every
    /// time point. Returns its handle.
    pub fn add_variable(&mut self, name: &str, init: Option<f64>) -> VarId {
        self.insert_variable(name, vec![init; self.time.len()])
    }

    /// Register a variable initialized from a function of time.
    pub fn add_variable_with<F>(&mut self, name: &str, init: F) -> VarId
    where
        F: Fn(TimePoint) -> f64,
    {
        let values = self.time.iter().map(|&t| Some(init(t))).collect();
        self.insert_variable(name, values)
    }

    fn insert_variable(&mut self, name: &str, values: Vec<Option<f64>>) -> VarId {
        let id = VarId(self.variables.len() as u64);
        self.variables.push(VariableRecord {
            name: name.to_string(),
            values,
            bounds: (None, None),
        });
        self.var_index.insert(name.to_string(), id);
        id
    }

    /// Attach lower/upper bounds to a variable.
    pub fn set_var_bounds(&mut self, var: VarId, bounds: Bounds) -> ModelResult<()> {
        let record = self.variable_mut(var)?;
        record.bounds = bounds;
        Ok(())
    }

    /// Lower/upper bounds of a variable, `(None, None)` when unbounded.
    pub fn var_bounds(&self, var: VarId) -> ModelResult<Bounds> {
        Ok(self.variable(var)?.bounds)
    }

    /// Register a time-indexed constraint `sum(coef * var[t]) + constant`
    /// compared against zero with the given sense. Returns its handle.
    ///
    /// The right-hand side is expected pre-folded into `constant`:
    /// `v1 + 2 v2 == 10` is registered as terms `[(v1, 1.0), (v2, 2.0)]`
    /// with constant `-10.0` and [`ConstraintSense::Equality`].
    pub fn add_constraint(
        &mut self,
        name: &str,
        terms: Vec<(VarId, f64)>,
        constant: f64,
        sense: ConstraintSense,
    ) -> ConId {
        let id = ConId(self.constraints.len() as u64);
        self.constraints.push(ConstraintRecord {
            name: name.to_string(),
            terms,
            constant,
            sense,
            active: vec![true; self.time.len()],
        });
        self.con_index.insert(name.to_string(), id);
        id
    }

    /// Toggle a constraint's activation at one time point.
    pub fn set_constraint_active(
        &mut self,
        con: ConId,
        t: TimePoint,
        active: bool,
    ) -> ModelResult<()> {
        let idx = self.time_index(t)?;
        let record = self.constraint_mut(con)?;
        record.active[idx] = active;
        Ok(())
    }

    /// Deactivate a constraint at every time point.
    pub fn deactivate_constraint(&mut self, con: ConId) -> ModelResult<()> {
        let record = self.constraint_mut(con)?;
        for flag in record.active.iter_mut() {
            *flag = false;
        }
        Ok(())
    }

    fn time_index(&self, t: TimePoint) -> ModelResult<usize> {
        self.time.iter().position(|&x| x == t).ok_or(ModelError::TimePointNotFound {
            time: t,
            model: self.name.clone(),
        })
    }

    fn variable(&self, var: VarId) -> ModelResult<&VariableRecord> {
        self.variables.get(var.0 as usize).ok_or(ModelError::UnknownVariable {
            id: var.0,
            model: self.name.clone(),
        })
    }

    fn variable_mut(&mut self, var: VarId) -> ModelResult<&mut VariableRecord> {
        let model = self.name.clone();
        self.variables
            .get_mut(var.0 as usize)
            .ok_or(ModelError::UnknownVariable { id: var.0, model })
    }

    fn constraint(&self, con: ConId) -> ModelResult<&ConstraintRecord> {
        self.constraints.get(con.0 as usize).ok_or(ModelError::UnknownConstraint {
            id: con.0,
            model: self.name.clone(),
        })
    }

    fn constraint_mut(&mut self, con: ConId) -> ModelResult<&mut ConstraintRecord> {
        let model = self.name.clone();
        self.constraints
            .get_mut(con.0 as usize)
            .ok_or(ModelError::UnknownConstraint { id: con.0, model })
    }
}

impl DynamicModel for MemoryModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn time_points(&self) -> &[TimePoint] {
        &self.time
    }

    fn find_component(&self, name: &str) -> Option<VarId> {
        self.var_index.get(name).copied()
    }

    fn component_name(&self, var: VarId) -> Option<String> {
        self.variables.get(var.0 as usize).map(|record| record.name.clone())
    }

    fn var_value(&self, var: VarId, t: TimePoint) -> ModelResult<f64> {
        let idx = self.time_index(t)?;
        let record = self.variable(var)?;
        record.values[idx].ok_or(ModelError::MissingValue {
            component: record.name.clone(),
            time: t,
        })
    }

    fn set_var_value(&mut self, var: VarId, t: TimePoint, value: f64) -> ModelResult<()> {
        let idx = self.time_index(t)?;
        let record = self.variable_mut(var)?;
        record.values[idx] = Some(value);
        Ok(())
    }
}

impl ConstraintSystem for MemoryModel {
    fn find_constraint(&self, name: &str) -> Option<ConId> {
        self.con_index.get(name).copied()
    }

    fn constraint_name(&self, con: ConId) -> Option<String> {
        self.constraints.get(con.0 as usize).map(|record| record.name.clone())
    }

    fn constraint_sense(&self, con: ConId, _t: TimePoint) -> ModelResult<ConstraintSense> {
        Ok(self.constraint(con)?.sense)
    }

    fn constraint_residual(&self, con: ConId, t: TimePoint) -> ModelResult<f64> {
        let record = self.constraint(con)?;
        // Clone the term list so variable reads don't hold the borrow.
        let terms = record.terms.clone();
        let constant = record.constant;
        let mut residual = constant;
        for (var, coef) in terms {
            residual += coef * self.var_value(var, t)?;
        }
        Ok(residual)
    }

    fn constraint_is_active(&self, con: ConId, t: TimePoint) -> ModelResult<bool> {
        let idx = self.time_index(t)?;
        Ok(self.constraint(con)?.active[idx])
    }
}
