//! Dynamic variable linker: value transfer between two model instances.
//!
//! Purpose
//! -------
//! Pair up time-indexed variables on two model instances once, then move
//! values between them repeatedly without re-resolving names in a loop. The
//! two instances may use different names, different time sets, and different
//! time point counts at the two ends (one-to-one, one-to-many broadcast, or
//! many-to-many).
//!
//! Key behaviors
//! -------------
//! - Construction checks the two variable lists have equal length; a
//!   mismatch is fatal and no linker is created.
//! - Default source/target time points can be attached at construction and
//!   overridden per call; a transfer with no resolvable time points on
//!   either side fails before any mutation.
//! - [`DynamicVarLinker::transfer`] extracts from the source and loads into
//!   the target directly; [`DynamicVarLinker::transfer_with_noise`] runs the
//!   extracted values through the bounded noise sampler first, with
//!   per-source-variable noise parameters and bound pairs.
//! - Value lists of length one broadcast across all target time points; any
//!   other length mismatch is a configuration error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Source models are never mutated: every source access goes through
//!   `&S`. Target values at written time points are fully overwritten.
//! - Extraction preserves the order of the source list and of the source
//!   time points.
//!
//! Conventions
//! -----------
//! - Time point arguments are slices; a single point is a one-element
//!   slice, which is also the broadcast case.

use std::collections::HashMap;

use crate::model::interface::DynamicModel;
use crate::model::types::{Bounds, TimePoint, VarId};
use crate::noise::bounded::{apply_noise_with_bounds, BoundedNoiseOptions};
use crate::transfer::errors::{TransferError, TransferResult};

/// Pairs source variables on one model with target variables on another and
/// moves values between them.
#[derive(Debug, Clone)]
pub struct DynamicVarLinker {
    source_variables: Vec<VarId>,
    target_variables: Vec<VarId>,
    source_time: Option<Vec<TimePoint>>,
    target_time: Option<Vec<TimePoint>>,
}

impl DynamicVarLinker {
    /// Pair up two equal-length variable lists.
    ///
    /// Transfers only ever run source-to-target; build a second linker for
    /// the reverse direction.
    pub fn new(
        source_variables: Vec<VarId>,
        target_variables: Vec<VarId>,
    ) -> TransferResult<DynamicVarLinker> {
        if source_variables.len() != target_variables.len() {
            return Err(TransferError::VariableListLengthMismatch {
                source_len: source_variables.len(),
                target_len: target_variables.len(),
            });
        }
        Ok(DynamicVarLinker {
            source_variables,
            target_variables,
            source_time: None,
            target_time: None,
        })
    }

    /// Attach default source time points used when a call omits them.
    pub fn with_source_time(mut self, source_time: Vec<TimePoint>) -> DynamicVarLinker {
        self.source_time = Some(source_time);
        self
    }

    /// Attach default target time points used when a call omits them.
    pub fn with_target_time(mut self, target_time: Vec<TimePoint>) -> DynamicVarLinker {
        self.target_time = Some(target_time);
        self
    }

    /// The paired source variables, in pairing order.
    pub fn source_variables(&self) -> &[VarId] {
        &self.source_variables
    }

    /// The paired target variables, in pairing order.
    pub fn target_variables(&self) -> &[VarId] {
        &self.target_variables
    }

    fn resolve_times<'a>(
        &'a self,
        t_source: Option<&'a [TimePoint]>,
        t_target: Option<&'a [TimePoint]>,
    ) -> TransferResult<(&'a [TimePoint], &'a [TimePoint])> {
        let source = match t_source {
            Some(t) => t,
            None => self.source_time.as_deref().ok_or(TransferError::MissingSourceTime)?,
        };
        let target = match t_target {
            Some(t) => t,
            None => self.target_time.as_deref().ok_or(TransferError::MissingTargetTime)?,
        };
        Ok((source, target))
    }

    /// Copy values from source to target without noise.
    ///
    /// Time points default to the constructor's when omitted; missing time
    /// points on either side fail before any mutation. Length-one source
    /// data broadcasts across the target time points.
    pub fn transfer<S, T>(
        &self,
        source: &S,
        target: &mut T,
        t_source: Option<&[TimePoint]>,
        t_target: Option<&[TimePoint]>,
    ) -> TransferResult<()>
    where
        S: DynamicModel,
        T: DynamicModel,
    {
        let (t_source, t_target) = self.resolve_times(t_source, t_target)?;
        let data = self.extract_data_from_source_variables_at_time(source, t_source)?;
        self.load_data_to_target_variables_at_time(target, &data, t_target)
    }

    /// Read each source variable at each source time point.
    ///
    /// The mapping is keyed by source variable identity; each value list
    /// preserves the order of `t_source`.
    pub fn extract_data_from_source_variables_at_time<S>(
        &self,
        source: &S,
        t_source: &[TimePoint],
    ) -> TransferResult<HashMap<VarId, Vec<f64>>>
    where
        S: DynamicModel,
    {
        let mut data = HashMap::with_capacity(self.source_variables.len());
        for &var in &self.source_variables {
            let values = t_source
                .iter()
                .map(|&t| source.var_value(var, t))
                .collect::<Result<Vec<f64>, _>>()?;
            data.insert(var, values);
        }
        Ok(data)
    }

    /// Run extracted data through the bounded noise sampler.
    ///
    /// `noise_params` and `bounds` hold one entry per source variable; each
    /// entry is broadcast across that variable's value list, so a
    /// single-time-point extraction and a full-horizon extraction noise the
    /// same way.
    pub fn apply_noise_to_extracted_data<F>(
        &self,
        data: &HashMap<VarId, Vec<f64>>,
        noise_params: &[f64],
        mut noise_function: F,
        bounds: &[Bounds],
        options: &BoundedNoiseOptions,
    ) -> TransferResult<HashMap<VarId, Vec<f64>>>
    where
        F: FnMut(f64, f64) -> f64,
    {
        if noise_params.len() != self.source_variables.len() {
            return Err(TransferError::NoiseParamsLengthMismatch {
                expected: self.source_variables.len(),
                actual: noise_params.len(),
            });
        }
        if bounds.len() != self.source_variables.len() {
            return Err(TransferError::BoundListLengthMismatch {
                expected: self.source_variables.len(),
                actual: bounds.len(),
            });
        }

        let mut noised = HashMap::with_capacity(data.len());
        for (idx, &var) in self.source_variables.iter().enumerate() {
            let values =
                data.get(&var).ok_or(TransferError::MissingSourceData { id: var.0 })?;
            let per_value_params = vec![noise_params[idx]; values.len()];
            let per_value_bounds = vec![bounds[idx]; values.len()];
            let noised_values = apply_noise_with_bounds(
                values,
                &per_value_params,
                &mut noise_function,
                &per_value_bounds,
                options,
            )?;
            noised.insert(var, noised_values);
        }
        Ok(noised)
    }

    /// Write extracted (or noised) data into the target variables.
    ///
    /// A length-one value list is broadcast to every target time point; any
    /// other mismatch with `t_target` is a configuration error reported
    /// before that variable is touched.
    pub fn load_data_to_target_variables_at_time<T>(
        &self,
        target: &mut T,
        data: &HashMap<VarId, Vec<f64>>,
        t_target: &[TimePoint],
    ) -> TransferResult<()>
    where
        T: DynamicModel,
    {
        for (&svar, &tvar) in self.source_variables.iter().zip(&self.target_variables) {
            let values =
                data.get(&svar).ok_or(TransferError::MissingSourceData { id: svar.0 })?;

            if values.len() == 1 {
                for &t in t_target {
                    target.set_var_value(tvar, t, values[0])?;
                }
            } else {
                if values.len() != t_target.len() {
                    return Err(TransferError::TargetLengthMismatch {
                        component: target
                            .component_name(tvar)
                            .unwrap_or_else(|| format!("target variable {}", tvar.0)),
                        expected: t_target.len(),
                        actual: values.len(),
                    });
                }
                for (&t, &value) in t_target.iter().zip(values) {
                    target.set_var_value(tvar, t, value)?;
                }
            }
        }
        Ok(())
    }

    /// Copy values from source to target, perturbing them with the bounded
    /// noise sampler on the way.
    ///
    /// Requires `len(t_source) == len(t_target)` or `len(t_source) == 1`
    /// (the broadcast case); any other combination is a configuration
    /// error. Noise parameters and bounds are per source variable. The
    /// discard policy with its default retry budget applies, as in plain
    /// measurement transfer.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer_with_noise<S, T, F>(
        &self,
        source: &S,
        target: &mut T,
        noise_params: &[f64],
        noise_function: F,
        bounds: &[Bounds],
        t_source: Option<&[TimePoint]>,
        t_target: Option<&[TimePoint]>,
    ) -> TransferResult<()>
    where
        S: DynamicModel,
        T: DynamicModel,
        F: FnMut(f64, f64) -> f64,
    {
        let (t_source, t_target) = self.resolve_times(t_source, t_target)?;
        if t_source.len() != t_target.len() && t_source.len() != 1 {
            return Err(TransferError::TimePointCountMismatch {
                source_len: t_source.len(),
                target_len: t_target.len(),
            });
        }

        let data = self.extract_data_from_source_variables_at_time(source, t_source)?;
        let noised = self.apply_noise_to_extracted_data(
            &data,
            noise_params,
            noise_function,
            bounds,
            &BoundedNoiseOptions::default(),
        )?;
        self.load_data_to_target_variables_at_time(target, &noised, t_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::memory::MemoryModel;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Linker construction failure on mismatched variable lists.
    // - Time resolution failures when neither call nor constructor provides
    //   time points.
    // - One-to-one, one-to-all (broadcast), and all-to-all transfers,
    //   including that source values are never mutated and unpaired target
    //   variables are untouched.
    // - Extraction order, noisy extraction, noisy transfer, and the time
    //   point count rule for noisy transfer.
    // - Explicit validation of the non-broadcast length mismatch.
    //
    // They intentionally DO NOT cover:
    // - Noise policy behavior (covered in `noise::bounded`).
    // -------------------------------------------------------------------------

    // A source model with two composition states and one input, and a
    // target model with four generic states, one of which stays unpaired.
    fn make_models() -> (MemoryModel, Vec<VarId>, MemoryModel, Vec<VarId>) {
        let mut m1 = MemoryModel::new("m1", vec![0.0, 1.0, 2.0]);
        let var_a = m1.add_variable_with("var[A]", |t| 1.0 + 0.1 * t);
        let var_b = m1.add_variable_with("var[B]", |t| 1.0 + 0.1 * t);
        let input = m1.add_variable_with("input", |t| 1.0 - 0.1 * t);

        let mut m2 = MemoryModel::new("m2", vec![0.0, 1.0, 2.0]);
        let x1 = m2.add_variable("x1", Some(2.1));
        let x2 = m2.add_variable("x2", Some(2.2));
        let x3 = m2.add_variable("x3", Some(2.3));
        let x4 = m2.add_variable("x4", Some(2.4));
        let _ = x4;

        (m1, vec![var_a, var_b, input], m2, vec![x1, x2, x3])
    }

    fn pred_state(t: f64) -> f64 {
        1.0 + 0.1 * t
    }

    fn pred_input(t: f64) -> f64 {
        1.0 - 0.1 * t
    }

    #[test]
    // Purpose
    // -------
    // Ensure construction rejects variable lists of different lengths.
    fn new_rejects_unequal_lists() {
        let (_, vars1, _, vars2) = make_models();

        let err = DynamicVarLinker::new(vars1[..2].to_vec(), vars2).unwrap_err();

        assert_eq!(
            err,
            TransferError::VariableListLengthMismatch { source_len: 2, target_len: 3 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure a transfer with unresolvable time points fails before any
    // mutation, for each side separately.
    fn transfer_requires_resolvable_times() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1, vars2).unwrap();

        let err = linker.transfer(&m1, &mut m2, None, Some(&[2.0])).unwrap_err();
        assert_eq!(err, TransferError::MissingSourceTime);

        let err = linker.transfer(&m1, &mut m2, Some(&[0.0]), None).unwrap_err();
        assert_eq!(err, TransferError::MissingTargetTime);

        // Nothing was written.
        assert_eq!(m2.var_value(linker.target_variables()[0], 2.0).unwrap(), 2.1);
    }

    #[test]
    // Purpose
    // -------
    // Verify a one-to-one transfer writes exactly one target point and
    // leaves the source and unpaired variables untouched.
    //
    // Given
    // -----
    // - Source values at `t = 0` transferred to target `t = 2`.
    //
    // Expect
    // ------
    // - Target values at `t = 2` equal source values at `t = 0`; all other
    //   target points keep their initial values; source is unchanged.
    fn transfer_one_to_one() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1.clone(), vars2.clone()).unwrap();

        linker.transfer(&m1, &mut m2, Some(&[0.0]), Some(&[2.0])).unwrap();

        for &t in &[0.0, 1.0, 2.0] {
            assert_eq!(m1.var_value(vars1[0], t).unwrap(), pred_state(t));
            assert_eq!(m1.var_value(vars1[2], t).unwrap(), pred_input(t));

            if t == 2.0 {
                assert_eq!(m2.var_value(vars2[0], t).unwrap(), pred_state(0.0));
                assert_eq!(m2.var_value(vars2[1], t).unwrap(), pred_state(0.0));
                assert_eq!(m2.var_value(vars2[2], t).unwrap(), pred_input(0.0));
            } else {
                assert_eq!(m2.var_value(vars2[0], t).unwrap(), 2.1);
                assert_eq!(m2.var_value(vars2[1], t).unwrap(), 2.2);
                assert_eq!(m2.var_value(vars2[2], t).unwrap(), 2.3);
            }
            let x4 = m2.find_component("x4").unwrap();
            assert_eq!(m2.var_value(x4, t).unwrap(), 2.4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the broadcast law: one source point fans out to every target
    // point with the identical value.
    fn transfer_one_to_all_broadcasts() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1, vars2.clone()).unwrap();

        linker.transfer(&m1, &mut m2, Some(&[0.0]), Some(&[0.0, 1.0, 2.0])).unwrap();

        for &t in &[0.0, 1.0, 2.0] {
            assert_eq!(m2.var_value(vars2[0], t).unwrap(), pred_state(0.0));
            assert_eq!(m2.var_value(vars2[1], t).unwrap(), pred_state(0.0));
            assert_eq!(m2.var_value(vars2[2], t).unwrap(), pred_input(0.0));
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify an all-to-all transfer maps source points to target points in
    // order.
    fn transfer_all_to_all() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1, vars2.clone()).unwrap();

        linker
            .transfer(&m1, &mut m2, Some(&[0.0, 1.0, 2.0]), Some(&[0.0, 1.0, 2.0]))
            .unwrap();

        for &t in &[0.0, 1.0, 2.0] {
            assert_eq!(m2.var_value(vars2[0], t).unwrap(), pred_state(t));
            assert_eq!(m2.var_value(vars2[1], t).unwrap(), pred_state(t));
            assert_eq!(m2.var_value(vars2[2], t).unwrap(), pred_input(t));
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify transfer is idempotent when source and target already agree.
    fn transfer_is_idempotent_on_matching_values() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1, vars2.clone()).unwrap();
        let t_all = [0.0, 1.0, 2.0];

        linker.transfer(&m1, &mut m2, Some(&t_all), Some(&t_all)).unwrap();
        let before: Vec<f64> = t_all
            .iter()
            .flat_map(|&t| vars2.iter().map(move |&v| (v, t)))
            .map(|(v, t)| m2.var_value(v, t).unwrap())
            .collect();

        linker.transfer(&m1, &mut m2, Some(&t_all), Some(&t_all)).unwrap();
        let after: Vec<f64> = t_all
            .iter()
            .flat_map(|&t| vars2.iter().map(move |&v| (v, t)))
            .map(|(v, t)| m2.var_value(v, t).unwrap())
            .collect();

        assert_eq!(before, after);
    }

    #[test]
    // Purpose
    // -------
    // Verify extraction keys data by source identity and preserves the
    // order of the requested time points.
    fn extract_preserves_time_order() {
        let (m1, vars1, _, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1.clone(), vars2).unwrap();

        let data =
            linker.extract_data_from_source_variables_at_time(&m1, &[0.0, 2.0]).unwrap();

        assert_eq!(data[&vars1[0]], vec![1.0, 1.2]);
        assert_eq!(data[&vars1[1]], vec![1.0, 1.2]);
        assert_eq!(data[&vars1[2]], vec![1.0, 0.8]);
    }

    #[test]
    // Purpose
    // -------
    // Verify noise application uses each variable's own parameter,
    // broadcast across that variable's value list.
    //
    // Given
    // -----
    // - A deterministic sampling function `value + param` and per-variable
    //   parameters `[0.1, 0.2, 0.3]` with no bounds.
    //
    // Expect
    // ------
    // - Every value of variable `i` is shifted by exactly `params[i]`.
    fn apply_noise_uses_per_variable_params() {
        let (m1, vars1, _, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1.clone(), vars2).unwrap();
        let data =
            linker.extract_data_from_source_variables_at_time(&m1, &[0.0, 2.0]).unwrap();

        let noised = linker
            .apply_noise_to_extracted_data(
                &data,
                &[0.1, 0.2, 0.3],
                |v, p| v + p,
                &[(None, None); 3],
                &BoundedNoiseOptions::default(),
            )
            .unwrap();

        assert_eq!(noised[&vars1[0]], vec![1.1, 1.3]);
        assert_eq!(noised[&vars1[1]], vec![1.2, 1.4]);
        assert_eq!(noised[&vars1[2]], vec![1.3, 1.1]);
    }

    #[test]
    // Purpose
    // -------
    // Verify a noisy one-to-all transfer perturbs then broadcasts, without
    // mutating the source.
    fn transfer_with_noise_one_to_all() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1.clone(), vars2.clone()).unwrap();

        linker
            .transfer_with_noise(
                &m1,
                &mut m2,
                &[1e-3; 3],
                |v, p| v + p,
                &[(None, None); 3],
                Some(&[0.0]),
                Some(&[0.0, 1.0, 2.0]),
            )
            .unwrap();

        for &t in &[0.0, 1.0, 2.0] {
            assert_eq!(m1.var_value(vars1[0], t).unwrap(), pred_state(t));
            assert_eq!(m2.var_value(vars2[0], t).unwrap(), pred_state(0.0) + 1e-3);
            assert_eq!(m2.var_value(vars2[2], t).unwrap(), pred_input(0.0) + 1e-3);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a noisy transfer rejects time point counts that neither match
    // nor broadcast.
    fn transfer_with_noise_rejects_count_mismatch() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1, vars2).unwrap();

        let err = linker
            .transfer_with_noise(
                &m1,
                &mut m2,
                &[1e-3; 3],
                |v, _| v,
                &[(None, None); 3],
                Some(&[0.0, 1.0]),
                Some(&[0.0, 1.0, 2.0]),
            )
            .unwrap_err();

        assert_eq!(err, TransferError::TimePointCountMismatch { source_len: 2, target_len: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-broadcast value list that disagrees with the target time
    // points is a configuration error instead of an index overrun.
    fn load_rejects_non_broadcast_length_mismatch() {
        let (m1, vars1, mut m2, vars2) = make_models();
        let linker = DynamicVarLinker::new(vars1, vars2).unwrap();
        let data =
            linker.extract_data_from_source_variables_at_time(&m1, &[0.0, 2.0]).unwrap();

        let err = linker
            .load_data_to_target_variables_at_time(&mut m2, &data, &[0.0, 1.0, 2.0])
            .unwrap_err();

        assert_eq!(
            err,
            TransferError::TargetLengthMismatch {
                component: "x1".to_string(),
                expected: 3,
                actual: 2,
            }
        );
    }
}
