//! Loading data containers into a model by component name.
//!
//! Purpose
//! -------
//! Write the contents of a [`ScalarData`], [`TimeSeriesData`], or
//! [`IntervalData`] container into a model instance, resolving each key
//! through the model's `find_component`. An unknown name is the fatal
//! "cannot find component" lookup error; nothing in these functions
//! recovers or skips silently except interval points outside the data's
//! coverage, which are legitimately absent.
//!
//! Key behaviors
//! -------------
//! - Scalar values are written at every requested time point.
//! - Series loading demands the requested time points equal the
//!   container's time vector.
//! - Interval loading resolves each time point to its containing interval
//!   with a tolerance and a boundary preference, and can exclude interval
//!   endpoints to realize half-open interval semantics; the two
//!   contradictory flag combinations are configuration errors.

use crate::data::interval::IntervalData;
use crate::data::nearest::{find_nearest_index, find_nearest_interval_index};
use crate::data::scalar::ScalarData;
use crate::data::series::TimeSeriesData;
use crate::model::errors::ModelError;
use crate::model::interface::DynamicModel;
use crate::model::types::{TimePoint, VarId};
use crate::transfer::errors::{TransferError, TransferResult};

/// Options for [`load_data_from_interval`].
///
/// Defaults treat intervals as half-open on the left: a point on the shared
/// boundary of two intervals takes the left interval's value, and a point
/// that is only a left endpoint is not loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalLoadOptions {
    /// Tolerance for matching time points against interval endpoints.
    pub tolerance: f64,
    /// On a shared boundary, take the value from the interval on the left.
    pub prefer_left: bool,
    /// Do not load a point that is only a left endpoint.
    pub exclude_left_endpoint: bool,
    /// Do not load a point that is only a right endpoint.
    pub exclude_right_endpoint: bool,
}

impl Default for IntervalLoadOptions {
    fn default() -> IntervalLoadOptions {
        IntervalLoadOptions {
            tolerance: 0.0,
            prefer_left: true,
            exclude_left_endpoint: true,
            exclude_right_endpoint: false,
        }
    }
}

impl IntervalLoadOptions {
    fn validate(&self) -> TransferResult<()> {
        if self.prefer_left && self.exclude_right_endpoint && !self.exclude_left_endpoint {
            return Err(TransferError::PreferLeftExcludesLeft);
        }
        if !self.prefer_left && self.exclude_left_endpoint && !self.exclude_right_endpoint {
            return Err(TransferError::PreferRightExcludesRight);
        }
        Ok(())
    }
}

fn resolve_component<M: DynamicModel>(model: &M, name: &str) -> TransferResult<VarId> {
    model.find_component(name).ok_or_else(|| {
        TransferError::Model(ModelError::ComponentNotFound {
            name: name.to_string(),
            model: model.model_name().to_string(),
        })
    })
}

/// Write each scalar value at every requested time point.
pub fn load_data_from_scalar<M: DynamicModel>(
    data: &ScalarData,
    model: &mut M,
    time: &[TimePoint],
) -> TransferResult<()> {
    for (name, &value) in data.get_data() {
        let var = resolve_component(model, name)?;
        for &t in time {
            model.set_var_value(var, t, value)?;
        }
    }
    Ok(())
}

/// Write each trajectory at the requested time points, which must equal the
/// container's time vector.
pub fn load_data_from_series<M: DynamicModel>(
    data: &TimeSeriesData,
    model: &mut M,
    time: &[TimePoint],
) -> TransferResult<()> {
    if time != data.get_time_points() {
        return Err(TransferError::SeriesTimeMismatch);
    }
    for (name, values) in data.get_data() {
        let var = resolve_component(model, name)?;
        for (&t, &value) in time.iter().zip(values) {
            model.set_var_value(var, t, value)?;
        }
    }
    Ok(())
}

/// Write piecewise-constant values at the time points covered by the
/// container's intervals.
///
/// Points outside every interval are skipped — interval data need not cover
/// the whole time set. Endpoint-exclusion flags realize half-open interval
/// semantics; see [`IntervalLoadOptions`].
pub fn load_data_from_interval<M: DynamicModel>(
    data: &IntervalData,
    model: &mut M,
    time: &[TimePoint],
    options: &IntervalLoadOptions,
) -> TransferResult<()> {
    options.validate()?;

    let intervals = data.get_intervals();
    let left_endpoints: Vec<TimePoint> = intervals.iter().map(|&(lo, _)| lo).collect();
    let right_endpoints: Vec<TimePoint> = intervals.iter().map(|&(_, hi)| hi).collect();
    let tol = Some(options.tolerance);

    let mut idx_list: Vec<Option<usize>> = time
        .iter()
        .map(|&t| find_nearest_interval_index(intervals, t, tol, options.prefer_left))
        .collect();

    for (i, &t) in time.iter().enumerate() {
        let on_left = find_nearest_index(&left_endpoints, t, tol).is_some();
        let on_right = find_nearest_index(&right_endpoints, t, tol).is_some();

        if options.exclude_left_endpoint && on_left && !on_right {
            idx_list[i] = None;
        } else if options.exclude_right_endpoint && on_right && !on_left {
            idx_list[i] = None;
        } else if options.exclude_left_endpoint
            && options.exclude_right_endpoint
            && on_left
            && on_right
        {
            idx_list[i] = None;
        }
    }

    for (name, values) in data.get_data() {
        let var = resolve_component(model, name)?;
        for (&idx, &t) in idx_list.iter().zip(time) {
            if let Some(i) = idx {
                model.set_var_value(var, t, values[i])?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::memory::MemoryModel;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Scalar loading across a time set and the unknown-name failure.
    // - Series loading and its exact time-vector requirement.
    // - Interval loading with default (half-open-left) semantics and the
    //   contradictory flag combinations.
    // -------------------------------------------------------------------------

    fn make_model() -> MemoryModel {
        let mut m = MemoryModel::new("plant", vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        m.add_variable("u", None);
        m
    }

    #[test]
    // Purpose
    // -------
    // Verify scalar loading writes the value at every requested point and
    // reports unknown names with model context.
    fn scalar_load_writes_everywhere() {
        let mut m = make_model();
        let u = m.find_component("u").unwrap();

        load_data_from_scalar(&ScalarData::new([("u", 0.3)]), &mut m, &[0.0, 2.0, 4.0]).unwrap();

        for &t in &[0.0, 2.0, 4.0] {
            assert_eq!(m.var_value(u, t).unwrap(), 0.3);
        }
        assert!(m.var_value(u, 1.0).is_err());

        let err =
            load_data_from_scalar(&ScalarData::new([("w", 1.0)]), &mut m, &[0.0]).unwrap_err();
        assert_eq!(
            err,
            TransferError::Model(ModelError::ComponentNotFound {
                name: "w".to_string(),
                model: "plant".to_string(),
            })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify series loading writes point-for-point and demands matching
    // time vectors.
    fn series_load_requires_matching_time() {
        let mut m = make_model();
        let u = m.find_component("u").unwrap();
        let series =
            TimeSeriesData::new([("u", vec![0.1, 0.2, 0.3])], vec![0.0, 1.0, 2.0]).unwrap();

        load_data_from_series(&series, &mut m, &[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(m.var_value(u, 1.0).unwrap(), 0.2);

        let err = load_data_from_series(&series, &mut m, &[0.0, 1.0]).unwrap_err();
        assert_eq!(err, TransferError::SeriesTimeMismatch);
    }

    #[test]
    // Purpose
    // -------
    // Verify default interval loading: left endpoints excluded, shared
    // boundaries take the left interval, right endpoints loaded.
    //
    // Given
    // -----
    // - Values `[0.4, 0.5]` over `[(0, 2), (2, 4)]`, loaded at
    //   `[0, 1, 2, 3, 4]`.
    //
    // Expect
    // ------
    // - `t = 0` (left endpoint only) skipped; `t = 1 -> 0.4`;
    //   `t = 2` (shared boundary) takes the left value `0.4`;
    //   `t = 3 -> 0.5`; `t = 4` (right endpoint only) `-> 0.5`.
    fn interval_load_default_half_open_left() {
        let mut m = make_model();
        let u = m.find_component("u").unwrap();
        let data =
            IntervalData::new([("u", vec![0.4, 0.5])], vec![(0.0, 2.0), (2.0, 4.0)]).unwrap();

        load_data_from_interval(&data, &mut m, &[0.0, 1.0, 2.0, 3.0, 4.0], &Default::default())
            .unwrap();

        assert!(m.var_value(u, 0.0).is_err());
        assert_eq!(m.var_value(u, 1.0).unwrap(), 0.4);
        assert_eq!(m.var_value(u, 2.0).unwrap(), 0.4);
        assert_eq!(m.var_value(u, 3.0).unwrap(), 0.5);
        assert_eq!(m.var_value(u, 4.0).unwrap(), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the two contradictory flag combinations fail validation before
    // anything is written.
    fn interval_load_rejects_contradictory_flags() {
        let mut m = make_model();
        let data = IntervalData::new([("u", vec![0.4])], vec![(0.0, 2.0)]).unwrap();

        let left_conflict = IntervalLoadOptions {
            prefer_left: true,
            exclude_left_endpoint: false,
            exclude_right_endpoint: true,
            ..Default::default()
        };
        let err =
            load_data_from_interval(&data, &mut m, &[1.0], &left_conflict).unwrap_err();
        assert_eq!(err, TransferError::PreferLeftExcludesLeft);

        let right_conflict = IntervalLoadOptions {
            prefer_left: false,
            exclude_left_endpoint: true,
            exclude_right_endpoint: false,
            ..Default::default()
        };
        let err =
            load_data_from_interval(&data, &mut m, &[1.0], &right_conflict).unwrap_err();
        assert_eq!(err, TransferError::PreferRightExcludesRight);

        let u = m.find_component("u").unwrap();
        assert!(m.var_value(u, 1.0).is_err());
    }
}
