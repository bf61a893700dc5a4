//! Interval data container: one value per component name per time interval.
//!
//! Purpose
//! -------
//! Hold piecewise-constant data — typically control inputs held constant
//! over each sample interval — keyed by component name over one shared,
//! ordered list of `(lo, hi)` intervals. Construction validates interval
//! ordering and per-key lengths; conversion to a [`TimeSeriesData`] resolves
//! each time point to its containing interval.
//!
//! Conventions
//! -----------
//! - Intervals are closed on both ends for containment tests; boundary
//!   preference between adjacent intervals is the caller's choice
//!   (`prefer_left`).
//! - A time point outside every interval is an error during conversion; the
//!   loading path in [`crate::transfer`] instead skips such points, because
//!   interval data need not cover a whole horizon there.

use std::collections::HashMap;

use crate::data::errors::{DataError, DataResult};
use crate::data::nearest::find_nearest_interval_index;
use crate::data::series::TimeSeriesData;
use crate::model::types::TimePoint;

/// Mapping from component name to piecewise-constant values over shared
/// intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalData {
    data: HashMap<String, Vec<f64>>,
    intervals: Vec<(TimePoint, TimePoint)>,
}

impl IntervalData {
    /// Build from `(name, values)` pairs over `intervals`.
    ///
    /// Intervals must satisfy `lo <= hi` and be non-overlapping in
    /// increasing order; every value list must have one entry per interval.
    pub fn new<K, I>(pairs: I, intervals: Vec<(TimePoint, TimePoint)>) -> DataResult<IntervalData>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Vec<f64>)>,
    {
        for (index, &(lo, hi)) in intervals.iter().enumerate() {
            if lo > hi {
                return Err(DataError::InvalidInterval { index, lo, hi });
            }
            if index > 0 && intervals[index - 1].1 > lo {
                return Err(DataError::UnorderedIntervals { index });
            }
        }

        let mut data = HashMap::new();
        for (key, values) in pairs {
            let key = key.into();
            if values.len() != intervals.len() {
                return Err(DataError::IntervalLengthMismatch {
                    key,
                    expected: intervals.len(),
                    actual: values.len(),
                });
            }
            data.insert(key, values);
        }
        Ok(IntervalData { data, intervals })
    }

    /// The ordered interval list.
    pub fn get_intervals(&self) -> &[(TimePoint, TimePoint)] {
        &self.intervals
    }

    /// The underlying name-to-values mapping.
    pub fn get_data(&self) -> &HashMap<String, Vec<f64>> {
        &self.data
    }

    /// Whether values exist for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// The per-interval values stored for `key`.
    pub fn get_data_from_key(&self, key: &str) -> DataResult<&[f64]> {
        self.data
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::KeyNotFound { key: key.to_string() })
    }

    /// Sample the piecewise-constant data onto explicit time points.
    ///
    /// Every point of `time` must fall inside some interval (within
    /// `tolerance`); the first uncovered point aborts the conversion.
    pub fn to_series(
        &self,
        time: &[TimePoint],
        tolerance: f64,
        prefer_left: bool,
    ) -> DataResult<TimeSeriesData> {
        let indices = time
            .iter()
            .map(|&t| {
                find_nearest_interval_index(&self.intervals, t, Some(tolerance), prefer_left)
                    .ok_or(DataError::IntervalNotFound { time: t })
            })
            .collect::<DataResult<Vec<usize>>>()?;

        TimeSeriesData::new(
            self.data.iter().map(|(key, values)| {
                (key.clone(), indices.iter().map(|&i| values[i]).collect::<Vec<f64>>())
            }),
            time.to_vec(),
        )
    }
}
