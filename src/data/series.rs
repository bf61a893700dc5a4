//! Time series data container: one value per component name per time point.
//!
//! Purpose
//! -------
//! Hold trajectories keyed by component name over one shared, ordered time
//! vector. The container validates at construction that every series has
//! exactly one value per time point; a mismatch is a fatal configuration
//! error, never a silent truncation.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeriesData::shift_time_points`] translates the time vector by a
//!   constant offset — the rolling-horizon bookkeeping that moves data from
//!   "model time" to "simulation time".
//! - [`TimeSeriesData::concatenate`] appends another container holding the
//!   same key set, extending every series and the time vector.
//! - [`TimeSeriesData::get_data_at_time`] projects the container onto one
//!   time point, yielding a [`ScalarData`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `len(series) == len(time)` for every key, enforced at construction and
//!   preserved by every mutation.
//! - The time vector is ordered; `shift_time_points` and `concatenate`
//!   preserve ordering when the caller supplies ordered inputs.

use std::collections::HashMap;

use crate::data::errors::{DataError, DataResult};
use crate::data::scalar::ScalarData;
use crate::model::types::TimePoint;

/// Mapping from component name to a trajectory over a shared time vector.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesData {
    data: HashMap<String, Vec<f64>>,
    time: Vec<TimePoint>,
}

impl TimeSeriesData {
    /// Build from `(name, values)` pairs over `time`.
    ///
    /// Every value list must have exactly `time.len()` entries; the first
    /// offender is reported as [`DataError::SeriesLengthMismatch`].
    pub fn new<K, I>(pairs: I, time: Vec<TimePoint>) -> DataResult<TimeSeriesData>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Vec<f64>)>,
    {
        let mut data = HashMap::new();
        for (key, values) in pairs {
            let key = key.into();
            if values.len() != time.len() {
                return Err(DataError::SeriesLengthMismatch {
                    key,
                    expected: time.len(),
                    actual: values.len(),
                });
            }
            data.insert(key, values);
        }
        Ok(TimeSeriesData { data, time })
    }

    /// The ordered time vector.
    pub fn get_time_points(&self) -> &[TimePoint] {
        &self.time
    }

    /// The underlying name-to-trajectory mapping.
    pub fn get_data(&self) -> &HashMap<String, Vec<f64>> {
        &self.data
    }

    /// Whether a trajectory exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// The trajectory stored for `key`.
    pub fn get_data_from_key(&self, key: &str) -> DataResult<&[f64]> {
        self.data
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::KeyNotFound { key: key.to_string() })
    }

    /// Project the container onto one time point.
    pub fn get_data_at_time(&self, t: TimePoint) -> DataResult<ScalarData> {
        let idx = self
            .time
            .iter()
            .position(|&x| x == t)
            .ok_or(DataError::TimePointNotFound { time: t })?;
        Ok(ScalarData::new(
            self.data.iter().map(|(key, values)| (key.clone(), values[idx])),
        ))
    }

    /// Translate every time point by `offset`.
    pub fn shift_time_points(&mut self, offset: f64) {
        for t in self.time.iter_mut() {
            *t += offset;
        }
    }

    /// Append `other`, which must hold exactly the same key set.
    pub fn concatenate(&mut self, other: &TimeSeriesData) -> DataResult<()> {
        for key in self.data.keys() {
            if !other.data.contains_key(key) {
                return Err(DataError::KeySetMismatch { key: key.clone() });
            }
        }
        if let Some(extra) = other.data.keys().find(|k| !self.data.contains_key(*k)) {
            return Err(DataError::KeySetMismatch { key: extra.clone() });
        }

        for (key, values) in self.data.iter_mut() {
            values.extend_from_slice(&other.data[key]);
        }
        self.time.extend_from_slice(&other.time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction validation against the shared time vector.
    // - Time projection, shifting, and concatenation bookkeeping.
    //
    // They intentionally DO NOT cover:
    // - Loading series into models (covered by the transfer module).
    // -------------------------------------------------------------------------

    fn make_series() -> TimeSeriesData {
        TimeSeriesData::new(
            [("u", vec![0.4, 0.5, 0.6]), ("x", vec![1.0, 1.1, 1.2])],
            vec![0.0, 2.0, 4.0],
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Ensure a series shorter than the time vector is rejected at
    // construction with the offending key and both lengths.
    fn construction_rejects_length_mismatch() {
        let err = TimeSeriesData::new([("u", vec![0.4, 0.5])], vec![0.0, 2.0, 4.0]).unwrap_err();

        assert_eq!(
            err,
            DataError::SeriesLengthMismatch { key: "u".to_string(), expected: 3, actual: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify projection onto a member time point and rejection of a foreign
    // one.
    fn projection_onto_a_time_point() {
        let series = make_series();

        let at_two = series.get_data_at_time(2.0).unwrap();
        assert_eq!(at_two.get_data_from_key("u").unwrap(), 0.5);
        assert_eq!(at_two.get_data_from_key("x").unwrap(), 1.1);

        assert_eq!(
            series.get_data_at_time(1.0).unwrap_err(),
            DataError::TimePointNotFound { time: 1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify shift-then-concatenate, the rolling-horizon bookkeeping the
    // driver performs each cycle.
    //
    // Given
    // -----
    // - Two copies of the same series; the second shifted by 6.0.
    //
    // Expect
    // ------
    // - Concatenation doubles every trajectory and extends the time vector
    //   with the shifted points.
    fn shift_then_concatenate_extends_the_horizon() {
        let mut head = make_series();
        let mut tail = make_series();
        tail.shift_time_points(6.0);

        head.concatenate(&tail).unwrap();

        assert_eq!(head.get_time_points(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(head.get_data_from_key("u").unwrap(), &[0.4, 0.5, 0.6, 0.4, 0.5, 0.6]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure concatenation demands identical key sets in both directions.
    fn concatenate_rejects_key_set_mismatch() {
        let mut head = make_series();
        let tail = TimeSeriesData::new([("u", vec![0.7])], vec![6.0]).unwrap();

        let err = head.concatenate(&tail).unwrap_err();

        assert_eq!(err, DataError::KeySetMismatch { key: "x".to_string() });
    }
}
