//! Sample-point partitioning: mapping fine time points to sample points.
//!
//! Purpose
//! -------
//! A sample-point set partitions a fine time set into coarse intervals: each
//! fine time point belongs to the nearest sample point at or after it, with
//! a point that *is* a sample point mapping to itself. Measurements and
//! disturbances are indexed by sample point while model constraints are
//! indexed by fine time, so this lookup is the glue between the two
//! resolutions.
//!
//! Key behaviors
//! -------------
//! - [`curr_sample_point`] returns the smallest sample point `>= t`.
//! - [`curr_sample_point_index`] returns its position instead, which the
//!   component blocks use to index their slot tables.
//! - Both are binary searches, so repeated lookups across a full fine time
//!   set stay O(log n) each.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sample-point set is sorted ascending.
//! - An empty set, or a query beyond the last sample point, is an error —
//!   never a clamp, never a silently wrong answer.

use crate::estimation::errors::{EstimationError, EstimationResult};
use crate::model::types::TimePoint;

/// The smallest sample point at or after `t`.
///
/// A `t` equal to a sample point maps to itself. Fails on an empty set and
/// on `t` beyond the last sample point.
pub fn curr_sample_point(
    t: TimePoint,
    sample_points: &[TimePoint],
) -> EstimationResult<TimePoint> {
    curr_sample_point_index(t, sample_points).map(|idx| sample_points[idx])
}

/// Position of the smallest sample point at or after `t`.
pub fn curr_sample_point_index(
    t: TimePoint,
    sample_points: &[TimePoint],
) -> EstimationResult<usize> {
    let last = match sample_points.last() {
        Some(&last) => last,
        None => return Err(EstimationError::EmptySamplePoints),
    };

    let idx = sample_points.partition_point(|&sp| sp < t);
    if idx == sample_points.len() {
        return Err(EstimationError::TimeBeyondLastSamplePoint { time: t, last });
    }
    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The sample-point law over [0, 2, 4]: members map to themselves,
    //   interior points map to the next sample point.
    // - The two failure modes: empty set and beyond-the-last queries.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the nearest-ceiling law on the reference sample-point set.
    //
    // Given
    // -----
    // - Sample points `[0, 2, 4]`.
    //
    // Expect
    // ------
    // - `0 -> 0`, `1.5 -> 2`, `2 -> 2`, `2.5 -> 4`, `3.9 -> 4`, `4 -> 4`.
    fn nearest_ceiling_law() {
        let sample_points = [0.0, 2.0, 4.0];

        assert_eq!(curr_sample_point(0.0, &sample_points).unwrap(), 0.0);
        assert_eq!(curr_sample_point(1.5, &sample_points).unwrap(), 2.0);
        assert_eq!(curr_sample_point(2.0, &sample_points).unwrap(), 2.0);
        assert_eq!(curr_sample_point(2.5, &sample_points).unwrap(), 4.0);
        assert_eq!(curr_sample_point(3.9, &sample_points).unwrap(), 4.0);
        assert_eq!(curr_sample_point(4.0, &sample_points).unwrap(), 4.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a query beyond the last sample point fails instead of
    // clamping.
    fn beyond_last_sample_point_is_an_error() {
        let err = curr_sample_point(4.1, &[0.0, 2.0, 4.0]).unwrap_err();

        assert_eq!(err, EstimationError::TimeBeyondLastSamplePoint { time: 4.1, last: 4.0 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty sample-point set is its own error.
    fn empty_sample_points_is_an_error() {
        assert_eq!(curr_sample_point(0.0, &[]).unwrap_err(), EstimationError::EmptySamplePoints);
    }
}
