//! Nearest-index lookups over sorted time vectors and interval lists.
//!
//! Both lookups binary-search a sorted slice and then compare at most two
//! neighboring candidates, so repeated queries over a fine time set stay
//! O(log n) each. An optional tolerance turns "nearest" into "nearest within
//! tolerance"; `None` accepts the nearest candidate at any distance.

use crate::model::types::TimePoint;

/// Index of the element of `array` nearest to `target`, or `None` when the
/// array is empty or the nearest element is farther than `tolerance`.
///
/// `array` must be sorted ascending. Ties between the two neighbors of
/// `target` resolve to the left element.
pub fn find_nearest_index(
    array: &[TimePoint],
    target: TimePoint,
    tolerance: Option<f64>,
) -> Option<usize> {
    if array.is_empty() {
        return None;
    }

    let right = array.partition_point(|&x| x < target);
    let candidates = match right {
        0 => [0, 0],
        r if r == array.len() => [array.len() - 1, array.len() - 1],
        r => [r - 1, r],
    };

    let mut best = candidates[0];
    let mut delta = (array[best] - target).abs();
    let other_delta = (array[candidates[1]] - target).abs();
    // Strict comparison keeps the left candidate on a tie.
    if other_delta < delta {
        best = candidates[1];
        delta = other_delta;
    }

    match tolerance {
        Some(tol) if delta > tol => None,
        _ => Some(best),
    }
}

/// Index of the interval containing `target` (within `tolerance` of its
/// endpoints), or `None` when no interval contains it.
///
/// `intervals` must be sorted and non-overlapping. When `target` lies on the
/// shared boundary of two intervals, `prefer_left` selects which one wins.
pub fn find_nearest_interval_index(
    intervals: &[(TimePoint, TimePoint)],
    target: TimePoint,
    tolerance: Option<f64>,
    prefer_left: bool,
) -> Option<usize> {
    if intervals.is_empty() {
        return None;
    }
    let tol = tolerance.unwrap_or(0.0);

    let pos = intervals.partition_point(|&(lo, _)| lo <= target);
    let contains = |i: usize| {
        let (lo, hi) = intervals[i];
        lo - tol <= target && target <= hi + tol
    };

    // At a shared boundary the target sits in two adjacent intervals, so
    // up to three candidates around the partition point are in play.
    let first = pos.saturating_sub(2);
    let last = (pos + 1).min(intervals.len());
    let mut containing = (first..last).filter(|&i| contains(i));

    let leftmost = containing.next()?;
    match containing.last() {
        Some(rightmost) if !prefer_left => Some(rightmost),
        _ => Some(leftmost),
    }
}
