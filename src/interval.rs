//! Time intervals and gap-threshold merging.
//!
//! The unit (seconds or milliseconds) is fixed per call site; the math here
//! is unit-agnostic.

use serde::{Deserialize, Serialize};

/// A half-open span of time. Invariant: `start <= end`; producers construct
/// intervals in order, and the merge below asserts it in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    /// Length of the interval in its own unit.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Merges consecutive intervals whose gap is at most `threshold`.
///
/// Input must be ordered by start. Single left-to-right pass: once two
/// intervals merge, the merged end is compared against subsequent
/// intervals — starts are non-decreasing, so earlier merges never need
/// re-examination. Empty input yields empty output.
pub fn merge_intervals(intervals: &[Interval], threshold: f64) -> Vec<Interval> {
    debug_assert!(threshold >= 0.0);

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for current in intervals {
        debug_assert!(current.start <= current.end);
        match merged.last_mut() {
            Some(last) if current.start - last.end <= threshold => {
                last.end = last.end.max(current.end);
            }
            _ => merged.push(*current),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: f64, end: f64) -> Interval {
        Interval { start, end }
    }

    #[test]
    fn test_merge_empty_input() {
        assert!(merge_intervals(&[], 1.0).is_empty());
    }

    #[test]
    fn test_merge_single_interval_unchanged() {
        let input = [iv(0.5, 1.5)];
        assert_eq!(merge_intervals(&input, 1.0), input);
    }

    #[test]
    fn test_merge_within_threshold() {
        let input = [iv(0.0, 1.0), iv(1.5, 2.0)];
        assert_eq!(merge_intervals(&input, 0.5), vec![iv(0.0, 2.0)]);
    }

    #[test]
    fn test_gap_beyond_threshold_keeps_intervals_apart() {
        let input = [iv(0.0, 1.0), iv(2.5, 3.0)];
        assert_eq!(merge_intervals(&input, 1.0), input);
    }

    #[test]
    fn test_merged_end_chains_into_next_interval() {
        // After the first merge, the merged end (2.0) is close enough to
        // swallow the third interval too.
        let input = [iv(0.0, 1.0), iv(1.2, 2.0), iv(2.3, 3.0)];
        assert_eq!(merge_intervals(&input, 0.5), vec![iv(0.0, 3.0)]);
    }

    #[test]
    fn test_contained_interval_does_not_shrink_span() {
        // Second interval ends before the first; merged end must not move back.
        let input = [iv(0.0, 3.0), iv(1.0, 2.0)];
        assert_eq!(merge_intervals(&input, 0.0), vec![iv(0.0, 3.0)]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let input = [iv(0.0, 1.0), iv(1.3, 2.0), iv(4.0, 5.0), iv(5.2, 6.0)];
        let once = merge_intervals(&input, 0.5);
        let twice = merge_intervals(&once, 0.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_result_count_never_exceeds_input_count() {
        let input = [iv(0.0, 1.0), iv(1.1, 2.0), iv(5.0, 6.0)];
        for threshold in [0.0, 0.05, 0.2, 10.0] {
            assert!(merge_intervals(&input, threshold).len() <= input.len());
        }
    }

    #[test]
    fn test_span_never_shorter_than_any_input() {
        let input = [iv(0.0, 2.0), iv(2.1, 2.5)];
        let merged = merge_intervals(&input, 0.5);
        for m in &merged {
            assert!(input.iter().all(|i| {
                // every input overlapping this merged interval is contained in it
                i.end < m.start || i.start > m.end || (i.start >= m.start && i.end <= m.end)
            }));
        }
    }

    #[test]
    fn test_zero_threshold_merges_only_touching() {
        let input = [iv(0.0, 1.0), iv(1.0, 2.0), iv(2.001, 3.0)];
        let merged = merge_intervals(&input, 0.0);
        assert_eq!(merged, vec![iv(0.0, 2.0), iv(2.001, 3.0)]);
    }
}
