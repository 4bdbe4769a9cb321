//! Covered-range bookkeeping over closed integer intervals.
//!
//! The set is a sorted `Vec`; it never grows large enough to need a tree.

use serde::{Deserialize, Serialize};

/// Closed range `[start, end]`; both ends are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// An interval whose end precedes its start covers nothing.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The parts of `self` not covered by `other`, in ascending order.
    pub fn difference(&self, other: &Interval) -> Vec<Interval> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let mut parts = Vec::with_capacity(2);
        if other.start > self.start {
            parts.push(Interval::new(self.start, other.start - 1));
        }
        if other.end < self.end {
            parts.push(Interval::new(other.end + 1, self.end));
        }
        parts
    }

    fn merge(&self, other: &Interval) -> Interval {
        Interval::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Sorted set of pairwise non-overlapping intervals.
///
/// Overlapping inserts coalesce. Adjacent intervals such as `[0, 2]` and
/// `[3, 5]` are kept as separate entries; together they still cover `[0, 5]`.
#[derive(Debug, Clone, Default)]
pub struct IntervalCache {
    intervals: Vec<Interval>,
}

impl IntervalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `interval` as covered, merging it with any overlapping entries.
    pub fn insert(&mut self, interval: Interval) {
        if interval.is_empty() {
            return;
        }

        for i in 0..self.intervals.len() {
            let current = self.intervals[i];
            if interval.end < current.start {
                self.intervals.insert(i, interval);
                return;
            }
            if interval.overlaps(&current) {
                self.intervals.remove(i);
                self.insert(interval.merge(&current));
                return;
            }
        }
        self.intervals.push(interval);
    }

    /// Sub-ranges of `interval` that are not covered, in ascending order.
    ///
    /// Empty when `interval` is fully covered.
    pub fn check(&self, interval: Interval) -> Vec<Interval> {
        if interval.is_empty() {
            return Vec::new();
        }

        let mut missing = vec![interval];
        for current in &self.intervals {
            // Entries are sorted, so only the last remainder can still meet
            // `current` or anything after it.
            let Some(remaining) = missing.pop() else {
                break;
            };
            let parts = remaining.difference(current);
            if parts.is_empty() {
                break;
            }
            missing.extend(parts);
        }
        missing
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
