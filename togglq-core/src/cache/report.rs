//! Date-indexed store of report rows with covered-range tracking.
//!
//! The cache never performs I/O. Callers ask it which date ranges are still
//! missing, fetch those elsewhere and hand the complete rows back via
//! [`ReportCache::put`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::interval::{Interval, IntervalCache};

/// A row that belongs to a single calendar day.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    fn to_interval(self) -> Interval {
        Interval::new(day_number(self.from), day_number(self.to))
    }

    fn from_interval(interval: Interval) -> Option<Self> {
        Some(Self {
            from: from_day_number(interval.start)?,
            to: from_day_number(interval.end)?,
        })
    }
}

/// Result of [`ReportCache::get`].
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup<T> {
    /// Stored rows dated inside the requested range, in date order.
    pub rows: Vec<T>,
    /// Sub-ranges that still need to be fetched, ascending.
    pub missing: Vec<DateRange>,
}

impl<T> CacheLookup<T> {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

fn from_day_number(day: i64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(day).ok()?)
}

/// In-memory report cache.
///
/// Not synchronized; an owner shared between tasks must serialize access.
#[derive(Debug, Clone)]
pub struct ReportCache<T> {
    rows: BTreeMap<i64, Vec<T>>,
    coverage: IntervalCache,
}

impl<T> Default for ReportCache<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            coverage: IntervalCache::new(),
        }
    }
}

impl<T: Dated + Clone> ReportCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sub-ranges of `[from, to]` not yet covered, without reading rows.
    pub fn missing(&self, from: NaiveDate, to: NaiveDate) -> Vec<DateRange> {
        self.coverage
            .check(DateRange::new(from, to).to_interval())
            .into_iter()
            .filter_map(DateRange::from_interval)
            .collect()
    }

    /// Rows stored for `[from, to]` and the sub-ranges not yet covered.
    pub fn get(&self, from: NaiveDate, to: NaiveDate) -> CacheLookup<T> {
        let requested = DateRange::new(from, to).to_interval();
        let missing = self.missing(from, to);

        let rows: Vec<T> = if requested.is_empty() {
            Vec::new()
        } else {
            self.rows
                .range(requested.start..=requested.end)
                .flat_map(|(_, day)| day.iter().cloned())
                .collect()
        };

        tracing::debug!(
            %from,
            %to,
            hits = rows.len(),
            missing = missing.len(),
            "Report cache lookup"
        );
        CacheLookup { rows, missing }
    }

    /// Store the complete set of rows for `[from, to]` and mark it covered.
    ///
    /// Rows already stored for days in the range are replaced. Rows dated
    /// outside the range are dropped.
    pub fn put(&mut self, from: NaiveDate, to: NaiveDate, rows: Vec<T>) {
        let range = DateRange::new(from, to).to_interval();
        if range.is_empty() {
            tracing::warn!(%from, %to, "Ignoring report cache put with inverted range");
            return;
        }

        if self.coverage.check(range) != [range] {
            tracing::warn!(
                %from,
                %to,
                "Report cache put overlaps covered range; replacing stored rows"
            );
        }

        let stale: Vec<i64> = self
            .rows
            .range(range.start..=range.end)
            .map(|(day, _)| *day)
            .collect();
        for day in stale {
            self.rows.remove(&day);
        }

        let mut dropped = 0usize;
        for row in rows {
            let day = day_number(row.date());
            if day < range.start || day > range.end {
                dropped += 1;
                continue;
            }
            self.rows.entry(day).or_default().push(row);
        }
        if dropped > 0 {
            tracing::warn!(%from, %to, dropped, "Dropped rows dated outside the stored range");
        }

        self.coverage.insert(range);
    }

    /// Ranges for which the cache holds complete data.
    pub fn covered(&self) -> Vec<DateRange> {
        self.coverage
            .intervals()
            .iter()
            .copied()
            .filter_map(DateRange::from_interval)
            .collect()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
