//! Report caching: covered-range bookkeeping and the date-indexed row store.

mod interval;
mod report;

pub use interval::{Interval, IntervalCache};
pub use report::{CacheLookup, DateRange, Dated, ReportCache};
