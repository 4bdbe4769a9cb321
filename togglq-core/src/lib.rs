//! # togglq-core
//!
//! Core library for togglq - a report query language and caching report
//! retrieval for time-tracking data.
//!
//! This library provides:
//! - The query language: tokenizer, clause parsers and the [`Query`] descriptor
//! - An interval cache and a date-indexed report cache
//! - A serialized request queue and a coordinator that fetches only missing ranges
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use togglq_core::query::{parse_at, QueryType};
//!
//! let today = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
//! let query = parse_at("LIST PAST 10 DAYS SORT DESC", today).expect("valid query");
//!
//! assert_eq!(query.query_type, QueryType::List);
//! assert_eq!(query.to_string(), "LIST FROM 2020-01-22 TO 2020-01-31 SORT DESC");
//! ```

// Re-export commonly used items at the crate root
pub use cache::{Dated, ReportCache};
pub use config::Config;
pub use error::{Error, Result};
pub use query::{parse, parse_at, ParseError, Query};
pub use retrieval::{Directory, ReportCoordinator, ReportSource, RequestQueue};
pub use types::*;

// Public modules
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod query;
pub mod retrieval;
pub mod types;
