//! Report data model
//!
//! Rows of a detailed report and the workspace objects they reference.
//! Field names follow the JSON shape of the report export.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cache::Dated;

pub type ProjectId = u64;
pub type ClientId = u64;
pub type TagId = u64;

// ============================================
// Detailed report
// ============================================

/// One recorded span of tracked time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: u64,
    pub seconds: i64,
    pub start: DateTime<FixedOffset>,
    pub stop: DateTime<FixedOffset>,
    /// Last modification time
    pub at: DateTime<FixedOffset>,
}

/// A detailed report row: one description/project/tags combination and
/// the time entries grouped under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReportItem {
    pub user_id: u64,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
    pub time_entries: Vec<TimeEntry>,
    #[serde(default)]
    pub row_number: u64,
}

impl DetailedReportItem {
    /// Calendar date of the first time entry, in the offset it was recorded with.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.time_entries.first().map(|e| e.start.date_naive())
    }

    /// Tracked seconds across all grouped entries.
    pub fn total_seconds(&self) -> i64 {
        self.time_entries.iter().map(|e| e.seconds).sum()
    }
}

impl Dated for DetailedReportItem {
    /// Rows without time entries date to [`NaiveDate::MIN`].
    fn date(&self) -> NaiveDate {
        self.start_date().unwrap_or(NaiveDate::MIN)
    }
}

// ============================================
// Workspace objects
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub client_id: Option<ClientId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}
