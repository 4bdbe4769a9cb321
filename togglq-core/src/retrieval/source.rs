//! Seam between the coordinator and whatever serves report pages.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::DetailedReportItem;

use super::options::ReportOptions;

/// One page of a paginated detailed report.
#[derive(Debug, Clone, Default)]
pub struct ReportPage {
    pub rows: Vec<DetailedReportItem>,
    /// Whether a later page exists.
    pub has_more: bool,
}

/// A provider of detailed report pages, usually a remote time-tracking API.
///
/// Pages are numbered from 1.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_page(&self, options: &ReportOptions, page: u32) -> Result<ReportPage>;
}
