//! Report exports on disk, served as a paginated [`ReportSource`].

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::DetailedReportItem;

use super::directory::Directory;
use super::options::ReportOptions;
use super::source::{ReportPage, ReportSource};

const DEFAULT_PAGE_SIZE: usize = 50;

/// A workspace directory plus detailed report rows, as exported to JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportExport {
    #[serde(default)]
    pub directory: Directory,
    #[serde(default)]
    pub rows: Vec<DetailedReportItem>,
}

impl ReportExport {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let export = serde_json::from_str(&content)?;
        Ok(export)
    }
}

/// Serves exported rows page by page, honoring the request's date range
/// and inclusion filters.
pub struct ExportSource {
    rows: Vec<DetailedReportItem>,
    directory: Directory,
    page_size: usize,
}

impl ExportSource {
    pub fn new(export: ReportExport) -> Self {
        Self {
            rows: export.rows,
            directory: export.directory,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn selected(&self, row: &DetailedReportItem, options: &ReportOptions) -> bool {
        let Some(date) = row.start_date() else {
            return false;
        };
        if date < options.start_date || date > options.end_date {
            return false;
        }
        if let Some(ids) = &options.project_ids {
            if !row.project_id.map_or(false, |id| ids.contains(&id)) {
                return false;
            }
        }
        if let Some(ids) = &options.client_ids {
            let client = row
                .project_id
                .and_then(|id| self.directory.client_of_project(id));
            if !client.map_or(false, |id| ids.contains(&id)) {
                return false;
            }
        }
        if let Some(ids) = &options.tag_ids {
            if !row.tag_ids.iter().any(|t| ids.contains(t)) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ReportSource for ExportSource {
    async fn fetch_page(&self, options: &ReportOptions, page: u32) -> Result<ReportPage> {
        let skip = (page.max(1) as usize - 1) * self.page_size;
        let mut matching = self.rows.iter().filter(|row| self.selected(row, options));

        let rows: Vec<_> = matching
            .by_ref()
            .skip(skip)
            .take(self.page_size)
            .cloned()
            .collect();
        let has_more = matching.next().is_some();

        Ok(ReportPage { rows, has_more })
    }
}
