//! Detailed report retrieval through the cache and request queue.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{CacheLookup, DateRange, ReportCache};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::query::{Query, SelectionMode, SortOrder};
use crate::types::DetailedReportItem;

use super::directory::Directory;
use super::options::ReportOptions;
use super::queue::RequestQueue;
use super::source::ReportSource;

const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Answers report queries from the cache, fetching only what is missing.
///
/// The cache holds unfiltered rows so that any query over a covered range
/// can be answered locally; selections are applied after retrieval.
pub struct ReportCoordinator<S> {
    source: Arc<S>,
    directory: Directory,
    queue: RequestQueue,
    cache: Mutex<ReportCache<DetailedReportItem>>,
    /// Held while missing ranges are fetched and stored.
    fetching: Mutex<()>,
    page_limit: u32,
}

impl<S: ReportSource + 'static> ReportCoordinator<S> {
    /// Must be called inside a Tokio runtime (the queue spawns its worker).
    pub fn new(source: S, directory: Directory, queue: RequestQueue) -> Self {
        Self {
            source: Arc::new(source),
            directory,
            queue,
            cache: Mutex::new(ReportCache::new()),
            fetching: Mutex::new(()),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Coordinator with queue spacing and page limit taken from `config`.
    pub fn from_config(source: S, directory: Directory, config: &Config) -> Self {
        Self::new(
            source,
            directory,
            RequestQueue::with_spacing(config.queue.spacing()),
        )
        .with_page_limit(config.report.page_limit)
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Rows matching `query`, fetching uncovered date ranges first.
    pub async fn detailed_report(&self, query: &Query) -> Result<Vec<DetailedReportItem>> {
        let filter = RowFilter::new(query, &self.directory)?;

        if !self.cache.lock().await.missing(query.from, query.to).is_empty() {
            let _fetching = self.fetching.lock().await;
            // Recheck: a concurrent call may have filled part of the range
            // while this one waited.
            let missing = self.cache.lock().await.missing(query.from, query.to);
            for range in missing {
                let rows = self.fetch_range(range).await?;
                self.cache.lock().await.put(range.from, range.to, rows);
            }
        }

        let rows = self.cache.lock().await.get(query.from, query.to).rows;
        Ok(filter.apply(rows, query.sort))
    }

    /// Whatever the cache already holds for `query`, without fetching.
    pub async fn cached(&self, query: &Query) -> Result<CacheLookup<DetailedReportItem>> {
        let filter = RowFilter::new(query, &self.directory)?;
        let lookup = self.cache.lock().await.get(query.from, query.to);
        Ok(CacheLookup {
            rows: filter.apply(lookup.rows, query.sort),
            missing: lookup.missing,
        })
    }

    /// Fetch every page of an unfiltered report for `range`.
    async fn fetch_range(&self, range: DateRange) -> Result<Vec<DetailedReportItem>> {
        let options = ReportOptions::for_range(range);
        let mut rows = Vec::new();

        for page in 1..=self.page_limit {
            let source = Arc::clone(&self.source);
            let page_options = options.clone();
            let fetched = self
                .queue
                .enqueue(move || async move { source.fetch_page(&page_options, page).await })
                .await?;

            tracing::debug!(
                from = %range.from,
                to = %range.to,
                page,
                rows = fetched.rows.len(),
                "Fetched report page"
            );
            rows.extend(fetched.rows);
            if !fetched.has_more {
                return Ok(rows);
            }
        }

        Err(Error::Fetch(format!(
            "report for {} to {} has more than {} pages",
            range.from, range.to, self.page_limit
        )))
    }
}

/// Id membership test for one selection.
enum Membership {
    Include(Vec<u64>),
    Exclude(Vec<u64>),
}

impl Membership {
    fn admits(&self, id: Option<u64>) -> bool {
        match self {
            Membership::Include(ids) => id.map_or(false, |id| ids.contains(&id)),
            Membership::Exclude(ids) => id.map_or(true, |id| !ids.contains(&id)),
        }
    }
}

/// A query's selections with every name resolved to an id.
struct RowFilter<'d> {
    directory: &'d Directory,
    projects: Option<Membership>,
    clients: Option<Membership>,
    included_tags: Option<Vec<u64>>,
    excluded_tags: Option<Vec<u64>>,
}

impl<'d> RowFilter<'d> {
    fn new(query: &Query, directory: &'d Directory) -> Result<Self> {
        let options = ReportOptions::from_query(query, directory)?;

        let projects = match &query.project_selection {
            Some(s) if s.mode == SelectionMode::Exclude => {
                Some(Membership::Exclude(directory.resolve_projects(&s.list)?))
            }
            _ => options.project_ids.map(Membership::Include),
        };
        let clients = match &query.client_selection {
            Some(s) if s.mode == SelectionMode::Exclude => {
                Some(Membership::Exclude(directory.resolve_clients(&s.list)?))
            }
            _ => options.client_ids.map(Membership::Include),
        };
        let excluded_tags = query
            .excluded_tags
            .as_deref()
            .map(|tags| directory.resolve_tags(tags))
            .transpose()?;

        Ok(Self {
            directory,
            projects,
            clients,
            included_tags: options.tag_ids,
            excluded_tags,
        })
    }

    fn matches(&self, row: &DetailedReportItem) -> bool {
        if let Some(projects) = &self.projects {
            if !projects.admits(row.project_id) {
                return false;
            }
        }
        if let Some(clients) = &self.clients {
            let client = row
                .project_id
                .and_then(|id| self.directory.client_of_project(id));
            if !clients.admits(client) {
                return false;
            }
        }
        if let Some(tags) = &self.included_tags {
            if !row.tag_ids.iter().any(|t| tags.contains(t)) {
                return false;
            }
        }
        if let Some(tags) = &self.excluded_tags {
            if row.tag_ids.iter().any(|t| tags.contains(t)) {
                return false;
            }
        }
        true
    }

    fn apply(&self, rows: Vec<DetailedReportItem>, sort: Option<SortOrder>) -> Vec<DetailedReportItem> {
        let mut rows: Vec<_> = rows.into_iter().filter(|row| self.matches(row)).collect();
        rows.sort_by_key(|row| row.time_entries.first().map(|e| e.start));
        if sort == Some(SortOrder::Desc) {
            rows.reverse();
        }
        rows
    }
}
