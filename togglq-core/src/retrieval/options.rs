//! Request options for the detailed report endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cache::DateRange;
use crate::error::Result;
use crate::query::{Query, SelectionMode};
use crate::types::{ClientId, ProjectId, TagId};

use super::directory::Directory;

/// Filters accepted by a report source.
///
/// Only inclusion can be expressed here; exclusions are applied to the
/// returned rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<ProjectId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<TagId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<ClientId>>,
}

impl ReportOptions {
    /// Unfiltered options for a date range.
    pub fn for_range(range: DateRange) -> Self {
        Self {
            start_date: range.from,
            end_date: range.to,
            project_ids: None,
            tag_ids: None,
            client_ids: None,
        }
    }

    /// Options for `query`, with selected names resolved to ids.
    pub fn from_query(query: &Query, directory: &Directory) -> Result<Self> {
        let project_ids = match &query.project_selection {
            Some(s) if s.mode == SelectionMode::Include => {
                Some(directory.resolve_projects(&s.list)?)
            }
            _ => None,
        };
        let client_ids = match &query.client_selection {
            Some(s) if s.mode == SelectionMode::Include => {
                Some(directory.resolve_clients(&s.list)?)
            }
            _ => None,
        };
        let tag_ids = query
            .included_tags
            .as_deref()
            .map(|tags| directory.resolve_tags(tags))
            .transpose()?;

        Ok(Self {
            start_date: query.from,
            end_date: query.to,
            project_ids,
            tag_ids,
            client_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_at;
    use crate::types::{Project, Tag};

    fn directory() -> Directory {
        Directory {
            projects: vec![Project {
                id: 10,
                name: "Website".into(),
                client_id: None,
            }],
            clients: Vec::new(),
            tags: vec![Tag {
                id: 5,
                name: "billed".into(),
            }],
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()
    }

    #[test]
    fn test_include_selections_become_ids() {
        let query = parse_at(
            "LIST PAST 3 DAYS INCLUDE PROJECTS 'website', 77 INCLUDE TAGS #billed",
            today(),
        )
        .unwrap();
        let options = ReportOptions::from_query(&query, &directory()).unwrap();

        assert_eq!(options.start_date, NaiveDate::from_ymd_opt(2020, 1, 29).unwrap());
        assert_eq!(options.end_date, today());
        assert_eq!(options.project_ids, Some(vec![10, 77]));
        assert_eq!(options.tag_ids, Some(vec![5]));
        assert_eq!(options.client_ids, None);
    }

    #[test]
    fn test_exclusions_are_not_sent() {
        let query = parse_at(
            "SUMMARY TODAY EXCLUDE PROJECTS 'Website' EXCLUDE TAGS #billed",
            today(),
        )
        .unwrap();
        let options = ReportOptions::from_query(&query, &directory()).unwrap();
        assert_eq!(options.project_ids, None);
        assert_eq!(options.tag_ids, None);

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["start_date"], "2020-01-31");
        assert!(json.get("project_ids").is_none());
    }

    #[test]
    fn test_unknown_included_client_fails() {
        let query = parse_at("SUMMARY TODAY INCLUDE CLIENTS 'Nobody'", today()).unwrap();
        assert!(ReportOptions::from_query(&query, &directory()).is_err());
    }
}
