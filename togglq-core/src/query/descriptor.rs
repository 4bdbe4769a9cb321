//! The query descriptor: the structured result of parsing a report query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ParseError;

/// Report type requested by the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryType {
    Summary,
    List,
}

/// Whether a selection keeps or drops the listed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelectionMode {
    Include,
    Exclude,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Include => f.write_str("INCLUDE"),
            SelectionMode::Exclude => f.write_str("EXCLUDE"),
        }
    }
}

/// A project or client referenced by name or by numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionItem {
    Id(u64),
    Name(String),
}

impl fmt::Display for SelectionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionItem::Id(id) => write!(f, "{}", id),
            SelectionItem::Name(name) => f.write_str(name),
        }
    }
}

/// An include/exclude filter over projects or clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: SelectionMode,
    pub list: Vec<SelectionItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupBy {
    Project,
    Client,
    Date,
}

/// A validated report query.
///
/// Invariants (checked by [`QueryDraft::finish`], which deserialization
/// also goes through):
/// - `from <= to` and the inclusive span is at most [`MAX_INTERVAL_DAYS`]
/// - `group_by` is only set on [`QueryType::List`] queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QueryDraft")]
pub struct Query {
    #[serde(rename = "type")]
    pub query_type: QueryType,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_selection: Option<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_selection: Option<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

/// Longest accepted report window, in days, counting both ends.
pub const MAX_INTERVAL_DAYS: i64 = 366;

impl Query {
    /// Number of days covered, counting both `from` and `to`.
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

/// Reject windows that end before they start or exceed [`MAX_INTERVAL_DAYS`].
pub fn check_interval(from: NaiveDate, to: NaiveDate) -> Result<(), ParseError> {
    if to < from {
        return Err(ParseError::InvalidInterval {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let days = (to - from).num_days() + 1;
    if days > MAX_INTERVAL_DAYS {
        return Err(ParseError::IntervalTooLarge {
            days,
            max: MAX_INTERVAL_DAYS,
        });
    }
    Ok(())
}

impl TryFrom<QueryDraft> for Query {
    type Error = ParseError;

    fn try_from(draft: QueryDraft) -> Result<Self, Self::Error> {
        draft.finish()
    }
}

/// A query under construction.
///
/// Clause parsers write into the draft as they consume tokens; a draft is
/// discarded on the first error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryDraft {
    #[serde(rename = "type")]
    pub query_type: Option<QueryType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub project_selection: Option<Selection>,
    pub client_selection: Option<Selection>,
    pub included_tags: Option<Vec<String>>,
    pub excluded_tags: Option<Vec<String>>,
    pub sort: Option<SortOrder>,
    pub group_by: Option<GroupBy>,
    pub custom_title: Option<String>,
}

impl QueryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert into a [`Query`], requiring a type and a valid interval.
    pub fn finish(self) -> Result<Query, ParseError> {
        let (query_type, from, to) = match (self.query_type, self.from, self.to) {
            (Some(query_type), Some(from), Some(to)) => (query_type, from, to),
            (None, _, _) => {
                return Err(ParseError::InvalidToken {
                    token: "end of query".to_string(),
                    accepted: vec!["SUMMARY".to_string(), "LIST".to_string()],
                })
            }
            _ => return Err(ParseError::NoTimeInterval),
        };
        check_interval(from, to)?;
        if self.group_by.is_some() && query_type != QueryType::List {
            return Err(ParseError::GroupByRequiresList);
        }

        Ok(Query {
            query_type,
            from,
            to,
            project_selection: self.project_selection,
            client_selection: self.client_selection,
            included_tags: self.included_tags,
            excluded_tags: self.excluded_tags,
            sort: self.sort,
            group_by: self.group_by,
            custom_title: self.custom_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_finish_requires_interval() {
        let draft = QueryDraft {
            query_type: Some(QueryType::Summary),
            ..Default::default()
        };
        assert_eq!(draft.finish(), Err(ParseError::NoTimeInterval));
    }

    #[test]
    fn test_serializes_descriptor_shape() {
        let query = QueryDraft {
            query_type: Some(QueryType::List),
            from: Some(date("2020-01-22")),
            to: Some(date("2020-01-31")),
            project_selection: Some(Selection {
                mode: SelectionMode::Include,
                list: vec![SelectionItem::Name("project A".into()), SelectionItem::Id(123)],
            }),
            group_by: Some(GroupBy::Date),
            ..Default::default()
        }
        .finish()
        .unwrap();

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["type"], "LIST");
        assert_eq!(json["from"], "2020-01-22");
        assert_eq!(json["project_selection"]["mode"], "INCLUDE");
        assert_eq!(json["project_selection"]["list"][1], 123);
        assert_eq!(json["group_by"], "DATE");
        assert!(json.get("sort").is_none());
        assert_eq!(query.span_days(), 10);
    }

    #[test]
    fn test_finish_checks_interval_and_grouping() {
        let draft = QueryDraft {
            query_type: Some(QueryType::Summary),
            from: Some(date("2020-02-01")),
            to: Some(date("2020-01-01")),
            ..Default::default()
        };
        assert!(matches!(
            draft.finish(),
            Err(ParseError::InvalidInterval { .. })
        ));

        let draft = QueryDraft {
            query_type: Some(QueryType::Summary),
            from: Some(date("2020-01-01")),
            to: Some(date("2020-01-31")),
            group_by: Some(GroupBy::Date),
            ..Default::default()
        };
        assert_eq!(draft.finish(), Err(ParseError::GroupByRequiresList));
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let query: Query = serde_json::from_str(
            r#"{"type": "LIST", "from": "2020-01-01", "to": "2020-01-31", "group_by": "CLIENT"}"#,
        )
        .unwrap();
        assert_eq!(query.group_by, Some(GroupBy::Client));
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(serde_json::from_value::<Query>(json).unwrap(), query);

        let too_long = serde_json::from_str::<Query>(
            r#"{"type": "SUMMARY", "from": "2019-01-01", "to": "2020-12-31"}"#,
        );
        let err = too_long.unwrap_err().to_string();
        assert!(err.contains("at most 366 days"), "{err}");

        let grouped_summary = serde_json::from_str::<Query>(
            r#"{"type": "SUMMARY", "from": "2020-01-01", "to": "2020-01-02", "group_by": "DATE"}"#,
        );
        assert!(grouped_summary.is_err());
    }
}
