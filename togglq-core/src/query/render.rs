//! Canonical query text.
//!
//! A rendered query parses back into an equal [`Query`] as long as no name
//! contains both quote characters.

use std::fmt;

use super::descriptor::{GroupBy, Query, QueryType, Selection, SelectionItem, SortOrder};

fn quote(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let q = if text.contains('"') && !text.contains('\'') {
        '\''
    } else {
        '"'
    };
    write!(f, "{q}{text}{q}")
}

fn write_selection(f: &mut fmt::Formatter<'_>, qualifier: &str, selection: &Selection) -> fmt::Result {
    write!(f, " {} {}", selection.mode, qualifier)?;
    for (i, item) in selection.list.iter().enumerate() {
        f.write_str(if i == 0 { " " } else { ", " })?;
        match item {
            SelectionItem::Id(id) => write!(f, "{id}")?,
            SelectionItem::Name(name) => quote(f, name)?,
        }
    }
    Ok(())
}

fn write_tags(f: &mut fmt::Formatter<'_>, mode: &str, tags: &[String]) -> fmt::Result {
    write!(f, " {mode} TAGS")?;
    for (i, tag) in tags.iter().enumerate() {
        f.write_str(if i == 0 { " " } else { ", " })?;
        let bare = !tag.is_empty()
            && !tag
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, ',' | '"' | '\'' | '#'));
        if bare {
            write!(f, "#{tag}")?;
        } else {
            quote(f, tag)?;
        }
    }
    Ok(())
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.query_type {
            QueryType::Summary => "SUMMARY",
            QueryType::List => "LIST",
        };
        write!(
            f,
            "{} FROM {} TO {}",
            kind,
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )?;

        if let Some(selection) = &self.project_selection {
            write_selection(f, "PROJECTS", selection)?;
        }
        if let Some(selection) = &self.client_selection {
            write_selection(f, "CLIENTS", selection)?;
        }
        if let Some(tags) = &self.included_tags {
            write_tags(f, "INCLUDE", tags)?;
        }
        if let Some(tags) = &self.excluded_tags {
            write_tags(f, "EXCLUDE", tags)?;
        }
        if let Some(sort) = self.sort {
            f.write_str(match sort {
                SortOrder::Asc => " SORT ASC",
                SortOrder::Desc => " SORT DESC",
            })?;
        }
        if let Some(group_by) = self.group_by {
            f.write_str(match group_by {
                GroupBy::Date => " GROUP BY DATE",
                GroupBy::Project => " GROUP BY PROJECT",
                GroupBy::Client => " GROUP BY CLIENT",
            })?;
        }
        if let Some(title) = &self.custom_title {
            f.write_str(" TITLE ")?;
            quote(f, title)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::query::parse_at;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()
    }

    #[test]
    fn test_renders_canonical_form() {
        let query = parse_at(
            "list past 10 days include projects 'project A', 1234 \
             exclude tags #meetings, 'Deep Work' sort desc group by date title \"Q1\"",
            today(),
        )
        .unwrap();

        assert_eq!(
            query.to_string(),
            "LIST FROM 2020-01-22 TO 2020-01-31 INCLUDE PROJECTS \"project A\", 1234 \
             EXCLUDE TAGS #meetings, \"deep work\" SORT DESC GROUP BY DATE TITLE \"Q1\""
        );
    }

    #[test]
    fn test_rendered_query_parses_back() {
        let inputs = [
            "SUMMARY WEEK",
            "SUMMARY MONTH EXCLUDE CLIENTS \"client's corp\" INCLUDE TAGS #billed",
            "LIST FROM 2019-12-01 TO 2020-01-15 TITLE 'a \"quoted\" title' SORT ASC",
            "LIST TODAY INCLUDE PROJECTS 2020-01-01, 'sort', 7 GROUP BY CLIENT",
        ];
        for input in inputs {
            let query = parse_at(input, today()).unwrap();
            let reparsed = parse_at(&query.to_string(), today()).unwrap();
            assert_eq!(reparsed, query, "round trip of {input}");
        }
    }
}
