//! Text and JSON rendering for query descriptors and reports.

use std::fmt::Write;

use serde_json::{json, Value};
use togglq_core::format::format_duration;
use togglq_core::query::{GroupBy, Query, QueryType, Selection};
use togglq_core::retrieval::Directory;
use togglq_core::{Dated, DetailedReportItem};

const NO_PROJECT: &str = "(no project)";
const NO_CLIENT: &str = "(no client)";

fn selection_line(selection: &Selection) -> String {
    let items: Vec<String> = selection.list.iter().map(|i| i.to_string()).collect();
    format!("{} {}", selection.mode, items.join(", "))
}

/// Field-by-field description of a parsed query.
pub fn describe_query(query: &Query) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Type:      {:?}", query.query_type);
    let _ = writeln!(out, "From:      {}", query.from);
    let _ = writeln!(out, "To:        {}", query.to);
    let _ = writeln!(out, "Days:      {}", query.span_days());
    if let Some(selection) = &query.project_selection {
        let _ = writeln!(out, "Projects:  {}", selection_line(selection));
    }
    if let Some(selection) = &query.client_selection {
        let _ = writeln!(out, "Clients:   {}", selection_line(selection));
    }
    if let Some(tags) = &query.included_tags {
        let _ = writeln!(out, "Tags:      INCLUDE {}", tags.join(", "));
    }
    if let Some(tags) = &query.excluded_tags {
        let _ = writeln!(out, "Tags:      EXCLUDE {}", tags.join(", "));
    }
    if let Some(sort) = query.sort {
        let _ = writeln!(out, "Sort:      {:?}", sort);
    }
    if let Some(group_by) = query.group_by {
        let _ = writeln!(out, "Group by:  {:?}", group_by);
    }
    if let Some(title) = &query.custom_title {
        let _ = writeln!(out, "Title:     {}", title);
    }
    let _ = writeln!(out, "Canonical: {}", query);
    out
}

fn title(query: &Query) -> String {
    query.custom_title.clone().unwrap_or_else(|| {
        let kind = match query.query_type {
            QueryType::Summary => "Summary",
            QueryType::List => "Time entries",
        };
        format!("{} {} to {}", kind, query.from, query.to)
    })
}

fn project_name<'d>(directory: &'d Directory, row: &DetailedReportItem) -> &'d str {
    row.project_id
        .and_then(|id| directory.project(id))
        .map_or(NO_PROJECT, |p| p.name.as_str())
}

fn client_name<'d>(directory: &'d Directory, row: &DetailedReportItem) -> &'d str {
    row.project_id
        .and_then(|id| directory.client_of_project(id))
        .and_then(|id| directory.client(id))
        .map_or(NO_CLIENT, |c| c.name.as_str())
}

/// Project totals, largest first.
fn project_totals<'d>(directory: &'d Directory, rows: &[DetailedReportItem]) -> Vec<(&'d str, i64)> {
    let mut totals: Vec<(&str, i64)> = Vec::new();
    for row in rows {
        let name = project_name(directory, row);
        match totals.iter_mut().find(|(n, _)| *n == name) {
            Some((_, seconds)) => *seconds += row.total_seconds(),
            None => totals.push((name, row.total_seconds())),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    totals
}

/// Rows grouped by the query's grouping, in order of first appearance.
fn groups<'r>(
    query: &Query,
    directory: &Directory,
    rows: &'r [DetailedReportItem],
) -> Vec<(String, Vec<&'r DetailedReportItem>)> {
    let Some(group_by) = query.group_by else {
        return vec![(String::new(), rows.iter().collect())];
    };

    let mut groups: Vec<(String, Vec<&DetailedReportItem>)> = Vec::new();
    for row in rows {
        let key = match group_by {
            GroupBy::Date => row.date().to_string(),
            GroupBy::Project => project_name(directory, row).to_string(),
            GroupBy::Client => client_name(directory, row).to_string(),
        };
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(row),
            None => groups.push((key, vec![row])),
        }
    }
    groups
}

/// Plain-text report.
pub fn render_report(query: &Query, rows: &[DetailedReportItem], directory: &Directory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title(query));
    let _ = writeln!(out);

    if rows.is_empty() {
        let _ = writeln!(out, "No time entries found.");
        return out;
    }

    match query.query_type {
        QueryType::Summary => {
            for (name, seconds) in project_totals(directory, rows) {
                let _ = writeln!(out, "{:>10}  {}", format_duration(seconds), name);
            }
        }
        QueryType::List => {
            for (key, members) in groups(query, directory, rows) {
                let indent = if key.is_empty() {
                    ""
                } else {
                    let seconds: i64 = members.iter().map(|r| r.total_seconds()).sum();
                    let _ = writeln!(out, "{}  ({})", key, format_duration(seconds));
                    "  "
                };
                for row in members {
                    let _ = writeln!(
                        out,
                        "{}{}  {:>9}  {}  {}",
                        indent,
                        row.date(),
                        format_duration(row.total_seconds()),
                        project_name(directory, row),
                        row.description
                    );
                }
            }
        }
    }

    let total: i64 = rows.iter().map(|r| r.total_seconds()).sum();
    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {}", format_duration(total));
    out
}

fn row_json(row: &DetailedReportItem, directory: &Directory) -> Value {
    json!({
        "date": row.date(),
        "project": project_name(directory, row),
        "description": row.description,
        "seconds": row.total_seconds(),
    })
}

/// JSON report.
pub fn report_json(query: &Query, rows: &[DetailedReportItem], directory: &Directory) -> Value {
    let total: i64 = rows.iter().map(|r| r.total_seconds()).sum();
    let mut value = json!({
        "title": title(query),
        "query": query.to_string(),
        "from": query.from,
        "to": query.to,
        "total_seconds": total,
    });

    match query.query_type {
        QueryType::Summary => {
            value["projects"] = project_totals(directory, rows)
                .into_iter()
                .map(|(name, seconds)| json!({ "project": name, "seconds": seconds }))
                .collect();
        }
        QueryType::List => {
            value["rows"] = rows.iter().map(|r| row_json(r, directory)).collect();
            if query.group_by.is_some() {
                value["groups"] = groups(query, directory, rows)
                    .into_iter()
                    .map(|(key, members)| {
                        json!({
                            "key": key,
                            "seconds": members.iter().map(|r| r.total_seconds()).sum::<i64>(),
                            "rows": members.iter().map(|r| row_json(r, directory)).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
            }
        }
    }
    value
}
