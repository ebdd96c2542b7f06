//! CSV export of displayed keyword records.
//!
//! Absent numbers are written as `0` and absent labels as `N/A`, so every
//! cell parses as its column's type.

use chrono::NaiveDate;
use devseo_core::{KeywordRecord, QueryKind};

use crate::render::{columns, NOT_AVAILABLE};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// `keywords-2025-03-09.csv` and friends.
#[must_use]
pub fn export_file_name(kind: QueryKind, date: NaiveDate) -> String {
    let prefix = match kind {
        QueryKind::Related => "keywords",
        QueryKind::Suggestions => "keyword-suggestions",
        QueryKind::Ideas => "keyword-ideas",
    };
    format!("{prefix}-{}.csv", date.format("%Y-%m-%d"))
}

/// Header row plus one line per record, joined with `\n`.
#[must_use]
pub fn export_csv(kind: QueryKind, records: &[KeywordRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(columns(kind).join(","));
    lines.extend(records.iter().map(|record| export_row(kind, record)));
    lines.join("\n")
}

fn export_row(kind: QueryKind, record: &KeywordRecord) -> String {
    let extra = match kind {
        QueryKind::Related => record.serp_results_count.unwrap_or(0),
        QueryKind::Suggestions | QueryKind::Ideas => {
            record.backlinks.map_or(0, |b| b.backlinks)
        }
    };

    [
        quote(&record.keyword),
        record.search_volume.unwrap_or(0).to_string(),
        record.difficulty.unwrap_or(0).to_string(),
        record
            .cost_per_click
            .map_or_else(|| "0".to_string(), |c| c.normalize().to_string()),
        text_field(record.competition_level.as_ref().map(|c| c.as_str())),
        text_field(record.search_intent.as_ref().map(|i| i.as_str())),
        extra.to_string(),
    ]
    .join(",")
}

/// Always quoted; embedded quotes are doubled.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quoted only when the value could break the row.
fn text_field(value: Option<&str>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) if v.contains([',', '"', '\n', '\r']) => quote(v),
        Some(v) => v.to_string(),
    }
}
