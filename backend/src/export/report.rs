//! Converts a tabular [`Report`] into the shared render model.

use super::model::{Align, Block, Cell, RenderModel, SummaryLine, Table, TableColumn};
use crate::templating::FormatOptions;
use chrono::{DateTime, NaiveDate};
use common::model::report::{ColumnKind, Report};
use log::warn;
use serde_json::Value;

impl RenderModel {
    /// Header, summary and table sections, in that order.
    pub fn from_report(report: &Report, options: &FormatOptions) -> Self {
        let mut blocks = Vec::new();

        if !report.summary.is_empty() {
            let lines = report
                .summary
                .iter()
                .map(|item| SummaryLine {
                    label: item.label.clone(),
                    value: format_cell(&item.value, item.kind, options).text,
                })
                .collect();
            blocks.push(Block::Summary(lines));
            blocks.push(Block::Spacer);
        }

        if !report.columns.is_empty() {
            let columns = report
                .columns
                .iter()
                .map(|column| TableColumn {
                    header: column.header.clone(),
                    width: column.width.max(1),
                    align: match column.kind {
                        ColumnKind::Number | ColumnKind::Currency => Align::Right,
                        _ => Align::Left,
                    },
                })
                .collect();
            let rows = report
                .rows
                .iter()
                .map(|row| {
                    report
                        .columns
                        .iter()
                        .map(|column| match row.get(&column.key) {
                            Some(value) => format_cell(value, column.kind, options),
                            None => Cell::text(""),
                        })
                        .collect()
                })
                .collect();
            blocks.push(Block::Table(Table { columns, rows }));
        }

        Self {
            title: report.title.clone(),
            subtitle: report.subtitle.clone(),
            blocks,
        }
    }
}

/// Formats one report value. Values that do not fit their column kind are
/// printed as they are.
pub fn format_cell(value: &Value, kind: ColumnKind, options: &FormatOptions) -> Cell {
    match kind {
        ColumnKind::Number | ColumnKind::Currency => match as_number(value) {
            Some(n) => Cell {
                text: if kind == ColumnKind::Currency {
                    options.format_currency(n)
                } else {
                    options.format_number(n)
                },
                number: Some(n),
            },
            None => Cell::text(scalar_text(value)),
        },
        ColumnKind::Date => match value.as_str().and_then(parse_date) {
            Some(date) => Cell::text(options.format_date(date)),
            None => Cell::text(scalar_text(value)),
        },
        ColumnKind::Json => Cell::text(json_field_text(value)),
        ColumnKind::Text => Cell::text(scalar_text(value)),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders a field that is expected to hold serialized JSON, such as a
/// payment `concepto` list. Invalid JSON falls back to the raw string.
pub fn json_field_text(value: &Value) -> String {
    match value {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => flatten(&parsed),
            Err(err) => {
                warn!("Field is not valid JSON ({}), rendering raw text", err);
                raw.clone()
            }
        },
        other => flatten(other),
    }
}

fn flatten(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(flatten)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(map) => map
            .iter()
            .map(|(key, v)| format!("{}: {}", key, flatten(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other),
    }
}
