//! Tabular report input for the export adapters (payment listings,
//! fee statements and similar record sets).

use serde::{Deserialize, Serialize};

/// Rendering rule for a report column or summary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Currency,
    Date,
    /// Field holding serialized JSON, e.g. a `concepto` breakdown.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportColumn {
    /// Key looked up in every row.
    pub key: String,
    pub header: String,
    /// Relative width; columns share the page width proportionally.
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default)]
    pub kind: ColumnKind,
}

fn default_width() -> u16 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub title: String,
    pub subtitle: Option<String>,
    pub summary: Vec<SummaryItem>,
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}
