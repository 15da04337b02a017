use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output file formats supported by the export adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Docx,
    Pdf,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(format!("Unknown export format '{}'", other)),
        }
    }
}

/// A generated artifact. Documents are never updated: exporting again
/// creates a new row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub template_id: String,
    pub template_version: u32,
    pub file_name: String,
    pub format: ExportFormat,
    /// Rendered bytes. Not serialized; downloads go through a dedicated route.
    #[serde(skip)]
    pub content: Vec<u8>,
    pub content_md5: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_its_own_extension() {
        for format in [ExportFormat::Docx, ExportFormat::Pdf, ExportFormat::Xlsx] {
            assert_eq!(format.extension().parse::<ExportFormat>(), Ok(format));
        }
        assert!("odt".parse::<ExportFormat>().is_err());
    }
}
