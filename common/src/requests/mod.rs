//! Request and response payloads of the HTTP API.

use crate::model::context::TemplateContext;
use crate::model::document::ExportFormat;
use crate::model::report::Report;
use crate::model::template::{Template, TemplateStatus};
use crate::model::variable::DateFormat;
use serde::{Deserialize, Serialize};

/// Payload of `POST /api/templates/save`.
/// Without `id` a new template is created; with an `id` the template is
/// updated, or created under that id if it does not exist yet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SaveTemplateRequest {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub content: String,
    pub status: Option<TemplateStatus>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SaveTemplateResponse {
    pub template: Template,
    /// Placeholders that do not match any catalog variable.
    pub unknown_variables: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateStatusRequest {
    pub status: TemplateStatus,
    pub user_id: Option<String>,
}

/// Payload of `POST /api/documents/generate`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateDocumentRequest {
    pub template_id: String,
    pub format: ExportFormat,
    #[serde(default)]
    pub context: TemplateContext,
    pub date_format: Option<DateFormat>,
    /// Store the result as a `Document` instead of streaming it back.
    #[serde(default)]
    pub persist: bool,
    pub file_name: Option<String>,
    pub user_id: Option<String>,
}

/// Payload of `POST /api/documents/preview`. Either a stored template or raw
/// content must be given; raw content wins when both are present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreviewRequest {
    pub template_id: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub context: TemplateContext,
    pub date_format: Option<DateFormat>,
}

/// Payload of `POST /api/reports/export`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportReportRequest {
    pub report: Report,
    pub format: ExportFormat,
    pub date_format: Option<DateFormat>,
    pub file_name: Option<String>,
}
