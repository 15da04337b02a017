use crate::error::{AppError, AppResult};
use crate::export::{file_name_for, render_off_thread, RenderModel};
use crate::services::attachment;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::document::ExportFormat;
use common::model::report::Report;
use common::model::variable::DateFormat;
use common::requests::ExportReportRequest;
use log::{error, info};

/// Actix web handler for `POST /api/reports/export`.
///
/// # Returns
/// - `200 OK` with the file as an attachment named after `file_name` or the
///   report title.
/// - `500 Internal Server Error` when rendering fails (for PDF, usually
///   missing fonts).
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<ExportReportRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    let base = request
        .file_name
        .clone()
        .unwrap_or_else(|| request.report.title.clone());
    let file_name = file_name_for(&base, request.format);

    let bytes = export_report(&state, &request.report, request.format, request.date_format)
        .await
        .inspect_err(|e| error!("Error exporting report '{}': {}", request.report.title, e))?;

    info!(
        "Exported report '{}' as {} ({} rows, {} bytes)",
        request.report.title,
        request.format,
        request.report.rows.len(),
        bytes.len()
    );
    Ok(attachment(&file_name, request.format, bytes))
}

/// Formats and renders `report` with the application's locale settings.
pub async fn export_report(
    state: &AppState,
    report: &Report,
    format: ExportFormat,
    date_format: Option<DateFormat>,
) -> AppResult<Vec<u8>> {
    let options = state.config.format_options(date_format);
    let model = RenderModel::from_report(report, &options);
    render_off_thread(state.config.export_settings(), format, model).await
}
