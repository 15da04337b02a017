use crate::error::{AppError, AppResult};
use crate::export::{file_name_for, render_off_thread, RenderModel};
use crate::services::attachment;
use crate::state::AppState;
use crate::store::NewDocument;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::document::ExportFormat;
use common::model::template::{Template, TemplateStatus};
use common::requests::GenerateDocumentRequest;
use log::{debug, error, info};

/// A rendered file and the template it came from.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub template: Template,
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

/// Actix web handler for `POST /api/documents/generate`.
///
/// # Returns
/// - `200 OK` with the file as an attachment, or the stored `Document` as
///   JSON when `persist` is set.
/// - `400 Bad Request` if the template is inactive.
/// - `404 Not Found` if the template does not exist.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<GenerateDocumentRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    let persist = request.persist;
    let user_id = request.user_id.clone();

    let generated = generate_document(&state, request)
        .await
        .inspect_err(|e| error!("Error generating document: {}", e))?;

    if !persist {
        return Ok(attachment(
            &generated.file_name,
            generated.format,
            generated.bytes,
        ));
    }

    let document = state
        .store
        .create_document(NewDocument {
            template_id: generated.template.id.clone(),
            template_version: generated.template.version,
            file_name: generated.file_name,
            format: generated.format,
            content: generated.bytes,
            created_by: user_id,
        })
        .inspect_err(|e| error!("Error storing generated document: {}", e))?;
    info!(
        "Stored document {} ({}, {} bytes) from template {}",
        document.id, document.file_name, document.size, document.template_id
    );
    Ok(HttpResponse::Ok().json(document))
}

/// Runs a stored template through the engine and renders the result.
pub async fn generate_document(
    state: &AppState,
    request: GenerateDocumentRequest,
) -> AppResult<GeneratedDocument> {
    let template = state.store.get_template(&request.template_id)?;
    if template.status == TemplateStatus::Inactive {
        return Err(AppError::Validation(format!(
            "Template {} is inactive",
            template.id
        )));
    }

    let mut context = request.context;
    context.metadata.generated_at = Some(Utc::now());
    context.metadata.template_id = Some(template.id.clone());
    context.metadata.template_version = Some(template.version);
    if context.metadata.generated_by.is_none() {
        context.metadata.generated_by = request.user_id.clone();
    }

    let processed = state
        .engine(request.date_format)
        .process(&template.content, &context);
    if !processed.unresolved.is_empty() {
        debug!(
            "Template {} left {} variables empty: {}",
            template.id,
            processed.unresolved.len(),
            processed.unresolved.join(", ")
        );
    }

    let model = RenderModel::from_processed(&template.name, &processed);
    let bytes = render_off_thread(state.config.export_settings(), request.format, model).await?;

    let base = request.file_name.unwrap_or_else(|| template.name.clone());
    let file_name = file_name_for(&base, request.format);
    info!(
        "Generated {} from template {} v{} ({} bytes)",
        file_name,
        template.id,
        template.version,
        bytes.len()
    );

    Ok(GeneratedDocument {
        template,
        file_name,
        format: request.format,
        bytes,
    })
}
