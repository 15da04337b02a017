use crate::error::AppError;
use crate::services::attachment;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::error;

/// `GET /api/documents/{document_id}`: the stored bytes as an attachment.
pub async fn process(
    state: web::Data<AppState>,
    document_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let document = state
        .store
        .get_document(&document_id)
        .inspect_err(|e| error!("Error retrieving document {}: {}", document_id, e))?;
    Ok(attachment(&document.file_name, document.format, document.content))
}
