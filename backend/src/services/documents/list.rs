use crate::error::AppError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::error;

/// `GET /api/documents/template/{template_id}`: stored documents without
/// their bytes, newest first.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let documents = state
        .store
        .list_documents(&template_id)
        .inspect_err(|e| error!("Error listing documents of {}: {}", template_id, e))?;
    Ok(HttpResponse::Ok().json(documents))
}
