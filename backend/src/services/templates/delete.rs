use crate::error::AppError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::error;

/// `DELETE /api/templates/{template_id}`. Answers `204 No Content`.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state
        .store
        .delete_template(&template_id)
        .inspect_err(|e| error!("Error deleting template {}: {}", template_id, e))?;
    Ok(HttpResponse::NoContent().finish())
}
