use crate::error::AppError;
use crate::state::AppState;
use crate::templating::catalog::validate_placeholders;
use actix_web::{web, HttpResponse};
use log::error;

/// `GET /api/templates/{template_id}/variables`: the placeholders of the
/// stored content split into catalog variables and unknown paths.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let template = state
        .store
        .get_template(&template_id)
        .inspect_err(|e| error!("Error retrieving template {}: {}", template_id, e))?;
    Ok(HttpResponse::Ok().json(validate_placeholders(&template.content)))
}
