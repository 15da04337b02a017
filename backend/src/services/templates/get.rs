//! # Template Retrieval Service
//!
//! Backend logic for `GET /api/templates/{template_id}`.

use crate::error::AppError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::error;

/// Actix web handler for the `GET /api/templates/{template_id}` endpoint.
///
/// # Returns
/// - `200 OK` with the `Template` as JSON.
/// - `404 Not Found` when no template has that id.
/// - `503 Service Unavailable` if the database cannot be read.
pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let template = state
        .store
        .get_template(&template_id)
        .inspect_err(|e| error!("Error retrieving template {}: {}", template_id, e))?;
    Ok(HttpResponse::Ok().json(template))
}
