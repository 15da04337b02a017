//! # Template Status Service
//!
//! `POST /api/templates/{template_id}/status`. Inactive templates stay
//! readable but cannot be used to generate documents.

use crate::error::AppError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::UpdateStatusRequest;
use log::{error, info};

pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let template = state
        .store
        .set_template_status(&template_id, payload.status, payload.user_id.as_deref())
        .inspect_err(|e| error!("Error updating status of template {}: {}", template_id, e))?;
    info!("Template {} is now {}", template.id, template.status);
    Ok(HttpResponse::Ok().json(template))
}
