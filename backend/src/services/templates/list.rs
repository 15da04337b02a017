use crate::error::AppError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::template::TemplateStatus;
use log::error;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<TemplateStatus>,
}

/// `GET /api/templates?status=...`
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let templates = state
        .store
        .list_templates(query.status)
        .inspect_err(|e| error!("Error listing templates: {}", e))?;
    Ok(HttpResponse::Ok().json(templates))
}
