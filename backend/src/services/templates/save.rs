//! # Template Save Service
//!
//! `POST /api/templates/save`. The content is stored as given; placeholders
//! that the catalog does not know are returned as a warning rather than
//! rejected, since `custom.*` values and future variables are legitimate.

use crate::error::AppError;
use crate::state::AppState;
use crate::templating::catalog::validate_placeholders;
use actix_web::{web, HttpResponse};
use common::requests::{SaveTemplateRequest, SaveTemplateResponse};
use log::{error, warn};

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveTemplateRequest>,
) -> Result<HttpResponse, AppError> {
    let template = state
        .store
        .save_template(&payload)
        .inspect_err(|e| error!("Error saving template: {}", e))?;

    let unknown_variables = validate_placeholders(&template.content).unknown;
    if !unknown_variables.is_empty() {
        warn!(
            "Template {} uses unknown variables: {}",
            template.id,
            unknown_variables.join(", ")
        );
    }

    Ok(HttpResponse::Ok().json(SaveTemplateResponse {
        template,
        unknown_variables,
    }))
}
