use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::processed::ProcessedTemplate;
use common::requests::PreviewRequest;
use log::error;

/// `POST /api/documents/preview`: the processed text, variables and
/// unresolved paths as JSON.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<PreviewRequest>,
) -> Result<HttpResponse, AppError> {
    let processed = preview(&state, &payload).inspect_err(|e| error!("Error previewing: {}", e))?;
    Ok(HttpResponse::Ok().json(processed))
}

/// Processes raw `content` or, when absent, the stored template. Stored
/// templates are previewed even when inactive.
pub fn preview(state: &AppState, request: &PreviewRequest) -> AppResult<ProcessedTemplate> {
    let content = match (&request.content, &request.template_id) {
        (Some(content), _) => content.clone(),
        (None, Some(template_id)) => state.store.get_template(template_id)?.content,
        (None, None) => {
            return Err(AppError::Validation(
                "Either content or template_id is required".to_string(),
            ))
        }
    };
    Ok(state
        .engine(request.date_format)
        .process(&content, &request.context))
}
