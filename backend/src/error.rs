//! Error types shared by the store, the export adapters and the HTTP layer.
//!
//! Variable resolution never produces an error: unknown or missing values
//! degrade to an empty string. Only structural failures (missing template,
//! database, renderer) end up here.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failures raised while turning a render model into bytes.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Font could not be loaded: {0}")]
    Font(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("XML writing failed: {0}")]
    Xml(String),

    #[error("Archive writing failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Background task failed: {0}")]
    Blocking(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::TemplateNotFound(_) | AppError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_) | AppError::Export(_) | AppError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::TemplateNotFound("abc".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Template not found: abc");
    }

    #[test]
    fn export_failures_are_server_errors() {
        let err = AppError::from(ExportError::Font("Arial".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Font could not be loaded: Arial");
    }
}
