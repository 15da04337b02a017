//! HTTP API. Each sub-module owns one `/api/...` scope and exposes it through
//! `configure_routes`.

pub mod documents;
pub mod reports;
pub mod templates;
pub mod variables;

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use common::model::document::ExportFormat;

/// Registers every API scope on an `App`.
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.service(templates::configure_routes())
        .service(variables::configure_routes())
        .service(documents::configure_routes())
        .service(reports::configure_routes());
}

/// Download response for a rendered file.
pub(crate) fn attachment(file_name: &str, format: ExportFormat, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(format.mime_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name.to_string())],
        })
        .body(bytes)
}
