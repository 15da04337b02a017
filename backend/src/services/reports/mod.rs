//! # Report Export Module
//!
//! `POST /api/reports/export` renders a tabular report (payments, case
//! listings) to PDF, DOCX or XLSX and returns it as a download.

mod export;

use actix_web::web::{post, scope};
use actix_web::Scope;

pub use export::export_report;

const API_PATH: &str = "/api/reports";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/export", post().to(export::process))
}
