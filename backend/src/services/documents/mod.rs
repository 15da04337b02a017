//! # Document Service Module
//!
//! Routes under `/api/documents`: previewing processed text, generating
//! files from stored templates and downloading persisted documents.
//!
//! Generation follows the same steps for every format:
//!
//! 1.  Load the template. Missing templates answer 404; inactive ones 400.
//! 2.  Stamp the context metadata (`custom.generated_at`, `custom.template_id`, ...).
//! 3.  Substitute placeholders with the request's date style.
//! 4.  Build the render model and render it on the blocking pool.
//! 5.  Either stream the file back or store it as a `Document`.

mod download;
mod generate;
mod list;
mod preview;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

pub use generate::{generate_document, GeneratedDocument};
pub use preview::preview;

const API_PATH: &str = "/api/documents";

/// # Registered Routes:
///
/// *   **`POST /preview`**: processed text as JSON, nothing is rendered.
/// *   **`POST /generate`**: the rendered file, or the stored `Document`
///     summary when `persist` is set.
/// *   **`GET /template/{template_id}`**: stored documents of a template.
/// *   **`GET /{document_id}`**: downloads a stored document.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/preview", post().to(preview::process))
        .route("/generate", post().to(generate::process))
        .route("/template/{template_id}", get().to(list::process))
        .route("/{document_id}", get().to(download::process))
}
