//! # Template Service Module
//!
//! Routes under `/api/templates` for managing stored templates.
//!
//! ## Sub-modules:
//! - `save`: creates or updates a template and reports unknown placeholders.
//! - `list`: lists templates, optionally filtered by status.
//! - `get`: returns one template.
//! - `status`: activates or deactivates a template.
//! - `delete`: removes a template.
//! - `variables`: checks a stored template's placeholders against the catalog.

mod delete;
mod get;
mod list;
mod save;
mod status;
mod variables;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**: `save::process`. Creates a template, or updates the one
///     named by `id`. Editing the content bumps the version.
/// *   **`GET ""`**: `list::process`. Accepts `?status=active|inactive`.
/// *   **`GET /{template_id}`**: `get::process`.
/// *   **`POST /{template_id}/status`**: `status::process`.
/// *   **`DELETE /{template_id}`**: `delete::process`.
/// *   **`GET /{template_id}/variables`**: `variables::process`. Known and
///     unknown placeholders of the stored content.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("", get().to(list::process))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}", delete().to(delete::process))
        .route("/{template_id}/status", post().to(status::process))
        .route("/{template_id}/variables", get().to(variables::process))
}
