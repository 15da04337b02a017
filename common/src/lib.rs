//! Shared models for the legajo document service.
//!
//! Everything in here is plain serde data exchanged between the HTTP layer,
//! the templating pipeline and the SQLite store.

pub mod model;
pub mod requests;
