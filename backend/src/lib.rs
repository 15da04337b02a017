//! Legajo backend: template storage, variable substitution and document
//! export for a legal case management system.

pub mod config;
pub mod error;
pub mod export;
pub mod services;
pub mod state;
pub mod store;
pub mod templating;
