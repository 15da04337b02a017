//! Template variable catalog, resolution and substitution.
//!
//! The pipeline is pure: given template text, a [`TemplateContext`] and
//! [`FormatOptions`] it always produces the same [`ProcessedTemplate`].
//!
//! [`TemplateContext`]: common::model::context::TemplateContext
//! [`ProcessedTemplate`]: common::model::processed::ProcessedTemplate

pub mod catalog;
pub mod engine;
pub mod format;
pub mod resolver;

pub use engine::{extract_placeholders, TemplateEngine};
pub use format::{FormatOptions, LocaleFormat};
