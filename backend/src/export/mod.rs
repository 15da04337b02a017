//! Export adapters.
//!
//! Processed templates and reports are first turned into a [`RenderModel`];
//! each output format implements [`Renderer`] over that model.

pub mod markup;
pub mod model;
pub mod ooxml;
pub mod pdf;
pub mod report;
pub mod spreadsheet;
pub mod word;

use crate::error::{AppError, AppResult, ExportError};
use common::model::document::ExportFormat;
use std::path::PathBuf;

pub use model::RenderModel;
pub use pdf::PdfRenderer;
pub use spreadsheet::SpreadsheetRenderer;
pub use word::WordRenderer;

/// Turns a render model into the bytes of one file format.
pub trait Renderer {
    fn format(&self) -> ExportFormat;

    fn render(&self, model: &RenderModel) -> Result<Vec<u8>, ExportError>;
}

/// Settings the renderers need from the application configuration.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub fonts_dir: PathBuf,
    pub font_family: String,
}

pub fn renderer_for(format: ExportFormat, settings: &ExportSettings) -> Box<dyn Renderer + Send> {
    match format {
        ExportFormat::Pdf => Box::new(PdfRenderer::new(
            settings.fonts_dir.clone(),
            settings.font_family.clone(),
        )),
        ExportFormat::Docx => Box::new(WordRenderer),
        ExportFormat::Xlsx => Box::new(SpreadsheetRenderer),
    }
}

/// Renders on the blocking thread pool so PDF layout and compression do not
/// stall the async runtime.
pub async fn render_off_thread(
    settings: ExportSettings,
    format: ExportFormat,
    model: RenderModel,
) -> AppResult<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || renderer_for(format, &settings).render(&model))
        .await
        .map_err(|e| AppError::Blocking(e.to_string()))??;
    Ok(bytes)
}

/// Download name for `base` with the extension of `format`. Path separators
/// and characters that break a `Content-Disposition` header are replaced.
pub fn file_name_for(base: &str, format: ExportFormat) -> String {
    let extension = format!(".{}", format.extension());
    let base = base.strip_suffix(extension.as_str()).unwrap_or(base);
    let clean: String = base
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let clean = clean.trim_matches('.');
    if clean.is_empty() {
        format!("documento{}", extension)
    } else {
        format!("{}{}", clean, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(file_name_for("Demanda C-1/2026", ExportFormat::Pdf), "Demanda C-1_2026.pdf");
        assert_eq!(file_name_for("pagos.xlsx", ExportFormat::Xlsx), "pagos.xlsx");
        assert_eq!(file_name_for("  ", ExportFormat::Docx), "documento.docx");
        assert_eq!(file_name_for("a\"b", ExportFormat::Docx), "a_b.docx");
    }

    #[test]
    fn renderer_matches_format() {
        let settings = ExportSettings {
            fonts_dir: PathBuf::from("fonts"),
            font_family: "Arial".to_string(),
        };
        for format in [ExportFormat::Pdf, ExportFormat::Docx, ExportFormat::Xlsx] {
            assert_eq!(renderer_for(format, &settings).format(), format);
        }
    }

    #[actix_web::test]
    async fn rendering_runs_on_blocking_pool() {
        let settings = ExportSettings {
            fonts_dir: PathBuf::from("fonts"),
            font_family: "Arial".to_string(),
        };
        let model = RenderModel {
            title: "Acta".to_string(),
            subtitle: None,
            blocks: Vec::new(),
        };
        let bytes = render_off_thread(settings, ExportFormat::Docx, model)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
