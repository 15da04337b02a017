//! PDF renderer built on genpdf.
//!
//! Documents are A4 with a centered title block, the model's blocks in order
//! and a `Página N de M` footer. genpdf lays pages out while rendering, so the
//! total page count is only known afterwards: the document is rendered once
//! to count pages and a second time with the final footer.

use super::model::{Align, Block, RenderModel, Span, Table};
use super::Renderer;
use crate::error::ExportError;
use common::model::document::ExportFormat;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Style, StyledString};
use genpdf::{
    render, Alignment, Context, Document, Element, Margins, Mm, PageDecorator, PaperSize, Position,
};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const BODY_FONT_SIZE: u8 = 10;
const TITLE_FONT_SIZE: u8 = 16;
const SUBTITLE_FONT_SIZE: u8 = 12;
const FOOTER_FONT_SIZE: u8 = 8;
const PAGE_MARGIN_MM: i32 = 20;
const FOOTER_GAP_MM: i32 = 4;

/// Used when the configured family cannot be loaded.
pub const FALLBACK_FONT_FAMILY: &str = "LiberationSans";

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    fonts_dir: PathBuf,
    font_family: String,
}

impl PdfRenderer {
    pub fn new(fonts_dir: impl Into<PathBuf>, font_family: impl Into<String>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            font_family: font_family.into(),
        }
    }

    /// Renders `model` and returns the bytes together with the page count.
    pub fn render_counted(&self, model: &RenderModel) -> Result<(Vec<u8>, usize), ExportError> {
        let fonts = load_font(&self.fonts_dir, &self.font_family)?;

        let counted = Rc::new(Cell::new(0));
        let draft = build_document(&fonts, model, PageFooter::new(counted.clone(), None))?;
        draft
            .render(std::io::sink())
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let total = counted.get();

        let rendered = Rc::new(Cell::new(0));
        let document =
            build_document(&fonts, model, PageFooter::new(rendered.clone(), Some(total)))?;
        let mut bytes = Vec::new();
        document
            .render(&mut bytes)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        if rendered.get() != total {
            return Err(ExportError::Pdf(format!(
                "page count changed between passes: {} then {}",
                total,
                rendered.get()
            )));
        }
        Ok((bytes, total))
    }
}

impl Renderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, model: &RenderModel) -> Result<Vec<u8>, ExportError> {
        self.render_counted(model).map(|(bytes, _)| bytes)
    }
}

/// Loads the configured family, falling back to LiberationSans from the same
/// directory.
fn load_font(dir: &Path, family: &str) -> Result<FontFamily<FontData>, ExportError> {
    genpdf::fonts::from_files(dir, family, None)
        .or_else(|_| genpdf::fonts::from_files(dir, FALLBACK_FONT_FAMILY, None))
        .map_err(|e| ExportError::Font(format!("{} from {}: {}", family, dir.display(), e)))
}

/// Page margins plus a right-aligned page number at the bottom.
struct PageFooter {
    page: usize,
    pages: Rc<Cell<usize>>,
    total: Option<usize>,
}

impl PageFooter {
    fn new(pages: Rc<Cell<usize>>, total: Option<usize>) -> Self {
        Self {
            page: 0,
            pages,
            total,
        }
    }

    fn label(&self) -> String {
        match self.total {
            Some(total) => format!("Página {} de {}", self.page, total),
            None => format!("Página {}", self.page),
        }
    }
}

impl PageDecorator for PageFooter {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: render::Area<'a>,
        style: Style,
    ) -> Result<render::Area<'a>, genpdf::error::Error> {
        self.page += 1;
        self.pages.set(self.page);
        area.add_margins(Margins::all(PAGE_MARGIN_MM));

        let footer_style = style.with_font_size(FOOTER_FONT_SIZE);
        let label = self.label();
        let size = area.size();
        let line_height = footer_style.line_height(&context.font_cache);
        let width = footer_style.str_width(&context.font_cache, &label);
        area.print_str(
            &context.font_cache,
            Position::new(size.width - width, size.height - line_height),
            footer_style,
            &label,
        )?;

        area.set_height(size.height - line_height - Mm::from(FOOTER_GAP_MM));
        Ok(area)
    }
}

fn styled(span: &Span) -> StyledString {
    let mut style = Style::new();
    if span.bold {
        style = style.bold();
    }
    if span.italic {
        style = style.italic();
    }
    StyledString::new(span.text.clone(), style)
}

fn paragraph(spans: &[Span]) -> Paragraph {
    let mut p = Paragraph::new("");
    for span in spans {
        p.push(styled(span));
    }
    p
}

fn pdf_error(e: genpdf::error::Error) -> ExportError {
    ExportError::Pdf(e.to_string())
}

fn build_document(
    fonts: &FontFamily<FontData>,
    model: &RenderModel,
    footer: PageFooter,
) -> Result<Document, ExportError> {
    let mut doc = Document::new(fonts.clone());
    doc.set_title(model.title.clone());
    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(BODY_FONT_SIZE);
    doc.set_line_spacing(1.25);
    doc.set_page_decorator(footer);

    if !model.title.is_empty() {
        doc.push(
            Paragraph::new(StyledString::new(
                model.title.clone(),
                Style::new().bold().with_font_size(TITLE_FONT_SIZE),
            ))
            .aligned(Alignment::Center),
        );
    }
    if let Some(subtitle) = &model.subtitle {
        doc.push(
            Paragraph::new(StyledString::new(
                subtitle.clone(),
                Style::new().italic().with_font_size(SUBTITLE_FONT_SIZE),
            ))
            .aligned(Alignment::Center),
        );
    }
    doc.push(Break::new(1));

    for block in &model.blocks {
        match block {
            Block::Heading { level, text } => {
                let size = if *level <= 1 { 14 } else { 12 };
                doc.push(Break::new(0.5));
                doc.push(Paragraph::new(StyledString::new(
                    text.clone(),
                    Style::new().bold().with_font_size(size),
                )));
            }
            Block::Paragraph(spans) => doc.push(paragraph(spans)),
            Block::ListItem(spans) => {
                let mut item = paragraph(&[Span::plain("• ")]);
                for span in spans {
                    item.push(styled(span));
                }
                doc.push(item.padded(Margins::trbl(0, 0, 0, 4)));
            }
            Block::Spacer => doc.push(Break::new(1)),
            Block::Summary(lines) => {
                for line in lines {
                    doc.push(paragraph(&[
                        Span::bold(format!("{}: ", line.label)),
                        Span::plain(line.value.as_str()),
                    ]));
                }
            }
            Block::Table(table) => doc.push(build_table(table)?),
        }
    }
    Ok(doc)
}

/// Columns take their relative widths; numeric columns are right-aligned.
fn build_table(table: &Table) -> Result<TableLayout, ExportError> {
    let weights = table
        .columns
        .iter()
        .map(|c| usize::from(c.width.max(1)))
        .collect();
    let mut layout = TableLayout::new(weights);
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = layout.row();
    for column in &table.columns {
        header.push_element(
            Paragraph::new(StyledString::new(column.header.clone(), Style::new().bold())).padded(1),
        );
    }
    header.push().map_err(pdf_error)?;

    for record in &table.rows {
        let mut row = layout.row();
        for (index, column) in table.columns.iter().enumerate() {
            let text = record.get(index).map(|c| c.text.clone()).unwrap_or_default();
            let alignment = match column.align {
                Align::Left => Alignment::Left,
                Align::Right => Alignment::Right,
            };
            row.push_element(Paragraph::new(text).aligned(alignment).padded(1));
        }
        row.push().map_err(pdf_error)?;
    }
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::report::tests::payments_report;
    use crate::templating::FormatOptions;

    const FIXTURE_FAMILY: &str = "DejaVuSans";

    fn fixture_renderer() -> PdfRenderer {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts");
        PdfRenderer::new(dir, FIXTURE_FAMILY)
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    fn long_model() -> RenderModel {
        RenderModel {
            title: "Escrito".to_string(),
            subtitle: None,
            blocks: (0..120)
                .map(|i| Block::Paragraph(vec![Span::plain(format!("Párrafo {}", i))]))
                .collect(),
        }
    }

    #[test]
    fn missing_fonts_are_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PdfRenderer::new(dir.path(), "Arial");
        let model = RenderModel::from_report(&payments_report(), &FormatOptions::default());

        match renderer.render(&model) {
            Err(ExportError::Font(message)) => assert!(message.contains("Arial")),
            other => panic!("expected font error, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn footer_labels_count_pages() {
        let mut footer = PageFooter::new(Rc::new(Cell::new(0)), Some(3));
        footer.page = 2;
        assert_eq!(footer.label(), "Página 2 de 3");

        let mut draft = PageFooter::new(Rc::new(Cell::new(0)), None);
        draft.page = 1;
        assert_eq!(draft.label(), "Página 1");
    }

    #[test]
    fn unknown_family_falls_back_to_liberation_sans() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts");
        let dir = tempfile::tempdir().unwrap();
        for face in ["Regular", "Bold", "Italic", "BoldItalic"] {
            std::fs::copy(
                fixtures.join(format!("{}-{}.ttf", FIXTURE_FAMILY, face)),
                dir.path().join(format!("{}-{}.ttf", FALLBACK_FONT_FAMILY, face)),
            )
            .unwrap();
        }

        let renderer = PdfRenderer::new(dir.path(), "Arial");
        let model = RenderModel::from_report(&payments_report(), &FormatOptions::default());
        let (bytes, pages) = renderer.render_counted(&model).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(pages, 1);
    }

    #[test]
    fn renders_report_with_page_footer() {
        let model = RenderModel::from_report(&payments_report(), &FormatOptions::default());

        let (bytes, pages) = fixture_renderer().render_counted(&model).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(pages, 1);
        assert!(contains(&bytes, "Pagos del caso C-1234-2026"));
    }

    #[test]
    fn long_documents_count_every_page() {
        let renderer = fixture_renderer();
        let model = long_model();

        let (first_bytes, first) = renderer.render_counted(&model).unwrap();
        let (second_bytes, second) = renderer.render_counted(&model).unwrap();
        assert!(first > 1, "expected several pages, got {}", first);
        assert_eq!(first, second);
        for bytes in [&first_bytes, &second_bytes] {
            assert!(bytes.starts_with(b"%PDF"));
            assert!(contains(bytes, "Escrito"));
        }
    }

    #[test]
    fn render_matches_counted_render() {
        let renderer = fixture_renderer();
        let model = long_model();

        let plain = renderer.render(&model).unwrap();
        let (_, pages) = renderer.render_counted(&model).unwrap();
        assert!(plain.starts_with(b"%PDF"));
        assert!(pages > 1);
    }
}
