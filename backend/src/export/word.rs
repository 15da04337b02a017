//! `.docx` renderer writing WordprocessingML directly.

use super::model::{Align, Block, RenderModel, Span, Table};
use super::ooxml::{
    content_types, relationships, write_package, XmlPart, OFFICE_DOCUMENT_REL, STYLES_REL,
};
use super::Renderer;
use crate::error::ExportError;
use common::model::document::ExportFormat;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Printable width of an A4 page with 2 cm margins, in twentieths of a point.
const CONTENT_WIDTH_TWIPS: u32 = 9638;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:sz w:val="22"/><w:lang w:val="es-ES"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Subtitle"><w:name w:val="Subtitle"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/></w:pPr><w:rPr><w:i/><w:sz w:val="24"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="200"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="24"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style>
</w:styles>"#;

#[derive(Debug, Default)]
pub struct WordRenderer;

impl Renderer for WordRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn render(&self, model: &RenderModel) -> Result<Vec<u8>, ExportError> {
        write_package(vec![
            (
                "[Content_Types].xml",
                content_types(&[
                    (
                        "/word/document.xml",
                        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
                    ),
                    (
                        "/word/styles.xml",
                        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
                    ),
                ])?,
            ),
            (
                "_rels/.rels",
                relationships(&[("rId1", OFFICE_DOCUMENT_REL, "word/document.xml")])?,
            ),
            (
                "word/_rels/document.xml.rels",
                relationships(&[("rId1", STYLES_REL, "styles.xml")])?,
            ),
            ("word/styles.xml", STYLES_XML.as_bytes().to_vec()),
            ("word/document.xml", document_xml(model)?),
        ])
    }
}

fn document_xml(model: &RenderModel) -> Result<Vec<u8>, ExportError> {
    let mut xml = XmlPart::new()?;
    xml.open("w:document", &[("xmlns:w", WORD_NS)])?;
    xml.open("w:body", &[])?;

    if !model.title.is_empty() {
        styled_paragraph(&mut xml, Some("Title"), &[Span::plain(model.title.as_str())])?;
    }
    if let Some(subtitle) = &model.subtitle {
        styled_paragraph(&mut xml, Some("Subtitle"), &[Span::plain(subtitle.as_str())])?;
    }

    for block in &model.blocks {
        match block {
            Block::Heading { level, text } => {
                let style = if *level <= 1 { "Heading1" } else { "Heading2" };
                styled_paragraph(&mut xml, Some(style), &[Span::plain(text.as_str())])?;
            }
            Block::Paragraph(spans) => styled_paragraph(&mut xml, None, spans)?,
            Block::ListItem(spans) => {
                let mut item = vec![Span::plain("•\t")];
                item.extend(spans.iter().cloned());
                styled_paragraph(&mut xml, Some("ListBullet"), &item)?;
            }
            Block::Spacer => xml.empty("w:p", &[])?,
            Block::Summary(lines) => {
                for line in lines {
                    styled_paragraph(
                        &mut xml,
                        None,
                        &[Span::bold(format!("{}: ", line.label)), Span::plain(line.value.as_str())],
                    )?;
                }
            }
            Block::Table(table) => write_table(&mut xml, table)?,
        }
    }

    xml.open("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", "11906"), ("w:h", "16838")])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", "1134"),
            ("w:right", "1134"),
            ("w:bottom", "1134"),
            ("w:left", "1134"),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.close("w:sectPr")?;

    xml.close("w:body")?;
    xml.close("w:document")?;
    Ok(xml.into_bytes())
}

fn styled_paragraph(
    xml: &mut XmlPart,
    style: Option<&str>,
    spans: &[Span],
) -> Result<(), ExportError> {
    xml.open("w:p", &[])?;
    if let Some(style) = style {
        xml.open("w:pPr", &[])?;
        xml.empty("w:pStyle", &[("w:val", style)])?;
        xml.close("w:pPr")?;
    }
    write_runs(xml, spans)?;
    xml.close("w:p")
}

fn write_runs(xml: &mut XmlPart, spans: &[Span]) -> Result<(), ExportError> {
    for span in spans {
        xml.open("w:r", &[])?;
        if span.bold || span.italic {
            xml.open("w:rPr", &[])?;
            if span.bold {
                xml.empty("w:b", &[])?;
            }
            if span.italic {
                xml.empty("w:i", &[])?;
            }
            xml.close("w:rPr")?;
        }
        xml.element("w:t", &[("xml:space", "preserve")], &span.text)?;
        xml.close("w:r")?;
    }
    Ok(())
}

fn write_table(xml: &mut XmlPart, table: &Table) -> Result<(), ExportError> {
    let total = table.total_width().max(1);
    let widths: Vec<String> = table
        .columns
        .iter()
        .map(|c| (CONTENT_WIDTH_TWIPS * u32::from(c.width.max(1)) / total).to_string())
        .collect();

    xml.open("w:tbl", &[])?;
    xml.open("w:tblPr", &[])?;
    xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
    xml.open("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            edge,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "808080")],
        )?;
    }
    xml.close("w:tblBorders")?;
    xml.close("w:tblPr")?;

    xml.open("w:tblGrid", &[])?;
    for width in &widths {
        xml.empty("w:gridCol", &[("w:w", width.as_str())])?;
    }
    xml.close("w:tblGrid")?;

    // Header row repeats on every page.
    xml.open("w:tr", &[])?;
    xml.open("w:trPr", &[])?;
    xml.empty("w:tblHeader", &[])?;
    xml.close("w:trPr")?;
    for (column, width) in table.columns.iter().zip(&widths) {
        table_cell(xml, width, Align::Left, &[Span::bold(column.header.as_str())])?;
    }
    xml.close("w:tr")?;

    for row in &table.rows {
        xml.open("w:tr", &[])?;
        for ((column, width), cell) in table.columns.iter().zip(&widths).zip(row) {
            table_cell(xml, width, column.align, &[Span::plain(cell.text.as_str())])?;
        }
        xml.close("w:tr")?;
    }

    xml.close("w:tbl")?;
    // Word requires a paragraph between a table and the end of the body.
    xml.empty("w:p", &[])
}

fn table_cell(xml: &mut XmlPart, width: &str, align: Align, spans: &[Span]) -> Result<(), ExportError> {
    xml.open("w:tc", &[])?;
    xml.open("w:tcPr", &[])?;
    xml.empty("w:tcW", &[("w:w", width), ("w:type", "dxa")])?;
    xml.close("w:tcPr")?;
    xml.open("w:p", &[])?;
    if align == Align::Right {
        xml.open("w:pPr", &[])?;
        xml.empty("w:jc", &[("w:val", "right")])?;
        xml.close("w:pPr")?;
    }
    write_runs(xml, spans)?;
    xml.close("w:p")?;
    xml.close("w:tc")
}
