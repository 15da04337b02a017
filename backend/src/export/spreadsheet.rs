//! `.xlsx` renderer. One worksheet; tables become a bold header row followed
//! by one row per record, other blocks take a single cell in column A.

use super::markup::plain_text;
use super::model::{Block, Cell, RenderModel};
use super::ooxml::{
    column_letter, content_types, relationships, write_package, XmlPart, OFFICE_DOCUMENT_REL,
    STYLES_REL,
};
use super::Renderer;
use crate::error::ExportError;
use common::model::document::ExportFormat;

const SHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const DOC_REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

/// Column width in characters per unit of relative width.
const WIDTH_PER_UNIT: u32 = 6;

/// Cell formats: 0 default, 1 bold, 2 `#,##0.00`.
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
<cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="4" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs>
<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

const STYLE_BOLD: &str = "1";
const STYLE_NUMBER: &str = "2";

#[derive(Debug, Default)]
pub struct SpreadsheetRenderer;

impl Renderer for SpreadsheetRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn render(&self, model: &RenderModel) -> Result<Vec<u8>, ExportError> {
        write_package(vec![
            (
                "[Content_Types].xml",
                content_types(&[
                    (
                        "/xl/workbook.xml",
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
                    ),
                    (
                        "/xl/worksheets/sheet1.xml",
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
                    ),
                    (
                        "/xl/styles.xml",
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml",
                    ),
                ])?,
            ),
            (
                "_rels/.rels",
                relationships(&[("rId1", OFFICE_DOCUMENT_REL, "xl/workbook.xml")])?,
            ),
            (
                "xl/_rels/workbook.xml.rels",
                relationships(&[
                    ("rId1", WORKSHEET_REL, "worksheets/sheet1.xml"),
                    ("rId2", STYLES_REL, "styles.xml"),
                ])?,
            ),
            ("xl/workbook.xml", workbook_xml(&sheet_name(&model.title))?),
            ("xl/styles.xml", STYLES_XML.as_bytes().to_vec()),
            ("xl/worksheets/sheet1.xml", sheet_xml(model)?),
        ])
    }
}

/// Sheet names are limited to 31 characters and may not contain `[]:*?/\`.
fn sheet_name(title: &str) -> String {
    let name: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let name = name.trim().to_string();
    if name.is_empty() {
        "Hoja1".to_string()
    } else {
        name
    }
}

fn workbook_xml(sheet: &str) -> Result<Vec<u8>, ExportError> {
    let mut xml = XmlPart::new()?;
    xml.open("workbook", &[("xmlns", SHEET_NS), ("xmlns:r", DOC_REL_NS)])?;
    xml.open("sheets", &[])?;
    xml.empty("sheet", &[("name", sheet), ("sheetId", "1"), ("r:id", "rId1")])?;
    xml.close("sheets")?;
    xml.close("workbook")?;
    Ok(xml.into_bytes())
}

/// Writes rows top to bottom, tracking the current row number.
struct SheetWriter {
    xml: XmlPart,
    row: usize,
}

impl SheetWriter {
    fn row(&mut self, cells: &[(Option<&Cell>, Option<&str>)]) -> Result<(), ExportError> {
        self.row += 1;
        let row_ref = self.row.to_string();
        self.xml.open("row", &[("r", row_ref.as_str())])?;
        for (index, &(cell, style)) in cells.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let reference = format!("{}{}", column_letter(index), self.row);
            match cell.number.filter(|n| n.is_finite()) {
                Some(number) => {
                    self.xml.open(
                        "c",
                        &[("r", reference.as_str()), ("s", style.unwrap_or(STYLE_NUMBER))],
                    )?;
                    self.xml.element("v", &[], &number.to_string())?;
                }
                None => {
                    let mut attrs = vec![("r", reference.as_str()), ("t", "inlineStr")];
                    if let Some(style) = style {
                        attrs.push(("s", style));
                    }
                    self.xml.open("c", &attrs)?;
                    self.xml.open("is", &[])?;
                    self.xml.element("t", &[("xml:space", "preserve")], &cell.text)?;
                    self.xml.close("is")?;
                }
            }
            self.xml.close("c")?;
        }
        self.xml.close("row")
    }

    fn text_row(&mut self, text: &str, style: Option<&str>) -> Result<(), ExportError> {
        let cell = Cell::text(text);
        self.row(&[(Some(&cell), style)])
    }

    fn skip(&mut self) {
        self.row += 1;
    }
}

fn sheet_xml(model: &RenderModel) -> Result<Vec<u8>, ExportError> {
    let mut xml = XmlPart::new()?;
    xml.open("worksheet", &[("xmlns", SHEET_NS)])?;

    if let Some(table) = model.tables().next() {
        xml.open("cols", &[])?;
        for (index, column) in table.columns.iter().enumerate() {
            let position = (index + 1).to_string();
            let width = (u32::from(column.width.max(1)) * WIDTH_PER_UNIT).to_string();
            xml.empty(
                "col",
                &[
                    ("min", position.as_str()),
                    ("max", position.as_str()),
                    ("width", width.as_str()),
                    ("customWidth", "1"),
                ],
            )?;
        }
        xml.close("cols")?;
    }

    xml.open("sheetData", &[])?;
    let mut sheet = SheetWriter { xml, row: 0 };

    if !model.title.is_empty() {
        sheet.text_row(&model.title, Some(STYLE_BOLD))?;
    }
    if let Some(subtitle) = &model.subtitle {
        sheet.text_row(subtitle, None)?;
    }

    for block in &model.blocks {
        match block {
            Block::Heading { text, .. } => sheet.text_row(text, Some(STYLE_BOLD))?,
            Block::Paragraph(spans) => sheet.text_row(&plain_text(spans), None)?,
            Block::ListItem(spans) => sheet.text_row(&format!("• {}", plain_text(spans)), None)?,
            Block::Spacer => sheet.skip(),
            Block::Summary(lines) => {
                for line in lines {
                    let label = Cell::text(line.label.as_str());
                    let value = Cell::text(line.value.as_str());
                    sheet.row(&[(Some(&label), Some(STYLE_BOLD)), (Some(&value), None)])?;
                }
            }
            Block::Table(table) => {
                let headers: Vec<Cell> =
                    table.columns.iter().map(|c| Cell::text(c.header.as_str())).collect();
                let header_row: Vec<_> =
                    headers.iter().map(|c| (Some(c), Some(STYLE_BOLD))).collect();
                sheet.row(&header_row)?;
                for record in &table.rows {
                    let cells: Vec<_> = (0..table.columns.len())
                        .map(|i| (record.get(i), None))
                        .collect();
                    sheet.row(&cells)?;
                }
            }
        }
    }

    let mut xml = sheet.xml;
    xml.close("sheetData")?;
    xml.close("worksheet")?;
    Ok(xml.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::report::tests::payments_report;
    use crate::templating::FormatOptions;
    use std::io::{Cursor, Read};

    fn sheet(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name("xl/worksheets/sheet1.xml").unwrap();
        let mut xml = String::new();
        part.read_to_string(&mut xml).unwrap();
        xml
    }

    fn report_model() -> RenderModel {
        RenderModel::from_report(&payments_report(), &FormatOptions::default())
    }

    #[test]
    fn header_row_follows_column_order() {
        let xml = sheet(&SpreadsheetRenderer.render(&report_model()).unwrap());

        // title, subtitle, 2 summary rows, spacer, header on row 6
        let header = r#"<row r="6"><c r="A6" t="inlineStr" s="1"><is><t xml:space="preserve">Fecha</t></is></c><c r="B6" t="inlineStr" s="1"><is><t xml:space="preserve">Concepto</t></is></c><c r="C6" t="inlineStr" s="1"><is><t xml:space="preserve">Monto</t></is></c></row>"#;
        assert!(xml.contains(header), "{}", xml);
    }

    #[test]
    fn records_keep_numbers_numeric() {
        let xml = sheet(&SpreadsheetRenderer.render(&report_model()).unwrap());
        assert!(xml.contains(r#"<c r="C7" s="2"><v>1500000</v></c>"#), "{}", xml);
        assert!(xml.contains(r#"<c r="C8" s="2"><v>250000</v></c>"#));
        assert!(xml.contains("not json"));
        assert!(xml.contains(r#"<col min="2" max="2" width="30" customWidth="1"/>"#));
    }

    #[test]
    fn sheet_names_are_sanitized() {
        assert_eq!(sheet_name("Pagos [2026] / Acme"), "Pagos 2026  Acme");
        assert_eq!(sheet_name("???"), "Hoja1");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn output_is_byte_identical_for_identical_input() {
        let first = SpreadsheetRenderer.render(&report_model()).unwrap();
        let second = SpreadsheetRenderer.render(&report_model()).unwrap();
        assert_eq!(first, second);
    }
}
