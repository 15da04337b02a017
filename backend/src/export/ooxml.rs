//! Shared plumbing for the Office Open XML renderers: an XML part writer and
//! the zip container.
//!
//! Entries are written with a fixed timestamp so the same input always
//! yields the same bytes.

use crate::error::ExportError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const STYLES_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

fn xml_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Xml(err.to_string())
}

/// Thin wrapper over `quick_xml::Writer` for one package part.
pub struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    pub fn new() -> Result<Self, ExportError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_error)?;
        Ok(Self { writer })
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(start)).map_err(xml_error)
    }

    pub fn close(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(start)).map_err(xml_error)
    }

    /// Escaped character data. Control characters XML 1.0 forbids are dropped.
    pub fn text(&mut self, text: &str) -> Result<(), ExportError> {
        let clean: String = text
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
            .collect();
        self.writer
            .write_event(Event::Text(BytesText::new(&clean)))
            .map_err(xml_error)
    }

    /// `<name attrs>text</name>`
    pub fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), ExportError> {
        self.open(name, attrs)?;
        self.text(text)?;
        self.close(name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// `_rels/...rels` part with `(id, type, target)` relationships.
pub fn relationships(rels: &[(&str, &str, &str)]) -> Result<Vec<u8>, ExportError> {
    let mut part = XmlPart::new()?;
    part.open("Relationships", &[("xmlns", RELATIONSHIPS_NS)])?;
    for &(id, rel_type, target) in rels {
        part.empty(
            "Relationship",
            &[("Id", id), ("Type", rel_type), ("Target", target)],
        )?;
    }
    part.close("Relationships")?;
    Ok(part.into_bytes())
}

/// `[Content_Types].xml` declaring the default types plus one override per
/// `(part name, content type)`.
pub fn content_types(overrides: &[(&str, &str)]) -> Result<Vec<u8>, ExportError> {
    let mut part = XmlPart::new()?;
    part.open(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    part.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    part.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for &(name, content_type) in overrides {
        part.empty(
            "Override",
            &[("PartName", name), ("ContentType", content_type)],
        )?;
    }
    part.close("Types")?;
    Ok(part.into_bytes())
}

/// Zips `parts` in the given order.
pub fn write_package(parts: Vec<(&str, Vec<u8>)>) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Spreadsheet column letters: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}
