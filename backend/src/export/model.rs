//! Format-neutral document model shared by every renderer.

use super::markup::parse_inline;
use common::model::processed::ProcessedTemplate;

/// A run of text with inline emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub header: String,
    /// Relative width.
    pub width: u16,
    pub align: Align,
}

/// Formatted cell. `number` keeps the raw value for spreadsheet output.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub number: Option<f64>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            number: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn total_width(&self) -> u32 {
        self.columns.iter().map(|c| u32::from(c.width.max(1))).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(Vec<Span>),
    ListItem(Vec<Span>),
    Spacer,
    Summary(Vec<SummaryLine>),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub title: String,
    pub subtitle: Option<String>,
    pub blocks: Vec<Block>,
}

impl RenderModel {
    /// Lays out processed template text line by line:
    /// `# ` and `## ` start headings, `- ` starts a list item, a blank line
    /// is a spacer and anything else is a paragraph with inline emphasis.
    pub fn from_processed(title: impl Into<String>, processed: &ProcessedTemplate) -> Self {
        let blocks = processed.content.lines().map(block_from_line).collect();
        Self {
            title: title.into(),
            subtitle: None,
            blocks,
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }
}

fn block_from_line(line: &str) -> Block {
    let line = line.trim_end();
    if line.trim().is_empty() {
        Block::Spacer
    } else if let Some(text) = line.strip_prefix("## ") {
        Block::Heading {
            level: 2,
            text: text.trim().to_string(),
        }
    } else if let Some(text) = line.strip_prefix("# ") {
        Block::Heading {
            level: 1,
            text: text.trim().to_string(),
        }
    } else if let Some(item) = line.strip_prefix("- ") {
        Block::ListItem(parse_inline(item))
    } else {
        Block::Paragraph(parse_inline(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_become_blocks() {
        let processed = ProcessedTemplate {
            content: "# Demanda\n\nEn lo principal: **cobro**\n- primero\n## Otrosí".to_string(),
            ..Default::default()
        };
        let model = RenderModel::from_processed("Demanda", &processed);

        assert_eq!(
            model.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Demanda".to_string()
                },
                Block::Spacer,
                Block::Paragraph(vec![Span::plain("En lo principal: "), Span::bold("cobro")]),
                Block::ListItem(vec![Span::plain("primero")]),
                Block::Heading {
                    level: 2,
                    text: "Otrosí".to_string()
                },
            ]
        );
    }
}
