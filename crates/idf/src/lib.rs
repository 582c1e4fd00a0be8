//! Intermediate Document Format (IDF)
//! The in-memory representation of a report body after assembly but before
//! pagination. Blocks appear in reading order; that order is preserved all the
//! way to the rendered pages.

pub mod markup;

use insight_style::font::{FontStyle, FontWeight};
use insight_style::stylesheet::{ParagraphStyle, TableStyle};
use insight_types::Color;
use std::sync::Arc;

pub use markup::parse_inline_markup;

pub type TextStr = String;

/// A block-level element of the report body.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    /// Fixed vertical gap. Dropped when it would fall at the top of a page.
    Spacer { height: f32 },
    Table(GridTable),
    Image(ImageBlock),
}

impl Block {
    pub fn spacer(height: f32) -> Self {
        Block::Spacer { height }
    }

    /// Returns a string identifier for the block type, used in logs and structure assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Spacer { .. } => "spacer",
            Block::Table(_) => "table",
            Block::Image(_) => "image",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphBlock {
    pub style: Arc<ParagraphStyle>,
    pub children: Vec<InlineNode>,
}

impl ParagraphBlock {
    /// A paragraph whose text is taken literally, never interpreted as markup.
    pub fn plain(style: Arc<ParagraphStyle>, text: impl Into<TextStr>) -> Self {
        Self {
            style,
            children: vec![InlineNode::Text(text.into())],
        }
    }

    /// A paragraph built from inline markup (`<b>`, `<i>`, `<br/>`, entities).
    pub fn from_markup(style: Arc<ParagraphStyle>, markup: &str) -> Self {
        Self {
            style,
            children: parse_inline_markup(markup),
        }
    }

    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            node.collect_text(&mut out);
        }
        out
    }
}

/// Weight and style overrides carried by an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InlineMetadata {
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
}

/// Represents an inline-level element within a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    /// A run of plain text.
    Text(TextStr),
    /// A `<b>` or `<i>` span.
    StyledSpan {
        meta: InlineMetadata,
        children: Vec<InlineNode>,
    },
    /// A forced line break.
    LineBreak,
}

impl InlineNode {
    pub fn bold(children: Vec<InlineNode>) -> Self {
        InlineNode::StyledSpan {
            meta: InlineMetadata {
                font_weight: Some(FontWeight::Bold),
                font_style: None,
            },
            children,
        }
    }

    pub fn italic(children: Vec<InlineNode>) -> Self {
        InlineNode::StyledSpan {
            meta: InlineMetadata {
                font_weight: None,
                font_style: Some(FontStyle::Italic),
            },
            children,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            InlineNode::Text(t) => out.push_str(t),
            InlineNode::StyledSpan { children, .. } => {
                children.iter().for_each(|c| c.collect_text(out))
            }
            InlineNode::LineBreak => out.push('\n'),
        }
    }
}

// --- Grid-specific Structures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Header,
    /// A data row; `index` counts from the first row under the header.
    Body { index: usize },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridCell {
    /// The formatted cell text before wrapping.
    pub text: TextStr,
    /// The text broken into lines that fit the column.
    pub lines: Vec<TextStr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub role: RowRole,
    pub cells: Vec<GridCell>,
    pub height: f32,
    pub background: Option<Color>,
}

impl GridRow {
    pub fn is_header(&self) -> bool {
        self.role == RowRole::Header
    }
}

/// A fully sized grid: column widths are resolved and every cell is already wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTable {
    pub column_widths: Vec<f32>,
    pub rows: Vec<GridRow>,
    /// Leading rows repeated at the top of every page the grid spans.
    pub header_rows: usize,
    pub style: Arc<TableStyle>,
}

impl GridTable {
    /// A grid with no columns; it occupies no space and draws nothing.
    pub fn empty(style: Arc<TableStyle>) -> Self {
        Self {
            column_widths: Vec::new(),
            rows: Vec::new(),
            header_rows: 0,
            style,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.column_widths.is_empty()
    }

    pub fn total_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    pub fn header(&self) -> &[GridRow] {
        &self.rows[..self.header_rows.min(self.rows.len())]
    }

    pub fn body(&self) -> &[GridRow] {
        &self.rows[self.header_rows.min(self.rows.len())..]
    }
}

// --- Images ---

/// A decoded 8-bit RGB raster with an optional separate alpha channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub image: Arc<RasterImage>,
    /// Display size in points; the raster is stretched to fit.
    pub width: f32,
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_style::stylesheet::{PageLayout, Stylesheet, BODY_TEXT};

    #[test]
    fn test_plain_paragraph_keeps_markup_literal() {
        let sheet = Stylesheet::report_default(PageLayout::default());
        let style = sheet.get_style(BODY_TEXT).unwrap().clone();
        let p = ParagraphBlock::plain(style.clone(), "<b>x</b> & y");
        assert_eq!(p.children, vec![InlineNode::Text("<b>x</b> & y".into())]);

        let parsed = ParagraphBlock::from_markup(style, "<b>x</b> &amp; y");
        assert_eq!(parsed.plain_text(), "x & y");
    }

    #[test]
    fn test_empty_grid() {
        let grid = GridTable::empty(Arc::new(TableStyle::default()));
        assert!(grid.is_empty());
        assert!(grid.header().is_empty());
        assert_eq!(grid.total_width(), 0.0);
    }
}
