use crate::paginator::{Page, Paginator};
use crate::{LayoutElement, LayoutError, PositionedElement, TextElement};
use insight_idf::{Block, InlineNode, ParagraphBlock};
use insight_style::dimension::{Margins, PageSize};
use insight_style::font::FontFace;
use insight_style::stylesheet::{PageLayout, ParagraphStyle};
use insight_style::text::TextAlign;
use std::sync::Arc;

/// A page with `Margins::all(margin)` and the given size.
pub fn page(width: f32, height: f32, margin: f32) -> PageLayout {
    PageLayout {
        size: PageSize::Custom { width, height },
        margins: Margins::all(margin),
    }
}

/// Helvetica 10pt on 12pt leading, no paragraph spacing.
pub fn test_style(align: TextAlign) -> Arc<ParagraphStyle> {
    Arc::new(ParagraphStyle::new("Test", FontFace::default(), 10.0, 12.0).aligned(align))
}

pub fn create_paragraph(text: &str, style: Arc<ParagraphStyle>) -> Block {
    let mut children = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            children.push(InlineNode::LineBreak);
        }
        if !line.is_empty() {
            children.push(InlineNode::Text(line.to_string()));
        }
    }
    Block::Paragraph(ParagraphBlock { style, children })
}

pub fn paginate_test_blocks(layout: PageLayout, blocks: Vec<Block>) -> Result<Vec<Page>, LayoutError> {
    Paginator::new(layout).paginate(&blocks)
}

pub fn texts(page: &[PositionedElement]) -> Vec<&TextElement> {
    page.iter().filter_map(PositionedElement::text).collect()
}

pub fn find_first_text_box_with_content<'a>(
    elements: &'a [PositionedElement],
    content: &str,
) -> Option<&'a PositionedElement> {
    elements.iter().find(|el| {
        if let LayoutElement::Text(TextElement {
            content: text_content,
            ..
        }) = &el.element
        {
            text_content.contains(content)
        } else {
            false
        }
    })
}
