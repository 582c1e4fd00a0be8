pub mod builder;
pub mod wrapper;

use crate::text::builder::TextBuilder;
use crate::text::wrapper::{break_lines, LineLayout};
use insight_idf::ParagraphBlock;
use insight_style::font::FontFace;
use insight_style::text::TextAlign;

/// Breaks a paragraph into aligned lines no wider than `max_width`.
pub fn layout_paragraph(paragraph: &ParagraphBlock, max_width: f32) -> Vec<LineLayout> {
    let style = &paragraph.style;
    let mut builder = TextBuilder::new(style.font);
    builder.process_inlines(&paragraph.children);
    break_lines(&builder.finish(), style.font_size, max_width, style.alignment)
}

/// Wraps plain text (as found in grid cells) into lines. Newlines force a break.
pub fn wrap_text(text: &str, face: FontFace, font_size: f32, max_width: f32) -> Vec<String> {
    let mut builder = TextBuilder::new(face);
    for (i, segment) in text.split('\n').enumerate() {
        if i > 0 {
            builder.push_break();
        }
        builder.push_text(segment, face);
    }
    break_lines(&builder.finish(), font_size, max_width, TextAlign::Left)
        .iter()
        .map(LineLayout::text)
        .collect()
}
