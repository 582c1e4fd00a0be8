//! Places the report body onto fixed-size pages.

use crate::algorithms::pagination::check_child_fit;
use crate::elements::{
    ImageElement, LayoutElement, LineElement, PositionedElement, RectElement, TextElement,
};
use crate::fonts::measure_text;
use crate::text::layout_paragraph;
use crate::LayoutError;
use insight_idf::{Block, GridRow, GridTable, ImageBlock, ParagraphBlock};
use insight_style::stylesheet::PageLayout;
use insight_types::geometry::Rect;

/// The elements of one page, in paint order.
pub type Page = Vec<PositionedElement>;

pub struct Paginator {
    page: PageLayout,
}

struct PageCursor {
    pages: Vec<Page>,
    current: Page,
    y: f32,
    bounds: Rect,
}

impl PageCursor {
    fn at_top(&self) -> bool {
        self.y <= 0.0
    }

    fn fits(&self, height: f32) -> bool {
        !check_child_fit(self.y, height, self.bounds).should_break
    }

    fn new_page(&mut self) {
        log::debug!(
            "Page {} complete with {} elements.",
            self.pages.len() + 1,
            self.current.len()
        );
        self.pages.push(std::mem::take(&mut self.current));
        self.y = 0.0;
    }

    fn abs_y(&self) -> f32 {
        self.bounds.y + self.y
    }

    fn push(&mut self, x: f32, y: f32, width: f32, height: f32, element: LayoutElement) {
        self.current.push(PositionedElement {
            x,
            y,
            width,
            height,
            element,
        });
    }
}

impl Paginator {
    pub fn new(page: PageLayout) -> Self {
        Self { page }
    }

    /// Lays out `blocks` in order. Always yields at least one page.
    pub fn paginate(&self, blocks: &[Block]) -> Result<Vec<Page>, LayoutError> {
        let mut cursor = PageCursor {
            pages: Vec::new(),
            current: Vec::new(),
            y: 0.0,
            bounds: Rect::new(
                self.page.margins.left,
                self.page.margins.top,
                self.page.content_width(),
                self.page.content_height(),
            ),
        };

        for block in blocks {
            match block {
                Block::Paragraph(p) => place_paragraph(&mut cursor, p),
                Block::Spacer { height } => place_spacer(&mut cursor, *height),
                Block::Image(image) => place_image(&mut cursor, image)?,
                Block::Table(grid) => place_table(&mut cursor, grid)?,
            }
        }
        cursor.new_page();
        Ok(cursor.pages)
    }
}

fn place_paragraph(cursor: &mut PageCursor, paragraph: &ParagraphBlock) {
    let style = &paragraph.style;
    let lines = layout_paragraph(paragraph, cursor.bounds.width);
    if lines.is_empty() {
        return;
    }
    if !cursor.at_top() {
        cursor.y += style.space_before;
    }
    for line in &lines {
        if !cursor.fits(style.leading) && !cursor.at_top() {
            cursor.new_page();
        }
        let y = cursor.abs_y();
        for fragment in &line.fragments {
            let spaces = fragment.text.chars().filter(|c| *c == ' ').count();
            let width = fragment.width + spaces as f32 * line.word_spacing;
            cursor.push(
                cursor.bounds.x + fragment.x,
                y,
                width,
                style.leading,
                LayoutElement::Text(TextElement {
                    content: fragment.text.clone(),
                    font: fragment.face,
                    font_size: style.font_size,
                    color: style.color,
                    word_spacing: line.word_spacing,
                }),
            );
        }
        cursor.y += style.leading;
    }
    cursor.y += style.space_after;
}

fn place_spacer(cursor: &mut PageCursor, height: f32) {
    // Gaps never open a page.
    if cursor.at_top() {
        return;
    }
    if cursor.fits(height) {
        cursor.y += height;
    } else {
        cursor.new_page();
    }
}

fn place_image(cursor: &mut PageCursor, image: &ImageBlock) -> Result<(), LayoutError> {
    if image.height > cursor.bounds.height {
        return Err(LayoutError::ElementTooLarge(image.height, cursor.bounds.height));
    }
    if !cursor.fits(image.height) && !cursor.at_top() {
        cursor.new_page();
    }
    let x = cursor.bounds.x + ((cursor.bounds.width - image.width) / 2.0).max(0.0);
    let y = cursor.abs_y();
    cursor.push(
        x,
        y,
        image.width,
        image.height,
        LayoutElement::Image(ImageElement {
            image: image.image.clone(),
        }),
    );
    cursor.y += image.height;
    Ok(())
}

fn place_table(cursor: &mut PageCursor, grid: &GridTable) -> Result<(), LayoutError> {
    if grid.is_empty() {
        return Ok(());
    }
    let header = grid.header();
    let body = grid.body();
    let header_height: f32 = header.iter().map(|r| r.height).sum();

    let opening = header_height + body.first().map(|r| r.height).unwrap_or(0.0);
    if opening > cursor.bounds.height {
        return Err(LayoutError::ElementTooLarge(opening, cursor.bounds.height));
    }
    if !cursor.fits(opening) && !cursor.at_top() {
        cursor.new_page();
    }

    let x = cursor.bounds.x + ((cursor.bounds.width - grid.total_width()) / 2.0).max(0.0);
    let mut segment: Vec<(usize, f32)> = Vec::new();

    let place_row = |cursor: &mut PageCursor, segment: &mut Vec<(usize, f32)>, index: usize| {
        let y = cursor.abs_y();
        draw_row(cursor, grid, &grid.rows[index], x, y);
        segment.push((index, y));
        cursor.y += grid.rows[index].height;
    };

    for i in 0..header.len() {
        place_row(cursor, &mut segment, i);
    }
    for (offset, row) in body.iter().enumerate() {
        if !cursor.fits(row.height) {
            if header_height + row.height > cursor.bounds.height {
                return Err(LayoutError::ElementTooLarge(
                    header_height + row.height,
                    cursor.bounds.height,
                ));
            }
            draw_rules(cursor, grid, &segment, x);
            segment.clear();
            cursor.new_page();
            for i in 0..header.len() {
                place_row(cursor, &mut segment, i);
            }
        }
        place_row(cursor, &mut segment, header.len() + offset);
    }
    draw_rules(cursor, grid, &segment, x);
    Ok(())
}

fn draw_row(cursor: &mut PageCursor, grid: &GridTable, row: &GridRow, x: f32, y: f32) {
    let style = &grid.style;
    if let Some(fill) = row.background {
        cursor.push(
            x,
            y,
            grid.total_width(),
            row.height,
            LayoutElement::Rectangle(RectElement { fill }),
        );
    }

    let (face, size, color) = if row.is_header() {
        (style.header_font, style.header_font_size, style.header_color)
    } else {
        (style.body_font, style.body_font_size, style.body_color)
    };
    let line_height = size * style.line_height;

    let mut cell_x = x;
    for (cell, width) in row.cells.iter().zip(&grid.column_widths) {
        let content_height = cell.lines.len() as f32 * line_height;
        let offset = style
            .vertical_align
            .offset(row.height - 2.0 * style.padding, content_height);
        for (k, line) in cell.lines.iter().enumerate() {
            cursor.push(
                cell_x + style.padding,
                y + style.padding + offset + k as f32 * line_height,
                measure_text(face, size, line),
                line_height,
                LayoutElement::Text(TextElement {
                    content: line.clone(),
                    font: face,
                    font_size: size,
                    color,
                    word_spacing: 0.0,
                }),
            );
        }
        cell_x += width;
    }
}

/// Grid lines and the header rule for the rows of one page.
fn draw_rules(cursor: &mut PageCursor, grid: &GridTable, segment: &[(usize, f32)], x: f32) {
    let (Some(&(_, top)), Some(&(last, last_y))) = (segment.first(), segment.last()) else {
        return;
    };
    let style = &grid.style;
    let bottom = last_y + grid.rows[last].height;
    let width = grid.total_width();

    let mut horizontal: Vec<f32> = segment.iter().map(|&(_, y)| y).collect();
    horizontal.push(bottom);
    for y in horizontal {
        cursor.push(x, y, width, 0.0, LayoutElement::Line(LineElement { stroke: style.grid }));
    }
    let mut column_x = x;
    for edge in std::iter::once(0.0).chain(grid.column_widths.iter().copied()) {
        column_x += edge;
        cursor.push(
            column_x,
            top,
            0.0,
            bottom - top,
            LayoutElement::Line(LineElement { stroke: style.grid }),
        );
    }
    for &(index, y) in segment {
        if grid.rows[index].is_header() && index + 1 == grid.header_rows {
            cursor.push(
                x,
                y + grid.rows[index].height,
                width,
                0.0,
                LayoutElement::Line(LineElement {
                    stroke: style.header_rule,
                }),
            );
        }
    }
}
