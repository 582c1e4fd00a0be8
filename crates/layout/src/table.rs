//! Sizing and styling of data grids.

use crate::config::LayoutConfig;
use crate::fonts::measure_text;
use crate::text::wrap_text;
use insight_idf::{Block, GridCell, GridRow, GridTable, RowRole};
use insight_style::font::FontFace;
use insight_style::stylesheet::{Stylesheet, TableStyle};
use insight_types::{CellValue, Series, Table};
use std::sync::Arc;

/// Turns a [`Table`] into a sized [`GridTable`] whose columns exactly fill the content width.
///
/// Pure: the same table and stylesheet always produce the same grid.
#[derive(Debug, Clone)]
pub struct TableLayoutEngine {
    style: Arc<TableStyle>,
    content_width: f32,
    config: LayoutConfig,
}

impl TableLayoutEngine {
    pub fn new(stylesheet: &Stylesheet, config: LayoutConfig) -> Self {
        Self {
            style: Arc::new(stylesheet.table.clone()),
            content_width: stylesheet.page.content_width(),
            config,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Cell text as shown in the grid: nulls are blank and long values are cut to the cap.
    pub fn format_cell(&self, value: &CellValue, compact: bool) -> String {
        if value.is_null() {
            return String::new();
        }
        truncate(&value.to_string(), self.config.cell_chars(compact))
    }

    /// Column widths from the longest text in each column, clamped, then scaled to the content width.
    ///
    /// `rows` includes the header row. Returns no widths when there are no columns.
    pub fn resolve_column_widths(&self, rows: &[Vec<String>]) -> Vec<f32> {
        let num_columns = rows.first().map(Vec::len).unwrap_or(0);
        if num_columns == 0 {
            return Vec::new();
        }
        let natural: Vec<f32> = (0..num_columns)
            .map(|i| {
                let len = rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|text| text.chars().count())
                    .max()
                    .unwrap_or(0);
                (len as f32 * self.config.char_width)
                    .clamp(self.config.min_column_width, self.config.max_column_width)
            })
            .collect();
        let total: f32 = natural.iter().sum();
        if total <= 0.0 {
            return natural;
        }
        let scale = self.content_width / total;
        natural.into_iter().map(|w| w * scale).collect()
    }

    pub fn layout(&self, table: &Table, compact: bool) -> Block {
        Block::Table(self.layout_grid(table, compact))
    }

    /// A single named column is laid out as a one-column table.
    pub fn layout_series(&self, series: &Series, compact: bool) -> Block {
        self.layout(&Table::from(series.clone()), compact)
    }

    pub fn layout_grid(&self, table: &Table, compact: bool) -> GridTable {
        if table.num_columns() == 0 {
            return GridTable::empty(self.style.clone());
        }

        let mut texts: Vec<Vec<String>> = Vec::with_capacity(table.num_rows() + 1);
        texts.push(table.columns().to_vec());
        texts.extend(
            table
                .rows()
                .iter()
                .map(|row| row.iter().map(|v| self.format_cell(v, compact)).collect()),
        );
        let column_widths = self.resolve_column_widths(&texts);

        let rows = texts
            .into_iter()
            .enumerate()
            .map(|(i, cells)| {
                let role = if i == 0 {
                    RowRole::Header
                } else {
                    RowRole::Body { index: i - 1 }
                };
                self.build_row(role, cells, &column_widths)
            })
            .collect();

        log::debug!(
            "Laid out grid with {} columns and {} body rows.",
            table.num_columns(),
            table.num_rows()
        );

        GridTable {
            column_widths,
            rows,
            header_rows: 1,
            style: self.style.clone(),
        }
    }

    fn build_row(&self, role: RowRole, cells: Vec<String>, widths: &[f32]) -> GridRow {
        let style = &self.style;
        let (face, size, background) = match role {
            RowRole::Header => (
                style.header_font,
                style.header_font_size,
                Some(style.header_background),
            ),
            RowRole::Body { index } => (
                style.body_font,
                style.body_font_size,
                style.row_background(index),
            ),
        };

        let cells: Vec<GridCell> = cells
            .into_iter()
            .zip(widths)
            .map(|(text, width)| {
                let inner = (width - 2.0 * style.padding).max(0.0);
                let lines = self.cell_lines(&text, face, size, inner);
                GridCell { text, lines }
            })
            .collect();

        let max_lines = cells.iter().map(|c| c.lines.len()).max().unwrap_or(0).max(1);
        let height = max_lines as f32 * size * style.line_height + 2.0 * style.padding;

        GridRow {
            role,
            cells,
            height,
            background,
        }
    }

    /// Wrapped lines of one cell, bounded so that a header and any row fit on a page.
    fn cell_lines(&self, text: &str, face: FontFace, size: f32, inner: f32) -> Vec<String> {
        // Columns narrower than a glyph keep the text on one overflowing line.
        if inner < measure_text(face, size, "W") {
            let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
            return if line.is_empty() { Vec::new() } else { vec![line] };
        }
        let mut lines = wrap_text(text, face, size, inner);
        let max_lines = self.config.max_cell_lines.max(1);
        if lines.len() > max_lines {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                last.push_str("...");
            }
        }
        lines
    }
}

fn truncate(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }
    let mut out: String = text.chars().take(cap.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
