use insight_types::inch;

/// Constants that govern how data grids are sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Lower bound for a column's natural width before scaling to the page.
    pub min_column_width: f32,
    /// Upper bound for a column's natural width before scaling to the page.
    pub max_column_width: f32,
    /// Estimated width of one character when sizing columns.
    pub char_width: f32,
    /// Longest cell text kept verbatim in compact grids.
    pub compact_cell_chars: usize,
    /// Longest cell text kept verbatim in full grids.
    pub full_cell_chars: usize,
    /// Most wrapped lines a grid cell may take. The last kept line ends in `...`.
    pub max_cell_lines: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_column_width: inch(0.6),
            max_column_width: inch(2.0),
            char_width: inch(0.075),
            compact_cell_chars: 40,
            full_cell_chars: 100,
            max_cell_lines: 8,
        }
    }
}

impl LayoutConfig {
    pub fn cell_chars(&self, compact: bool) -> usize {
        if compact {
            self.compact_cell_chars
        } else {
            self.full_cell_chars
        }
    }
}
