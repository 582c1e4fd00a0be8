pub mod color;
pub mod geometry;
pub mod table;

pub use color::Color;
pub use geometry::{inch, Rect, Size, POINTS_PER_INCH};
pub use table::{CellValue, ColumnType, Series, Table, TableError};
