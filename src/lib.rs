//! Report assembly for data analysis sessions.
//!
//! A [`ReportAssembler`] takes a dataset overview, a snapshot of the data and
//! the ordered items of a [`ReportCart`] (tables, charts, scalar values, each
//! with markdown analysis) and produces a paginated US Letter PDF.
//!
//! ```no_run
//! use insight_report::{CellValue, GenerationError, ReportAssembler, ReportItem, Table};
//!
//! let snapshot = Table::new(vec!["region".into()], vec![vec!["North".into()]])?;
//! let items = vec![ReportItem::new("How many rows?", "result = len(df)", CellValue::from(1), "**One** row.")];
//! let titles = |query: &str| -> Result<String, GenerationError> { Ok(query.to_uppercase()) };
//! let pdf = ReportAssembler::default().assemble("sales.csv", "A small table.", &snapshot, &items, &titles)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assembler;
pub mod cart;
pub mod chart;
pub mod error;
pub mod markup;
pub mod options;
pub mod prompts;

pub use assembler::{ReportAssembler, TitleGenerator};
pub use cart::{ItemKind, ItemResult, ReportCart, ReportItem};
pub use chart::{ChartRasterizer, Figure, PngFigure};
pub use error::{ExportError, GenerationError, RasterizationError, ReportError};
pub use markup::translate;
pub use options::ReportOptions;
pub use prompts::{PromptedTitles, TextGenerator};

pub use insight_layout::TableLayoutEngine;
pub use insight_types::{CellValue, ColumnType, Series, Table, TableError};
