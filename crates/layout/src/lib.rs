use insight_style::StyleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Node has a height of {0:.2} which exceeds the total page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Style error: {0}")]
    Style(#[from] StyleError),
}

pub mod algorithms;
pub mod config;
pub mod elements;
pub mod fonts;
pub mod paginator;
pub mod table;
pub mod text;

pub use self::config::LayoutConfig;
pub use self::elements::{
    ImageElement, LayoutElement, LineElement, PositionedElement, RectElement, TextElement,
};
pub use self::fonts::{measure_text, FontMetrics};
pub use self::paginator::{Page, Paginator};
pub use self::table::TableLayoutEngine;

pub use insight_types::geometry::{Rect, Size};

#[cfg(test)]
mod test_utils;
