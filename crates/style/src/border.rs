use insight_types::Color;
use serde::{Deserialize, Serialize};

/// A stroked line: used for table grids and rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
}

impl LineStyle {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}
