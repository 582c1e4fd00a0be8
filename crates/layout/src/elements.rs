use insight_idf::RasterImage;
use insight_style::border::LineStyle;
use insight_style::font::FontFace;
use insight_types::Color;
use std::sync::Arc;

/// An element with its final page position. Coordinates are in points from the
/// top-left corner of the page, growing downwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Line(LineElement),
    Image(ImageElement),
}

/// One run of text in a single font, occupying a line box of `height`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font: FontFace,
    pub font_size: f32,
    pub color: Color,
    /// Extra space added to every space character, used for justification.
    pub word_spacing: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectElement {
    pub fill: Color,
}

/// A stroke from `(x, y)` to `(x + width, y + height)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineElement {
    pub stroke: LineStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub image: Arc<RasterImage>,
}

impl PositionedElement {
    pub fn text(&self) -> Option<&TextElement> {
        match &self.element {
            LayoutElement::Text(t) => Some(t),
            _ => None,
        }
    }
}
