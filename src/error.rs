use insight_layout::LayoutError;
use insight_render_lopdf::RenderError;
use insight_style::StyleError;
use thiserror::Error;

/// The only whole-report failure: the document could not be laid out or serialized.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Stylesheet is invalid or missing required parts: {0}")]
    Style(#[from] StyleError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// Failure of a text-generation call (titles, narrative analysis).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Text generation failed: {0}")]
pub struct GenerationError(pub String);

impl From<&str> for GenerationError {
    fn from(s: &str) -> Self {
        GenerationError(s.to_string())
    }
}

/// Failure of a figure's static image export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Figure export failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RasterizationError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Exported chart could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Exported chart has no pixels.")]
    Empty,
}
