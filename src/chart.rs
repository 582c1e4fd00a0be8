//! Conversion of chart figures into fixed-size raster image blocks.

use crate::error::{ExportError, RasterizationError};
use insight_idf::{Block, ImageBlock, RasterImage};
use insight_types::inch;
use std::fmt;
use std::sync::Arc;

/// A chart object that can export itself as a static PNG.
///
/// `scale` multiplies the figure's native pixel size, so a scale of 2.0
/// produces an image with twice the resolution in each direction.
pub trait Figure: fmt::Debug + Send + Sync {
    fn to_png(&self, scale: f32) -> Result<Vec<u8>, ExportError>;
}

/// A figure that was rendered ahead of time, for hosts that draw charts
/// out of process. The scale factor is ignored.
#[derive(Clone, PartialEq)]
pub struct PngFigure {
    bytes: Arc<[u8]>,
}

impl PngFigure {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for PngFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PngFigure")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Figure for PngFigure {
    fn to_png(&self, _scale: f32) -> Result<Vec<u8>, ExportError> {
        Ok(self.bytes.to_vec())
    }
}

/// Exports figures at a fixed scale and wraps them as image blocks of a fixed
/// display size. The aspect ratio of the export is not preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRasterizer {
    pub scale: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ChartRasterizer {
    fn default() -> Self {
        Self {
            scale: 2.0,
            width: inch(5.5),
            height: inch(3.5),
        }
    }
}

impl ChartRasterizer {
    pub fn new(scale: f32, width: f32, height: f32) -> Self {
        Self {
            scale,
            width,
            height,
        }
    }

    pub fn rasterize(&self, figure: &dyn Figure) -> Result<Block, RasterizationError> {
        let png = figure.to_png(self.scale)?;
        let image = decode_raster(&png)?;
        log::debug!(
            "Rasterized chart at {}x{} px into a {:.1}x{:.1}pt image.",
            image.pixel_width,
            image.pixel_height,
            self.width,
            self.height
        );
        Ok(Block::Image(ImageBlock {
            image: Arc::new(image),
            width: self.width,
            height: self.height,
        }))
    }
}

/// Decodes exported image bytes into separate RGB and alpha planes. A fully
/// opaque image carries no alpha plane.
pub fn decode_raster(bytes: &[u8]) -> Result<RasterImage, RasterizationError> {
    if bytes.is_empty() {
        return Err(RasterizationError::Empty);
    }
    let decoded = image::load_from_memory(bytes)?;
    let has_alpha = decoded.color().has_alpha();
    let rgba = decoded.to_rgba8();
    let (pixel_width, pixel_height) = rgba.dimensions();
    if pixel_width == 0 || pixel_height == 0 {
        return Err(RasterizationError::Empty);
    }

    let pixels = pixel_width as usize * pixel_height as usize;
    let mut rgb = Vec::with_capacity(pixels * 3);
    let mut alpha = Vec::with_capacity(if has_alpha { pixels } else { 0 });
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        rgb.extend_from_slice(&[r, g, b]);
        if has_alpha {
            alpha.push(a);
        }
    }
    let alpha = (has_alpha && alpha.iter().any(|a| *a != u8::MAX)).then_some(alpha);

    Ok(RasterImage {
        pixel_width,
        pixel_height,
        rgb,
        alpha,
    })
}
