use crate::encoding::{to_pdf_text_string, to_win_ansi};
use crate::error::RenderError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use insight_idf::RasterImage;
use insight_layout::{
    ImageElement, LayoutElement, LineElement, PositionedElement, RectElement, TextElement,
};
use insight_style::border::LineStyle;
use insight_style::stylesheet::PageLayout;
use insight_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Write;
use std::sync::Arc;

/// Metadata written to the document information dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            producer: concat!("insight-report ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fonts and images referenced by the pages, named in order of first use so
/// that identical input always serializes to identical bytes.
#[derive(Default)]
struct SharedResources {
    fonts: Vec<(&'static str, String)>,
    images: Vec<(usize, String, ObjectId)>,
}

impl SharedResources {
    fn font_alias(&mut self, base_font: &'static str) -> String {
        if let Some((_, alias)) = self.fonts.iter().find(|(name, _)| *name == base_font) {
            return alias.clone();
        }
        let alias = format!("F{}", self.fonts.len() + 1);
        self.fonts.push((base_font, alias.clone()));
        alias
    }

    fn image_name(
        &mut self,
        document: &mut Document,
        image: &Arc<RasterImage>,
    ) -> Result<String, RenderError> {
        let key = Arc::as_ptr(image) as usize;
        if let Some((_, name, _)) = self.images.iter().find(|(ptr, _, _)| *ptr == key) {
            return Ok(name.clone());
        }
        let id = add_image_xobject(document, image)?;
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((key, name.clone(), id));
        Ok(name)
    }
}

/// Serializes positioned pages into a PDF document with `lopdf`.
///
/// Text is drawn with the standard Type1 fonts in WinAnsiEncoding, so no font
/// programs are embedded. Content and image streams are Flate compressed.
pub struct LopdfDocumentRenderer {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_width: f32,
    page_height: f32,
    resources: SharedResources,
}

impl LopdfDocumentRenderer {
    pub fn new(page: &PageLayout) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            page_width: page.width(),
            page_height: page.height(),
            resources: SharedResources::default(),
        }
    }

    /// Renders every page and returns the finished document bytes.
    pub fn render_document(
        page: &PageLayout,
        pages: &[Vec<PositionedElement>],
        info: &DocumentInfo,
    ) -> Result<Vec<u8>, RenderError> {
        let mut renderer = Self::new(page);
        for elements in pages {
            renderer.render_page(elements)?;
        }
        renderer.finish(info)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn render_page(&mut self, elements: &[PositionedElement]) -> Result<(), RenderError> {
        let mut page_ctx = PageContext::new(
            self.page_height,
            &mut self.document,
            &mut self.resources,
        );
        for el in elements {
            page_ctx.draw_element(el)?;
        }
        let content = page_ctx.finish();

        let content_id = self
            .document
            .add_object(compressed_stream(Dictionary::new(), &content.encode()?)?);
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_width.into(), self.page_height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        log::debug!(
            "Rendered page {} with {} elements.",
            self.page_ids.len(),
            elements.len()
        );
        Ok(())
    }

    /// Writes the shared resources, page tree, catalog and info dictionary, then
    /// serializes the document.
    pub fn finish(mut self, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        let mut font_dict = Dictionary::new();
        for (base_font, alias) in &self.resources.fonts {
            let font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => *base_font,
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(alias.as_bytes(), font_id);
        }
        let mut xobject_dict = Dictionary::new();
        for (_, name, id) in &self.resources.images {
            xobject_dict.set(name.as_bytes(), *id);
        }
        let mut resources = dictionary! { "Font" => font_dict };
        if !xobject_dict.is_empty() {
            resources.set("XObject", xobject_dict);
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.document.add_object(dictionary! {
            "Title" => Object::String(to_pdf_text_string(&info.title), StringFormat::Literal),
            "Producer" => Object::String(to_pdf_text_string(&info.producer), StringFormat::Literal),
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        log::debug!(
            "Serialized {} pages into {} bytes.",
            self.page_ids.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn compressed_stream(mut dict: Dictionary, data: &[u8]) -> Result<Stream, RenderError> {
    dict.set("Filter", "FlateDecode");
    Ok(Stream::new(dict, compress(data)?))
}

fn add_image_xobject(document: &mut Document, image: &RasterImage) -> Result<ObjectId, RenderError> {
    let pixels = image.pixel_width as usize * image.pixel_height as usize;
    if image.rgb.len() != pixels * 3 {
        return Err(RenderError::Other(format!(
            "Image data has {} bytes, expected {} for {}x{} RGB.",
            image.rgb.len(),
            pixels * 3,
            image.pixel_width,
            image.pixel_height
        )));
    }

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.pixel_width as i64,
        "Height" => image.pixel_height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if let Some(alpha) = &image.alpha {
        if alpha.len() != pixels {
            return Err(RenderError::Other(format!(
                "Alpha channel has {} bytes, expected {}.",
                alpha.len(),
                pixels
            )));
        }
        let mask = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.pixel_width as i64,
            "Height" => image.pixel_height as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        };
        let mask_id = document.add_object(compressed_stream(mask, alpha)?);
        dict.set("SMask", mask_id);
    }
    Ok(document.add_object(compressed_stream(dict, &image.rgb)?))
}

// --- Internal Page Drawing Context ---

struct PageContext<'a> {
    page_height: f32,
    content: Content,
    state: PageRenderState,
    document: &'a mut Document,
    resources: &'a mut SharedResources,
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_name: String,
    font_size: f32,
    word_spacing: f32,
    fill_color: Option<Color>,
    stroke: Option<LineStyle>,
}

impl<'a> PageContext<'a> {
    fn new(
        page_height: f32,
        document: &'a mut Document,
        resources: &'a mut SharedResources,
    ) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
            document,
            resources,
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => self.draw_rect(rect, el),
            LayoutElement::Line(line) => self.draw_line(line, el),
            LayoutElement::Image(image) => self.draw_image(image, el)?,
        }
        Ok(())
    }

    fn set_fill_color(&mut self, color: &Color) {
        if self.state.fill_color.as_ref() != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(*color);
        }
    }

    fn set_stroke(&mut self, stroke: &LineStyle) {
        let current = self.state.stroke;
        if current.map(|s| s.width) != Some(stroke.width) {
            self.push("w", vec![stroke.width.into()]);
        }
        if current.map(|s| s.color) != Some(stroke.color) {
            let [r, g, b] = stroke.color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
        }
        self.state.stroke = Some(*stroke);
    }

    fn set_font(&mut self, text: &TextElement) {
        let alias = self.resources.font_alias(text.font.base_font_name());
        if self.state.font_name != alias || self.state.font_size != text.font_size {
            self.push(
                "Tf",
                vec![Object::Name(alias.as_bytes().to_vec()), text.font_size.into()],
            );
            self.state.font_name = alias;
            self.state.font_size = text.font_size;
        }
    }

    fn set_word_spacing(&mut self, spacing: f32) {
        if self.state.word_spacing != spacing {
            self.push("Tw", vec![spacing.into()]);
            self.state.word_spacing = spacing;
        }
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        self.set_fill_color(&rect.fill);
        let y = self.page_height - (el.y + el.height);
        self.push(
            "re",
            vec![el.x.into(), y.into(), el.width.into(), el.height.into()],
        );
        self.push("f", vec![]);
    }

    fn draw_line(&mut self, line: &LineElement, el: &PositionedElement) {
        self.set_stroke(&line.stroke);
        let y1 = self.page_height - el.y;
        let y2 = self.page_height - (el.y + el.height);
        self.push("m", vec![el.x.into(), y1.into()]);
        self.push("l", vec![(el.x + el.width).into(), y2.into()]);
        self.push("S", vec![]);
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(text);
        self.set_fill_color(&text.color);
        self.set_word_spacing(text.word_spacing);
        // Centre the glyph box in the line box, then drop to the baseline.
        let baseline_y = el.y + (el.height - text.font_size) / 2.0 + text.font_size * 0.8;
        let pdf_y = self.page_height - baseline_y;
        self.push("Td", vec![el.x.into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) -> Result<(), RenderError> {
        let name = self.resources.image_name(self.document, &image.image)?;
        let y = self.page_height - (el.y + el.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                el.width.into(),
                0.into(),
                0.into(),
                el.height.into(),
                el.x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(())
    }
}
