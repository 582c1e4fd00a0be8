//! Defines the stylesheet that holds all styling information for one report.

use crate::border::LineStyle;
use crate::dimension::{Margins, PageSize};
use crate::error::StyleError;
use crate::font::{FontFace, FontFamily, FontStyle, FontWeight};
use crate::text::{TextAlign, VerticalAlign};
use insight_types::{inch, Color};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub const MAIN_TITLE: &str = "MainTitle";
pub const SECTION_TITLE: &str = "SectionTitle";
pub const HEADING_1: &str = "h1";
pub const BODY_TEXT: &str = "BodyText";
pub const ANALYSIS_TEXT: &str = "AnalysisText";

/// Font, spacing and alignment for one kind of paragraph.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub name: String,
    pub font: FontFace,
    pub font_size: f32,
    /// Distance between consecutive baselines.
    pub leading: f32,
    #[serde(default)]
    pub alignment: TextAlign,
    #[serde(default)]
    pub space_before: f32,
    #[serde(default)]
    pub space_after: f32,
    #[serde(default)]
    pub color: Color,
}

impl ParagraphStyle {
    pub fn new(name: impl Into<String>, font: FontFace, font_size: f32, leading: f32) -> Self {
        Self {
            name: name.into(),
            font,
            font_size,
            leading,
            alignment: TextAlign::Left,
            space_before: 0.0,
            space_after: 0.0,
            color: Color::BLACK,
        }
    }

    pub fn aligned(mut self, alignment: TextAlign) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spaced(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

/// The visual contract shared by every data grid in a report.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TableStyle {
    pub header_background: Color,
    pub header_color: Color,
    pub header_font: FontFace,
    pub header_font_size: f32,
    pub body_color: Color,
    pub body_font: FontFace,
    pub body_font_size: f32,
    /// Body rows cycle through these backgrounds, starting with the first entry.
    pub row_backgrounds: Vec<Color>,
    pub grid: LineStyle,
    pub header_rule: LineStyle,
    pub padding: f32,
    pub vertical_align: VerticalAlign,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        let helvetica = FontFace::new(FontFamily::Helvetica, FontWeight::Regular, FontStyle::Normal);
        Self {
            header_background: Color::rgb(0x2F, 0x4F, 0x4F),
            header_color: Color::WHITE_SMOKE,
            header_font: helvetica.with_weight(FontWeight::Bold),
            header_font_size: 10.0,
            body_color: Color::BLACK,
            body_font: helvetica,
            body_font_size: 9.0,
            row_backgrounds: vec![Color::WHITE, Color::WHITE_SMOKE],
            grid: LineStyle::new(0.25, Color::GREY),
            header_rule: LineStyle::new(2.0, Color::rgb(0x0E, 0x11, 0x17)),
            padding: 4.0,
            vertical_align: VerticalAlign::Middle,
            line_height: 1.2,
        }
    }
}

impl TableStyle {
    /// Background of the body row at `index` (0 = first data row).
    pub fn row_background(&self, index: usize) -> Option<Color> {
        if self.row_backgrounds.is_empty() {
            None
        } else {
            Some(self.row_backgrounds[index % self.row_backgrounds.len()])
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default = "PageLayout::report_margins")]
    pub margins: Margins,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            size: PageSize::Letter,
            margins: Self::report_margins(),
        }
    }
}

impl PageLayout {
    /// 0.75in top and bottom, 0.5in left and right.
    pub fn report_margins() -> Margins {
        Margins::symmetric(inch(0.75), inch(0.5))
    }

    pub fn width(&self) -> f32 {
        self.size.dimensions_pt().0
    }

    pub fn height(&self) -> f32 {
        self.size.dimensions_pt().1
    }

    pub fn content_width(&self) -> f32 {
        (self.width() - self.margins.horizontal()).max(0.0)
    }

    pub fn content_height(&self) -> f32 {
        (self.height() - self.margins.vertical()).max(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub page: PageLayout,
    /// Named paragraph styles.
    pub styles: HashMap<String, Arc<ParagraphStyle>>,
    pub table: TableStyle,
}

impl Stylesheet {
    /// The stylesheet every report is built with: Times for prose, Helvetica for headings and grids.
    pub fn report_default(page: PageLayout) -> Self {
        let times = FontFace::new(FontFamily::Times, FontWeight::Regular, FontStyle::Normal);
        let times_bold = times.with_weight(FontWeight::Bold);
        let helvetica_bold =
            FontFace::new(FontFamily::Helvetica, FontWeight::Bold, FontStyle::Normal);

        let mut sheet = Self {
            page,
            styles: HashMap::new(),
            table: TableStyle::default(),
        };
        sheet.add(ParagraphStyle::new(MAIN_TITLE, times_bold, 22.0, 22.0).spaced(0.0, 14.0));
        sheet.add(ParagraphStyle::new(SECTION_TITLE, times_bold, 16.0, 18.0).spaced(12.0, 8.0));
        sheet.add(ParagraphStyle::new(HEADING_1, helvetica_bold, 18.0, 22.0).spaced(0.0, 6.0));
        sheet.add(
            ParagraphStyle::new(BODY_TEXT, times, 14.0, 17.5)
                .aligned(TextAlign::Justify)
                .spaced(6.0, 12.0),
        );
        sheet.add(
            ParagraphStyle::new(ANALYSIS_TEXT, times, 14.0, 17.5)
                .aligned(TextAlign::Justify)
                .spaced(0.0, 12.0),
        );
        sheet
    }

    pub fn add(&mut self, style: ParagraphStyle) {
        self.styles.insert(style.name.clone(), Arc::new(style));
    }

    /// Looks up a paragraph style by its name.
    pub fn get_style(&self, name: &str) -> Result<&Arc<ParagraphStyle>, StyleError> {
        self.styles
            .get(name)
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_content_area() {
        let page = PageLayout::default();
        assert_eq!(page.content_width(), 540.0);
        assert_eq!(page.content_height(), 684.0);
    }

    #[test]
    fn test_report_styles() {
        let sheet = Stylesheet::report_default(PageLayout::default());
        let title = sheet.get_style(MAIN_TITLE).unwrap();
        assert_eq!(title.font.base_font_name(), "Times-Bold");
        assert_eq!(title.font_size, 22.0);
        assert_eq!(title.leading, 22.0);
        assert_eq!(sheet.get_style(SECTION_TITLE).unwrap().leading, 18.0);
        let analysis = sheet.get_style(ANALYSIS_TEXT).unwrap();
        assert_eq!(analysis.alignment, TextAlign::Justify);
        assert_eq!(analysis.leading, 17.5);
        assert_eq!(
            sheet.get_style("Caption").unwrap_err(),
            StyleError::UnknownStyle("Caption".into())
        );
    }

    #[test]
    fn test_zebra_rows_start_white() {
        let table = TableStyle::default();
        assert_eq!(table.row_background(0), Some(Color::WHITE));
        assert_eq!(table.row_background(1), Some(Color::WHITE_SMOKE));
        assert_eq!(table.row_background(2), Some(Color::WHITE));
    }

    #[test]
    fn test_page_layout_deserializes_units() {
        let page: PageLayout =
            serde_json::from_str(r#"{"size": "A4", "margins": "1in"}"#).unwrap();
        assert_eq!(page.margins, Margins::all(72.0));
        assert_eq!(page.size, PageSize::A4);
    }
}
