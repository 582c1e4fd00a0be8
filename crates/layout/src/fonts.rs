//! Advance widths for the standard PDF fonts.
//!
//! Reports are set in the base-14 faces, which viewers supply themselves, so
//! no font files are loaded or embedded. Widths come from the Adobe AFM files
//! in units of 1/1000 em and cover printable ASCII; the handful of WinAnsi
//! punctuation marks used in prose are listed separately.

use insight_style::font::{FontFace, FontFamily, FontStyle, FontWeight};

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_ITALIC: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    832, 667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333, 278, 333, 570, 500,
    333, 500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

/// Width table for one base-14 face.
#[derive(Debug)]
pub struct FontMetrics {
    pub base_font: &'static str,
    widths: &'static [u16; 95],
}

static HELVETICA_METRICS: FontMetrics = FontMetrics { base_font: "Helvetica", widths: &HELVETICA };
static HELVETICA_BOLD_METRICS: FontMetrics =
    FontMetrics { base_font: "Helvetica-Bold", widths: &HELVETICA_BOLD };
static HELVETICA_OBLIQUE_METRICS: FontMetrics =
    FontMetrics { base_font: "Helvetica-Oblique", widths: &HELVETICA };
static HELVETICA_BOLD_OBLIQUE_METRICS: FontMetrics =
    FontMetrics { base_font: "Helvetica-BoldOblique", widths: &HELVETICA_BOLD };
static TIMES_ROMAN_METRICS: FontMetrics = FontMetrics { base_font: "Times-Roman", widths: &TIMES_ROMAN };
static TIMES_BOLD_METRICS: FontMetrics = FontMetrics { base_font: "Times-Bold", widths: &TIMES_BOLD };
static TIMES_ITALIC_METRICS: FontMetrics =
    FontMetrics { base_font: "Times-Italic", widths: &TIMES_ITALIC };
static TIMES_BOLD_ITALIC_METRICS: FontMetrics =
    FontMetrics { base_font: "Times-BoldItalic", widths: &TIMES_BOLD_ITALIC };

impl FontMetrics {
    pub fn for_face(face: FontFace) -> &'static FontMetrics {
        match (face.family, face.weight, face.style) {
            (FontFamily::Helvetica, FontWeight::Regular, FontStyle::Normal) => &HELVETICA_METRICS,
            (FontFamily::Helvetica, FontWeight::Bold, FontStyle::Normal) => &HELVETICA_BOLD_METRICS,
            (FontFamily::Helvetica, FontWeight::Regular, FontStyle::Italic) => &HELVETICA_OBLIQUE_METRICS,
            (FontFamily::Helvetica, FontWeight::Bold, FontStyle::Italic) => {
                &HELVETICA_BOLD_OBLIQUE_METRICS
            }
            (FontFamily::Times, FontWeight::Regular, FontStyle::Normal) => &TIMES_ROMAN_METRICS,
            (FontFamily::Times, FontWeight::Bold, FontStyle::Normal) => &TIMES_BOLD_METRICS,
            (FontFamily::Times, FontWeight::Regular, FontStyle::Italic) => &TIMES_ITALIC_METRICS,
            (FontFamily::Times, FontWeight::Bold, FontStyle::Italic) => &TIMES_BOLD_ITALIC_METRICS,
        }
    }

    fn ascii(&self, c: char) -> u16 {
        self.widths[c as usize - 32]
    }

    /// Advance width of `c` in 1/1000 em.
    pub fn char_width(&self, c: char) -> u16 {
        match c {
            ' '..='~' => self.ascii(c),
            '\u{a0}' => self.ascii(' '),
            '\u{2022}' => 350,
            '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000,
            '\u{2013}' => self.ascii('0'),
            '\u{2018}' | '\u{2019}' | '\u{201a}' => self.ascii('\''),
            '\u{201c}' | '\u{201d}' | '\u{201e}' => self.ascii('"'),
            // Anything else is drawn with a glyph of roughly lowercase width.
            _ => self.ascii('n'),
        }
    }

    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * font_size / 1000.0
    }
}

/// Width of `text` set in `face` at `font_size` points.
pub fn measure_text(face: FontFace, font_size: f32, text: &str) -> f32 {
    FontMetrics::for_face(face).measure(text, font_size)
}
