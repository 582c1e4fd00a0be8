use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Extract text page by page
pub fn extract_page_texts(doc: &LopdfDocument) -> Vec<String> {
    (1..=doc.get_pages().len())
        .map(|n| doc.extract_text(&[n as u32]).unwrap_or_default())
        .collect()
}

/// Follow a reference if the object is one, and return the dictionary
fn resolve_dict<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok().and_then(|o| o.as_dict().ok()),
        other => other.as_dict().ok(),
    }
}

fn page_dicts(doc: &LopdfDocument) -> Vec<&Dictionary> {
    doc.get_pages()
        .values()
        .filter_map(|id| doc.get_object(*id).ok())
        .filter_map(|o| o.as_dict().ok())
        .collect()
}

/// Extract font names referenced from page resources
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = std::collections::BTreeSet::new();
    for page_dict in page_dicts(doc) {
        let Some(resources) = page_dict
            .get(b"Resources")
            .ok()
            .and_then(|r| resolve_dict(doc, r))
        else {
            continue;
        };
        let Some(font_dict) = resources
            .get(b"Font")
            .ok()
            .and_then(|f| resolve_dict(doc, f))
        else {
            continue;
        };
        for (_name, font_val) in font_dict.iter() {
            if let Some(font) = resolve_dict(doc, font_val) {
                if let Ok(base_font) = font.get(b"BaseFont").and_then(|b| b.as_name()) {
                    fonts.insert(String::from_utf8_lossy(base_font).to_string());
                }
            }
        }
    }
    fonts.into_iter().collect()
}

/// The MediaBox of every page as `[llx, lly, urx, ury]`
pub fn page_media_boxes(doc: &LopdfDocument) -> Vec<[f32; 4]> {
    page_dicts(doc)
        .into_iter()
        .filter_map(|page| page.get(b"MediaBox").ok()?.as_array().ok().cloned())
        .map(|arr| {
            let mut out = [0.0; 4];
            for (slot, obj) in out.iter_mut().zip(arr.iter()) {
                *slot = match obj {
                    Object::Integer(i) => *i as f32,
                    Object::Real(r) => *r as f32,
                    _ => f32::NAN,
                };
            }
            out
        })
        .collect()
}

/// The Title entry of the document information dictionary
pub fn document_title(doc: &LopdfDocument) -> Option<String> {
    let info = resolve_dict(doc, doc.trailer.get(b"Info").ok()?)?;
    match info.get(b"Title").ok()? {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

/// Count image XObjects, excluding soft masks
pub fn count_images(doc: &LopdfDocument) -> usize {
    let masks: Vec<_> = doc
        .objects
        .values()
        .filter_map(|o| o.as_stream().ok())
        .filter_map(|s| s.dict.get(b"SMask").ok()?.as_reference().ok())
        .collect();
    doc.objects
        .iter()
        .filter(|(id, _)| !masks.contains(*id))
        .filter_map(|(_, o)| o.as_stream().ok())
        .filter(|s| {
            s.dict
                .get(b"Subtype")
                .and_then(|t| t.as_name())
                .map(|n| n == b"Image")
                .unwrap_or(false)
        })
        .count()
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF contains a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should have a font matching '{}', found: {:?}",
            $pattern,
            fonts
        );
    };
}
