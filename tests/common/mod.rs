pub mod fixtures;
pub mod pdf_assertions;

use insight_report::{GenerationError, ReportAssembler, ReportItem, Table, TitleGenerator};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// A deterministic title generator that prefixes the query.
pub fn section_titles(query: &str) -> Result<String, GenerationError> {
    Ok(format!("Section: {query}"))
}

/// Assemble a report with the default options and load the result.
pub fn generate_report<T: TitleGenerator + ?Sized>(
    dataset_name: &str,
    overview: &str,
    snapshot: &Table,
    items: &[ReportItem],
    titles: &T,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let bytes =
        ReportAssembler::default().assemble(dataset_name, overview, snapshot, items, titles)?;
    GeneratedPdf::from_bytes(bytes)
}
