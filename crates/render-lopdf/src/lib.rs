//! PDF renderer for paginated report pages using lopdf.
//!
//! Pages produced by `insight-layout` are drawn with the standard Type1 fonts,
//! so the output embeds no font programs and is byte-identical for identical
//! input.

mod encoding;
mod error;
mod renderer;

pub use encoding::{to_pdf_text_string, to_win_ansi};
pub use error::RenderError;
pub use renderer::{DocumentInfo, LopdfDocumentRenderer};
