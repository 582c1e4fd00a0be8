pub mod border;
pub mod dimension;
pub mod error;
pub mod font;
pub mod parsers;
pub mod stylesheet;
pub mod text;

pub use border::LineStyle;
pub use dimension::{Length, Margins, PageSize};
pub use error::StyleError;
pub use font::{FontFace, FontFamily, FontStyle, FontWeight};
pub use stylesheet::{PageLayout, ParagraphStyle, Stylesheet, TableStyle};
pub use text::{TextAlign, VerticalAlign};
