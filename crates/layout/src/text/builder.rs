use insight_idf::{InlineMetadata, InlineNode};
use insight_style::font::FontFace;

/// A stretch of text in one face, or a forced line break.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineRun {
    Text { text: String, face: FontFace },
    Break,
}

/// Flattens an inline tree into runs, resolving each span's face against its parent.
pub struct TextBuilder {
    base: FontFace,
    runs: Vec<InlineRun>,
}

impl TextBuilder {
    pub fn new(base: FontFace) -> Self {
        Self {
            base,
            runs: Vec::new(),
        }
    }

    pub fn process_inlines(&mut self, inlines: &[InlineNode]) {
        let base = self.base;
        self.process_inlines_recursive(inlines, base);
    }

    pub fn push_text(&mut self, text: &str, face: FontFace) {
        if text.is_empty() {
            return;
        }
        if let Some(InlineRun::Text { text: last, face: last_face }) = self.runs.last_mut()
            && *last_face == face
        {
            last.push_str(text);
            return;
        }
        self.runs.push(InlineRun::Text {
            text: text.to_string(),
            face,
        });
    }

    pub fn push_break(&mut self) {
        self.runs.push(InlineRun::Break);
    }

    pub fn finish(self) -> Vec<InlineRun> {
        self.runs
    }

    fn process_inlines_recursive(&mut self, inlines: &[InlineNode], face: FontFace) {
        for node in inlines {
            match node {
                InlineNode::Text(text) => self.push_text(text, face),
                InlineNode::StyledSpan { meta, children } => {
                    let span_face = resolve_meta_face(meta, face);
                    self.process_inlines_recursive(children, span_face);
                }
                InlineNode::LineBreak => self.push_break(),
            }
        }
    }
}

fn resolve_meta_face(meta: &InlineMetadata, parent: FontFace) -> FontFace {
    let mut face = parent;
    if let Some(weight) = meta.font_weight {
        face = face.with_weight(weight);
    }
    if let Some(style) = meta.font_style {
        face = face.with_style(style);
    }
    face
}
