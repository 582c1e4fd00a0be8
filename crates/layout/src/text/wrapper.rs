use super::builder::InlineRun;
use crate::fonts::measure_text;
use insight_style::font::FontFace;
use insight_style::text::TextAlign;

const EPSILON: f32 = 0.01;

/// A same-font piece of a line, positioned relative to the line's left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFragment {
    pub text: String,
    pub face: FontFace,
    pub x: f32,
    /// Natural width, before any word spacing is added.
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub fragments: Vec<LineFragment>,
    /// Natural width of the line's content.
    pub width: f32,
    /// Extra space per space character; non-zero only on justified lines.
    pub word_spacing: f32,
}

impl LineLayout {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Piece {
    text: String,
    face: FontFace,
}

#[derive(Debug, Clone)]
enum Token {
    Word(Vec<Piece>),
    Space(FontFace),
    Break,
}

/// Splits runs into words, collapsed spaces and forced breaks.
fn tokenize(runs: &[InlineRun]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<Piece> = Vec::new();

    fn flush(word: &mut Vec<Piece>, tokens: &mut Vec<Token>) {
        if !word.is_empty() {
            tokens.push(Token::Word(std::mem::take(word)));
        }
    }

    for run in runs {
        match run {
            InlineRun::Break => {
                flush(&mut word, &mut tokens);
                tokens.push(Token::Break);
            }
            InlineRun::Text { text, face } => {
                for c in text.chars() {
                    // A non-breaking space belongs to its word.
                    if c.is_whitespace() && c != '\u{a0}' {
                        flush(&mut word, &mut tokens);
                        if !matches!(tokens.last(), Some(Token::Space(_))) {
                            tokens.push(Token::Space(*face));
                        }
                        continue;
                    }
                    match word.last_mut() {
                        Some(piece) if piece.face == *face => piece.text.push(c),
                        _ => word.push(Piece {
                            text: c.to_string(),
                            face: *face,
                        }),
                    }
                }
            }
        }
    }
    flush(&mut word, &mut tokens);
    tokens
}

struct LineBuilder<'a> {
    font_size: f32,
    max_width: f32,
    align: TextAlign,
    lines: &'a mut Vec<LineLayout>,
    pieces: Vec<Piece>,
    width: f32,
}

impl LineBuilder<'_> {
    fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    fn push(&mut self, piece: Piece) {
        self.width += measure_text(piece.face, self.font_size, &piece.text);
        match self.pieces.last_mut() {
            Some(last) if last.face == piece.face => last.text.push_str(&piece.text),
            _ => self.pieces.push(piece),
        }
    }

    fn finish(&mut self, justifiable: bool) {
        let pieces = std::mem::take(&mut self.pieces);
        let width = std::mem::take(&mut self.width);
        self.lines.push(finalize_line(
            pieces,
            width,
            self.font_size,
            self.max_width,
            self.align,
            justifiable,
        ));
    }
}

/// Greedy line breaking with words kept whole where possible.
///
/// Runs of whitespace collapse to a single space and whitespace at the start of
/// a line is dropped. A word wider than `max_width` is broken between
/// characters. Justified alignment stretches every line except the last one and
/// lines ended by a forced break.
pub fn break_lines(
    runs: &[InlineRun],
    font_size: f32,
    max_width: f32,
    align: TextAlign,
) -> Vec<LineLayout> {
    let mut lines = Vec::new();
    let mut line = LineBuilder {
        font_size,
        max_width,
        align,
        lines: &mut lines,
        pieces: Vec::new(),
        width: 0.0,
    };
    let mut pending_space: Option<FontFace> = None;

    for token in tokenize(runs) {
        match token {
            Token::Space(face) => {
                if !line.is_empty() {
                    pending_space = Some(face);
                }
            }
            Token::Break => {
                line.finish(false);
                pending_space = None;
            }
            Token::Word(pieces) => {
                let word_width: f32 = pieces
                    .iter()
                    .map(|p| measure_text(p.face, font_size, &p.text))
                    .sum();
                let space_width = pending_space
                    .map(|face| measure_text(face, font_size, " "))
                    .unwrap_or(0.0);

                if !line.is_empty() && line.width + space_width + word_width > max_width + EPSILON {
                    line.finish(true);
                    pending_space = None;
                }

                if line.is_empty() && word_width > max_width + EPSILON {
                    let mut chunks = split_word(pieces, font_size, max_width);
                    let last = chunks.pop().unwrap_or_default();
                    for chunk in chunks {
                        chunk.into_iter().for_each(|p| line.push(p));
                        line.finish(true);
                    }
                    last.into_iter().for_each(|p| line.push(p));
                } else {
                    if let Some(face) = pending_space.take() {
                        line.push(Piece {
                            text: " ".to_string(),
                            face,
                        });
                    }
                    pieces.into_iter().for_each(|p| line.push(p));
                }
            }
        }
    }
    if !line.is_empty() {
        line.finish(false);
    }
    lines
}

/// Breaks an over-long word into chunks that each fit, keeping at least one character per chunk.
fn split_word(pieces: Vec<Piece>, font_size: f32, max_width: f32) -> Vec<Vec<Piece>> {
    let mut chunks = Vec::new();
    let mut chunk: Vec<Piece> = Vec::new();
    let mut width = 0.0;

    for piece in pieces {
        for c in piece.text.chars() {
            let mut buf = [0u8; 4];
            let w = measure_text(piece.face, font_size, c.encode_utf8(&mut buf));
            if !chunk.is_empty() && width + w > max_width + EPSILON {
                chunks.push(std::mem::take(&mut chunk));
                width = 0.0;
            }
            match chunk.last_mut() {
                Some(last) if last.face == piece.face => last.text.push(c),
                _ => chunk.push(Piece {
                    text: c.to_string(),
                    face: piece.face,
                }),
            }
            width += w;
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

fn finalize_line(
    pieces: Vec<Piece>,
    width: f32,
    font_size: f32,
    max_width: f32,
    align: TextAlign,
    justifiable: bool,
) -> LineLayout {
    let free_space = (max_width - width).max(0.0);
    let space_count = pieces
        .iter()
        .map(|p| p.text.chars().filter(|c| *c == ' ').count())
        .sum::<usize>();

    let (offset, word_spacing) = match align {
        TextAlign::Left => (0.0, 0.0),
        TextAlign::Center => (free_space / 2.0, 0.0),
        TextAlign::Right => (free_space, 0.0),
        TextAlign::Justify if justifiable && space_count > 0 && max_width.is_finite() => {
            (0.0, free_space / space_count as f32)
        }
        TextAlign::Justify => (0.0, 0.0),
    };

    let mut fragments = Vec::with_capacity(pieces.len());
    let mut x = offset;
    for piece in pieces {
        let natural = measure_text(piece.face, font_size, &piece.text);
        let spaces = piece.text.chars().filter(|c| *c == ' ').count();
        fragments.push(LineFragment {
            x,
            width: natural,
            text: piece.text,
            face: piece.face,
        });
        x += natural + spaces as f32 * word_spacing;
    }

    LineLayout {
        fragments,
        width,
        word_spacing,
    }
}
