//! A lenient parser for the small inline-markup dialect used in report prose.
//!
//! Recognized: `<b>`/`<strong>`, `<i>`/`<em>`, `<br/>`/`<br>` and the
//! entities `&bull; &amp; &lt; &gt; &quot; &apos; &nbsp;` plus numeric
//! `&#N;`/`&#xH;`. Anything else is kept as literal text; stray closing tags
//! are dropped and unclosed spans end with the input.

use crate::{InlineMetadata, InlineNode};
use insight_style::font::{FontStyle, FontWeight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanTag {
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Open(SpanTag),
    Close(SpanTag),
    Break,
}

struct Frame {
    tag: Option<SpanTag>,
    children: Vec<InlineNode>,
}

impl Frame {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(InlineNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(InlineNode::Text(text.to_string()));
        }
    }

    fn into_node(self, tag: SpanTag) -> InlineNode {
        let meta = match tag {
            SpanTag::Bold => InlineMetadata {
                font_weight: Some(FontWeight::Bold),
                font_style: None,
            },
            SpanTag::Italic => InlineMetadata {
                font_weight: None,
                font_style: Some(FontStyle::Italic),
            },
        };
        InlineNode::StyledSpan {
            meta,
            children: self.children,
        }
    }
}

fn classify_tag(inner: &str) -> Option<Tag> {
    let name: String = inner
        .trim()
        .trim_end_matches('/')
        .trim()
        .to_ascii_lowercase();
    match name.as_str() {
        "b" | "strong" => Some(Tag::Open(SpanTag::Bold)),
        "/b" | "/strong" => Some(Tag::Close(SpanTag::Bold)),
        "i" | "em" => Some(Tag::Open(SpanTag::Italic)),
        "/i" | "/em" => Some(Tag::Close(SpanTag::Italic)),
        "br" => Some(Tag::Break),
        _ => None,
    }
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "bull" => Some('\u{2022}'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Parses inline markup into a tree of inline nodes. Never fails.
pub fn parse_inline_markup(input: &str) -> Vec<InlineNode> {
    let mut stack = vec![Frame {
        tag: None,
        children: Vec::new(),
    }];
    let mut rest = input;

    while !rest.is_empty() {
        let Some(pos) = rest.find(['<', '&']) else {
            top(&mut stack).push_text(rest);
            break;
        };
        top(&mut stack).push_text(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('<') {
            let tag = rest.find('>').and_then(|end| {
                let inner = &rest[1..end];
                (!inner.contains('<')).then(|| classify_tag(inner)).flatten().map(|t| (t, end))
            });
            match tag {
                Some((Tag::Open(span), end)) => {
                    stack.push(Frame {
                        tag: Some(span),
                        children: Vec::new(),
                    });
                    rest = &rest[end + 1..];
                }
                Some((Tag::Close(span), end)) => {
                    close_span(&mut stack, span);
                    rest = &rest[end + 1..];
                }
                Some((Tag::Break, end)) => {
                    top(&mut stack).children.push(InlineNode::LineBreak);
                    rest = &rest[end + 1..];
                }
                None => {
                    top(&mut stack).push_text("<");
                    rest = &rest[1..];
                }
            }
        } else {
            let entity = rest
                .find(';')
                .filter(|&end| end <= 12)
                .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));
            match entity {
                Some((c, end)) => {
                    let mut buf = [0u8; 4];
                    top(&mut stack).push_text(c.encode_utf8(&mut buf));
                    rest = &rest[end + 1..];
                }
                None => {
                    top(&mut stack).push_text("&");
                    rest = &rest[1..];
                }
            }
        }
    }

    while stack.len() > 1 {
        fold_top(&mut stack);
    }
    stack.pop().map(|root| root.children).unwrap_or_default()
}

fn top(stack: &mut [Frame]) -> &mut Frame {
    // The root frame is never popped while parsing.
    let last = stack.len() - 1;
    &mut stack[last]
}

/// Folds the innermost open span into its parent.
fn fold_top(stack: &mut Vec<Frame>) {
    if let Some(frame) = stack.pop() {
        if let Some(tag) = frame.tag {
            let node = frame.into_node(tag);
            top(stack).children.push(node);
        }
    }
}

fn close_span(stack: &mut Vec<Frame>, span: SpanTag) {
    let Some(depth) = stack.iter().rposition(|f| f.tag == Some(span)) else {
        return;
    };
    while stack.len() > depth {
        fold_top(stack);
    }
}
