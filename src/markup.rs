//! Translation of the constrained markdown produced by the analysis generator
//! into the inline markup understood by paragraph blocks.
//!
//! Only a small dialect is recognised: `### Heading` lines, `* ` bullets,
//! `**bold**`, `*italic*` and newlines. Anything else passes through as text.
//! The rules run in a fixed order; each one sees the output of the previous.

use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"###\s+(.*?)\n").expect("BUG: invalid HEADING_RE regex literal")
});

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\*\s+").expect("BUG: invalid BULLET_RE regex literal")
});

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("BUG: invalid BOLD_RE regex literal")
});

/// Translates markdown into `<b>`, `<i>`, `<br/>` and `&bull;` markup.
///
/// A heading must be followed by a newline to be recognised, and unmatched
/// asterisks are left as they are.
pub fn translate(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = HEADING_RE.replace_all(text, "<b>${1}</b><br/><br/>");
    let text = BULLET_RE.replace_all(&text, "&bull; ");
    let text = BOLD_RE.replace_all(&text, "<b>${1}</b>");
    let text = italicize_lone_asterisks(&text);
    text.replace('\n', "<br/>")
}

/// Pairs asterisks that have no asterisk neighbour, left to right within each
/// line, and wraps the text between each pair in `<i>` tags.
fn italicize_lone_asterisks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        italicize_line(line, &mut out);
    }
    out
}

fn italicize_line(line: &str, out: &mut String) {
    let chars: Vec<char> = line.chars().collect();
    let is_lone = |i: usize| {
        chars[i] == '*'
            && (i == 0 || chars[i - 1] != '*')
            && chars.get(i + 1).is_none_or(|c| *c != '*')
    };
    let lone: Vec<usize> = (0..chars.len()).filter(|&i| is_lone(i)).collect();

    let mut opens = Vec::new();
    let mut closes = Vec::new();
    for pair in lone.chunks_exact(2) {
        opens.push(pair[0]);
        closes.push(pair[1]);
    }

    for (i, c) in chars.iter().enumerate() {
        if opens.binary_search(&i).is_ok() {
            out.push_str("<i>");
        } else if closes.binary_search(&i).is_ok() {
            out.push_str("</i>");
        } else {
            out.push(*c);
        }
    }
}
