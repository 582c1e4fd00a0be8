//! Text encodings for the standard fonts and for document metadata.

/// Encodes text for a base-14 font using WinAnsiEncoding. Characters the
/// encoding cannot represent become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2030}' => 0x89,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        // The 0x80..0x9F block is remapped in WinAnsi; raw C1 controls have no glyph.
        c if (c as u32) < 0x80 || ((c as u32) >= 0xA0 && (c as u32) <= 0xFF) => c as u8,
        _ => b'?',
    }
}

/// Encodes a PDF text string (used in the document information dictionary).
/// Latin-1 text is written as is; anything wider is UTF-16BE with a byte order mark.
pub fn to_pdf_text_string(s: &str) -> Vec<u8> {
    if s.chars().all(|c| (c as u32) < 0x80 || ((c as u32) >= 0xA0 && (c as u32) <= 0xFF)) {
        return s.chars().map(|c| c as u8).collect();
    }
    let mut out = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_ansi_punctuation() {
        assert_eq!(to_win_ansi("\u{2022} a"), vec![0x95, b' ', b'a']);
        assert_eq!(to_win_ansi("\u{201c}x\u{201d}"), vec![0x93, b'x', 0x94]);
        assert_eq!(to_win_ansi("caf\u{e9}"), b"caf\xe9".to_vec());
        assert_eq!(to_win_ansi("\u{65e5}"), b"?".to_vec());
        assert_eq!(to_win_ansi("\u{85}"), b"?".to_vec());
    }

    #[test]
    fn test_text_string() {
        assert_eq!(to_pdf_text_string("Report"), b"Report".to_vec());
        assert_eq!(
            to_pdf_text_string("\u{65e5}"),
            vec![0xFE, 0xFF, 0x65, 0xE5]
        );
    }
}
