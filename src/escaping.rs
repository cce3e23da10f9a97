use std::fmt::Write;

/// Escape text for inclusion in XML element or attribute content.
///
/// The five predefined entities are written by name; every scalar in
/// U+0000..U+001F and U+007F..U+009F becomes a lowercase hexadecimal
/// reference. Everything else passes through.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            ch if must_encode(ch) => {
                let _ = write!(out, "&#x{:x};", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out
}

fn must_encode(ch: char) -> bool {
    matches!(ch, '\u{0000}'..='\u{001f}' | '\u{007f}'..='\u{009f}')
}
