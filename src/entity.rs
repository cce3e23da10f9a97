use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The predefined entities. Lookup is case sensitive; `&AMP;` is not a
/// reference and passes through untouched.
static NAMED: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("apos", '\''),
        ("gt", '>'),
        ("lt", '<'),
        ("quot", '"'),
    ])
});

/// Decode one reference body (the part between `&` and `;`).
///
/// Numeric references accept `#NNN`, `#xHH` and `#XHH`. Code points above
/// U+FFFF decode to a single scalar; surrogate halves are not scalar values
/// and substitute U+FFFD. Anything undecodable returns `None` so the caller
/// can keep the raw reference.
pub(crate) fn decode(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let (digits, radix) = match numeric
            .strip_prefix('x')
            .or_else(|| numeric.strip_prefix('X'))
        {
            Some(hex) => (hex, 16),
            None => (numeric, 10),
        };
        let code_point = u32::from_str_radix(digits, radix).ok()?;
        if (0xD800..=0xDFFF).contains(&code_point) {
            return Some('\u{FFFD}'.to_string());
        }
        return char::from_u32(code_point).map(|ch| ch.to_string());
    }
    NAMED.get(body).map(|ch| ch.to_string())
}

/// Standalone entity decoder over a whole string.
///
/// Every `&…;` span is decoded if possible and kept verbatim otherwise; a `&`
/// with no following `;` stays literal.
pub(crate) fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        match tail.find(';') {
            Some(semi) => {
                let body = &tail[..semi];
                match decode(body) {
                    Some(decoded) => out.push_str(&decoded),
                    None => out.push_str(&rest[amp..amp + semi + 2]),
                }
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
