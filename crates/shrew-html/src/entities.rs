//! Character reference decoding and attribute-value escaping.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The decoder handles numeric references and the named references that
//! occur in real-world attribute values; an unrecognized or malformed
//! reference is passed through untouched rather than mangled.

/// The named references the decoder recognizes, sorted for readability.
///
/// A deliberately small table: the builder decodes attribute values and
/// the text extractor decodes character data, neither of which needs the
/// full 2000-entry WHATWG list to round-trip typical documents.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("apos", '\''),
    ("bull", '\u{2022}'),
    ("cent", '\u{a2}'),
    ("copy", '\u{a9}'),
    ("deg", '\u{b0}'),
    ("divide", '\u{f7}'),
    ("euro", '\u{20ac}'),
    ("gt", '>'),
    ("hellip", '\u{2026}'),
    ("laquo", '\u{ab}'),
    ("ldquo", '\u{201c}'),
    ("lsquo", '\u{2018}'),
    ("lt", '<'),
    ("mdash", '\u{2014}'),
    ("middot", '\u{b7}'),
    ("nbsp", '\u{a0}'),
    ("ndash", '\u{2013}'),
    ("para", '\u{b6}'),
    ("plusmn", '\u{b1}'),
    ("pound", '\u{a3}'),
    ("quot", '"'),
    ("raquo", '\u{bb}'),
    ("rdquo", '\u{201d}'),
    ("reg", '\u{ae}'),
    ("rsquo", '\u{2019}'),
    ("sect", '\u{a7}'),
    ("times", '\u{d7}'),
    ("trade", '\u{2122}'),
    ("yen", '\u{a5}'),
];

/// Decode character references in `input`.
///
/// Only well-formed, semicolon-terminated references are decoded;
/// anything else (including a bare `&`) is copied through verbatim.
#[must_use]
pub fn decode(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_reference(rest) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode one reference at the start of `input` (which begins with `&`).
///
/// Returns the character and the byte length consumed, or `None` when the
/// reference is malformed or unknown.
fn decode_reference(input: &str) -> Option<(char, usize)> {
    let semi = input.find(';')?;
    // References are short; a distant semicolon means this `&` is plain text.
    if semi < 2 || semi > 32 {
        return None;
    }
    let body = &input[1..semi];
    let c = if let Some(num) = body.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        char::from_u32(code)?
    } else {
        NAMED.iter().find(|(name, _)| *name == body).map(|(_, c)| *c)?
    };
    Some((c, semi + 1))
}

/// Escape an attribute value for emission inside `quote` (or unquoted
/// when `None`).
///
/// Escapes `&`, `<`, `>` and the active quote character only — the
/// serializer guarantees unquoted values contain none of the characters
/// that would need escaping.
#[must_use]
pub fn escape_attribute(value: &str, quote: Option<char>) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote == Some('"') => out.push_str("&quot;"),
            '\'' if quote == Some('\'') => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
