//! Number formatting and XML escaping for emitted markup.

use std::fmt::Write as _;

/// Format a coordinate for markup output.
///
/// Non-finite values print as `0`, values are rounded to four decimals and trailing zeros are
/// trimmed, so `10.0` prints as `10` and `-0.0` prints as `0`.
pub fn fmt_num(v: f64) -> String {
    let mut out = String::new();
    fmt_num_into(&mut out, v);
    out
}

/// Append [`fmt_num`] output to `out`.
pub fn fmt_num_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    let mut v = (v * 10_000.0).round() / 10_000.0;
    if v == 0.0 {
        v = 0.0;
    }

    let start = out.len();
    let _ = write!(out, "{v:.4}");
    while out.len() > start && out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    if &out[start..] == "-0" {
        out.truncate(start);
        out.push('0');
    }
}

/// Escape text content for an element body.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, false);
    out
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, true);
    out
}

pub(crate) fn escape_into(out: &mut String, text: &str, attr: bool) {
    let mut start = 0usize;
    for (i, c) in text.char_indices() {
        let esc = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if attr => "&quot;",
            '\n' if attr => "&#10;",
            '\t' if attr => "&#9;",
            c if !is_xml_char(c) => "",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + c.len_utf8();
    }
    out.push_str(&text[start..]);
}

/// XML 1.0 `Char` production. Surrogates cannot occur in a `char`.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}')
}

/// Reduce an arbitrary layer id into an XML-id-safe token.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`; an empty input becomes `_`.
pub fn id_token(raw: &str) -> String {
    let mut s: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.is_empty() {
        s.push('_');
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/format.rs"]
mod tests;
