//! Cleaning for free-form style text embedded through `add_stylesheet`.

use crate::sanitize::rules::{DenyScope, is_allowed_css_property, strip_dangerous};

/// Rebuild `css` keeping only declarations whose property is allow-listed, after removing every
/// deny-list match.
///
/// Output is normalized to `selector { prop: value; }` blocks, one per line, so cleaning twice
/// gives the same text. Top-level statements outside blocks (`@charset ...;`) are dropped and
/// unbalanced blocks are closed.
pub fn sanitize_css(css: &str) -> String {
    let cleaned = strip_dangerous(css, DenyScope::Value);

    let mut out = String::with_capacity(cleaned.len());
    let mut buf = String::new();
    let mut depth = 0usize;
    for ch in cleaned.chars() {
        match ch {
            '{' => {
                let selector = buf.trim();
                if depth > 0 {
                    out.push(' ');
                }
                out.push_str(selector);
                out.push_str(" {");
                buf.clear();
                depth += 1;
            }
            '}' if depth > 0 => {
                push_declaration(&mut out, &buf);
                buf.clear();
                out.push_str(" }");
                depth -= 1;
                if depth == 0 {
                    out.push('\n');
                }
            }
            '}' => buf.clear(),
            ';' if depth > 0 => {
                push_declaration(&mut out, &buf);
                buf.clear();
            }
            ';' => buf.clear(),
            _ => buf.push(ch),
        }
    }
    if depth > 0 {
        push_declaration(&mut out, &buf);
        for _ in 0..depth {
            out.push_str(" }");
        }
        out.push('\n');
    }

    strip_dangerous(&out, DenyScope::Value)
}

fn push_declaration(out: &mut String, decl: &str) {
    let Some((name, value)) = decl.split_once(':') else {
        return;
    };
    let name = name.trim().to_ascii_lowercase();
    let value = value.trim();
    if value.is_empty() || !is_allowed_css_property(&name) {
        return;
    }
    out.push(' ');
    out.push_str(&name);
    out.push_str(": ");
    out.push_str(value);
    out.push(';');
}

#[cfg(test)]
#[path = "../../tests/unit/sanitize/css.rs"]
mod tests;
