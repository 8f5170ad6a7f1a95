//! Markup writer for the output tree.

use crate::document::node::{Element, Node};
use crate::foundation::format::escape_into;

/// Serialization knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SerializeOpts {
    /// Indent nested elements by two spaces per level.
    pub pretty: bool,
}

/// Serialize `root` to markup text. Infallible: every attribute and text node is escaped.
pub fn save_document(root: &Element, opts: SerializeOpts) -> String {
    let mut out = String::with_capacity(1024);
    write_element(&mut out, root, 0, opts.pretty);
    if opts.pretty {
        out.push('\n');
    }
    out
}

fn write_element(out: &mut String, el: &Element, depth: usize, pretty: bool) {
    out.push('<');
    out.push_str(&el.name);
    for (k, v) in el.attrs() {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        escape_into(out, v, true);
        out.push('"');
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    // Mixed content keeps its whitespace exactly.
    let indent = pretty && el.children.iter().all(|c| matches!(c, Node::Element(_)));
    for child in &el.children {
        if indent {
            newline(out, depth + 1);
        }
        match child {
            Node::Element(c) => write_element(out, c, depth + 1, indent),
            Node::Text(t) => escape_into(out, t, false),
        }
    }
    if indent {
        newline(out, depth);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/serialize.rs"]
mod tests;
