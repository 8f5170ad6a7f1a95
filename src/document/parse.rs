//! Markup reader: produced documents and embedded vector content back into [`Element`] trees.

use crate::document::node::{Element, Node, SVG_NS, XLINK_NS};
use crate::foundation::error::{LayerdocError, LayerdocResult};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse markup into an owned tree rooted at the document element.
///
/// DTDs are rejected. Comments and processing instructions are dropped, as is whitespace-only
/// text outside text content elements. XLink and `xml:` attributes keep their conventional
/// prefix; attributes in any other namespace are dropped. An `svg` root gets its namespace
/// declarations re-attached.
pub fn parse_document(text: &str) -> LayerdocResult<Element> {
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| LayerdocError::markup(format!("parse markup: {e}")))?;
    let mut root = convert(doc.root_element());
    if root.name == "svg" {
        let mut attrs = vec![
            ("xmlns".to_owned(), SVG_NS.to_owned()),
            ("xmlns:xlink".to_owned(), XLINK_NS.to_owned()),
        ];
        attrs.append(root.attrs_mut());
        *root.attrs_mut() = attrs;
    }
    Ok(root)
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut el = Element::new(node.tag_name().name());
    for a in node.attributes() {
        let name = match a.namespace() {
            None => a.name().to_owned(),
            Some(XLINK_NS) => format!("xlink:{}", a.name()),
            Some(XML_NS) => format!("xml:{}", a.name()),
            Some(_) => continue,
        };
        el.set_attr(name, a.value());
    }

    let keeps_space = matches!(el.name.as_str(), "text" | "tspan" | "textPath");
    for child in node.children() {
        if child.is_element() {
            el.push(convert(child));
        } else if child.is_text() {
            let t = child.text().unwrap_or_default();
            if keeps_space || !t.trim().is_empty() {
                el.push(Node::Text(t.to_owned()));
            }
        }
    }
    el
}

#[cfg(test)]
#[path = "../../tests/unit/document/parse.rs"]
mod tests;
