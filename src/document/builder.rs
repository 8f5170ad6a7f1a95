//! Node factories for the output document.
//!
//! Factories only construct detached elements; callers attach children explicitly. Shared
//! resources built here (gradients, clip paths, filters, patterns) are registered with
//! [`Definitions`](crate::document::defs::Definitions) rather than attached directly, so each id
//! is emitted once.

use crate::document::node::{Element, Node, SVG_NS, XLINK_NS};
use crate::foundation::core::{Canvas, GradientStop};
use crate::foundation::format::fmt_num;

/// Root `svg` element sized to `canvas`, with an optional full-canvas background fill as the first
/// child.
pub fn create_document(canvas: Canvas, background: Option<&str>) -> Element {
    let mut root = Element::new("svg")
        .with_attr("xmlns", SVG_NS)
        .with_attr("xmlns:xlink", XLINK_NS)
        .with_attr("width", canvas.width.to_string())
        .with_attr("height", canvas.height.to_string())
        .with_attr("viewBox", canvas.view_box());
    if let Some(fill) = background {
        root.push(
            Element::new("rect")
                .with_attr("width", "100%")
                .with_attr("height", "100%")
                .with_attr("fill", fill),
        );
    }
    root
}

/// `g` element, optionally carrying an id.
pub fn create_group(id: Option<&str>) -> Element {
    let g = Element::new("g");
    match id {
        Some(id) => g.with_attr("id", id),
        None => g,
    }
}

pub fn create_element(tag: &str) -> Element {
    Element::new(tag)
}

pub fn create_text(content: &str) -> Node {
    Node::Text(content.to_owned())
}

/// Shared-definitions container of `root`, created as the first child when missing.
pub fn add_definitions(root: &mut Element) -> &mut Element {
    let pos = match root.children.iter().position(is_defs) {
        Some(pos) => pos,
        None => {
            root.children.insert(0, Node::Element(Element::new("defs")));
            0
        }
    };
    match &mut root.children[pos] {
        Node::Element(e) => e,
        Node::Text(_) => unreachable!("position() matched an element"),
    }
}

fn is_defs(n: &Node) -> bool {
    matches!(n, Node::Element(e) if e.name == "defs")
}

fn push_stops(el: &mut Element, stops: &[GradientStop]) {
    for stop in stops {
        let mut s = Element::new("stop")
            .with_attr("offset", fmt_num(stop.offset.clamp(0.0, 1.0)))
            .with_attr("stop-color", stop.color.as_str());
        if let Some(o) = stop.opacity {
            s.set_num("stop-opacity", o.clamp(0.0, 1.0));
        }
        el.push(s);
    }
}

fn gradient(tag: &str, id: &str, stops: &[GradientStop], attrs: &[(&str, String)]) -> Element {
    let mut el = Element::new(tag).with_attr("id", id);
    for (k, v) in attrs {
        el.set_attr(*k, v.as_str());
    }
    push_stops(&mut el, stops);
    el
}

/// `linearGradient` with ordered `stop` children.
pub fn create_linear_gradient(id: &str, stops: &[GradientStop], attrs: &[(&str, String)]) -> Element {
    gradient("linearGradient", id, stops, attrs)
}

/// `radialGradient` with ordered `stop` children.
pub fn create_radial_gradient(id: &str, stops: &[GradientStop], attrs: &[(&str, String)]) -> Element {
    gradient("radialGradient", id, stops, attrs)
}

pub fn create_clip_path(id: &str) -> Element {
    Element::new("clipPath").with_attr("id", id)
}

pub fn create_filter(id: &str) -> Element {
    Element::new("filter").with_attr("id", id)
}

pub fn create_pattern(id: &str, width: f64, height: f64, attrs: &[(&str, String)]) -> Element {
    let mut el = Element::new("pattern")
        .with_attr("id", id)
        .with_num("width", width)
        .with_num("height", height);
    for (k, v) in attrs {
        el.set_attr(*k, v.as_str());
    }
    el
}

/// Append a `style` block. `css` must already be sanitized.
pub fn add_stylesheet(root: &mut Element, css: &str) {
    root.push(
        Element::new("style")
            .with_attr("type", "text/css")
            .with_child(create_text(css)),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/document/builder.rs"]
mod tests;
