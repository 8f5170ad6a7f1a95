//! Always-succeeding placeholder document.

use tracing::warn;

use crate::document::builder::create_document;
use crate::document::node::{Element, Node};
use crate::document::serialize::{SerializeOpts, save_document};
use crate::foundation::core::{
    Canvas, DEFAULT_CANVAS, MAX_CANVAS_DIMENSION, contrasting_label_color, normalize_color,
};
use crate::foundation::format::fmt_num;
use crate::sanitize::rules::{DenyScope, strip_dangerous};
use crate::scene::model::Design;

/// Label drawn at the center of the fallback document.
pub const FALLBACK_LABEL: &str = "Rendering failed";

const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Minimal valid document for a design that could not be rendered.
///
/// Uses the design's dimensions when they are valid (else 800x600) and its flat background color
/// when it is a valid color (else white), then draws a translucent overlay and a centered label.
/// `cause` is embedded as a description after the deny-list patterns are stripped from it.
pub fn fallback_document(design: &Design, cause: Option<&str>, opts: SerializeOpts) -> String {
    let canvas = Canvas::from_dimensions(design.width, design.height, MAX_CANVAS_DIMENSION)
        .unwrap_or(DEFAULT_CANVAS);
    let background = design
        .background
        .color()
        .and_then(normalize_color)
        .filter(|c| c != "none")
        .unwrap_or_else(|| DEFAULT_BACKGROUND.to_owned());
    if let Some(cause) = cause {
        warn!(cause, "emitting fallback document");
    }
    save_document(&fallback_tree(canvas, &background, cause), opts)
}

fn fallback_tree(canvas: Canvas, background: &str, cause: Option<&str>) -> Element {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let mut root = create_document(canvas, Some(background));
    root.set_attr("data-fallback", "true");

    root.push(Element::new("title").with_child(Node::Text(FALLBACK_LABEL.to_owned())));
    if let Some(cause) = cause {
        let cleaned = strip_dangerous(cause, DenyScope::Text);
        if !cleaned.trim().is_empty() {
            root.push(Element::new("desc").with_child(Node::Text(cleaned)));
        }
    }
    root.push(
        Element::new("rect")
            .with_attr("width", "100%")
            .with_attr("height", "100%")
            .with_attr("fill", "#6b7280")
            .with_attr("fill-opacity", "0.35"),
    );
    root.push(
        Element::new("text")
            .with_num("x", w / 2.0)
            .with_num("y", h / 2.0)
            .with_attr("text-anchor", "middle")
            .with_attr("dominant-baseline", "middle")
            .with_attr("font-family", "Arial, sans-serif")
            .with_attr("font-size", fmt_num((w.min(h) / 12.0).clamp(10.0, 48.0)))
            .with_attr("fill", contrasting_label_color(background))
            .with_child(Node::Text(FALLBACK_LABEL.to_owned())),
    );
    root
}

#[cfg(test)]
#[path = "../../tests/unit/recovery/fallback.rs"]
mod tests;
