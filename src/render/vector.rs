use crate::document::node::Element;
use crate::document::parse::parse_document;
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::foundation::format::fmt_num;
use crate::render::common::require_color;
use crate::render::context::RenderContext;
use crate::render::registry::LayerRenderer;
use crate::scene::model::{Layer, LayerKind};
use crate::scene::props::{LayerProps, is_valid_aspect_ratio};

/// Imports embedded vector markup as a nested `svg` scaled into the layer box.
///
/// Imported content is not filtered here; the post-render sanitize pass covers it like any other
/// part of the document.
#[derive(Debug)]
pub struct VectorRenderer;

impl LayerRenderer for VectorRenderer {
    fn name(&self) -> &'static str {
        "vector-graphic"
    }

    fn supported_kinds(&self) -> &'static [LayerKind] {
        &[LayerKind::VectorGraphic]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn render(&self, layer: &Layer, _ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>> {
        let LayerProps::VectorGraphic(p) = &layer.props else {
            return Err(LayerdocError::render("vector renderer given non-vector props"));
        };
        if p.svg_content.trim().is_empty() {
            return Ok(None);
        }
        if !is_valid_aspect_ratio(&p.preserve_aspect_ratio) {
            return Err(LayerdocError::render(format!(
                "preserveAspectRatio '{}' is invalid",
                p.preserve_aspect_ratio
            )));
        }

        let mut root = parse_document(&p.svg_content)?;
        if root.name != "svg" {
            return Err(LayerdocError::markup(format!(
                "embedded vector content must have an <svg> root, found <{}>",
                root.name
            )));
        }

        if root.attr("viewBox").is_none() {
            let intrinsic = (
                root.attr("width").and_then(parse_length),
                root.attr("height").and_then(parse_length),
            );
            if let (Some(w), Some(h)) = intrinsic {
                root.set_attr("viewBox", format!("0 0 {} {}", fmt_num(w), fmt_num(h)));
            }
        }
        root.remove_attr("xmlns");
        root.remove_attr("xmlns:xlink");
        root.set_num("x", 0.0);
        root.set_num("y", 0.0);
        root.set_num("width", layer.geometry.width);
        root.set_num("height", layer.geometry.height);
        root.set_attr("preserveAspectRatio", p.preserve_aspect_ratio.as_str());
        if let Some(fill) = p.fill_override.as_deref() {
            root.set_attr("fill", require_color(fill, "fill")?);
        }
        Ok(Some(root))
    }
}

/// Plain or `px` length; percentages and other units are not intrinsic sizes.
fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/vector.rs"]
mod tests;
