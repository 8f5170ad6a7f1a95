use crate::document::node::{Element, Node};
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::render::common::{box_clip, placeholder, require_non_negative};
use crate::render::context::RenderContext;
use crate::render::registry::LayerRenderer;
use crate::sanitize::rules::is_safe_image_href;
use crate::scene::model::{Layer, LayerKind};
use crate::scene::props::{ImageFit, ImageProps, LayerProps};

/// Draws image layers as an `image` reference; sources are never fetched.
#[derive(Debug)]
pub struct ImageRenderer;

impl LayerRenderer for ImageRenderer {
    fn name(&self) -> &'static str {
        "image"
    }

    fn supported_kinds(&self) -> &'static [LayerKind] {
        &[LayerKind::Image]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn render(&self, layer: &Layer, ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>> {
        let LayerProps::Image(p) = &layer.props else {
            return Err(LayerdocError::render("image renderer given non-image props"));
        };
        let (w, h) = (layer.geometry.width, layer.geometry.height);
        let radius = require_non_negative(p.corner_radius, "cornerRadius")?;

        if p.src.trim().is_empty() {
            return Ok(Some(placeholder(w, h, "#f3f4f6", "Image")));
        }
        if !is_safe_image_href(&p.src) {
            return Err(LayerdocError::render(format!(
                "image source for layer '{}' is not an allowed URL",
                layer.id
            )));
        }

        let mut img = Element::new("image")
            .with_num("width", w)
            .with_num("height", h)
            .with_attr("href", p.src.trim())
            .with_attr("preserveAspectRatio", aspect_for(p));
        if let Some(alt) = p.alt.as_deref() {
            img.push(Element::new("title").with_child(Node::Text(alt.to_owned())));
        }
        if radius > 0.0 {
            let r = radius.min(w / 2.0).min(h / 2.0);
            let id = box_clip(w, h, r, ctx.defs());
            img.set_attr("clip-path", format!("url(#{id})"));
        }
        Ok(Some(img))
    }
}

/// `preserveAspectRatio` for a fit mode.
pub(crate) fn aspect_for(p: &ImageProps) -> &'static str {
    if !p.preserve_aspect_ratio {
        return "none";
    }
    match p.fit {
        ImageFit::Cover => "xMidYMid slice",
        ImageFit::Contain | ImageFit::None => "xMidYMid meet",
        ImageFit::Fill => "none",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/image.rs"]
mod tests;
