use crate::document::node::Element;
use crate::foundation::core::Point;
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::render::common::placeholder;
use crate::render::context::RenderContext;
use crate::render::registry::LayerRenderer;
use crate::sanitize::rules::is_safe_image_href;
use crate::scene::model::{Layer, LayerKind};
use crate::scene::props::LayerProps;
use crate::transform::compose::path_from_points;

/// Draws video layers as their poster frame with a play glyph.
#[derive(Debug)]
pub struct VideoRenderer;

impl LayerRenderer for VideoRenderer {
    fn name(&self) -> &'static str {
        "video"
    }

    fn supported_kinds(&self) -> &'static [LayerKind] {
        &[LayerKind::Video]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn render(&self, layer: &Layer, _ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>> {
        let LayerProps::Video(p) = &layer.props else {
            return Err(LayerdocError::render("video renderer given non-video props"));
        };
        let (w, h) = (layer.geometry.width, layer.geometry.height);

        let mut g = match p.poster.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(poster) if is_safe_image_href(poster) => Element::new("g").with_child(
                Element::new("image")
                    .with_num("width", w)
                    .with_num("height", h)
                    .with_attr("href", poster)
                    .with_attr("preserveAspectRatio", "xMidYMid slice"),
            ),
            Some(_) => {
                return Err(LayerdocError::render(format!(
                    "poster for layer '{}' is not an allowed URL",
                    layer.id
                )));
            }
            None => placeholder(w, h, "#111827", ""),
        };
        g.push(play_glyph(w, h));
        Ok(Some(g))
    }
}

fn play_glyph(w: f64, h: f64) -> Element {
    let size = (w.min(h) / 4.0).max(4.0);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let d = path_from_points(&[
        Point::new(cx - size * 0.4, cy - size * 0.5),
        Point::new(cx + size * 0.5, cy),
        Point::new(cx - size * 0.4, cy + size * 0.5),
    ]);
    Element::new("path")
        .with_attr("d", format!("{d} Z"))
        .with_attr("fill", "#ffffff")
        .with_attr("fill-opacity", "0.85")
}

/// Accepts audio layers and draws nothing.
#[derive(Debug)]
pub struct AudioRenderer;

impl LayerRenderer for AudioRenderer {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn supported_kinds(&self) -> &'static [LayerKind] {
        &[LayerKind::Audio]
    }

    fn render(&self, _layer: &Layer, _ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>> {
        Ok(None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/media.rs"]
mod tests;
