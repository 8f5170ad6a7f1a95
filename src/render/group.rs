use crate::document::node::Element;
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::render::common::box_clip;
use crate::render::context::RenderContext;
use crate::render::registry::LayerRenderer;
use crate::scene::model::{Layer, LayerKind};
use crate::scene::props::LayerProps;

/// Renders a group's children (layers whose `parent_id` names it) in z-order.
///
/// Children go through the same visibility, dispatch and recovery path as root layers; the
/// group's own transform is applied by the wrapper around the returned element.
#[derive(Debug)]
pub struct GroupRenderer;

impl LayerRenderer for GroupRenderer {
    fn name(&self) -> &'static str {
        "group"
    }

    fn supported_kinds(&self) -> &'static [LayerKind] {
        &[LayerKind::Group]
    }

    fn priority(&self) -> i32 {
        20
    }

    fn render(&self, layer: &Layer, ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>> {
        let LayerProps::Group(p) = &layer.props else {
            return Err(LayerdocError::render("group renderer given non-group props"));
        };
        let children = ctx.render_children(layer)?;

        let mut g = Element::new("g");
        if p.clip_content {
            let id = box_clip(layer.geometry.width, layer.geometry.height, 0.0, ctx.defs());
            g.set_attr("clip-path", format!("url(#{id})"));
        }
        for child in children {
            g.push(child);
        }
        Ok(Some(g))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/group.rs"]
mod tests;
