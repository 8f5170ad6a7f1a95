//! Helpers shared by the built-in renderers.

use crate::compositor::opts::CompositorOpts;
use crate::document::builder::{
    create_clip_path, create_filter, create_group, create_linear_gradient, create_radial_gradient,
};
use crate::document::defs::Definitions;
use crate::document::node::{Element, Node};
use crate::foundation::core::{contrasting_label_color, normalize_color};
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::foundation::format::fmt_num;
use crate::foundation::math::{Fnv1a64, content_id};
use crate::scene::model::{BlendMode, Effects, GradientKind, GradientSpec, Layer, Shadow};
use crate::scene::props::stop_is_valid;
use crate::transform::compose::transform_attribute;

/// Wrap rendered content in the layer group: id, transform, opacity, blend mode and effects.
pub(crate) fn wrap_layer(
    layer: &Layer,
    xml_id: &str,
    content: Element,
    defs: &mut Definitions,
    opts: &CompositorOpts,
) -> Element {
    let mut g = create_group(Some(xml_id));

    let transform = transform_attribute(&layer.geometry);
    if !transform.is_empty() {
        g.set_attr("transform", transform);
    }
    if layer.geometry.opacity < 1.0 {
        g.set_num("opacity", layer.geometry.opacity);
    }
    if opts.layer_data_attrs {
        g.set_attr("data-layer-id", layer.id.as_str());
        g.set_attr("data-layer-kind", layer.props.kind_tag());
    }
    if layer.blend_mode != BlendMode::Normal {
        g.set_attr(
            "style",
            format!("mix-blend-mode:{}", layer.blend_mode.css_keyword()),
        );
    }
    if let Some(id) = effect_filter(&layer.effects, defs) {
        g.set_attr("filter", format!("url(#{id})"));
    }
    if let Some(name) = layer.name.as_deref() {
        g.push(Element::new("title").with_child(Node::Text(name.to_owned())));
    }
    g.push(content);
    g
}

/// Register the filter for `effects`, returning its id. Identical parameters share one id.
pub(crate) fn effect_filter(effects: &Effects, defs: &mut Definitions) -> Option<String> {
    let blur = effects.blur.filter(|b| b.is_finite() && *b > 0.0);
    let shadow = effects.shadow.as_ref().map(clean_shadow);
    if blur.is_none() && shadow.is_none() {
        return None;
    }

    let mut h = Fnv1a64::new_default();
    h.write_f64(blur.unwrap_or(0.0));
    if let Some(s) = &shadow {
        h.write_f64(s.offset_x);
        h.write_f64(s.offset_y);
        h.write_f64(s.blur);
        h.write_str(&s.color);
        h.write_f64(s.opacity);
    }
    let id = content_id("fx", h.finish());
    if defs.contains(&id) {
        return Some(id);
    }

    let mut filter = create_filter(&id)
        .with_attr("x", "-50%")
        .with_attr("y", "-50%")
        .with_attr("width", "200%")
        .with_attr("height", "200%");
    let mut input = "SourceGraphic";
    if let Some(b) = blur {
        filter.push(
            Element::new("feGaussianBlur")
                .with_attr("in", "SourceGraphic")
                .with_num("stdDeviation", b)
                .with_attr("result", "blurred"),
        );
        input = "blurred";
    }
    if let Some(s) = shadow {
        filter.push(
            Element::new("feDropShadow")
                .with_attr("in", input)
                .with_num("dx", s.offset_x)
                .with_num("dy", s.offset_y)
                .with_num("stdDeviation", s.blur / 2.0)
                .with_attr("flood-color", s.color)
                .with_num("flood-opacity", s.opacity),
        );
    }
    defs.register(filter);
    Some(id)
}

fn clean_shadow(s: &Shadow) -> Shadow {
    let d = Shadow::default();
    let finite = |v: f64, dv: f64| if v.is_finite() { v } else { dv };
    Shadow {
        offset_x: finite(s.offset_x, d.offset_x),
        offset_y: finite(s.offset_y, d.offset_y),
        blur: finite(s.blur, d.blur).max(0.0),
        color: normalize_color(&s.color).unwrap_or(d.color),
        opacity: finite(s.opacity, d.opacity).clamp(0.0, 1.0),
    }
}

/// Normalized color for `field`, or a render error.
pub(crate) fn require_color(value: &str, field: &str) -> LayerdocResult<String> {
    normalize_color(value)
        .ok_or_else(|| LayerdocError::render(format!("{field} '{value}' is not a valid color")))
}

/// Finite, non-negative number for `field`, or a render error.
pub(crate) fn require_non_negative(value: f64, field: &str) -> LayerdocResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayerdocError::render(format!(
            "{field} must be a finite number >= 0, got {value}"
        )))
    }
}

/// Finite, positive number for `field`, or a render error.
pub(crate) fn require_positive(value: f64, field: &str) -> LayerdocResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayerdocError::render(format!(
            "{field} must be a finite number > 0, got {value}"
        )))
    }
}

/// Register a gradient definition and return its `url(#id)` paint reference.
pub(crate) fn gradient_paint(spec: &GradientSpec, defs: &mut Definitions) -> LayerdocResult<String> {
    if spec.stops.is_empty() {
        return Err(LayerdocError::render("gradient has no stops"));
    }
    if let Some(bad) = spec.stops.iter().find(|s| !stop_is_valid(s)) {
        return Err(LayerdocError::render(format!(
            "gradient stop '{}' at {} is invalid",
            bad.color, bad.offset
        )));
    }

    let mut h = Fnv1a64::new_default();
    h.write_str(match spec.kind {
        GradientKind::Linear => "linear",
        GradientKind::Radial => "radial",
    });
    h.write_f64(spec.angle);
    for s in &spec.stops {
        h.write_f64(s.offset);
        h.write_str(&s.color);
        h.write_f64(s.opacity.unwrap_or(1.0));
    }
    let id = content_id("grad", h.finish());
    if !defs.contains(&id) {
        defs.register(gradient_element(&id, spec));
    }
    Ok(format!("url(#{id})"))
}

fn gradient_element(id: &str, spec: &GradientSpec) -> Element {
    match spec.kind {
        GradientKind::Linear => {
            let (s, c) = spec.angle.to_radians().sin_cos();
            let pct = |v: f64| format!("{}%", fmt_num(v * 100.0));
            create_linear_gradient(
                id,
                &spec.stops,
                &[
                    ("x1", pct(0.5 - c / 2.0)),
                    ("y1", pct(0.5 - s / 2.0)),
                    ("x2", pct(0.5 + c / 2.0)),
                    ("y2", pct(0.5 + s / 2.0)),
                ],
            )
        }
        GradientKind::Radial => create_radial_gradient(
            id,
            &spec.stops,
            &[
                ("cx", "50%".to_owned()),
                ("cy", "50%".to_owned()),
                ("r", "50%".to_owned()),
            ],
        ),
    }
}

/// Register a rectangular clip path for a `width x height` box and return its id.
pub(crate) fn box_clip(width: f64, height: f64, radius: f64, defs: &mut Definitions) -> String {
    let mut h = Fnv1a64::new_default();
    h.write_f64(width);
    h.write_f64(height);
    h.write_f64(radius);
    let id = content_id("clip", h.finish());
    if !defs.contains(&id) {
        let mut rect = Element::new("rect")
            .with_num("width", width)
            .with_num("height", height);
        if radius > 0.0 {
            rect.set_num("rx", radius);
            rect.set_num("ry", radius);
        }
        defs.register(create_clip_path(&id).with_child(rect));
    }
    id
}

/// Neutral box with a centered caption, drawn when a layer has nothing real to show.
pub(crate) fn placeholder(width: f64, height: f64, fill: &str, caption: &str) -> Element {
    let mut g = Element::new("g").with_child(
        Element::new("rect")
            .with_num("width", width)
            .with_num("height", height)
            .with_attr("fill", fill)
            .with_attr("stroke", "#9ca3af")
            .with_attr("stroke-dasharray", "4 4"),
    );
    if !caption.is_empty() {
        g.push(
            Element::new("text")
                .with_num("x", width / 2.0)
                .with_num("y", height / 2.0)
                .with_attr("text-anchor", "middle")
                .with_attr("dominant-baseline", "middle")
                .with_attr("font-family", "Arial, sans-serif")
                .with_num("font-size", (height / 8.0).clamp(8.0, 24.0))
                .with_attr("fill", contrasting_label_color(fill))
                .with_child(Node::Text(caption.to_owned())),
        );
    }
    g
}

#[cfg(test)]
#[path = "../../tests/unit/render/common.rs"]
mod tests;
