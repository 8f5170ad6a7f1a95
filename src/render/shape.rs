use std::f64::consts::PI;

use crate::document::node::Element;
use crate::foundation::core::Point;
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::render::common::{gradient_paint, require_color, require_non_negative};
use crate::render::context::RenderContext;
use crate::render::registry::LayerRenderer;
use crate::scene::model::{Layer, LayerKind};
use crate::scene::props::{LayerProps, ShapeProps, ShapeType, VERTEX_COUNT_RANGE};
use crate::transform::compose::{arc_path, is_valid_path_data, path_from_points};

/// Draws geometric primitives and custom paths.
#[derive(Debug)]
pub struct ShapeRenderer;

impl LayerRenderer for ShapeRenderer {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn supported_kinds(&self) -> &'static [LayerKind] {
        &[LayerKind::Shape]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn render(&self, layer: &Layer, ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>> {
        let LayerProps::Shape(p) = &layer.props else {
            return Err(LayerdocError::render("shape renderer given non-shape props"));
        };
        let (w, h) = (layer.geometry.width, layer.geometry.height);
        let stroke_width = require_non_negative(p.stroke_width, "strokeWidth")?;
        let corner_radius = require_non_negative(p.corner_radius, "cornerRadius")?;
        let stroke = require_color(&p.stroke, "stroke")?;
        let fill = match &p.fill_gradient {
            Some(g) => gradient_paint(g, ctx.defs())?,
            None => require_color(&p.fill, "fill")?,
        };

        let mut el = shape_element(p, w, h, corner_radius)?;
        if p.shape_type == ShapeType::Line {
            // A line has no interior; its paint is the stroke.
            let paint = if stroke == "none" { fill } else { stroke };
            el.set_attr("stroke", paint);
            el.set_num("stroke-width", if stroke_width > 0.0 { stroke_width } else { 1.0 });
            return Ok(Some(el));
        }

        el.set_attr("fill", fill);
        if stroke != "none" && stroke_width > 0.0 {
            el.set_attr("stroke", stroke);
            el.set_num("stroke-width", stroke_width);
        }
        Ok(Some(el))
    }
}

fn shape_element(p: &ShapeProps, w: f64, h: f64, corner_radius: f64) -> LayerdocResult<Element> {
    let (cx, cy, rx, ry) = (w / 2.0, h / 2.0, w / 2.0, h / 2.0);
    let el = match p.shape_type {
        ShapeType::Rectangle => {
            let mut rect = Element::new("rect").with_num("width", w).with_num("height", h);
            if corner_radius > 0.0 {
                let r = corner_radius.min(rx).min(ry);
                rect.set_num("rx", r);
                rect.set_num("ry", r);
            }
            rect
        }
        ShapeType::Circle => Element::new("circle")
            .with_num("cx", cx)
            .with_num("cy", cy)
            .with_num("r", rx.min(ry)),
        ShapeType::Ellipse => Element::new("ellipse")
            .with_num("cx", cx)
            .with_num("cy", cy)
            .with_num("rx", rx)
            .with_num("ry", ry),
        ShapeType::Line => Element::new("line")
            .with_num("x1", 0.0)
            .with_num("y1", 0.0)
            .with_num("x2", w)
            .with_num("y2", h),
        ShapeType::Triangle => closed_path(&[
            Point::new(cx, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ]),
        ShapeType::Polygon => {
            let n = require_vertex_count(p.sides, "sides")?;
            closed_path(&regular_points(cx, cy, rx, ry, n, None))
        }
        ShapeType::Star => {
            let inner = if p.inner_radius.is_finite() && p.inner_radius > 0.0 && p.inner_radius < 1.0
            {
                p.inner_radius
            } else {
                return Err(LayerdocError::render(format!(
                    "innerRadius must be within (0, 1), got {}",
                    p.inner_radius
                )));
            };
            let n = require_vertex_count(p.points, "points")?;
            closed_path(&regular_points(cx, cy, rx, ry, n, Some(inner)))
        }
        ShapeType::Arc => {
            if !p.start_angle.is_finite() || !p.end_angle.is_finite() {
                return Err(LayerdocError::render("arc angles must be finite"));
            }
            if (p.end_angle - p.start_angle).abs() >= 360.0 {
                Element::new("ellipse")
                    .with_num("cx", cx)
                    .with_num("cy", cy)
                    .with_num("rx", rx)
                    .with_num("ry", ry)
            } else {
                Element::new("path").with_attr(
                    "d",
                    arc_path(cx, cy, rx, ry, p.start_angle, p.end_angle),
                )
            }
        }
        ShapeType::Path => match p.path_data.as_deref() {
            Some(d) if is_valid_path_data(d) => Element::new("path").with_attr("d", d.trim()),
            _ => return Err(LayerdocError::render("path shape has missing or invalid path data")),
        },
    };
    Ok(el)
}

fn require_vertex_count(n: u32, field: &str) -> LayerdocResult<u32> {
    if VERTEX_COUNT_RANGE.contains(&n) {
        Ok(n)
    } else {
        Err(LayerdocError::render(format!(
            "{field} must be within {}..={}, got {n}",
            VERTEX_COUNT_RANGE.start(),
            VERTEX_COUNT_RANGE.end()
        )))
    }
}

fn closed_path(points: &[Point]) -> Element {
    Element::new("path").with_attr("d", format!("{} Z", path_from_points(points)))
}

/// Vertices of a regular polygon (or star, with `inner` as the inner radius ratio) inscribed in
/// the ellipse, starting at the top.
fn regular_points(cx: f64, cy: f64, rx: f64, ry: f64, n: u32, inner: Option<f64>) -> Vec<Point> {
    let steps = if inner.is_some() { n * 2 } else { n };
    let step = 2.0 * PI / f64::from(steps);
    (0..steps)
        .map(|i| {
            let k = match inner {
                Some(r) if i % 2 == 1 => r,
                _ => 1.0,
            };
            let a = -PI / 2.0 + step * f64::from(i);
            Point::new(cx + rx * k * a.cos(), cy + ry * k * a.sin())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
