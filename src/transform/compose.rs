//! Per-layer affine math and path-data generation.
//!
//! Everything here is total over finite input: no function returns an error. Non-finite input
//! produces non-finite output, which the number formatter prints as `0`.

use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;

use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::format::{fmt_num, fmt_num_into};
use crate::scene::model::Geometry;

/// One step of a layer transform, in the order it appears in a `transform` attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// `translate(x, y)`.
    Translate(Vec2),
    /// `rotate(degrees, cx, cy)`, clockwise in a y-down space.
    Rotate {
        /// Angle in degrees.
        degrees: f64,
        /// Pivot in the layer's local space.
        center: Point,
    },
    /// `scale(sx, sy)`.
    Scale(Vec2),
}

impl TransformOp {
    /// Matrix for this single step.
    pub fn to_affine(self) -> Affine {
        match self {
            Self::Translate(v) => Affine::translate(v),
            Self::Rotate { degrees, center } => {
                let c = center.to_vec2();
                Affine::translate(c) * Affine::rotate(degrees.to_radians()) * Affine::translate(-c)
            }
            Self::Scale(s) => Affine::scale_non_uniform(s.x, s.y),
        }
    }

    fn write_into(self, out: &mut String) {
        let (name, args, n) = match self {
            Self::Translate(v) => ("translate", [v.x, v.y, 0.0], 2),
            Self::Rotate { degrees, center } => ("rotate", [degrees, center.x, center.y], 3),
            Self::Scale(s) => ("scale", [s.x, s.y, 0.0], 2),
        };
        out.push_str(name);
        out.push('(');
        for (i, a) in args[..n].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            fmt_num_into(out, *a);
        }
        out.push(')');
    }
}

/// Ordered transform steps for a layer: translate, rotate about the box center, scale.
///
/// No-op steps are omitted, so an untransformed layer yields an empty list.
pub fn transform_ops(g: &Geometry) -> Vec<TransformOp> {
    let mut ops = Vec::with_capacity(3);
    if g.x != 0.0 || g.y != 0.0 {
        ops.push(TransformOp::Translate(Vec2::new(g.x, g.y)));
    }
    if g.rotation != 0.0 {
        ops.push(TransformOp::Rotate {
            degrees: g.rotation,
            center: Point::new(g.width / 2.0, g.height / 2.0),
        });
    }
    if g.scale_x != 1.0 || g.scale_y != 1.0 {
        ops.push(TransformOp::Scale(Vec2::new(g.scale_x, g.scale_y)));
    }
    ops
}

/// `transform` attribute value for a layer, e.g. `translate(10, 10) rotate(45, 25, 25)`.
///
/// Returns an empty string for an identity transform.
pub fn transform_attribute(g: &Geometry) -> String {
    let mut out = String::new();
    for (i, op) in transform_ops(g).into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        op.write_into(&mut out);
    }
    out
}

/// Closed-form `(a, b, c, d, e, f)` coefficients equal to applying [`transform_ops`] in order.
pub fn affine_coeffs(g: &Geometry) -> [f64; 6] {
    let (s, c) = g.rotation.to_radians().sin_cos();
    let (px, py) = (g.width / 2.0, g.height / 2.0);
    [
        c * g.scale_x,
        s * g.scale_x,
        -s * g.scale_y,
        c * g.scale_y,
        g.x + px - c * px + s * py,
        g.y + py - s * px - c * py,
    ]
}

/// Layer matrix as a kurbo [`Affine`].
pub fn affine_matrix(g: &Geometry) -> Affine {
    Affine::new(affine_coeffs(g))
}

/// Axis-aligned box in parent space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, `>= 0`.
    pub width: f64,
    /// Height, `>= 0`.
    pub height: f64,
}

/// Bounding box of a layer.
///
/// Without rotation this is the scaled box anchored at `(x, y)`. With rotation it is the
/// axis-aligned box of the rotated, scaled box, centered on the unscaled box center.
pub fn bounding_box(g: &Geometry) -> BoundingBox {
    let w = g.width * g.scale_x.abs();
    let h = g.height * g.scale_y.abs();
    if g.rotation == 0.0 {
        return BoundingBox {
            x: g.x,
            y: g.y,
            width: w,
            height: h,
        };
    }
    let (s, c) = g.rotation.to_radians().sin_cos();
    let bw = c.abs() * w + s.abs() * h;
    let bh = s.abs() * w + c.abs() * h;
    let cx = g.x + g.width / 2.0;
    let cy = g.y + g.height / 2.0;
    BoundingBox {
        x: cx - bw / 2.0,
        y: cy - bh / 2.0,
        width: bw,
        height: bh,
    }
}

/// `M p0 L p1 L p2 ...`; the path is left open.
pub fn path_from_points(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(if i == 0 { 'M' } else { 'L' });
        out.push(' ');
        fmt_num_into(&mut out, p.x);
        out.push(' ');
        fmt_num_into(&mut out, p.y);
    }
    out
}

/// Closed pie slice of the ellipse at `(cx, cy)` between two angles in degrees.
///
/// Angles run clockwise from the positive x axis. The large-arc flag is set when the span exceeds
/// 180 degrees and the sweep flag when `end_angle > start_angle`.
pub fn arc_path(cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, end_angle: f64) -> String {
    let point_at = |deg: f64| {
        let (s, c) = deg.to_radians().sin_cos();
        Point::new(cx + rx * c, cy + ry * s)
    };
    let start = point_at(start_angle);
    let end = point_at(end_angle);
    let large = u8::from((end_angle - start_angle).abs() > 180.0);
    let sweep = u8::from(end_angle > start_angle);

    let mut out = path_from_points(&[Point::new(cx, cy), start]);
    let _ = write!(
        out,
        " A {} {} 0 {large} {sweep} {} {} Z",
        fmt_num(rx),
        fmt_num(ry),
        fmt_num(end.x),
        fmt_num(end.y)
    );
    out
}

/// Map any angle into `[0, 360)`. Non-finite input maps to `0`.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

fn path_data_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*[Mm][MmLlHhVvCcSsQqTtAaZz0-9eE+\-.,\s]*$").expect("valid regex")
    })
}

/// Return `true` for path data made only of path commands and numbers, starting with a moveto.
pub fn is_valid_path_data(d: &str) -> bool {
    path_data_regex().is_match(d) && d.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/compose.rs"]
mod tests;
