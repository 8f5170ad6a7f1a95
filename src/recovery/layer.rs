use tracing::debug;

use crate::scene::model::{Geometry, Layer, MAX_LAYER_EXTENT};

/// Corrected copy of `layer` that passes the per-layer checks.
///
/// Each unusable geometry field is reset on its own: non-finite values, non-positive or oversized
/// width/height, zero scale, out-of-range opacity and far-away coordinates. A negative z-index
/// becomes 0 and the kind properties are repaired over the kind defaults. Identity, parentage,
/// visibility and effects are kept.
pub fn recover_layer(layer: &Layer) -> Layer {
    let mut out = layer.clone();
    out.geometry = recover_geometry(&layer.geometry);
    if out.z_index < 0 {
        out.z_index = 0;
    }
    out.props = layer.props.repaired();
    if out != *layer {
        debug!(layer_id = %layer.id, "recovered layer fields");
    }
    out
}

fn recover_geometry(g: &Geometry) -> Geometry {
    let d = Geometry::default();
    let coord = |v: f64, dv: f64| {
        if v.is_finite() && v.abs() <= MAX_LAYER_EXTENT {
            v
        } else {
            dv
        }
    };
    let extent = |v: f64, dv: f64| {
        if v.is_finite() && v > 0.0 && v <= MAX_LAYER_EXTENT {
            v
        } else {
            dv
        }
    };
    let scale = |v: f64, dv: f64| if v.is_finite() && v != 0.0 { v } else { dv };
    Geometry {
        x: coord(g.x, d.x),
        y: coord(g.y, d.y),
        width: extent(g.width, d.width),
        height: extent(g.height, d.height),
        rotation: if g.rotation.is_finite() { g.rotation } else { d.rotation },
        scale_x: scale(g.scale_x, d.scale_x),
        scale_y: scale(g.scale_y, d.scale_y),
        opacity: if (0.0..=1.0).contains(&g.opacity) {
            g.opacity
        } else {
            d.opacity
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recovery/layer.rs"]
mod tests;
