//! Loose JSON boundary for designs.
//!
//! Payloads come from an editor and are frequently partial or malformed. Loading never rejects a
//! structurally valid JSON object because of bad field values: numbers that cannot be read become
//! NaN (so the recovery service repairs them), and the untyped property bag is converted into
//! [`LayerProps`] here, once.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::scene::model::{
    Background, BlendMode, CanvasSettings, Design, Effects, Geometry, GridOverlay, Layer,
    SafeAreaGuide, Shadow,
};
use crate::scene::props::{LayerProps, PropertyBag, gradient_from_bag, loose_f64};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DesignDef {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    width: Option<Value>,
    #[serde(default)]
    height: Option<Value>,
    #[serde(default)]
    background: Option<Value>,
    #[serde(default, alias = "settings")]
    canvas_settings: Option<Map<String, Value>>,
    #[serde(default)]
    layers: Vec<LayerDef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerDef {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "type", alias = "kind")]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    x: Option<Value>,
    #[serde(default)]
    y: Option<Value>,
    #[serde(default)]
    width: Option<Value>,
    #[serde(default)]
    height: Option<Value>,
    #[serde(default)]
    rotation: Option<Value>,
    #[serde(default)]
    scale_x: Option<Value>,
    #[serde(default)]
    scale_y: Option<Value>,
    #[serde(default)]
    opacity: Option<Value>,
    #[serde(default)]
    z_index: Option<Value>,
    #[serde(default)]
    visible: Option<Value>,
    #[serde(default)]
    locked: Option<Value>,
    #[serde(default)]
    parent_id: Option<Value>,
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    blend_mode: Option<String>,
    #[serde(default)]
    shadow: Option<Value>,
    #[serde(default)]
    blur: Option<Value>,
}

impl Design {
    /// Parse a design from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LayerdocResult<Self> {
        let def: DesignDef = serde_json::from_reader(r)
            .map_err(|e| LayerdocError::serde(format!("parse design JSON: {e}")))?;
        Ok(from_def(def))
    }

    /// Parse a design from a JSON string.
    pub fn from_json_str(s: &str) -> LayerdocResult<Self> {
        let def: DesignDef = serde_json::from_str(s)
            .map_err(|e| LayerdocError::serde(format!("parse design JSON: {e}")))?;
        Ok(from_def(def))
    }

    /// Parse a design from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LayerdocResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LayerdocError::validation(format!("open design JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

fn from_def(def: DesignDef) -> Design {
    Design {
        id: def.id.as_ref().and_then(id_string),
        width: loose_or_nan(def.width.as_ref()),
        height: loose_or_nan(def.height.as_ref()),
        background: def
            .background
            .as_ref()
            .map(background_from_value)
            .unwrap_or_default(),
        settings: def
            .canvas_settings
            .as_ref()
            .map(settings_from_bag)
            .unwrap_or_default(),
        layers: def
            .layers
            .into_iter()
            .enumerate()
            .map(|(i, l)| layer_from_def(i, l))
            .collect(),
    }
}

fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Missing fields take `default`; present but unreadable fields become NaN.
fn loose_field(v: Option<&Value>, default: f64) -> f64 {
    match v {
        None | Some(Value::Null) => default,
        Some(v) => loose_f64(v).unwrap_or(f64::NAN),
    }
}

fn loose_or_nan(v: Option<&Value>) -> f64 {
    v.and_then(loose_f64).unwrap_or(f64::NAN)
}

fn loose_bool(v: Option<&Value>, default: bool) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Non-numeric z-index values load as 0.
fn z_index_from(v: Option<&Value>) -> i64 {
    let Some(f) = v.and_then(loose_f64) else {
        return 0;
    };
    if !f.is_finite() {
        return 0;
    }
    f.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64
}

fn layer_from_def(index: usize, def: LayerDef) -> Layer {
    let d = Geometry::default();
    let geometry = Geometry {
        x: loose_field(def.x.as_ref(), d.x),
        y: loose_field(def.y.as_ref(), d.y),
        width: loose_field(def.width.as_ref(), d.width),
        height: loose_field(def.height.as_ref(), d.height),
        rotation: loose_field(def.rotation.as_ref(), d.rotation),
        scale_x: loose_field(def.scale_x.as_ref(), d.scale_x),
        scale_y: loose_field(def.scale_y.as_ref(), d.scale_y),
        opacity: loose_field(def.opacity.as_ref(), d.opacity),
    };

    let empty = Map::new();
    let bag = match def.properties.as_ref() {
        Some(Value::Object(m)) => m,
        _ => &empty,
    };
    let kind_tag = def.kind.as_deref().unwrap_or("");

    Layer {
        id: def
            .id
            .as_ref()
            .and_then(id_string)
            .unwrap_or_else(|| format!("layer-{index}")),
        name: def.name.filter(|n| !n.trim().is_empty()),
        geometry,
        z_index: z_index_from(def.z_index.as_ref()),
        visible: loose_bool(def.visible.as_ref(), true),
        locked: loose_bool(def.locked.as_ref(), false),
        parent_id: def.parent_id.as_ref().and_then(id_string),
        blend_mode: def
            .blend_mode
            .as_deref()
            .map(BlendMode::parse)
            .unwrap_or_default(),
        effects: Effects {
            shadow: def.shadow.as_ref().and_then(shadow_from_value),
            blur: def.blur.as_ref().and_then(loose_f64),
        },
        props: LayerProps::from_bag(kind_tag, bag),
    }
}

fn shadow_from_value(v: &Value) -> Option<Shadow> {
    match v {
        Value::Bool(true) => Some(Shadow::default()),
        Value::Object(m) => {
            let b = PropertyBag(m);
            if !b.boolean(&["enabled"], true) {
                return None;
            }
            let d = Shadow::default();
            Some(Shadow {
                offset_x: b.number(&["offsetX", "x"], d.offset_x),
                offset_y: b.number(&["offsetY", "y"], d.offset_y),
                blur: b.number(&["blur", "blurRadius"], d.blur),
                color: b.string(&["color"], &d.color),
                opacity: b.number(&["opacity"], d.opacity),
            })
        }
        _ => None,
    }
}

pub(crate) fn background_from_value(v: &Value) -> Background {
    match v {
        Value::String(s) if s.trim().eq_ignore_ascii_case("none") => Background::None,
        Value::String(s) => Background::Color(s.trim().to_owned()),
        Value::Object(m) => {
            let b = PropertyBag(m);
            match b.opt_string(&["type"]).as_deref().map(str::trim) {
                Some("color") | None => b
                    .opt_string(&["color", "value"])
                    .map(|c| Background::Color(c.trim().to_owned()))
                    .unwrap_or_default(),
                Some("gradient") => Background::Gradient(gradient_from_bag(m)),
                _ => Background::None,
            }
        }
        _ => Background::None,
    }
}

fn settings_from_bag(m: &Map<String, Value>) -> CanvasSettings {
    let b = PropertyBag(m);

    let grid = match b.get(&["showGrid", "grid"]) {
        Some(Value::Bool(true)) => Some(GridOverlay {
            size: b.number(&["gridSize"], 20.0),
            color: b.string(&["gridColor"], "#e5e7eb"),
        }),
        Some(Value::Object(g)) => {
            let g = PropertyBag(g);
            g.boolean(&["enabled"], true).then(|| GridOverlay {
                size: g.number(&["size"], 20.0),
                color: g.string(&["color"], "#e5e7eb"),
            })
        }
        _ => None,
    };

    let safe_area = match b.get(&["showSafeArea", "safeArea"]) {
        Some(Value::Bool(true)) => Some(SafeAreaGuide {
            margin: b.number(&["safeAreaMargin"], 40.0),
            color: b.string(&["safeAreaColor"], "#ef4444"),
        }),
        Some(Value::Object(g)) => {
            let g = PropertyBag(g);
            g.boolean(&["enabled"], true).then(|| SafeAreaGuide {
                margin: g.number(&["margin"], 40.0),
                color: g.string(&["color"], "#ef4444"),
            })
        }
        _ => None,
    };

    CanvasSettings {
        custom_css: b.opt_string(&["customCss", "customCSS", "css"]),
        grid,
        safe_area,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/load.rs"]
mod tests;
