use std::collections::{HashMap, HashSet};

use crate::foundation::core::{Canvas, MAX_CANVAS_DIMENSION, is_valid_color};
use crate::foundation::error::LayerdocError;
use crate::scene::hierarchy::LayerTree;
use crate::scene::model::{Background, Design, Layer, LayerKind};
use crate::scene::props::stop_is_valid;

/// Advisory result of [`validate_design`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DesignValidation {
    /// `true` when `errors` is empty.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check a design before (or instead of) rendering it.
///
/// Errors: unusable canvas dimensions, an invalid background, and per-layer geometry or z-index
/// problems. Warnings: no layers, unsupported kinds, fractional canvas dimensions, duplicate ids,
/// dangling or non-group parents and parent cycles. Rendering does not depend on this check.
pub fn validate_design(design: &Design) -> DesignValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match Canvas::from_dimensions(design.width, design.height, MAX_CANVAS_DIMENSION) {
        Ok(_) => {
            for (name, v) in [("width", design.width), ("height", design.height)] {
                if v.fract() != 0.0 {
                    warnings.push(format!("canvas {name} {v} is not an integer, truncated"));
                }
            }
        }
        Err(LayerdocError::Validation(msg)) => errors.push(msg),
        Err(other) => errors.push(other.to_string()),
    }

    match &design.background {
        Background::Color(c) if !is_valid_color(c) => {
            errors.push(format!("background color '{c}' is not a valid color"));
        }
        Background::Gradient(spec) => {
            if spec.stops.is_empty() {
                errors.push("background gradient has no stops".to_owned());
            } else if spec.stops.iter().any(|s| !stop_is_valid(s)) {
                errors.push("background gradient has an invalid stop".to_owned());
            }
        }
        _ => {}
    }

    if design.layers.is_empty() {
        warnings.push("design has no layers".to_owned());
    }

    for layer in &design.layers {
        check_layer(layer, &mut errors, &mut warnings);
    }
    check_structure(design, &mut warnings);

    DesignValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_layer(layer: &Layer, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let id = &layer.id;
    if layer.kind() == LayerKind::Unknown {
        warnings.push(format!(
            "layer '{id}': unsupported kind '{}'",
            layer.props.kind_tag()
        ));
    }
    for issue in layer.geometry.issues() {
        errors.push(format!("layer '{id}': {issue}"));
    }
    if layer.z_index < 0 {
        errors.push(format!("layer '{id}': zIndex must be >= 0, got {}", layer.z_index));
    }
}

fn check_structure(design: &Design, warnings: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for layer in &design.layers {
        if !seen.insert(layer.id.as_str()) {
            warnings.push(format!("duplicate layer id '{}'", layer.id));
        }
    }

    // First layer owns a duplicated id, as in LayerTree.
    let mut kinds: HashMap<&str, LayerKind> = HashMap::new();
    for l in &design.layers {
        kinds.entry(l.id.as_str()).or_insert_with(|| l.kind());
    }
    for layer in &design.layers {
        let Some(parent) = layer.parent() else {
            continue;
        };
        match kinds.get(parent) {
            None => warnings.push(format!(
                "layer '{}': parent '{parent}' does not exist, rendered as a root layer",
                layer.id
            )),
            Some(LayerKind::Group) => {}
            Some(_) => warnings.push(format!(
                "layer '{}': parent '{parent}' is not a group, layer is never drawn",
                layer.id
            )),
        }
    }

    for id in LayerTree::new(design).unreachable() {
        warnings.push(format!("layer '{id}': parent chain forms a cycle"));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/design_check.rs"]
mod tests;
