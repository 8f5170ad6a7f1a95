use super::*;
use crate::foundation::core::GradientStop;
use crate::scene::model::{GradientKind, GradientSpec, Geometry};
use crate::scene::props::{GroupProps, LayerProps, ShapeProps};
use crate::recovery::layer::recover_layer;
use serde_json::Map;

fn shape(id: &str) -> Layer {
    Layer::new(id, LayerProps::Shape(ShapeProps::default()))
}

fn group(id: &str) -> Layer {
    Layer::new(id, LayerProps::Group(GroupProps::default()))
}

#[test]
fn clean_design_is_valid() {
    let d = Design::new(400.0, 300.0)
        .with_background(Background::Color("#ffffff".to_owned()))
        .with_layer(shape("a").with_geometry(Geometry::rect(10.0, 10.0, 50.0, 50.0)));
    let v = validate_design(&d);
    assert!(v.valid);
    assert!(v.errors.is_empty(), "{v:?}");
    assert!(v.warnings.is_empty(), "{v:?}");
}

#[test]
fn bad_dimensions_are_errors() {
    for (w, h) in [(0.0, 300.0), (400.0, -1.0), (f64::NAN, 300.0), (10_001.0, 300.0)] {
        let v = validate_design(&Design::new(w, h).with_layer(shape("a")));
        assert!(!v.valid, "{w}x{h}");
        assert_eq!(v.errors.len(), 1, "{v:?}");
        assert!(v.errors[0].starts_with("canvas "), "{v:?}");
    }
}

#[test]
fn fractional_dimensions_warn() {
    let v = validate_design(&Design::new(400.5, 300.0).with_layer(shape("a")));
    assert!(v.valid);
    assert_eq!(v.warnings.len(), 1);
    assert!(v.warnings[0].contains("400.5"));
}

#[test]
fn background_checks() {
    let bad_color = Design::new(10.0, 10.0)
        .with_background(Background::Color("#ggg".to_owned()))
        .with_layer(shape("a"));
    assert!(!validate_design(&bad_color).valid);

    let empty_gradient = Design::new(10.0, 10.0)
        .with_background(Background::Gradient(GradientSpec {
            kind: GradientKind::Linear,
            stops: Vec::new(),
            angle: 0.0,
        }))
        .with_layer(shape("a"));
    assert!(!validate_design(&empty_gradient).valid);

    let good_gradient = Design::new(10.0, 10.0)
        .with_background(Background::Gradient(GradientSpec {
            kind: GradientKind::Radial,
            stops: vec![GradientStop::new(0.0, "red"), GradientStop::new(1.0, "blue")],
            angle: 0.0,
        }))
        .with_layer(shape("a"));
    assert!(validate_design(&good_gradient).valid);
}

#[test]
fn empty_layer_list_only_warns() {
    let v = validate_design(&Design::new(100.0, 100.0));
    assert!(v.valid);
    assert_eq!(v.warnings, vec!["design has no layers".to_owned()]);
}

#[test]
fn unsupported_kind_warns() {
    let layer = Layer::new(
        "x",
        LayerProps::Unknown {
            kind: "sticker".to_owned(),
            raw: Map::new(),
        },
    );
    let v = validate_design(&Design::new(100.0, 100.0).with_layer(layer));
    assert!(v.valid);
    assert_eq!(v.warnings, vec!["layer 'x': unsupported kind 'sticker'".to_owned()]);
}

#[test]
fn per_layer_geometry_and_z_index_errors() {
    let broken = shape("b")
        .with_geometry(Geometry {
            width: -5.0,
            opacity: 2.5,
            rotation: f64::NAN,
            ..Geometry::default()
        })
        .with_z_index(-1);
    let v = validate_design(&Design::new(100.0, 100.0).with_layer(broken.clone()));
    assert!(!v.valid);
    assert_eq!(v.errors.len(), 4, "{v:?}");
    assert!(v.errors.iter().all(|e| e.starts_with("layer 'b': ")));

    let fixed = recover_layer(&broken);
    let v = validate_design(&Design::new(100.0, 100.0).with_layer(fixed));
    assert!(v.valid, "{v:?}");
}

#[test]
fn structural_warnings() {
    let d = Design::new(100.0, 100.0)
        .with_layer(shape("dup"))
        .with_layer(shape("dup"))
        .with_layer(shape("orphan").with_parent("nowhere"))
        .with_layer(shape("under-shape").with_parent("orphan"))
        .with_layer(group("c1").with_parent("c2"))
        .with_layer(group("c2").with_parent("c1"));
    let v = validate_design(&d);
    assert!(v.valid);
    let has = |needle: &str| v.warnings.iter().any(|w| w.contains(needle));
    assert!(has("duplicate layer id 'dup'"), "{v:?}");
    assert!(has("parent 'nowhere' does not exist"), "{v:?}");
    assert!(has("parent 'orphan' is not a group"), "{v:?}");
    assert!(has("layer 'c1': parent chain forms a cycle"), "{v:?}");
    assert!(has("layer 'c2': parent chain forms a cycle"), "{v:?}");
}
