use super::*;
use crate::scene::props::{ImageProps, LayerProps, ShapeProps, ShapeType, TextProps};

fn shape(geometry: Geometry) -> Layer {
    Layer::new("s", LayerProps::Shape(ShapeProps::default())).with_geometry(geometry)
}

#[test]
fn offending_fields_reset_to_defaults() {
    let layer = shape(Geometry {
        width: -5.0,
        opacity: 2.5,
        rotation: f64::NAN,
        ..Geometry::rect(10.0, 20.0, 50.0, 60.0)
    });
    let out = recover_layer(&layer);
    assert_eq!(out.geometry.width, 100.0);
    assert_eq!(out.geometry.opacity, 1.0);
    assert_eq!(out.geometry.rotation, 0.0);
    assert!(out.geometry.issues().is_empty());

    // Untouched fields survive.
    assert_eq!(out.geometry.x, 10.0);
    assert_eq!(out.geometry.height, 60.0);
    assert_eq!(out.id, "s");
}

#[test]
fn every_unusable_geometry_is_repaired() {
    let layer = shape(Geometry {
        x: f64::INFINITY,
        y: -250_000.0,
        width: 0.0,
        height: 200_000.0,
        rotation: f64::NEG_INFINITY,
        scale_x: 0.0,
        scale_y: f64::NAN,
        opacity: -0.1,
    });
    let out = recover_layer(&layer);
    assert_eq!(out.geometry, Geometry::default());
}

#[test]
fn sound_layer_is_unchanged() {
    let layer = shape(Geometry {
        rotation: 45.0,
        scale_x: -1.0,
        opacity: 0.3,
        ..Geometry::rect(1.0, 2.0, 3.0, 4.0)
    })
    .with_z_index(7);
    assert_eq!(recover_layer(&layer), layer);
}

#[test]
fn negative_z_index_becomes_zero() {
    let layer = shape(Geometry::default()).with_z_index(-3);
    assert_eq!(recover_layer(&layer).z_index, 0);
}

#[test]
fn props_are_repaired_over_kind_defaults() {
    let text = Layer::new(
        "t",
        LayerProps::Text(TextProps {
            font_size: -4.0,
            line_height: 0.0,
            color: "bogus".to_owned(),
            ..TextProps::default()
        }),
    );
    let LayerProps::Text(p) = recover_layer(&text).props else {
        panic!("kind changed");
    };
    assert_eq!(p.font_size, 16.0);
    assert_eq!(p.line_height, 1.2);
    assert_eq!(p.color, "#000000");

    let image = Layer::new(
        "i",
        LayerProps::Image(ImageProps {
            src: "javascript:alert(1)".to_owned(),
            corner_radius: -2.0,
            ..ImageProps::default()
        }),
    );
    let LayerProps::Image(p) = recover_layer(&image).props else {
        panic!("kind changed");
    };
    assert!(p.src.is_empty());
    assert_eq!(p.corner_radius, 0.0);

    let path = Layer::new(
        "p",
        LayerProps::Shape(ShapeProps {
            shape_type: ShapeType::Path,
            path_data: Some("nonsense".to_owned()),
            stroke_width: f64::NAN,
            ..ShapeProps::default()
        }),
    );
    let LayerProps::Shape(p) = recover_layer(&path).props else {
        panic!("kind changed");
    };
    assert_eq!(p.shape_type, ShapeType::Rectangle);
    assert_eq!(p.path_data, None);
    assert_eq!(p.stroke_width, 0.0);
}

#[test]
fn input_layer_is_not_mutated() {
    let layer = shape(Geometry {
        width: -1.0,
        ..Geometry::default()
    });
    let before = layer.clone();
    let _ = recover_layer(&layer);
    assert_eq!(layer, before);
}
