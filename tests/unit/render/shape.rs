use super::*;
use crate::compositor::opts::CompositorOpts;
use crate::compositor::report::RenderReport;
use crate::document::defs::Definitions;
use crate::foundation::core::GradientStop;
use crate::render::registry::builtin_registry;
use crate::scene::hierarchy::LayerTree;
use crate::scene::model::{GradientKind, GradientSpec};

fn render_sized(props: ShapeProps, w: f64, h: f64) -> (LayerdocResult<Option<Element>>, Definitions) {
    let mut layer = Layer::new("s", LayerProps::Shape(props));
    layer.geometry.width = w;
    layer.geometry.height = h;
    let layers = [layer];
    let tree = LayerTree::from_layers(&layers);
    let mut defs = Definitions::new();
    let mut report = RenderReport::default();
    let opts = CompositorOpts::default();
    let mut ctx = RenderContext::new(&tree, builtin_registry(), &mut defs, &mut report, &opts);
    let out = ShapeRenderer.render(&layers[0], &mut ctx);
    (out, defs)
}

fn draw(props: ShapeProps) -> Element {
    render_sized(props, 100.0, 100.0).0.unwrap().unwrap()
}

fn of_type(shape_type: ShapeType) -> ShapeProps {
    ShapeProps {
        shape_type,
        ..ShapeProps::default()
    }
}

#[test]
fn default_rectangle_has_fill_and_no_stroke() {
    let el = draw(ShapeProps {
        fill: "#FF0000".to_owned(),
        ..ShapeProps::default()
    });
    assert_eq!(el.name, "rect");
    assert_eq!(el.attr("width"), Some("100"));
    assert_eq!(el.attr("fill"), Some("#ff0000"));
    assert_eq!(el.attr("stroke"), None);
    assert_eq!(el.attr("rx"), None);
}

#[test]
fn corner_radius_is_clamped_to_half_extent() {
    let (out, _) = render_sized(
        ShapeProps {
            corner_radius: 30.0,
            ..ShapeProps::default()
        },
        100.0,
        40.0,
    );
    let el = out.unwrap().unwrap();
    assert_eq!(el.attr("rx"), Some("20"));
    assert_eq!(el.attr("ry"), Some("20"));
}

#[test]
fn stroke_is_emitted_when_visible() {
    let el = draw(ShapeProps {
        stroke: "#000".to_owned(),
        stroke_width: 2.0,
        ..ShapeProps::default()
    });
    assert_eq!(el.attr("stroke"), Some("#000"));
    assert_eq!(el.attr("stroke-width"), Some("2"));
}

#[test]
fn circle_and_ellipse_fit_the_box() {
    let (out, _) = render_sized(of_type(ShapeType::Circle), 80.0, 40.0);
    let c = out.unwrap().unwrap();
    assert_eq!((c.name.as_str(), c.attr("cx"), c.attr("r")), ("circle", Some("40"), Some("20")));

    let (out, _) = render_sized(of_type(ShapeType::Ellipse), 80.0, 40.0);
    let e = out.unwrap().unwrap();
    assert_eq!((e.attr("rx"), e.attr("ry")), (Some("40"), Some("20")));
}

#[test]
fn line_paints_with_fill_when_stroke_is_none() {
    let el = draw(ShapeProps {
        fill: "red".to_owned(),
        ..of_type(ShapeType::Line)
    });
    assert_eq!(el.name, "line");
    assert_eq!(el.attr("stroke"), Some("red"));
    assert_eq!(el.attr("stroke-width"), Some("1"));
    assert_eq!(el.attr("fill"), None);
}

#[test]
fn polygon_and_star_vertex_counts() {
    let poly = draw(ShapeProps {
        sides: 4,
        ..of_type(ShapeType::Polygon)
    });
    let d = poly.attr("d").unwrap();
    assert!(d.starts_with("M 50 0 "), "{d}");
    assert!(d.ends_with(" Z"));
    assert_eq!(d.matches(" L ").count(), 3);

    let star = draw(of_type(ShapeType::Star));
    assert_eq!(star.attr("d").unwrap().matches(" L ").count(), 9);

    let tri = draw(of_type(ShapeType::Triangle));
    assert_eq!(tri.attr("d"), Some("M 50 0 L 100 100 L 0 100 Z"));
}

#[test]
fn star_inner_radius_out_of_range_fails() {
    let (out, _) = render_sized(
        ShapeProps {
            inner_radius: 1.5,
            ..of_type(ShapeType::Star)
        },
        100.0,
        100.0,
    );
    assert!(out.is_err());
}

#[test]
fn arc_spans() {
    let pie = draw(ShapeProps {
        start_angle: 0.0,
        end_angle: 90.0,
        ..of_type(ShapeType::Arc)
    });
    assert_eq!(pie.attr("d"), Some("M 50 50 L 100 50 A 50 50 0 0 1 50 100 Z"));

    let full = draw(ShapeProps {
        start_angle: 0.0,
        end_angle: 360.0,
        ..of_type(ShapeType::Arc)
    });
    assert_eq!(full.name, "ellipse");
}

#[test]
fn custom_path_is_validated() {
    let el = draw(ShapeProps {
        path_data: Some(" M0 0 L10 10 Z ".to_owned()),
        ..of_type(ShapeType::Path)
    });
    assert_eq!(el.attr("d"), Some("M0 0 L10 10 Z"));

    for bad in [None, Some("alert(1)".to_owned())] {
        let (out, _) = render_sized(
            ShapeProps {
                path_data: bad,
                ..of_type(ShapeType::Path)
            },
            100.0,
            100.0,
        );
        assert!(out.is_err());
    }
}

#[test]
fn gradient_fill_registers_definition() {
    let (out, defs) = render_sized(
        ShapeProps {
            fill_gradient: Some(GradientSpec {
                kind: GradientKind::Radial,
                stops: vec![GradientStop::new(0.0, "#fff"), GradientStop::new(1.0, "#000")],
                angle: 0.0,
            }),
            ..ShapeProps::default()
        },
        100.0,
        100.0,
    );
    let el = out.unwrap().unwrap();
    assert!(el.attr("fill").unwrap().starts_with("url(#grad-"));
    assert_eq!(defs.len(), 1);
}

#[test]
fn invalid_paint_or_widths_fail() {
    for props in [
        ShapeProps {
            fill: "#12".to_owned(),
            ..ShapeProps::default()
        },
        ShapeProps {
            stroke: "url(http://x)".to_owned(),
            ..ShapeProps::default()
        },
        ShapeProps {
            stroke_width: -1.0,
            ..ShapeProps::default()
        },
        ShapeProps {
            corner_radius: f64::NAN,
            ..ShapeProps::default()
        },
    ] {
        assert!(render_sized(props, 100.0, 100.0).0.is_err());
    }
}

#[test]
fn vertex_counts_outside_range_fail() {
    for props in [
        ShapeProps {
            points: u32::MAX,
            ..of_type(ShapeType::Star)
        },
        ShapeProps {
            sides: 1_000_000_000,
            ..of_type(ShapeType::Polygon)
        },
        ShapeProps {
            sides: 2,
            ..of_type(ShapeType::Polygon)
        },
    ] {
        let err = render_sized(props, 100.0, 100.0).0.unwrap_err();
        assert!(err.to_string().contains("3..=64"), "{err}");
    }

    let top = draw(ShapeProps {
        points: 64,
        ..of_type(ShapeType::Star)
    });
    assert_eq!(top.attr("d").unwrap().matches(" L ").count(), 127);
}
