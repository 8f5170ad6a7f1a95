use super::*;
use crate::recovery::fallback::FALLBACK_LABEL;
use crate::scene::model::{Geometry, Layer};
use crate::scene::props::{GroupProps, LayerProps, ShapeProps, ShapeType, TextProps, VectorProps};

fn shape(id: &str, z: i64) -> Layer {
    Layer::new(id, LayerProps::Shape(ShapeProps::default())).with_z_index(z)
}

fn layer_ids(doc: &str) -> Vec<String> {
    let parsed = roxmltree::Document::parse(doc).unwrap();
    parsed
        .descendants()
        .filter_map(|n| n.attribute("data-layer-id"))
        .map(str::to_owned)
        .collect()
}

#[test]
fn renders_simple_design() {
    let d = Design::from_json_str(
        r##"{
          "width": 400, "height": 300,
          "background": { "type": "color", "color": "#ffffff" },
          "layers": [{
            "id": "s1", "type": "shape", "x": 10, "y": 10, "width": 50, "height": 50,
            "properties": { "shapeType": "rectangle", "fill": "#FF0000" }
          }]
        }"##,
    )
    .unwrap();
    let out = Compositor::default().render(&d);
    let parsed = roxmltree::Document::parse(&out.document).unwrap();
    let root = parsed.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("viewBox"), Some("0 0 400 300"));

    let g = parsed
        .descendants()
        .find(|n| n.attribute("data-layer-id") == Some("s1"))
        .unwrap();
    assert_eq!(g.attribute("transform"), Some("translate(10, 10)"));
    assert!(
        g.descendants()
            .any(|n| n.tag_name().name() == "rect" && n.attribute("fill") == Some("#ff0000"))
    );

    assert_eq!(out.report.rendered, vec!["s1".to_owned()]);
    assert!(out.report.validation.as_ref().unwrap().is_clean());
    assert!(out.report.sanitized.is_none());
    assert!(!out.report.is_fallback());
}

#[test]
fn layers_paint_in_z_order() {
    let d = Design::new(200.0, 200.0)
        .with_layer(shape("z3", 3))
        .with_layer(shape("z1", 1))
        .with_layer(shape("z2", 2));
    let doc = render_design_to_vector_document(&d);
    assert_eq!(layer_ids(&doc), vec!["z1", "z2", "z3"]);
}

#[test]
fn group_child_is_drawn_once() {
    let d = Design::new(200.0, 200.0)
        .with_layer(Layer::new("g", LayerProps::Group(GroupProps::default())))
        .with_layer(shape("child", 0).with_parent("g"));
    let doc = render_design_to_vector_document(&d);
    let ids = layer_ids(&doc);
    assert_eq!(ids, vec!["g", "child"]);
}

#[test]
fn duplicated_group_id_draws_child_once() {
    let d = Design::new(200.0, 200.0)
        .with_layer(Layer::new("g", LayerProps::Group(GroupProps::default())))
        .with_layer(Layer::new("g", LayerProps::Group(GroupProps::default())).with_z_index(1))
        .with_layer(shape("child", 0).with_parent("g"));
    let doc = render_design_to_vector_document(&d);
    assert_eq!(layer_ids(&doc), vec!["g", "child", "g"]);

    let parsed = roxmltree::Document::parse(&doc).unwrap();
    let mut xml_ids: Vec<&str> = parsed.descendants().filter_map(|n| n.attribute("id")).collect();
    let total = xml_ids.len();
    xml_ids.sort_unstable();
    xml_ids.dedup();
    assert_eq!(xml_ids.len(), total);
}

#[test]
fn huge_star_point_count_is_recovered() {
    let star = ShapeProps {
        shape_type: ShapeType::Star,
        points: u32::MAX,
        ..ShapeProps::default()
    };
    let d = Design::new(200.0, 200.0).with_layer(Layer::new("star", LayerProps::Shape(star)));
    let out = Compositor::default().render(&d);
    assert!(!out.report.is_fallback());
    assert_eq!(out.report.recovered, vec!["star".to_owned()]);
    assert_eq!(out.report.rendered, vec!["star".to_owned()]);
}

#[test]
fn non_xml_characters_in_text_do_not_sink_the_design() {
    let text = TextProps {
        text: "ok\u{FFFF}".to_owned(),
        ..TextProps::default()
    };
    let d = Design::new(300.0, 100.0)
        .with_layer(shape("box", 0))
        .with_layer(
            Layer::new("t", LayerProps::Text(text))
                .with_geometry(Geometry::rect(0.0, 0.0, 300.0, 40.0))
                .with_z_index(1),
        );
    let out = Compositor::default().render(&d);
    assert!(out.report.fallback.is_none(), "{:?}", out.report.fallback);
    assert_eq!(layer_ids(&out.document), vec!["box", "t"]);
    assert!(out.document.contains(">ok<"), "{}", out.document);
    assert!(!out.document.contains('\u{FFFF}'));
}

#[test]
fn unusable_canvas_yields_fallback() {
    let d = Design::new(0.0, 300.0).with_layer(shape("a", 0));
    let out = Compositor::default().render(&d);
    assert!(out.document.contains(FALLBACK_LABEL), "{}", out.document);
    let fb = out.report.fallback.unwrap();
    assert_eq!(fb.stage, Stage::DimensionCheck);
    assert!(fb.cause.contains("width"), "{}", fb.cause);
    assert!(out.report.rendered.is_empty());
}

#[test]
fn opts_dimension_limit_applies() {
    let opts = CompositorOpts {
        max_dimension: 100,
        ..CompositorOpts::default()
    };
    let out = Compositor::new(opts).render(&Design::new(400.0, 300.0));
    assert_eq!(out.report.fallback.unwrap().stage, Stage::DimensionCheck);
}

#[test]
fn script_in_text_is_neutralized() {
    let text = TextProps {
        text: "Hello <script>alert(1)</script>".to_owned(),
        ..TextProps::default()
    };
    let d = Design::new(300.0, 100.0).with_layer(
        Layer::new("t", LayerProps::Text(text)).with_geometry(Geometry::rect(0.0, 0.0, 300.0, 40.0)),
    );
    let out = Compositor::default().render(&d);
    assert!(!out.report.is_fallback());
    assert!(out.report.sanitized.is_some());
    assert!(out.report.validation.as_ref().unwrap().errors.is_empty());
    assert!(!out.document.contains("<script"), "{}", out.document);

    let reparsed = parse_document(&out.document).unwrap();
    assert!(validate_document(&reparsed).errors.is_empty());
}

#[test]
fn embedded_script_element_is_removed() {
    let vector = VectorProps {
        svg_content: r#"<svg viewBox="0 0 10 10"><script>alert(1)</script><rect width="10" height="10"/></svg>"#
            .to_owned(),
        ..VectorProps::default()
    };
    let d = Design::new(100.0, 100.0).with_layer(Layer::new("v", LayerProps::VectorGraphic(vector)));
    let out = Compositor::default().render(&d);
    let summary = out.report.sanitized.unwrap();
    assert!(summary.removed_elements >= 1, "{summary:?}");
    assert!(!out.document.contains("script"), "{}", out.document);
    assert!(out.document.contains("<rect"));
}

#[test]
fn skipping_sanitize_leaves_output_untouched() {
    let vector = VectorProps {
        svg_content: r#"<svg viewBox="0 0 10 10"><script>alert(1)</script></svg>"#.to_owned(),
        ..VectorProps::default()
    };
    let d = Design::new(100.0, 100.0).with_layer(Layer::new("v", LayerProps::VectorGraphic(vector)));
    let opts = CompositorOpts {
        sanitize_output: false,
        ..CompositorOpts::default()
    };
    let out = Compositor::new(opts).render(&d);
    assert!(out.document.contains("<script"));
    assert!(out.report.validation.is_none());
    assert!(out.report.sanitized.is_none());
}

#[test]
fn overlays_are_drawn_last() {
    let mut d = Design::new(400.0, 300.0).with_layer(shape("a", 0));
    d.settings.grid = Some(GridOverlay {
        size: 10.0,
        color: "#e5e7eb".to_owned(),
    });
    d.settings.safe_area = Some(SafeAreaGuide {
        margin: 20.0,
        color: "#ef4444".to_owned(),
    });
    let out = Compositor::default().render(&d);
    let parsed = roxmltree::Document::parse(&out.document).unwrap();
    let root = parsed.root_element();

    let last: Vec<_> = root
        .children()
        .filter(|n| n.is_element())
        .filter_map(|n| n.attribute("data-overlay"))
        .collect();
    assert_eq!(last, vec!["grid", "safe-area"]);

    let pattern = parsed
        .descendants()
        .find(|n| n.tag_name().name() == "pattern")
        .unwrap();
    assert!(pattern.attribute("id").unwrap().starts_with("grid-"));
    let guide = parsed
        .descendants()
        .find(|n| n.attribute("data-overlay") == Some("safe-area"))
        .unwrap();
    assert_eq!(guide.attribute("width"), Some("360"));
    assert_eq!(guide.attribute("height"), Some("260"));
    assert!(out.report.validation.unwrap().is_clean());
}

#[test]
fn unusable_overlays_are_reported() {
    let mut d = Design::new(400.0, 300.0);
    d.settings.grid = Some(GridOverlay {
        size: 0.0,
        color: "#e5e7eb".to_owned(),
    });
    d.settings.safe_area = Some(SafeAreaGuide {
        margin: 150.0,
        color: "#ef4444".to_owned(),
    });
    let out = Compositor::default().render(&d);
    assert!(!out.document.contains("data-overlay"));
    assert_eq!(out.report.warnings.len(), 2, "{:?}", out.report.warnings);
}

#[test]
fn custom_css_is_cleaned() {
    let mut d = Design::new(100.0, 100.0);
    d.settings.custom_css = Some(".a { fill: red; behavior: url(x.htc) }".to_owned());
    let doc = render_design_to_vector_document(&d);
    assert!(doc.contains("fill: red;"), "{doc}");
    assert!(!doc.contains("behavior"), "{doc}");

    d.settings.custom_css = Some("@import url(http://evil/x.css);".to_owned());
    let out = Compositor::default().render(&d);
    assert!(!out.document.contains("<style"));
    assert_eq!(
        out.report.warnings,
        vec!["custom stylesheet had no usable rules".to_owned()]
    );
}

#[test]
fn invalid_background_color_draws_nothing() {
    let d = Design::new(100.0, 100.0).with_background(Background::Color("nope".to_owned()));
    let out = Compositor::default().render(&d);
    assert!(!out.report.is_fallback());
    assert!(!out.document.contains("<rect"));
    assert_eq!(out.report.warnings.len(), 1);
}

#[test]
fn empty_registry_skips_every_layer() {
    let registry = RendererRegistry::new();
    let c = Compositor::with_registry(CompositorOpts::default(), &registry);
    let out = c.render(&Design::new(100.0, 100.0).with_layer(shape("a", 0)));
    assert!(!out.report.is_fallback());
    assert_eq!(out.report.skipped.len(), 1);
    assert_eq!(out.report.skipped[0].id, "a");
}

#[test]
fn cyclic_parents_are_skipped() {
    let group = |id: &str, parent: &str| {
        Layer::new(id, LayerProps::Group(GroupProps::default())).with_parent(parent)
    };
    let d = Design::new(100.0, 100.0)
        .with_layer(group("a", "b"))
        .with_layer(group("b", "a"));
    let out = Compositor::default().render(&d);
    let skipped: Vec<_> = out.report.skipped.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(skipped, vec!["a", "b"]);
}

#[test]
fn batch_keeps_input_order() {
    let designs: Vec<Design> = (1..=6)
        .map(|i| Design::new(f64::from(i) * 100.0, 50.0).with_layer(shape("a", 0)))
        .collect();
    let outcomes = Compositor::default().render_batch(&designs);
    assert_eq!(outcomes.len(), 6);
    for (i, out) in outcomes.iter().enumerate() {
        let expected = format!("viewBox=\"0 0 {} 50\"", (i + 1) * 100);
        assert!(out.document.contains(&expected), "{}", out.document);
    }
}

#[test]
fn stage_error_names_the_stage() {
    let e = StageError {
        stage: Stage::Sanitize,
        source: LayerdocError::sanitize("boom"),
    };
    assert_eq!(e.to_string(), "sanitize failed: sanitize error: boom");
    assert_eq!(
        serde_json::to_value(Stage::DimensionCheck).unwrap(),
        serde_json::json!("dimension_check")
    );
}
