use super::*;
use crate::compositor::opts::CompositorOpts;
use crate::compositor::report::RenderReport;
use crate::document::defs::Definitions;
use crate::render::registry::builtin_registry;
use crate::scene::hierarchy::LayerTree;
use crate::scene::props::VectorProps;

fn render(props: VectorProps) -> LayerdocResult<Option<Element>> {
    let mut layer = Layer::new("v", LayerProps::VectorGraphic(props));
    layer.geometry.width = 48.0;
    layer.geometry.height = 24.0;
    let layers = [layer];
    let tree = LayerTree::from_layers(&layers);
    let mut defs = Definitions::new();
    let mut report = RenderReport::default();
    let opts = CompositorOpts::default();
    let mut ctx = RenderContext::new(&tree, builtin_registry(), &mut defs, &mut report, &opts);
    VectorRenderer.render(&layers[0], &mut ctx)
}

fn content(svg: &str) -> VectorProps {
    VectorProps {
        svg_content: svg.to_owned(),
        ..VectorProps::default()
    }
}

#[test]
fn imported_root_is_fitted_to_layer_box() {
    let el = render(content(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24px" height="12"><path d="M0 0 L4 4"/></svg>"#,
    ))
    .unwrap()
    .unwrap();
    assert_eq!(el.name, "svg");
    assert_eq!(el.attr("viewBox"), Some("0 0 24 12"));
    assert_eq!(el.attr("width"), Some("48"));
    assert_eq!(el.attr("height"), Some("24"));
    assert_eq!(el.attr("x"), Some("0"));
    assert_eq!(el.attr("xmlns"), None);
    assert_eq!(el.attr("preserveAspectRatio"), Some("xMidYMid meet"));
    assert_eq!(el.find_child("path").and_then(|p| p.attr("d")), Some("M0 0 L4 4"));
}

#[test]
fn existing_view_box_is_kept() {
    let el = render(content(r#"<svg viewBox="0 0 10 10" width="100%"><rect width="10" height="10"/></svg>"#))
        .unwrap()
        .unwrap();
    assert_eq!(el.attr("viewBox"), Some("0 0 10 10"));
}

#[test]
fn fill_override_is_applied() {
    let el = render(VectorProps {
        fill_override: Some("Red".to_owned()),
        ..content("<svg><path d=\"M0 0\"/></svg>")
    })
    .unwrap()
    .unwrap();
    assert_eq!(el.attr("fill"), Some("red"));

    let bad = render(VectorProps {
        fill_override: Some("nope".to_owned()),
        ..content("<svg/>")
    });
    assert!(bad.is_err());
}

#[test]
fn empty_content_draws_nothing() {
    assert!(render(content("   ")).unwrap().is_none());
}

#[test]
fn rejected_content() {
    assert!(matches!(
        render(content("<g/>")),
        Err(LayerdocError::Markup(_))
    ));
    assert!(render(content("<svg><g></svg>")).is_err());
    assert!(render(content(r#"<!DOCTYPE svg [<!ENTITY e "x">]><svg>&e;</svg>"#)).is_err());
    assert!(render(VectorProps {
        preserve_aspect_ratio: "middle".to_owned(),
        ..content("<svg/>")
    })
    .is_err());
}

#[test]
fn length_parsing() {
    assert_eq!(parse_length("24"), Some(24.0));
    assert_eq!(parse_length(" 12.5px "), Some(12.5));
    assert_eq!(parse_length("100%"), None);
    assert_eq!(parse_length("0"), None);
}
