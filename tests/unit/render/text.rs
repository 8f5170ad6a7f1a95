use super::*;
use crate::compositor::opts::CompositorOpts;
use crate::compositor::report::RenderReport;
use crate::document::defs::Definitions;
use crate::render::registry::builtin_registry;
use crate::scene::hierarchy::LayerTree;
use crate::scene::props::TextProps;

fn render(props: TextProps, width: f64) -> LayerdocResult<Option<Element>> {
    let mut layer = Layer::new("t", LayerProps::Text(props));
    layer.geometry.width = width;
    let layers = [layer];
    let tree = LayerTree::from_layers(&layers);
    let mut defs = Definitions::new();
    let mut report = RenderReport::default();
    let opts = CompositorOpts::default();
    let mut ctx = RenderContext::new(&tree, builtin_registry(), &mut defs, &mut report, &opts);
    TextRenderer.render(&layers[0], &mut ctx)
}

#[test]
fn single_line_is_direct_text() {
    let el = render(
        TextProps {
            text: "Hello".to_owned(),
            ..TextProps::default()
        },
        200.0,
    )
    .unwrap()
    .unwrap();
    assert_eq!(el.name, "text");
    assert_eq!(el.attr("x"), Some("0"));
    assert_eq!(el.attr("y"), Some("16"));
    assert_eq!(el.attr("font-size"), Some("16"));
    assert_eq!(el.attr("fill"), Some("#000000"));
    assert_eq!(el.attr("text-anchor"), Some("start"));
    assert_eq!(el.attr("font-weight"), None);
    assert_eq!(el.text_content(), "Hello");
    assert_eq!(el.elements().count(), 0);
}

#[test]
fn multi_line_uses_tspans_with_line_height() {
    let el = render(
        TextProps {
            text: "one\r\ntwo\nthree".to_owned(),
            font_size: 20.0,
            line_height: 1.5,
            text_align: TextAlign::Center,
            ..TextProps::default()
        },
        300.0,
    )
    .unwrap()
    .unwrap();
    assert_eq!(el.attr("text-anchor"), Some("middle"));
    let spans: Vec<&Element> = el.elements().collect();
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].attr("dy"), Some("0"));
    assert_eq!(spans[1].attr("dy"), Some("30"));
    assert_eq!(spans[1].attr("x"), Some("150"));
    assert_eq!(spans[1].text_content(), "two");
}

#[test]
fn styling_attributes_are_emitted() {
    let el = render(
        TextProps {
            font_weight: "bold".to_owned(),
            font_style: "italic".to_owned(),
            letter_spacing: 1.5,
            text_decoration: Some("underline".to_owned()),
            text_align: TextAlign::Right,
            ..TextProps::default()
        },
        120.0,
    )
    .unwrap()
    .unwrap();
    assert_eq!(el.attr("font-weight"), Some("bold"));
    assert_eq!(el.attr("font-style"), Some("italic"));
    assert_eq!(el.attr("letter-spacing"), Some("1.5"));
    assert_eq!(el.attr("text-decoration"), Some("underline"));
    assert_eq!(el.attr("x"), Some("120"));
}

#[test]
fn markup_in_text_stays_character_data() {
    let el = render(
        TextProps {
            text: "<script>alert(1)</script>".to_owned(),
            ..TextProps::default()
        },
        100.0,
    )
    .unwrap()
    .unwrap();
    assert_eq!(el.elements().count(), 0);
    assert_eq!(el.text_content(), "<script>alert(1)</script>");
}

#[test]
fn empty_text_draws_nothing() {
    let out = render(
        TextProps {
            text: String::new(),
            ..TextProps::default()
        },
        100.0,
    )
    .unwrap();
    assert!(out.is_none());
}

#[test]
fn invalid_metrics_fail() {
    for props in [
        TextProps {
            font_size: 0.0,
            ..TextProps::default()
        },
        TextProps {
            line_height: -1.0,
            ..TextProps::default()
        },
        TextProps {
            color: "blurple".to_owned(),
            ..TextProps::default()
        },
        TextProps {
            letter_spacing: f64::NAN,
            ..TextProps::default()
        },
    ] {
        assert!(render(props, 100.0).is_err());
    }
}
