use super::*;

#[test]
fn document_root_and_background() {
    let canvas = Canvas {
        width: 400,
        height: 300,
    };
    let root = create_document(canvas, Some("#ffffff"));
    assert_eq!(root.name, "svg");
    assert_eq!(root.attr("viewBox"), Some("0 0 400 300"));
    assert_eq!(root.attr("width"), Some("400"));
    let bg = root.elements().next().unwrap();
    assert_eq!(bg.name, "rect");
    assert_eq!(bg.attr("fill"), Some("#ffffff"));

    let bare = create_document(canvas, None);
    assert!(bare.children.is_empty());
}

#[test]
fn definitions_container_is_first_and_reused() {
    let mut root = create_document(
        Canvas {
            width: 10,
            height: 10,
        },
        Some("red"),
    );
    add_definitions(&mut root).push(create_clip_path("c1"));
    add_definitions(&mut root).push(create_filter("f1"));
    let names: Vec<&str> = root.elements().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["defs", "rect"]);
    assert_eq!(root.find_child("defs").unwrap().elements().count(), 2);
}

#[test]
fn gradient_stops_in_order() {
    let stops = [
        GradientStop::new(0.0, "#000000"),
        GradientStop {
            offset: 1.5,
            color: "#ffffff".to_owned(),
            opacity: Some(0.5),
        },
    ];
    let g = create_linear_gradient("g1", &stops, &[("x2", "100%".to_owned())]);
    assert_eq!(g.name, "linearGradient");
    assert_eq!(g.attr("x2"), Some("100%"));
    let s: Vec<&Element> = g.elements().collect();
    assert_eq!(s.len(), 2);
    assert_eq!(s[0].attr("offset"), Some("0"));
    assert_eq!(s[1].attr("offset"), Some("1"));
    assert_eq!(s[1].attr("stop-opacity"), Some("0.5"));

    let r = create_radial_gradient("g2", &stops, &[]);
    assert_eq!(r.name, "radialGradient");
}

#[test]
fn pattern_and_stylesheet() {
    let p = create_pattern("grid", 20.0, 20.0, &[("patternUnits", "userSpaceOnUse".to_owned())]);
    assert_eq!(p.attr("width"), Some("20"));
    assert_eq!(p.attr("patternUnits"), Some("userSpaceOnUse"));

    let mut root = create_group(Some("root"));
    add_stylesheet(&mut root, ".a { fill: red; }");
    let style = root.find_child("style").unwrap();
    assert_eq!(style.text_content(), ".a { fill: red; }");
}
