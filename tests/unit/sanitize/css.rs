use super::*;

#[test]
fn keeps_allowed_declarations() {
    let out = sanitize_css(".title{fill:#333;font-size:24px}");
    assert_eq!(out, ".title { fill: #333; font-size: 24px; }\n");
}

#[test]
fn drops_unknown_properties_and_threats() {
    let out = sanitize_css(
        "@import url(http://evil/x.css);\n.a { behavior: url(x.htc); fill: red; width: expression(alert(1)) }",
    );
    assert!(!out.contains("@import"), "{out}");
    assert!(!out.contains("behavior"), "{out}");
    assert!(!out.to_ascii_lowercase().contains("expression("), "{out}");
    assert!(out.contains("fill: red;"), "{out}");
}

#[test]
fn nested_and_unbalanced_blocks() {
    assert_eq!(
        sanitize_css("@media print { .a { opacity: 0.5 } }"),
        "@media print { .a { opacity: 0.5; } }\n"
    );
    assert_eq!(sanitize_css(".a { stroke: blue"), ".a { stroke: blue; }\n");
}

#[test]
fn cleaning_is_stable() {
    let once = sanitize_css(".a{fill:red;cursor:pointer} .b { --accent: #fff; onclick: x }");
    assert_eq!(sanitize_css(&once), once);
}
