use super::*;

#[test]
fn canvas_accepts_in_range_dimensions() {
    let c = Canvas::from_dimensions(400.0, 300.0, MAX_CANVAS_DIMENSION).unwrap();
    assert_eq!(c, Canvas { width: 400, height: 300 });
    assert_eq!(c.view_box(), "0 0 400 300");
}

#[test]
fn canvas_rejects_zero_negative_nan_and_oversized() {
    for (w, h) in [
        (0.0, 10.0),
        (10.0, -1.0),
        (f64::NAN, 10.0),
        (10_001.0, 10.0),
        (10.0, f64::INFINITY),
    ] {
        assert!(
            Canvas::from_dimensions(w, h, MAX_CANVAS_DIMENSION).is_err(),
            "{w}x{h} should be rejected"
        );
    }
    assert!(Canvas::from_dimensions(10_000.0, 10_000.0, MAX_CANVAS_DIMENSION).is_ok());
}

#[test]
fn named_colors_are_sorted_for_binary_search() {
    let mut sorted = NAMED_COLORS.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, NAMED_COLORS);
}

#[test]
fn normalize_color_accepts_common_forms() {
    assert_eq!(normalize_color("#FFF").as_deref(), Some("#fff"));
    assert_eq!(normalize_color(" #ff0000 ").as_deref(), Some("#ff0000"));
    assert_eq!(normalize_color("#11223344").as_deref(), Some("#11223344"));
    assert!(normalize_color("rgb(1, 2, 3)").is_some());
    assert!(normalize_color("rgba(1,2,3,0.5)").is_some());
    assert!(normalize_color("hsl(120 50% 50%)").is_some());
    assert_eq!(normalize_color("Red").as_deref(), Some("red"));
    assert_eq!(normalize_color("none").as_deref(), Some("none"));
    assert_eq!(normalize_color("currentcolor").as_deref(), Some("currentColor"));
}

#[test]
fn normalize_color_rejects_injection_attempts() {
    assert!(normalize_color("").is_none());
    assert!(normalize_color("#12").is_none());
    assert!(normalize_color("url(javascript:alert(1))").is_none());
    assert!(normalize_color("red;background:url(x)").is_none());
    assert!(normalize_color("expression(alert(1))").is_none());
}

#[test]
fn parse_hex_rgba_handles_short_and_long_forms() {
    assert_eq!(parse_hex_rgba("#fff").unwrap(), [255, 255, 255, 255]);
    assert_eq!(parse_hex_rgba("#0000ff80").unwrap(), [0, 0, 255, 128]);
    assert!(parse_hex_rgba("#zzzzzz").is_err());
    assert!(parse_hex_rgba("#12345").is_err());
}

#[test]
fn label_color_contrasts_with_background() {
    assert_eq!(contrasting_label_color("#ffffff"), "#1f2937");
    assert_eq!(contrasting_label_color("#000000"), "#f9fafb");
    assert_eq!(contrasting_label_color("red"), "#1f2937");
}
