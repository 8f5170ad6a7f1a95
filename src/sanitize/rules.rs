//! Allow-lists and deny-list patterns shared by validation, the rewrite pass and CSS cleaning.

use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::OnceLock;

const ALLOWED_TAGS: &[&str] = &[
    "svg", "g", "rect", "circle", "ellipse", "line", "polyline", "polygon", "path", "text",
    "tspan", "textPath", "image", "use", "defs", "clipPath", "mask", "pattern", "linearGradient",
    "radialGradient", "stop", "filter", "feBlend", "feColorMatrix", "feComponentTransfer",
    "feComposite", "feConvolveMatrix", "feDiffuseLighting", "feDisplacementMap",
    "feDistantLight", "feDropShadow", "feFlood", "feFuncA", "feFuncB", "feFuncG", "feFuncR",
    "feGaussianBlur", "feImage", "feMerge", "feMergeNode", "feMorphology", "feOffset",
    "fePointLight", "feSpecularLighting", "feSpotLight", "feTile", "feTurbulence", "style",
    "title", "desc", "metadata",
];

const ALLOWED_ATTRS: &[&str] = &[
    // structure
    "id", "class", "style", "transform", "xmlns", "xmlns:xlink", "version", "lang", "xml:lang",
    "xml:space", "role", "type", "media",
    // geometry
    "x", "y", "x1", "y1", "x2", "y2", "cx", "cy", "r", "rx", "ry", "fx", "fy", "fr", "width",
    "height", "viewBox", "preserveAspectRatio", "d", "points", "pathLength",
    // references
    "href", "xlink:href", "clip-path", "clipPathUnits", "mask", "maskUnits", "maskContentUnits",
    "filter", "filterUnits", "primitiveUnits",
    // paint
    "fill", "fill-opacity", "fill-rule", "stroke", "stroke-width", "stroke-opacity",
    "stroke-linecap", "stroke-linejoin", "stroke-dasharray", "stroke-dashoffset",
    "stroke-miterlimit", "opacity", "color", "clip-rule", "visibility", "display",
    "vector-effect", "shape-rendering", "text-rendering", "image-rendering", "paint-order",
    "mix-blend-mode", "isolation", "pointer-events",
    // gradients and patterns
    "offset", "stop-color", "stop-opacity", "gradientUnits", "gradientTransform",
    "spreadMethod", "patternUnits", "patternContentUnits", "patternTransform",
    // text
    "font-family", "font-size", "font-weight", "font-style", "font-variant", "text-anchor",
    "dominant-baseline", "alignment-baseline", "baseline-shift", "letter-spacing",
    "word-spacing", "text-decoration", "dx", "dy", "rotate", "textLength", "lengthAdjust",
    "startOffset", "method", "spacing", "writing-mode",
    // filter primitives
    "in", "in2", "result", "stdDeviation", "flood-color", "flood-opacity", "lighting-color",
    "mode", "operator", "k1", "k2", "k3", "k4", "values", "tableValues", "slope", "intercept",
    "amplitude", "exponent", "radius", "scale", "xChannelSelector", "yChannelSelector",
    "baseFrequency", "numOctaves", "seed", "stitchTiles", "order", "kernelMatrix", "divisor",
    "bias", "targetX", "targetY", "edgeMode", "kernelUnitLength", "preserveAlpha",
    "surfaceScale", "diffuseConstant", "specularConstant", "specularExponent", "azimuth",
    "elevation", "z", "pointsAtX", "pointsAtY", "pointsAtZ", "limitingConeAngle",
    "color-interpolation-filters",
];

/// CSS-only properties accepted in style text on top of [`ALLOWED_ATTRS`].
const EXTRA_CSS_PROPERTIES: &[&str] = &[
    "font", "text-transform", "line-height", "transform-origin", "transform-box", "cursor",
    "overflow", "white-space",
];

fn allowed_tags() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ALLOWED_TAGS.iter().copied().collect())
}

fn allowed_attrs() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ALLOWED_ATTRS.iter().copied().collect())
}

fn data_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^data-[\-\w.]+$").expect("valid regex"))
}

fn aria_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^aria-[\-\w]+$").expect("valid regex"))
}

/// Return `true` for element names allowed in output.
pub fn is_allowed_tag(name: &str) -> bool {
    allowed_tags().contains(name)
}

/// Return `true` for attribute names in the broad allow-list (including `data-*` and `aria-*`).
pub fn is_allowed_attribute(name: &str) -> bool {
    allowed_attrs().contains(name)
        || data_attr_regex().is_match(name)
        || aria_attr_regex().is_match(name)
}

/// Return `true` for property names accepted inside embedded style text.
pub(crate) fn is_allowed_css_property(name: &str) -> bool {
    (allowed_attrs().contains(name) && !name.contains(':'))
        || EXTRA_CSS_PROPERTIES.contains(&name)
        || name.starts_with("--")
}

/// Inline event handler attribute (`onclick`, `onLoad`, ...).
pub fn is_event_handler(name: &str) -> bool {
    name.len() > 2 && name.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on"))
}

/// Attributes whose whole value is a URL; dangerous values are dropped rather than rewritten.
pub(crate) fn is_url_attribute(name: &str) -> bool {
    matches!(name, "href" | "xlink:href" | "src")
}

/// Kind of dangerous content found by [`find_threat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threat {
    /// `javascript:` or `vbscript:` URL scheme.
    ScriptScheme,
    /// `data:` URI that is not a raster image.
    DataUri,
    /// Embedded `<script>`, `<iframe>`, `<object>`, `<embed>`, `<link>` or `<meta>` tag.
    MarkupTag,
    /// CSS `expression(...)`.
    CssExpression,
    /// CSS `@import`.
    CssImport,
    /// `url(...)` pointing outside the document.
    ExternalUrl,
}

impl Threat {
    /// Short human-readable label.
    pub fn describe(self) -> &'static str {
        match self {
            Self::ScriptScheme => "script URL scheme",
            Self::DataUri => "non-image data URI",
            Self::MarkupTag => "embedded markup tag",
            Self::CssExpression => "CSS expression()",
            Self::CssImport => "CSS @import",
            Self::ExternalUrl => "external url() reference",
        }
    }
}

/// Where a value appears, which decides the patterns applied to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyScope {
    /// Attribute values and style text: every pattern.
    Value,
    /// Character data: script schemes and markup tags only.
    Text,
}

fn script_scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:j\s*a\s*v\s*a|v\s*b)\s*s\s*c\s*r\s*i\s*p\s*t\s*:").expect("valid regex")
    })
}

fn data_uri_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bdata\s*:").expect("valid regex"))
}

fn markup_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<\s*/?\s*(?:script|iframe|object|embed|link|meta)\b").expect("valid regex")
    })
}

fn css_expression_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)expression\s*\(").expect("valid regex"))
}

fn css_import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)@\s*import").expect("valid regex"))
}

fn css_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)url\s*\(\s*['"]?"#).expect("valid regex"))
}

fn safe_image_data_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*data\s*:\s*image/(?:png|jpeg|jpg|gif|webp)\s*[;,]").expect("valid regex")
    })
}

fn is_safe_image_data(s: &str) -> bool {
    safe_image_data_regex().is_match(s)
}

/// First dangerous span in `s`, if any.
pub fn find_threat(s: &str, scope: DenyScope) -> Option<(Threat, Range<usize>)> {
    if let Some(m) = script_scheme_regex().find(s) {
        return Some((Threat::ScriptScheme, m.range()));
    }
    if let Some(m) = markup_tag_regex().find(s) {
        return Some((Threat::MarkupTag, m.range()));
    }
    if scope == DenyScope::Text {
        return None;
    }
    if let Some(m) = data_uri_regex()
        .find_iter(s)
        .find(|m| !is_safe_image_data(&s[m.start()..]))
    {
        return Some((Threat::DataUri, m.range()));
    }
    if let Some(m) = css_expression_regex().find(s) {
        return Some((Threat::CssExpression, m.range()));
    }
    if let Some(m) = css_import_regex().find(s) {
        return Some((Threat::CssImport, m.range()));
    }
    css_url_regex()
        .find_iter(s)
        .find(|m| {
            let rest = &s[m.end()..];
            !(rest.trim_start().starts_with('#') || is_safe_image_data(rest))
        })
        .map(|m| (Threat::ExternalUrl, m.range()))
}

/// Return `true` when `s` contains anything [`find_threat`] reports.
pub fn is_dangerous(s: &str, scope: DenyScope) -> bool {
    find_threat(s, scope).is_some()
}

/// Remove dangerous spans until none remain.
///
/// Removal can join surrounding text into a new match, so the scan repeats; every round removes at
/// least one byte.
pub fn strip_dangerous(s: &str, scope: DenyScope) -> String {
    let mut out = s.to_owned();
    while let Some((_, range)) = find_threat(&out, scope) {
        out.replace_range(range, "");
    }
    out
}

/// URL scheme of `href`, if it has one.
fn url_scheme(href: &str) -> Option<&str> {
    let end = href.find(':')?;
    let scheme = &href[..end];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        Some(scheme)
    } else {
        None
    }
}

/// Return `true` for image sources that may be referenced from output.
///
/// Relative paths, `http(s)` URLs and raster `data:image/...` URIs pass; every other scheme and
/// any value with a deny-list match is rejected. The compositor never fetches these.
pub fn is_safe_image_href(href: &str) -> bool {
    let h = href.trim();
    if h.is_empty() || is_dangerous(h, DenyScope::Value) {
        return false;
    }
    match url_scheme(h) {
        None => true,
        Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https") => true,
        Some(s) if s.eq_ignore_ascii_case("data") => is_safe_image_data(h),
        Some(_) => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sanitize/rules.rs"]
mod tests;
