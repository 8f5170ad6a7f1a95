//! Typed, per-kind layer properties.
//!
//! Designs arrive with an untyped `properties` map whose shape depends on the layer kind. The map
//! is converted once, at load time, into one of the [`LayerProps`] variants by reading each field
//! over the kind's defaults. `null`, empty strings and values of the wrong JSON type fall back to
//! the default for that field.

use serde_json::{Map, Value};

use crate::foundation::core::{GradientStop, normalize_color};
use crate::scene::model::{GradientKind, GradientSpec, LayerKind};

/// Kind-specific layer properties.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerProps {
    /// Text layer.
    Text(TextProps),
    /// Image layer.
    Image(ImageProps),
    /// Shape layer.
    Shape(ShapeProps),
    /// Embedded vector graphic.
    VectorGraphic(VectorProps),
    /// Group container.
    Group(GroupProps),
    /// Video layer.
    Video(VideoProps),
    /// Audio layer.
    Audio(AudioProps),
    /// Unsupported kind; the raw tag and bag are kept for diagnostics.
    Unknown {
        /// Kind tag as found in the payload.
        kind: String,
        /// Raw property bag.
        raw: Map<String, Value>,
    },
}

impl LayerProps {
    /// Kind tag of this variant.
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Text(_) => LayerKind::Text,
            Self::Image(_) => LayerKind::Image,
            Self::Shape(_) => LayerKind::Shape,
            Self::VectorGraphic(_) => LayerKind::VectorGraphic,
            Self::Group(_) => LayerKind::Group,
            Self::Video(_) => LayerKind::Video,
            Self::Audio(_) => LayerKind::Audio,
            Self::Unknown { .. } => LayerKind::Unknown,
        }
    }

    /// Display tag, including the original tag for unknown kinds.
    pub fn kind_tag(&self) -> &str {
        match self {
            Self::Unknown { kind, .. } => kind.as_str(),
            other => other.kind().as_str(),
        }
    }

    /// Default properties for a kind.
    pub fn defaults_for(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Text => Self::Text(TextProps::default()),
            LayerKind::Image => Self::Image(ImageProps::default()),
            LayerKind::Shape => Self::Shape(ShapeProps::default()),
            LayerKind::VectorGraphic => Self::VectorGraphic(VectorProps::default()),
            LayerKind::Group => Self::Group(GroupProps::default()),
            LayerKind::Video => Self::Video(VideoProps::default()),
            LayerKind::Audio => Self::Audio(AudioProps::default()),
            LayerKind::Unknown => Self::Unknown {
                kind: "unknown".to_owned(),
                raw: Map::new(),
            },
        }
    }

    /// Convert an untyped property bag for the given kind tag.
    pub fn from_bag(kind_tag: &str, bag: &Map<String, Value>) -> Self {
        let b = PropertyBag(bag);
        match LayerKind::parse(kind_tag) {
            LayerKind::Text => Self::Text(TextProps::from_bag(b)),
            LayerKind::Image => Self::Image(ImageProps::from_bag(b)),
            LayerKind::Shape => Self::Shape(ShapeProps::from_bag(b)),
            LayerKind::VectorGraphic => Self::VectorGraphic(VectorProps::from_bag(b)),
            LayerKind::Group => Self::Group(GroupProps::from_bag(b)),
            LayerKind::Video => Self::Video(VideoProps::from_bag(b)),
            LayerKind::Audio => Self::Audio(AudioProps::from_bag(b)),
            LayerKind::Unknown => Self::Unknown {
                kind: kind_tag.trim().to_owned(),
                raw: bag.clone(),
            },
        }
    }

    /// Re-validate every field, replacing out-of-range values with the kind defaults.
    pub fn repaired(&self) -> Self {
        match self {
            Self::Text(p) => Self::Text(p.repaired()),
            Self::Image(p) => Self::Image(p.repaired()),
            Self::Shape(p) => Self::Shape(p.repaired()),
            Self::VectorGraphic(p) => Self::VectorGraphic(p.repaired()),
            Self::Group(p) => Self::Group(p.clone()),
            Self::Video(p) => Self::Video(p.repaired()),
            Self::Audio(p) => Self::Audio(p.clone()),
            Self::Unknown { .. } => self.clone(),
        }
    }
}

/// Read-only view over a JSON property map with default-aware accessors.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropertyBag<'a>(pub(crate) &'a Map<String, Value>);

impl<'a> PropertyBag<'a> {
    /// Value for the first present key; `null` and blank strings count as absent.
    pub(crate) fn get(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|k| match self.0.get(*k) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => Some(v),
        })
    }

    pub(crate) fn string(&self, keys: &[&str], default: &str) -> String {
        self.opt_string(keys).unwrap_or_else(|| default.to_owned())
    }

    pub(crate) fn opt_string(&self, keys: &[&str]) -> Option<String> {
        match self.get(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub(crate) fn number(&self, keys: &[&str], default: f64) -> f64 {
        self.get(keys).and_then(loose_f64).unwrap_or(default)
    }

    pub(crate) fn opt_number(&self, keys: &[&str]) -> Option<f64> {
        self.get(keys).and_then(loose_f64)
    }

    pub(crate) fn boolean(&self, keys: &[&str], default: bool) -> bool {
        match self.get(keys) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            _ => default,
        }
    }

    pub(crate) fn object(&self, keys: &[&str]) -> Option<&'a Map<String, Value>> {
        self.get(keys).and_then(Value::as_object)
    }
}

/// Read a number or numeric string; anything else is `None`.
pub(crate) fn loose_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn color_or(value: &str, default: &str) -> String {
    normalize_color(value).unwrap_or_else(|| default.to_owned())
}

fn positive_or(v: f64, default: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { default }
}

fn non_negative_or(v: f64, default: f64) -> f64 {
    if v.is_finite() && v >= 0.0 { v } else { default }
}

fn finite_or(v: f64, default: f64) -> f64 {
    if v.is_finite() { v } else { default }
}

fn non_blank_or(s: &str, default: &str) -> String {
    if s.trim().is_empty() {
        default.to_owned()
    } else {
        s.to_owned()
    }
}

/// Horizontal text alignment inside the layer box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor at the left edge.
    #[default]
    Left,
    /// Anchor at the horizontal center.
    Center,
    /// Anchor at the right edge.
    Right,
}

impl TextAlign {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" | "middle" => Self::Center,
            "right" | "end" => Self::Right,
            _ => Self::Left,
        }
    }
}

/// Text layer properties.
#[derive(Clone, Debug, PartialEq)]
pub struct TextProps {
    /// Content; `\n` starts a new line.
    pub text: String,
    /// CSS font family list.
    pub font_family: String,
    /// Font size in user units, `> 0`.
    pub font_size: f64,
    /// CSS font weight keyword or number.
    pub font_weight: String,
    /// CSS font style keyword.
    pub font_style: String,
    /// Fill color.
    pub color: String,
    /// Line height as a multiple of the font size, `> 0`.
    pub line_height: f64,
    /// Horizontal alignment.
    pub text_align: TextAlign,
    /// Extra spacing between glyphs.
    pub letter_spacing: f64,
    /// Optional `text-decoration` keyword (`underline`, `line-through`, ...).
    pub text_decoration: Option<String>,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "Text".to_owned(),
            font_family: "Arial, sans-serif".to_owned(),
            font_size: 16.0,
            font_weight: "normal".to_owned(),
            font_style: "normal".to_owned(),
            color: "#000000".to_owned(),
            line_height: 1.2,
            text_align: TextAlign::Left,
            letter_spacing: 0.0,
            text_decoration: None,
        }
    }
}

impl TextProps {
    fn from_bag(b: PropertyBag<'_>) -> Self {
        let d = Self::default();
        Self {
            text: b.string(&["text", "content"], &d.text),
            font_family: b.string(&["fontFamily"], &d.font_family),
            font_size: b.number(&["fontSize"], d.font_size),
            font_weight: b.string(&["fontWeight"], &d.font_weight),
            font_style: b.string(&["fontStyle"], &d.font_style),
            color: b.string(&["color", "fill"], &d.color),
            line_height: b.number(&["lineHeight"], d.line_height),
            text_align: b
                .opt_string(&["textAlign", "align"])
                .map(|s| TextAlign::parse(&s))
                .unwrap_or_default(),
            letter_spacing: b.number(&["letterSpacing"], d.letter_spacing),
            text_decoration: b.opt_string(&["textDecoration"]),
        }
    }

    fn repaired(&self) -> Self {
        let d = Self::default();
        Self {
            text: non_blank_or(&self.text, &d.text),
            font_family: non_blank_or(&self.font_family, &d.font_family),
            font_size: positive_or(self.font_size, d.font_size),
            font_weight: non_blank_or(&self.font_weight, &d.font_weight),
            font_style: non_blank_or(&self.font_style, &d.font_style),
            color: color_or(&self.color, &d.color),
            line_height: positive_or(self.line_height, d.line_height),
            text_align: self.text_align,
            letter_spacing: finite_or(self.letter_spacing, d.letter_spacing),
            text_decoration: self
                .text_decoration
                .clone()
                .filter(|s| !s.trim().is_empty()),
        }
    }
}

/// How an image fills its layer box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFit {
    /// Scale to cover the box, cropping overflow.
    #[default]
    Cover,
    /// Scale to fit inside the box.
    Contain,
    /// Stretch to the box, ignoring aspect ratio.
    Fill,
    /// Natural size, centered.
    None,
}

impl ImageFit {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "contain" => Self::Contain,
            "fill" | "stretch" => Self::Fill,
            "none" => Self::None,
            _ => Self::Cover,
        }
    }
}

/// Image layer properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageProps {
    /// Image URL or `data:image/...` URI; empty draws a placeholder.
    pub src: String,
    /// Fit mode.
    pub fit: ImageFit,
    /// Keep the source aspect ratio (ignored for [`ImageFit::Fill`]).
    pub preserve_aspect_ratio: bool,
    /// Rounded-corner clip radius, `>= 0`.
    pub corner_radius: f64,
    /// Alternative text, emitted as a `title`.
    pub alt: Option<String>,
}

impl ImageProps {
    fn from_bag(b: PropertyBag<'_>) -> Self {
        Self {
            src: b.string(&["src", "url"], ""),
            fit: b
                .opt_string(&["fit", "objectFit"])
                .map(|s| ImageFit::parse(&s))
                .unwrap_or_default(),
            preserve_aspect_ratio: b.boolean(&["preserveAspectRatio", "aspectRatio"], true),
            corner_radius: b.number(&["cornerRadius", "borderRadius"], 0.0),
            alt: b.opt_string(&["alt"]),
        }
    }

    fn repaired(&self) -> Self {
        Self {
            src: if crate::sanitize::rules::is_safe_image_href(&self.src) {
                self.src.clone()
            } else {
                String::new()
            },
            fit: self.fit,
            preserve_aspect_ratio: self.preserve_aspect_ratio,
            corner_radius: non_negative_or(self.corner_radius, 0.0),
            alt: self.alt.clone(),
        }
    }
}

/// Geometric primitive drawn by a shape layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeType {
    /// Axis-aligned rectangle with optional corner radius.
    #[default]
    Rectangle,
    /// Circle inscribed in the box.
    Circle,
    /// Ellipse inscribed in the box.
    Ellipse,
    /// Line from the top-left to the bottom-right corner.
    Line,
    /// Isosceles triangle pointing up.
    Triangle,
    /// Regular polygon with `sides` sides.
    Polygon,
    /// Star with `points` points.
    Star,
    /// Pie slice between `start_angle` and `end_angle`.
    Arc,
    /// Custom path data.
    Path,
}

impl ShapeType {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Self::Circle,
            "ellipse" | "oval" => Self::Ellipse,
            "line" => Self::Line,
            "triangle" => Self::Triangle,
            "polygon" | "hexagon" => Self::Polygon,
            "star" => Self::Star,
            "arc" | "pie" => Self::Arc,
            "path" => Self::Path,
            _ => Self::Rectangle,
        }
    }
}

/// Shape layer properties.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeProps {
    /// Primitive to draw.
    pub shape_type: ShapeType,
    /// Flat fill color (used when `fill_gradient` is `None`).
    pub fill: String,
    /// Optional gradient fill.
    pub fill_gradient: Option<GradientSpec>,
    /// Stroke color.
    pub stroke: String,
    /// Stroke width, `>= 0`.
    pub stroke_width: f64,
    /// Rectangle corner radius, `>= 0`.
    pub corner_radius: f64,
    /// Polygon side count, within [`VERTEX_COUNT_RANGE`].
    pub sides: u32,
    /// Star point count, within [`VERTEX_COUNT_RANGE`].
    pub points: u32,
    /// Star inner radius as a fraction of the outer radius, in `(0, 1)`.
    pub inner_radius: f64,
    /// Arc start angle in degrees.
    pub start_angle: f64,
    /// Arc end angle in degrees.
    pub end_angle: f64,
    /// Custom path data for [`ShapeType::Path`].
    pub path_data: Option<String>,
}

/// Accepted polygon side and star point counts.
pub const VERTEX_COUNT_RANGE: std::ops::RangeInclusive<u32> = 3..=64;

impl Default for ShapeProps {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rectangle,
            fill: "#cccccc".to_owned(),
            fill_gradient: None,
            stroke: "none".to_owned(),
            stroke_width: 0.0,
            corner_radius: 0.0,
            sides: 6,
            points: 5,
            inner_radius: 0.5,
            start_angle: 0.0,
            end_angle: 270.0,
            path_data: None,
        }
    }
}

impl ShapeProps {
    fn from_bag(b: PropertyBag<'_>) -> Self {
        let d = Self::default();
        Self {
            shape_type: b
                .opt_string(&["shapeType", "shape"])
                .map(|s| ShapeType::parse(&s))
                .unwrap_or_default(),
            fill: b.string(&["fill", "fillColor"], &d.fill),
            fill_gradient: b.object(&["gradient", "fillGradient"]).map(gradient_from_bag),
            stroke: b.string(&["stroke", "strokeColor"], &d.stroke),
            stroke_width: b.number(&["strokeWidth"], d.stroke_width),
            corner_radius: b.number(&["cornerRadius", "borderRadius"], d.corner_radius),
            sides: count_or(b.opt_number(&["sides"]), d.sides),
            points: count_or(b.opt_number(&["points"]), d.points),
            inner_radius: b.number(&["innerRadius"], d.inner_radius),
            start_angle: b.number(&["startAngle"], d.start_angle),
            end_angle: b.number(&["endAngle"], d.end_angle),
            path_data: b.opt_string(&["pathData", "d", "path"]),
        }
    }

    fn repaired(&self) -> Self {
        let d = Self::default();
        let path_ok = self
            .path_data
            .as_deref()
            .is_some_and(crate::transform::compose::is_valid_path_data);
        let shape_type = if self.shape_type == ShapeType::Path && !path_ok {
            ShapeType::Rectangle
        } else {
            self.shape_type
        };
        Self {
            shape_type,
            fill: color_or(&self.fill, &d.fill),
            fill_gradient: self
                .fill_gradient
                .clone()
                .filter(|g| !g.stops.is_empty() && g.stops.iter().all(stop_is_valid)),
            stroke: color_or(&self.stroke, &d.stroke),
            stroke_width: non_negative_or(self.stroke_width, d.stroke_width),
            corner_radius: non_negative_or(self.corner_radius, d.corner_radius),
            sides: clamp_count(self.sides),
            points: clamp_count(self.points),
            inner_radius: if self.inner_radius.is_finite()
                && self.inner_radius > 0.0
                && self.inner_radius < 1.0
            {
                self.inner_radius
            } else {
                d.inner_radius
            },
            start_angle: finite_or(self.start_angle, d.start_angle),
            end_angle: finite_or(self.end_angle, d.end_angle),
            path_data: if path_ok { self.path_data.clone() } else { None },
        }
    }
}

fn count_or(v: Option<f64>, default: u32) -> u32 {
    let (lo, hi) = (*VERTEX_COUNT_RANGE.start(), *VERTEX_COUNT_RANGE.end());
    match v {
        Some(n) if (f64::from(lo)..=f64::from(hi)).contains(&n) => n.round() as u32,
        _ => default,
    }
}

fn clamp_count(n: u32) -> u32 {
    n.clamp(*VERTEX_COUNT_RANGE.start(), *VERTEX_COUNT_RANGE.end())
}

pub(crate) fn stop_is_valid(stop: &GradientStop) -> bool {
    stop.offset.is_finite()
        && normalize_color(&stop.color).is_some()
        && stop.opacity.is_none_or(|o| o.is_finite())
}

/// Read a gradient description: `{ type?: "linear"|"radial", angle?, stops: [{offset, color, opacity?}] }`.
pub(crate) fn gradient_from_bag(obj: &Map<String, Value>) -> GradientSpec {
    let b = PropertyBag(obj);
    let kind = match b.opt_string(&["type", "kind"]).as_deref() {
        Some("radial") => GradientKind::Radial,
        _ => GradientKind::Linear,
    };
    let stops = b
        .get(&["stops", "colorStops"])
        .and_then(Value::as_array)
        .map(|arr| {
            let n = arr.len();
            arr.iter()
                .enumerate()
                .filter_map(|(i, v)| {
                    let s = PropertyBag(v.as_object()?);
                    let fallback = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
                    Some(GradientStop {
                        offset: s.number(&["offset", "position"], fallback),
                        color: s.opt_string(&["color"])?,
                        opacity: s.opt_number(&["opacity"]),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    GradientSpec {
        kind,
        stops,
        angle: b.number(&["angle", "rotation"], 0.0),
    }
}

/// Embedded vector graphic properties.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorProps {
    /// Complete SVG markup to embed.
    pub svg_content: String,
    /// `preserveAspectRatio` applied when scaling into the layer box.
    pub preserve_aspect_ratio: String,
    /// Optional fill applied to the imported root.
    pub fill_override: Option<String>,
}

impl Default for VectorProps {
    fn default() -> Self {
        Self {
            svg_content: String::new(),
            preserve_aspect_ratio: "xMidYMid meet".to_owned(),
            fill_override: None,
        }
    }
}

impl VectorProps {
    fn from_bag(b: PropertyBag<'_>) -> Self {
        let d = Self::default();
        Self {
            svg_content: b.string(&["svgContent", "svg", "content"], ""),
            preserve_aspect_ratio: b.string(&["preserveAspectRatio"], &d.preserve_aspect_ratio),
            fill_override: b.opt_string(&["fill", "color"]),
        }
    }

    fn repaired(&self) -> Self {
        let d = Self::default();
        Self {
            svg_content: self.svg_content.clone(),
            preserve_aspect_ratio: if is_valid_aspect_ratio(&self.preserve_aspect_ratio) {
                self.preserve_aspect_ratio.clone()
            } else {
                d.preserve_aspect_ratio
            },
            fill_override: self
                .fill_override
                .as_deref()
                .and_then(normalize_color),
        }
    }
}

/// Return `true` for `none` or `<align> [meet|slice]` values.
pub(crate) fn is_valid_aspect_ratio(s: &str) -> bool {
    const ALIGNS: &[&str] = &[
        "none", "xMinYMin", "xMidYMin", "xMaxYMin", "xMinYMid", "xMidYMid", "xMaxYMid",
        "xMinYMax", "xMidYMax", "xMaxYMax",
    ];
    let mut parts = s.split_whitespace();
    let Some(align) = parts.next() else {
        return false;
    };
    if !ALIGNS.contains(&align) {
        return false;
    }
    match (parts.next(), parts.next()) {
        (None, None) => true,
        (Some("meet" | "slice"), None) => true,
        _ => false,
    }
}

/// Group layer properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupProps {
    /// Clip children to the group box.
    pub clip_content: bool,
}

impl GroupProps {
    fn from_bag(b: PropertyBag<'_>) -> Self {
        Self {
            clip_content: b.boolean(&["clipContent", "clip"], false),
        }
    }
}

/// Video layer properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoProps {
    /// Video URL (not fetched).
    pub src: String,
    /// Poster frame image drawn in place of the video.
    pub poster: Option<String>,
}

impl VideoProps {
    fn from_bag(b: PropertyBag<'_>) -> Self {
        Self {
            src: b.string(&["src", "url"], ""),
            poster: b.opt_string(&["poster", "thumbnail"]),
        }
    }

    fn repaired(&self) -> Self {
        Self {
            src: self.src.clone(),
            poster: self
                .poster
                .clone()
                .filter(|p| crate::sanitize::rules::is_safe_image_href(p)),
        }
    }
}

/// Audio layer properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioProps {
    /// Audio URL (not fetched).
    pub src: String,
}

impl AudioProps {
    fn from_bag(b: PropertyBag<'_>) -> Self {
        Self {
            src: b.string(&["src", "url"], ""),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/props.rs"]
mod tests;
