use crate::foundation::core::GradientStop;
use crate::scene::props::LayerProps;

/// Closed set of layer kinds the compositor knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    /// Styled text block.
    Text,
    /// Raster image reference.
    Image,
    /// Geometric primitive (rectangle, circle, star, path, ...).
    Shape,
    /// Embedded vector markup.
    VectorGraphic,
    /// Container whose children reference it through `parent_id`.
    Group,
    /// Video reference, drawn as its poster frame.
    Video,
    /// Audio reference, never drawn.
    Audio,
    /// Any kind tag outside the closed set.
    Unknown,
}

impl LayerKind {
    /// Parse a kind tag as found in design payloads.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "image" => Self::Image,
            "shape" => Self::Shape,
            "vector" | "vector-graphic" | "vector_graphic" | "vectorgraphic" | "svg" => {
                Self::VectorGraphic
            }
            "group" => Self::Group,
            "video" => Self::Video,
            "audio" => Self::Audio,
            _ => Self::Unknown,
        }
    }

    /// Canonical tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::VectorGraphic => "vector-graphic",
            Self::Group => "group",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Unknown => "unknown",
        }
    }
}

/// Largest accepted magnitude for a layer coordinate or dimension.
pub const MAX_LAYER_EXTENT: f64 = 100_000.0;

/// Placement of a layer in its parent's coordinate space.
///
/// Fields are plain `f64` so malformed payloads survive loading; the recovery service repairs
/// them before a retry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Left edge before rotation/scale.
    pub x: f64,
    /// Top edge before rotation/scale.
    pub y: f64,
    /// Unscaled width, must be > 0.
    pub width: f64,
    /// Unscaled height, must be > 0.
    pub height: f64,
    /// Clockwise rotation in degrees around the box center.
    pub rotation: f64,
    /// Horizontal scale factor, `|scale_x| > 0`.
    pub scale_x: f64,
    /// Vertical scale factor, `|scale_y| > 0`.
    pub scale_y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
        }
    }
}

impl Geometry {
    /// Geometry with the given box and default rotation/scale/opacity.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    /// Return `true` when every field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.x,
            self.y,
            self.width,
            self.height,
            self.rotation,
            self.scale_x,
            self.scale_y,
            self.opacity,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Describe every field that is unusable for rendering; empty when the geometry is sound.
    pub fn issues(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (name, v) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("rotation", self.rotation),
            ("scaleX", self.scale_x),
            ("scaleY", self.scale_y),
            ("opacity", self.opacity),
        ] {
            if !v.is_finite() {
                out.push(format!("{name} must be a finite number"));
            }
        }
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if v <= 0.0 {
                out.push(format!("{name} must be > 0, got {v}"));
            } else if v > MAX_LAYER_EXTENT {
                out.push(format!("{name} {v} exceeds {MAX_LAYER_EXTENT}"));
            }
        }
        for (name, v) in [("x", self.x), ("y", self.y)] {
            if v.abs() > MAX_LAYER_EXTENT {
                out.push(format!("{name} {v} is beyond +/-{MAX_LAYER_EXTENT}"));
            }
        }
        for (name, v) in [("scaleX", self.scale_x), ("scaleY", self.scale_y)] {
            if v == 0.0 {
                out.push(format!("{name} must be non-zero"));
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) && self.opacity.is_finite() {
            out.push(format!("opacity must be within [0, 1], got {}", self.opacity));
        }
        out
    }
}

/// Compositing mode between a layer and what is below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Plain source-over.
    #[default]
    Normal,
    /// `multiply`.
    Multiply,
    /// `screen`.
    Screen,
    /// `overlay`.
    Overlay,
    /// `darken`.
    Darken,
    /// `lighten`.
    Lighten,
    /// `color-dodge`.
    ColorDodge,
    /// `color-burn`.
    ColorBurn,
    /// `soft-light`.
    SoftLight,
    /// `hard-light`.
    HardLight,
    /// `difference`.
    Difference,
    /// `exclusion`.
    Exclusion,
}

impl BlendMode {
    /// Parse a CSS blend-mode keyword; unknown values are `Normal`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "multiply" => Self::Multiply,
            "screen" => Self::Screen,
            "overlay" => Self::Overlay,
            "darken" => Self::Darken,
            "lighten" => Self::Lighten,
            "color-dodge" => Self::ColorDodge,
            "color-burn" => Self::ColorBurn,
            "soft-light" => Self::SoftLight,
            "hard-light" => Self::HardLight,
            "difference" => Self::Difference,
            "exclusion" => Self::Exclusion,
            _ => Self::Normal,
        }
    }

    /// CSS keyword for `mix-blend-mode`.
    pub fn css_keyword(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
        }
    }
}

/// Drop shadow parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Shadow {
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
    /// Gaussian standard deviation, `>= 0`.
    pub blur: f64,
    /// Shadow color.
    pub color: String,
    /// Shadow opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset_x: 2.0,
            offset_y: 2.0,
            blur: 4.0,
            color: "#000000".to_owned(),
            opacity: 0.25,
        }
    }
}

/// Filter effects attached to a layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    /// Optional drop shadow.
    pub shadow: Option<Shadow>,
    /// Optional gaussian blur radius.
    pub blur: Option<f64>,
}

impl Effects {
    /// Return `true` when no effect is configured.
    pub fn is_empty(&self) -> bool {
        self.shadow.is_none() && self.blur.is_none()
    }
}

/// One node of the scene graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Caller-assigned identifier, unique within a design.
    pub id: String,
    /// Optional display name, emitted as a `title`.
    pub name: Option<String>,
    /// Box, rotation, scale and opacity.
    pub geometry: Geometry,
    /// Paint order within the sibling set; lower draws first.
    pub z_index: i64,
    /// Invisible layers are never dispatched.
    pub visible: bool,
    /// Editor lock; ignored by rendering.
    pub locked: bool,
    /// Id of the enclosing group layer, if any.
    pub parent_id: Option<String>,
    /// Compositing mode.
    pub blend_mode: BlendMode,
    /// Filter effects.
    pub effects: Effects,
    /// Kind-specific properties; the layer kind is derived from this variant.
    pub props: LayerProps,
}

impl Layer {
    /// Create a visible root layer with default geometry.
    pub fn new(id: impl Into<String>, props: LayerProps) -> Self {
        Self {
            id: id.into(),
            name: None,
            geometry: Geometry::default(),
            z_index: 0,
            visible: true,
            locked: false,
            parent_id: None,
            blend_mode: BlendMode::Normal,
            effects: Effects::default(),
            props,
        }
    }

    /// Kind tag derived from the property variant.
    pub fn kind(&self) -> LayerKind {
        self.props.kind()
    }

    /// Replace the geometry.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Replace the z-index.
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Attach this layer to a parent group.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Parent id, treating an empty string as "no parent".
    pub fn parent(&self) -> Option<&str> {
        self.parent_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Linear or radial gradient paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientKind {
    /// Gradient along an angle.
    #[default]
    Linear,
    /// Gradient radiating from the box center.
    Radial,
}

/// Gradient paint description.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientSpec {
    /// Linear or radial.
    pub kind: GradientKind,
    /// Ordered color stops.
    pub stops: Vec<GradientStop>,
    /// Direction in degrees for linear gradients (0 = left to right).
    pub angle: f64,
}

/// Canvas fill drawn beneath all layers.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Background {
    /// Flat color.
    Color(String),
    /// Gradient across the whole canvas.
    Gradient(GradientSpec),
    /// Nothing drawn (transparent canvas).
    #[default]
    None,
}

impl Background {
    /// Flat color, if this is a color background.
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Color(c) => Some(c.as_str()),
            _ => None,
        }
    }
}

/// Grid debug overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct GridOverlay {
    /// Cell size in user units, `> 0`.
    pub size: f64,
    /// Line color.
    pub color: String,
}

/// Safe-area debug guide.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeAreaGuide {
    /// Inset from each canvas edge.
    pub margin: f64,
    /// Guide color.
    pub color: String,
}

/// Canvas-level settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasSettings {
    /// Free-form CSS embedded after sanitization.
    pub custom_css: Option<String>,
    /// Grid overlay drawn above all layers.
    pub grid: Option<GridOverlay>,
    /// Safe-area guide drawn above all layers.
    pub safe_area: Option<SafeAreaGuide>,
}

/// Root of the scene graph: canvas, background and a flat, insertion-ordered layer list.
///
/// Parent/child structure is expressed through [`Layer::parent_id`]; the design owns every
/// layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Design {
    /// Optional design identifier.
    pub id: Option<String>,
    /// Declared canvas width; valid range is `(0, 10_000]`.
    pub width: f64,
    /// Declared canvas height; valid range is `(0, 10_000]`.
    pub height: f64,
    /// Canvas fill.
    pub background: Background,
    /// Style text and debug overlays.
    pub settings: CanvasSettings,
    /// All layers in insertion order.
    pub layers: Vec<Layer>,
}

impl Design {
    /// Empty design with the given canvas size and no background.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: None,
            width,
            height,
            background: Background::None,
            settings: CanvasSettings::default(),
            layers: Vec::new(),
        }
    }

    /// Replace the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Append a layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Find a layer by id (first match in insertion order).
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
