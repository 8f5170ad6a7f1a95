use regex::Regex;
use std::sync::OnceLock;

use crate::foundation::error::{LayerdocError, LayerdocResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Hard upper bound for canvas width/height.
pub const MAX_CANVAS_DIMENSION: u32 = 10_000;

/// Canvas size used when a design's own dimensions are unusable.
pub const DEFAULT_CANVAS: Canvas = Canvas {
    width: 800,
    height: 600,
};

/// Output canvas dimensions in user units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in user units.
    pub width: u32,
    /// Height in user units.
    pub height: u32,
}

impl Canvas {
    /// Validate raw design dimensions against `(0, max]`.
    ///
    /// Fractional values are truncated after the range check.
    pub fn from_dimensions(width: f64, height: f64, max: u32) -> LayerdocResult<Self> {
        fn check(name: &str, v: f64, max: u32) -> LayerdocResult<u32> {
            if !v.is_finite() || v <= 0.0 {
                return Err(LayerdocError::validation(format!(
                    "canvas {name} must be a positive number, got {v}"
                )));
            }
            if v > f64::from(max) {
                return Err(LayerdocError::validation(format!(
                    "canvas {name} {v} exceeds maximum of {max}"
                )));
            }
            Ok((v as u32).max(1))
        }

        Ok(Self {
            width: check("width", width, max)?,
            height: check("height", height, max)?,
        })
    }

    /// `viewBox` attribute value covering the whole canvas.
    pub fn view_box(self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

const NAMED_COLORS: &[&str] = &[
    "aqua", "black", "blue", "brown", "coral", "crimson", "cyan", "darkblue", "darkgray",
    "darkgreen", "darkgrey", "darkred", "fuchsia", "gold", "gray", "green", "grey", "indigo",
    "ivory", "lavender", "lightblue", "lightgray", "lightgreen", "lightgrey", "lime", "magenta",
    "maroon", "navy", "olive", "orange", "pink", "purple", "red", "salmon", "silver", "skyblue",
    "tan", "teal", "tomato", "turquoise", "violet", "white", "yellow",
];

fn functional_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(rgb|rgba|hsl|hsla)\(\s*[0-9.+\-%]+(\s*[,\s]\s*[0-9.+\-%]+){2,3}\s*(/\s*[0-9.%]+\s*)?\)$")
            .expect("valid regex")
    })
}

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
            .expect("valid regex")
    })
}

/// Normalize a CSS paint color, or return `None` when the value is not a color we emit.
///
/// Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()/rgba()/hsl()/hsla()`, a small
/// set of named colors, `transparent`, `none` and `currentColor`.
pub fn normalize_color(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if hex_color_regex().is_match(s) {
        return Some(s.to_ascii_lowercase());
    }
    if functional_color_regex().is_match(s) {
        return Some(s.to_owned());
    }
    let lower = s.to_ascii_lowercase();
    if lower == "transparent" || lower == "none" {
        return Some(lower);
    }
    if lower == "currentcolor" {
        return Some("currentColor".to_owned());
    }
    if NAMED_COLORS.binary_search(&lower.as_str()).is_ok() {
        return Some(lower);
    }
    None
}

/// Return `true` when `s` is a color accepted by [`normalize_color`].
pub fn is_valid_color(s: &str) -> bool {
    normalize_color(s).is_some()
}

/// Parse a hex color into straight RGBA8.
pub fn parse_hex_rgba(s: &str) -> Result<[u8; 4], String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    fn nibble(c: &str) -> Result<u8, String> {
        let v = hex_byte(c)?;
        Ok(v * 17)
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    match s.len() {
        3 | 4 => {
            let r = nibble(&s[0..1])?;
            let g = nibble(&s[1..2])?;
            let b = nibble(&s[2..3])?;
            let a = if s.len() == 4 { nibble(&s[3..4])? } else { 255 };
            Ok([r, g, b, a])
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 { hex_byte(&s[6..8])? } else { 255 };
            Ok([r, g, b, a])
        }
        _ => Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

/// One stop of a linear or radial gradient.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Position along the gradient vector in `[0, 1]`.
    pub offset: f64,
    /// Stop color (any value accepted by [`normalize_color`]).
    pub color: String,
    /// Optional stop opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl GradientStop {
    /// Build an opaque stop.
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
            opacity: None,
        }
    }
}

/// Pick a readable label color (black or white) for text drawn over `background`.
pub fn contrasting_label_color(background: &str) -> &'static str {
    match parse_hex_rgba(background) {
        Ok([r, g, b, _]) => {
            let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
            if luma > 140.0 { "#1f2937" } else { "#f9fafb" }
        }
        Err(_) => "#1f2937",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
