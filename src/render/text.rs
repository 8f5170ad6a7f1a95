use crate::document::builder::create_text;
use crate::document::node::Element;
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::render::common::{require_color, require_positive};
use crate::render::context::RenderContext;
use crate::render::registry::LayerRenderer;
use crate::scene::model::{Layer, LayerKind};
use crate::scene::props::{LayerProps, TextAlign};

/// Draws text layers as one `text` element with a `tspan` per line.
#[derive(Debug)]
pub struct TextRenderer;

impl LayerRenderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn supported_kinds(&self) -> &'static [LayerKind] {
        &[LayerKind::Text]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn render(&self, layer: &Layer, _ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>> {
        let LayerProps::Text(p) = &layer.props else {
            return Err(LayerdocError::render("text renderer given non-text props"));
        };
        let font_size = require_positive(p.font_size, "fontSize")?;
        let line_height = require_positive(p.line_height, "lineHeight")?;
        let fill = require_color(&p.color, "color")?;
        if !p.letter_spacing.is_finite() {
            return Err(LayerdocError::render("letterSpacing must be finite"));
        }
        if p.text.is_empty() {
            return Ok(None);
        }

        let (anchor, x) = match p.text_align {
            TextAlign::Left => ("start", 0.0),
            TextAlign::Center => ("middle", layer.geometry.width / 2.0),
            TextAlign::Right => ("end", layer.geometry.width),
        };

        let mut text = Element::new("text")
            .with_num("x", x)
            .with_num("y", font_size)
            .with_attr("font-family", p.font_family.as_str())
            .with_num("font-size", font_size)
            .with_attr("fill", fill)
            .with_attr("text-anchor", anchor)
            .with_attr("xml:space", "preserve");
        if p.font_weight != "normal" {
            text.set_attr("font-weight", p.font_weight.as_str());
        }
        if p.font_style != "normal" {
            text.set_attr("font-style", p.font_style.as_str());
        }
        if p.letter_spacing != 0.0 {
            text.set_num("letter-spacing", p.letter_spacing);
        }
        if let Some(deco) = p.text_decoration.as_deref() {
            text.set_attr("text-decoration", deco);
        }

        let lines: Vec<&str> = p.text.split('\n').map(|l| l.trim_end_matches('\r')).collect();
        if lines.len() == 1 {
            text.push(create_text(lines[0]));
        } else {
            for (i, line) in lines.iter().enumerate() {
                let dy = if i == 0 { 0.0 } else { font_size * line_height };
                text.push(
                    Element::new("tspan")
                        .with_num("x", x)
                        .with_num("dy", dy)
                        .with_child(create_text(line)),
                );
            }
        }
        Ok(Some(text))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
