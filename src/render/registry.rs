//! Renderer trait and priority-ordered dispatch table.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::OnceLock;

use crate::document::node::Element;
use crate::foundation::error::LayerdocResult;
use crate::render::context::RenderContext;
use crate::scene::model::{Layer, LayerKind};

/// Draws one layer kind (or several) into a detached subtree.
///
/// Implementations produce content in the layer's local space, `(0, 0)` to `(width, height)`;
/// the caller wraps it in a group carrying the layer transform, opacity and effects.
pub trait LayerRenderer: Send + Sync + Debug {
    /// Stable name for diagnostics.
    fn name(&self) -> &'static str;

    /// Kinds this renderer declares support for.
    fn supported_kinds(&self) -> &'static [LayerKind];

    /// Higher wins when several renderers support a kind.
    fn priority(&self) -> i32 {
        0
    }

    /// Kind membership plus any renderer-specific guard.
    fn can_render(&self, layer: &Layer) -> bool {
        self.supported_kinds().contains(&layer.kind())
    }

    /// Produce the layer content. `Ok(None)` means nothing to draw; `Err` triggers recovery.
    fn render(&self, layer: &Layer, ctx: &mut RenderContext<'_>) -> LayerdocResult<Option<Element>>;
}

/// Immutable set of renderers, sorted by descending priority.
///
/// Ties keep registration order, so the first registered renderer wins an exact tie.
#[derive(Debug, Default)]
pub struct RendererRegistry {
    renderers: Vec<Box<dyn LayerRenderer>>,
    by_kind: HashMap<LayerKind, usize>,
}

impl RendererRegistry {
    /// Registry with no renderers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in renderer.
    pub fn with_builtin() -> Self {
        use crate::render::{group, image, media, shape, text, vector};
        Self::from_renderers(vec![
            Box::new(text::TextRenderer),
            Box::new(image::ImageRenderer),
            Box::new(shape::ShapeRenderer),
            Box::new(vector::VectorRenderer),
            Box::new(group::GroupRenderer),
            Box::new(media::VideoRenderer),
            Box::new(media::AudioRenderer),
        ])
    }

    /// Build from renderers in registration order.
    pub fn from_renderers(renderers: Vec<Box<dyn LayerRenderer>>) -> Self {
        let mut reg = Self {
            renderers,
            by_kind: HashMap::new(),
        };
        reg.reindex();
        reg
    }

    /// Add a renderer after the existing ones.
    pub fn register(&mut self, renderer: Box<dyn LayerRenderer>) {
        self.renderers.push(renderer);
        self.reindex();
    }

    fn reindex(&mut self) {
        // Stable: equal priorities keep registration order.
        self.renderers.sort_by_key(|r| std::cmp::Reverse(r.priority()));
        self.by_kind.clear();
        for (i, r) in self.renderers.iter().enumerate() {
            for kind in r.supported_kinds() {
                self.by_kind.entry(*kind).or_insert(i);
            }
        }
    }

    /// First renderer, in priority order, whose `can_render` accepts `layer`.
    pub fn find_renderer(&self, layer: &Layer) -> Option<&dyn LayerRenderer> {
        self.renderers
            .iter()
            .find(|r| r.can_render(layer))
            .map(|r| r.as_ref())
    }

    /// Highest-priority renderer declaring `kind`.
    pub fn renderer_for_kind(&self, kind: LayerKind) -> Option<&dyn LayerRenderer> {
        self.by_kind.get(&kind).map(|&i| self.renderers[i].as_ref())
    }

    /// Renderer names in dispatch order.
    pub fn names(&self) -> Vec<&'static str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

/// Process-wide registry of built-in renderers, built on first use.
pub fn builtin_registry() -> &'static RendererRegistry {
    static REGISTRY: OnceLock<RendererRegistry> = OnceLock::new();
    REGISTRY.get_or_init(RendererRegistry::with_builtin)
}

#[cfg(test)]
#[path = "../../tests/unit/render/registry.rs"]
mod tests;
