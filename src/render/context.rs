use std::collections::HashSet;

use tracing::{debug, warn};

use crate::compositor::opts::CompositorOpts;
use crate::compositor::report::RenderReport;
use crate::document::defs::Definitions;
use crate::document::node::Element;
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::foundation::format::id_token;
use crate::recovery::layer::recover_layer;
use crate::render::common::wrap_layer;
use crate::render::registry::{LayerRenderer, RendererRegistry};
use crate::scene::hierarchy::LayerTree;
use crate::scene::model::Layer;

/// State threaded through one compositor run's layer rendering.
///
/// Owns nothing: the definitions registry and report belong to the run and are borrowed here, so
/// concurrent runs never share mutable state.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub(crate) tree: &'a LayerTree<'a>,
    pub(crate) registry: &'a RendererRegistry,
    pub(crate) defs: &'a mut Definitions,
    pub(crate) report: &'a mut RenderReport,
    pub(crate) opts: &'a CompositorOpts,
    active_groups: Vec<usize>,
    current: Option<usize>,
    xml_ids: HashSet<String>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        tree: &'a LayerTree<'a>,
        registry: &'a RendererRegistry,
        defs: &'a mut Definitions,
        report: &'a mut RenderReport,
        opts: &'a CompositorOpts,
    ) -> Self {
        Self {
            tree,
            registry,
            defs,
            report,
            opts,
            active_groups: Vec::new(),
            current: None,
            xml_ids: HashSet::new(),
        }
    }

    /// Claim the element id for a layer group: `layer-<token>`, suffixed with `-2`, `-3`, ...
    /// when another layer of this run already produced the same token.
    pub(crate) fn claim_layer_id(&mut self, layer_id: &str) -> String {
        let base = format!("layer-{}", id_token(layer_id));
        let mut candidate = base.clone();
        let mut n = 1usize;
        while self.xml_ids.contains(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.xml_ids.insert(candidate.clone());
        candidate
    }

    /// Shared definitions for this run.
    pub fn defs(&mut self) -> &mut Definitions {
        self.defs
    }

    /// Render one layer with per-layer isolation.
    ///
    /// Invisible layers and layers without a renderer yield `None`. A failed render is retried
    /// once on a recovered copy; a second failure skips the layer. A group draws children only
    /// when `layer` is one of the tree's own layers.
    pub fn render_layer(&mut self, layer: &Layer) -> Option<Element> {
        let index = self.tree.position(layer);
        self.render_one(layer, index)
    }

    /// Render the layer at `index` of the tree.
    pub(crate) fn render_index(&mut self, index: usize) -> Option<Element> {
        let tree = self.tree;
        self.render_one(tree.layer(index), Some(index))
    }

    fn render_one(&mut self, layer: &Layer, index: Option<usize>) -> Option<Element> {
        let outer = std::mem::replace(&mut self.current, index);
        let out = self.dispatch(layer);
        self.current = outer;
        out
    }

    fn dispatch(&mut self, layer: &Layer) -> Option<Element> {
        if !layer.visible {
            return None;
        }
        let registry = self.registry;
        let Some(renderer) = registry.find_renderer(layer) else {
            warn!(
                layer_id = %layer.id,
                kind = layer.props.kind_tag(),
                "no renderer for layer kind, skipping"
            );
            self.report.skip(
                &layer.id,
                format!("no renderer for kind '{}'", layer.props.kind_tag()),
            );
            return None;
        };

        let xml_id = self.claim_layer_id(&layer.id);
        let first = match self.render_with(renderer, layer, &xml_id) {
            Ok(out) => {
                if out.is_some() {
                    self.report.rendered.push(layer.id.clone());
                }
                return out;
            }
            Err(e) => e,
        };
        debug!(layer_id = %layer.id, error = %first, "layer render failed, retrying after recovery");

        let recovered = recover_layer(layer);
        let retry = registry
            .find_renderer(&recovered)
            .ok_or_else(|| LayerdocError::render("no renderer after recovery"))
            .and_then(|r| self.render_with(r, &recovered, &xml_id));
        match retry {
            Ok(out) => {
                self.report.recovered.push(layer.id.clone());
                if out.is_some() {
                    self.report.rendered.push(layer.id.clone());
                }
                out
            }
            Err(second) => {
                warn!(layer_id = %layer.id, error = %second, "layer failed after recovery, skipping");
                self.report.skip(&layer.id, second.to_string());
                None
            }
        }
    }

    fn render_with(
        &mut self,
        renderer: &dyn LayerRenderer,
        layer: &Layer,
        xml_id: &str,
    ) -> LayerdocResult<Option<Element>> {
        let issues = layer.geometry.issues();
        if !issues.is_empty() {
            return Err(LayerdocError::render(format!(
                "layer '{}' has invalid geometry: {}",
                layer.id,
                issues.join("; ")
            )));
        }
        let Some(content) = renderer.render(layer, self)? else {
            return Ok(None);
        };
        Ok(Some(wrap_layer(layer, xml_id, content, self.defs, self.opts)))
    }

    /// Render the children of `group` in paint order.
    ///
    /// Children belong to the tree layer being rendered (or to `group` itself when it is a tree
    /// layer); a detached group has none. Fails when the group is already being rendered further
    /// up or when nesting exceeds `max_group_depth`.
    pub fn render_children(&mut self, group: &Layer) -> LayerdocResult<Vec<Element>> {
        let tree = self.tree;
        let Some(index) = self
            .current
            .filter(|&i| tree.layer(i).id == group.id)
            .or_else(|| tree.position(group))
        else {
            return Ok(Vec::new());
        };
        if self.active_groups.contains(&index) {
            return Err(LayerdocError::render(format!(
                "group '{}' contains itself",
                group.id
            )));
        }
        if self.active_groups.len() >= self.opts.max_group_depth {
            return Err(LayerdocError::render(format!(
                "group nesting exceeds {} levels",
                self.opts.max_group_depth
            )));
        }

        self.active_groups.push(index);
        let out = tree
            .children_at(index)
            .iter()
            .filter_map(|&i| self.render_index(i))
            .collect();
        self.active_groups.pop();
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
