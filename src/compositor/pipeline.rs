//! Compositor run: one design in, one document string out.
//!
//! A run walks `DimensionCheck -> BuildDocument -> RenderLayers -> FlushDefinitions -> Serialize
//! -> Validate -> (Sanitize) -> Done`. Layer failures are absorbed inside `RenderLayers` by the
//! render context; any other stage failure aborts the run and the fallback document is returned
//! instead.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::compositor::opts::CompositorOpts;
use crate::compositor::report::{FallbackInfo, RenderReport};
use crate::document::builder::{add_stylesheet, create_document, create_pattern};
use crate::document::defs::{Definitions, process_definitions};
use crate::document::node::Element;
use crate::document::parse::parse_document;
use crate::document::serialize::{SerializeOpts, save_document};
use crate::foundation::core::{Canvas, normalize_color};
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::foundation::format::fmt_num;
use crate::foundation::math::{Fnv1a64, content_id};
use crate::recovery::fallback::fallback_document;
use crate::render::common::gradient_paint;
use crate::render::context::RenderContext;
use crate::render::registry::{RendererRegistry, builtin_registry};
use crate::sanitize::css::sanitize_css;
use crate::sanitize::rewrite::sanitize_document;
use crate::sanitize::validate::validate_document;
use crate::scene::hierarchy::LayerTree;
use crate::scene::model::{Background, Design, GridOverlay, SafeAreaGuide};

/// Compositor states, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    DimensionCheck,
    BuildDocument,
    RenderLayers,
    FlushDefinitions,
    Serialize,
    Validate,
    Sanitize,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DimensionCheck => "dimension_check",
            Self::BuildDocument => "build_document",
            Self::RenderLayers => "render_layers",
            Self::FlushDefinitions => "flush_definitions",
            Self::Serialize => "serialize",
            Self::Validate => "validate",
            Self::Sanitize => "sanitize",
            Self::Done => "done",
        }
    }
}

/// A run-level failure, tagged with the stage that raised it.
#[derive(thiserror::Error, Debug)]
#[error("{} failed: {source}", .stage.as_str())]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: LayerdocError,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T> AtStage<T> for LayerdocResult<T> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|source| StageError { stage, source })
    }
}

/// Document text plus the diagnostics of the run that produced it.
#[derive(Clone, Debug)]
pub struct RenderOutcome {
    /// Serialized document; the fallback document when the run aborted.
    pub document: String,
    pub report: RenderReport,
}

/// Stateless design renderer.
///
/// Holds only options and a shared, read-only renderer registry, so one instance can serve many
/// threads at once.
#[derive(Debug)]
pub struct Compositor<'r> {
    opts: CompositorOpts,
    registry: &'r RendererRegistry,
}

impl Default for Compositor<'static> {
    fn default() -> Self {
        Self::new(CompositorOpts::default())
    }
}

impl Compositor<'static> {
    /// Compositor over the built-in renderers.
    pub fn new(opts: CompositorOpts) -> Self {
        Self {
            opts,
            registry: builtin_registry(),
        }
    }
}

impl<'r> Compositor<'r> {
    /// Compositor over a caller-supplied registry.
    pub fn with_registry(opts: CompositorOpts, registry: &'r RendererRegistry) -> Self {
        Self { opts, registry }
    }

    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Render one design. Never fails: an aborted run yields the fallback document and records
    /// the failing stage in the report.
    #[tracing::instrument(skip(self, design), fields(design_id = design.id.as_deref().unwrap_or("")))]
    pub fn render(&self, design: &Design) -> RenderOutcome {
        let mut report = RenderReport::default();
        match self.run(design, &mut report) {
            Ok(document) => {
                debug!(stage = Stage::Done.as_str(), "compositor stage");
                RenderOutcome { document, report }
            }
            Err(e) => {
                let cause = e.source.to_string();
                warn!(stage = e.stage.as_str(), error = %e.source, "design render aborted");
                let document = fallback_document(design, Some(&cause), self.serialize_opts());
                report.fallback = Some(FallbackInfo {
                    stage: e.stage,
                    cause,
                });
                RenderOutcome { document, report }
            }
        }
    }

    /// Render many designs in parallel. Output order matches input order.
    pub fn render_batch(&self, designs: &[Design]) -> Vec<RenderOutcome> {
        designs.par_iter().map(|d| self.render(d)).collect()
    }

    fn serialize_opts(&self) -> SerializeOpts {
        SerializeOpts {
            pretty: self.opts.pretty,
        }
    }

    fn run(&self, design: &Design, report: &mut RenderReport) -> Result<String, StageError> {
        enter(Stage::DimensionCheck);
        let canvas = Canvas::from_dimensions(design.width, design.height, self.opts.max_dimension)
            .at(Stage::DimensionCheck)?;

        enter(Stage::BuildDocument);
        let mut defs = Definitions::new();
        let mut root = build_document(design, canvas, &mut defs, report);

        enter(Stage::RenderLayers);
        let tree = LayerTree::new(design);
        for id in tree.unreachable() {
            warn!(layer_id = id, "layer parent chain forms a cycle, skipping");
            report.skip(id, "parent chain forms a cycle");
        }
        {
            let mut ctx =
                RenderContext::new(&tree, self.registry, &mut defs, report, &self.opts);
            for &index in tree.roots() {
                if let Some(el) = ctx.render_index(index) {
                    root.push(el);
                }
            }
        }
        push_overlays(&mut root, design, canvas, &mut defs, report);

        enter(Stage::FlushDefinitions);
        process_definitions(&mut root, defs);

        enter(Stage::Serialize);
        let text = save_document(&root, self.serialize_opts());
        if !self.opts.sanitize_output {
            return Ok(text);
        }

        enter(Stage::Validate);
        let mut produced = parse_document(&text).at(Stage::Validate)?;
        let validation = validate_document(&produced);
        if validation.errors.is_empty() {
            report.validation = Some(validation);
            return Ok(text);
        }

        enter(Stage::Sanitize);
        warn!(
            errors = validation.errors.len(),
            "produced document failed validation, sanitizing"
        );
        let summary = sanitize_document(&mut produced).at(Stage::Sanitize)?;
        let after = validate_document(&produced);
        if !after.errors.is_empty() {
            return Err(StageError {
                stage: Stage::Sanitize,
                source: LayerdocError::sanitize(format!(
                    "document still invalid after sanitize: {}",
                    after.errors.join("; ")
                )),
            });
        }
        report.sanitized = Some(summary);
        report.validation = Some(after);
        Ok(save_document(&produced, self.serialize_opts()))
    }
}

/// Render a design with default options. Always returns a document.
pub fn render_design_to_vector_document(design: &Design) -> String {
    Compositor::default().render(design).document
}

fn enter(stage: Stage) {
    debug!(stage = stage.as_str(), "compositor stage");
}

/// Root element with background and style block. Problems here are reported, not fatal.
fn build_document(
    design: &Design,
    canvas: Canvas,
    defs: &mut Definitions,
    report: &mut RenderReport,
) -> Element {
    let fill = match &design.background {
        Background::None => None,
        Background::Color(c) => match normalize_color(c) {
            Some(c) if c == "none" => None,
            Some(c) => Some(c),
            None => {
                report
                    .warnings
                    .push(format!("background color '{c}' is invalid, drawing none"));
                None
            }
        },
        Background::Gradient(spec) => match gradient_paint(spec, defs) {
            Ok(paint) => Some(paint),
            Err(e) => {
                report
                    .warnings
                    .push(format!("background gradient dropped: {e}"));
                None
            }
        },
    };
    let mut root = create_document(canvas, fill.as_deref());

    if let Some(css) = design.settings.custom_css.as_deref() {
        let cleaned = sanitize_css(css);
        if cleaned.trim().is_empty() {
            if !css.trim().is_empty() {
                warn!("custom stylesheet dropped by sanitizer");
                report
                    .warnings
                    .push("custom stylesheet had no usable rules".to_owned());
            }
        } else {
            add_stylesheet(&mut root, &cleaned);
        }
    }
    root
}

/// Debug overlays, drawn above every layer.
fn push_overlays(
    root: &mut Element,
    design: &Design,
    canvas: Canvas,
    defs: &mut Definitions,
    report: &mut RenderReport,
) {
    if let Some(grid) = &design.settings.grid {
        match grid_overlay(grid, defs) {
            Some(el) => root.push(el),
            None => report
                .warnings
                .push(format!("grid size {} is unusable, grid omitted", grid.size)),
        }
    }
    if let Some(guide) = &design.settings.safe_area {
        match safe_area_overlay(guide, canvas) {
            Some(el) => root.push(el),
            None => report.warnings.push(format!(
                "safe-area margin {} does not fit the canvas, guide omitted",
                guide.margin
            )),
        }
    }
}

fn grid_overlay(grid: &GridOverlay, defs: &mut Definitions) -> Option<Element> {
    if !(grid.size.is_finite() && grid.size >= 1.0) {
        return None;
    }
    let color = normalize_color(&grid.color).unwrap_or_else(|| "#e5e7eb".to_owned());

    let mut h = Fnv1a64::new_default();
    h.write_f64(grid.size);
    h.write_str(&color);
    let id = content_id("grid", h.finish());
    if !defs.contains(&id) {
        let s = fmt_num(grid.size);
        let pattern = create_pattern(
            &id,
            grid.size,
            grid.size,
            &[("patternUnits", "userSpaceOnUse".to_owned())],
        )
        .with_child(
            Element::new("path")
                .with_attr("d", format!("M {s} 0 L 0 0 L 0 {s}"))
                .with_attr("fill", "none")
                .with_attr("stroke", color)
                .with_attr("stroke-width", "0.5"),
        );
        defs.register(pattern);
    }
    Some(
        Element::new("rect")
            .with_attr("width", "100%")
            .with_attr("height", "100%")
            .with_attr("fill", format!("url(#{id})"))
            .with_attr("pointer-events", "none")
            .with_attr("data-overlay", "grid"),
    )
}

fn safe_area_overlay(guide: &SafeAreaGuide, canvas: Canvas) -> Option<Element> {
    let m = guide.margin;
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    if !(m.is_finite() && m >= 0.0 && 2.0 * m < w && 2.0 * m < h) {
        return None;
    }
    let color = normalize_color(&guide.color).unwrap_or_else(|| "#ef4444".to_owned());
    Some(
        Element::new("rect")
            .with_num("x", m)
            .with_num("y", m)
            .with_num("width", w - 2.0 * m)
            .with_num("height", h - 2.0 * m)
            .with_attr("fill", "none")
            .with_attr("stroke", color)
            .with_attr("stroke-dasharray", "8 4")
            .with_attr("pointer-events", "none")
            .with_attr("data-overlay", "safe-area"),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/pipeline.rs"]
mod tests;
