//! layerdoc turns a layered design (canvas, background and a flat list of typed layers) into a
//! standalone SVG document.
//!
//! - Load a [`Design`] from JSON ([`Design::from_path`], [`Design::from_json_str`])
//! - Optionally check it with [`validate_design`]
//! - Render it with [`render_design_to_vector_document`], or with a [`Compositor`] to also get a
//!   [`RenderReport`]
//!
//! Rendering never fails: broken layers are repaired and retried once or skipped, and a design
//! that cannot be rendered at all yields a placeholder document. Every produced document is
//! validated against an element/attribute allow-list and sanitized when it does not pass.
#![forbid(unsafe_code)]

mod compositor;
mod document;
mod foundation;
mod recovery;
mod render;
mod sanitize;
mod scene;
mod transform;

pub use crate::foundation::core::{
    Affine, Canvas, DEFAULT_CANVAS, GradientStop, MAX_CANVAS_DIMENSION, Point, Vec2,
    is_valid_color, normalize_color,
};
pub use crate::foundation::error::{LayerdocError, LayerdocResult};
pub use crate::foundation::format::{escape_attr, escape_text, fmt_num};

pub use crate::scene::hierarchy::LayerTree;
pub use crate::scene::model::{
    Background, BlendMode, CanvasSettings, Design, Effects, Geometry, GradientKind, GradientSpec,
    GridOverlay, Layer, LayerKind, MAX_LAYER_EXTENT, SafeAreaGuide, Shadow,
};
pub use crate::scene::props::{
    AudioProps, GroupProps, ImageFit, ImageProps, LayerProps, ShapeProps, ShapeType, TextAlign,
    TextProps, VERTEX_COUNT_RANGE, VectorProps, VideoProps,
};

pub use crate::transform::compose::{
    BoundingBox, TransformOp, affine_coeffs, affine_matrix, arc_path, bounding_box,
    normalize_angle, path_from_points, transform_attribute, transform_ops,
};

pub use crate::document::builder::{
    add_definitions, add_stylesheet, create_clip_path, create_document, create_element,
    create_filter, create_group, create_linear_gradient, create_pattern, create_radial_gradient,
    create_text,
};
pub use crate::document::defs::{Definitions, process_definitions};
pub use crate::document::node::{Element, Node, SVG_NS, XLINK_NS};
pub use crate::document::parse::parse_document;
pub use crate::document::serialize::{SerializeOpts, save_document};

pub use crate::render::context::RenderContext;
pub use crate::render::group::GroupRenderer;
pub use crate::render::image::ImageRenderer;
pub use crate::render::media::{AudioRenderer, VideoRenderer};
pub use crate::render::registry::{LayerRenderer, RendererRegistry, builtin_registry};
pub use crate::render::shape::ShapeRenderer;
pub use crate::render::text::TextRenderer;
pub use crate::render::vector::VectorRenderer;

pub use crate::sanitize::css::sanitize_css;
pub use crate::sanitize::rewrite::{SanitizeSummary, sanitize_document};
pub use crate::sanitize::rules::{
    DenyScope, Threat, find_threat, is_allowed_attribute, is_allowed_tag, is_dangerous,
    is_event_handler, is_safe_image_href, strip_dangerous,
};
pub use crate::sanitize::validate::{DocumentValidation, validate_document};

pub use crate::recovery::fallback::{FALLBACK_LABEL, fallback_document};
pub use crate::recovery::layer::recover_layer;

pub use crate::compositor::design_check::{DesignValidation, validate_design};
pub use crate::compositor::opts::CompositorOpts;
pub use crate::compositor::pipeline::{
    Compositor, RenderOutcome, Stage, StageError, render_design_to_vector_document,
};
pub use crate::compositor::report::{FallbackInfo, RenderReport, SkippedLayer};
