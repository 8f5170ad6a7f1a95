use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::MAX_CANVAS_DIMENSION;
use crate::foundation::error::{LayerdocError, LayerdocResult};

/// Compositor knobs.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid options file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorOpts {
    /// Indent the serialized document.
    pub pretty: bool,
    /// Run post-render validation and, when it reports errors, the sanitize rewrite.
    pub sanitize_output: bool,
    /// Largest accepted canvas width/height.
    pub max_dimension: u32,
    /// Deepest accepted group nesting; deeper layers fail to render.
    pub max_group_depth: usize,
    /// Emit `data-layer-id` / `data-layer-kind` on each layer group.
    pub layer_data_attrs: bool,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            pretty: false,
            sanitize_output: true,
            max_dimension: MAX_CANVAS_DIMENSION,
            max_group_depth: 32,
            layer_data_attrs: true,
        }
    }
}

impl CompositorOpts {
    /// Read options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> LayerdocResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LayerdocError::validation(format!("open options JSON '{}': {e}", path.display()))
        })?;
        let opts: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| LayerdocError::serde(format!("parse options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject option values the compositor cannot honor.
    pub fn validate(&self) -> LayerdocResult<()> {
        if self.max_dimension == 0 || self.max_dimension > MAX_CANVAS_DIMENSION {
            return Err(LayerdocError::validation(format!(
                "max_dimension must be within 1..={MAX_CANVAS_DIMENSION}, got {}",
                self.max_dimension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/opts.rs"]
mod tests;
