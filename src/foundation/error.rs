/// Convenience result type used across layerdoc.
pub type LayerdocResult<T> = Result<T, LayerdocError>;

/// Top-level error taxonomy used by compositor internals.
///
/// None of these escape [`crate::render_design_to_vector_document`]: layer-level errors feed the
/// recovery path and run-level errors select the fallback document.
#[derive(thiserror::Error, Debug)]
pub enum LayerdocError {
    /// Invalid design or layer data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A renderer could not produce a subtree for a layer.
    #[error("render error: {0}")]
    Render(String),

    /// Produced or embedded markup could not be parsed.
    #[error("markup error: {0}")]
    Markup(String),

    /// The sanitizer could not bring a document into a clean state.
    #[error("sanitize error: {0}")]
    Sanitize(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerdocError {
    /// Build a [`LayerdocError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerdocError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LayerdocError::Markup`] value.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::Markup(msg.into())
    }

    /// Build a [`LayerdocError::Sanitize`] value.
    pub fn sanitize(msg: impl Into<String>) -> Self {
        Self::Sanitize(msg.into())
    }

    /// Build a [`LayerdocError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
