use crate::compositor::pipeline::Stage;
use crate::sanitize::rewrite::SanitizeSummary;
use crate::sanitize::validate::DocumentValidation;

/// A layer left out of the output, with the reason.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SkippedLayer {
    pub id: String,
    pub reason: String,
}

/// Why a run ended in the fallback document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FallbackInfo {
    /// Stage that failed.
    pub stage: Stage,
    /// Error display text.
    pub cause: String,
}

/// Diagnostics collected during one compositor run.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderReport {
    /// Layers that produced output, in document order of completion.
    pub rendered: Vec<String>,
    /// Layers that rendered only after recovery.
    pub recovered: Vec<String>,
    /// Layers left out.
    pub skipped: Vec<SkippedLayer>,
    /// Non-fatal notes (hidden layers, dropped style text, ...).
    pub warnings: Vec<String>,
    /// Post-render validation of the produced document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<DocumentValidation>,
    /// What the sanitize pass changed, when it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<SanitizeSummary>,
    /// Set when the fallback document was returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackInfo>,
}

impl RenderReport {
    pub(crate) fn skip(&mut self, id: &str, reason: impl Into<String>) {
        self.skipped.push(SkippedLayer {
            id: id.to_owned(),
            reason: reason.into(),
        });
    }

    /// Return `true` when the run produced the fallback document.
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
