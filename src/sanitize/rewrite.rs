//! In-place sanitizing rewrite.

use crate::document::node::{Element, Node};
use crate::foundation::error::{LayerdocError, LayerdocResult};
use crate::sanitize::rules::{
    DenyScope, is_allowed_attribute, is_allowed_tag, is_dangerous, is_event_handler,
    is_url_attribute, strip_dangerous,
};

/// Counts of what a sanitize pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SanitizeSummary {
    /// Disallowed elements removed, counting each removed subtree root once.
    pub removed_elements: usize,
    /// Attributes dropped.
    pub removed_attributes: usize,
    /// Attribute values rewritten in place.
    pub rewritten_values: usize,
    /// Text nodes rewritten or dropped.
    pub rewritten_text: usize,
}

impl SanitizeSummary {
    /// Return `true` when the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.removed_elements += other.removed_elements;
        self.removed_attributes += other.removed_attributes;
        self.rewritten_values += other.rewritten_values;
        self.rewritten_text += other.rewritten_text;
    }
}

/// Strip everything [`validate_document`](crate::sanitize::validate::validate_document) reports
/// as an error, plus attributes outside the allow-list.
///
/// Disallowed elements go with their whole subtree. Event handlers, unknown attributes and URL
/// attributes with dangerous values are dropped; other dangerous values and text have the
/// offending spans cut out. Running the pass on its own output changes nothing.
///
/// Fails only when the root element itself is disallowed.
pub fn sanitize_document(root: &mut Element) -> LayerdocResult<SanitizeSummary> {
    if !is_allowed_tag(&root.name) {
        return Err(LayerdocError::sanitize(format!(
            "root element <{}> is not allowed",
            root.name
        )));
    }
    let mut summary = SanitizeSummary::default();
    clean_element(root, &mut summary);
    Ok(summary)
}

fn clean_element(el: &mut Element, summary: &mut SanitizeSummary) {
    el.attrs_mut().retain_mut(|(name, value)| {
        if is_event_handler(name) || !is_allowed_attribute(name) {
            summary.removed_attributes += 1;
            return false;
        }
        if !is_dangerous(value, DenyScope::Value) {
            return true;
        }
        if is_url_attribute(name) {
            summary.removed_attributes += 1;
            return false;
        }
        let cleaned = strip_dangerous(value, DenyScope::Value);
        if cleaned.trim().is_empty() {
            summary.removed_attributes += 1;
            return false;
        }
        *value = cleaned;
        summary.rewritten_values += 1;
        true
    });

    let scope = if el.name == "style" {
        DenyScope::Value
    } else {
        DenyScope::Text
    };
    el.children.retain_mut(|child| match child {
        Node::Element(c) => {
            if !is_allowed_tag(&c.name) {
                summary.removed_elements += 1;
                return false;
            }
            clean_element(c, summary);
            true
        }
        Node::Text(t) => {
            if !is_dangerous(t, scope) {
                return true;
            }
            *t = strip_dangerous(t, scope);
            summary.rewritten_text += 1;
            !t.is_empty()
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/sanitize/rewrite.rs"]
mod tests;
