//! Post-render allow-list/deny-list check over a document tree.

use crate::document::node::{Element, Node};
use crate::sanitize::rules::{
    DenyScope, find_threat, is_allowed_attribute, is_allowed_tag, is_event_handler,
};

/// Result of [`validate_document`]. Errors are security-relevant; warnings are cosmetic.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DocumentValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl DocumentValidation {
    /// Return `true` when no errors were found.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Walk `root` and report disallowed elements, dangerous attributes and text, and attributes
/// outside the broad allow-list.
///
/// The subtree of a disallowed element is not inspected further; it is removed wholesale by the
/// rewrite pass.
pub fn validate_document(root: &Element) -> DocumentValidation {
    let mut report = DocumentValidation::default();
    visit(root, "", &mut report);
    report
}

fn visit(el: &Element, parent_path: &str, report: &mut DocumentValidation) {
    let path = match el.id() {
        Some(id) => format!("{parent_path}/{}#{id}", el.name),
        None => format!("{parent_path}/{}", el.name),
    };
    if !is_allowed_tag(&el.name) {
        report
            .errors
            .push(format!("{path}: element <{}> is not allowed", el.name));
        return;
    }

    for (name, value) in el.attrs() {
        if is_event_handler(name) {
            report
                .errors
                .push(format!("{path}: event handler attribute '{name}'"));
        } else if let Some((threat, _)) = find_threat(value, DenyScope::Value) {
            report.errors.push(format!(
                "{path}: attribute '{name}' contains {}",
                threat.describe()
            ));
        } else if !is_allowed_attribute(name) {
            report
                .warnings
                .push(format!("{path}: attribute '{name}' is not in the allow-list"));
        }
    }

    let scope = if el.name == "style" {
        DenyScope::Value
    } else {
        DenyScope::Text
    };
    for child in &el.children {
        match child {
            Node::Element(c) => visit(c, &path, report),
            Node::Text(t) => {
                if let Some((threat, _)) = find_threat(t, scope) {
                    report
                        .errors
                        .push(format!("{path}: text contains {}", threat.describe()));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sanitize/validate.rs"]
mod tests;
