use std::collections::HashSet;

use crate::document::builder::add_definitions;
use crate::document::node::Element;

/// Per-run store of shared resources, deduplicated by id.
///
/// Renderers register gradients, clip paths, filters and patterns here while a design is being
/// rendered; [`process_definitions`] moves them into the document once, right before
/// serialization.
#[derive(Debug, Default)]
pub struct Definitions {
    entries: Vec<Element>,
    ids: HashSet<String>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource. Returns `false` (and drops `el`) when its id is already taken or it has
    /// no id.
    pub fn register(&mut self, el: Element) -> bool {
        let Some(id) = el.id().map(str::to_owned) else {
            return false;
        };
        if !self.ids.insert(id) {
            return false;
        }
        self.entries.push(el);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(Element::id)
    }
}

/// Flush `defs` into the root's `defs` container.
///
/// Entries whose id already exists in the container are skipped. Nothing is created when `defs`
/// is empty.
pub fn process_definitions(root: &mut Element, defs: Definitions) {
    if defs.is_empty() {
        return;
    }
    let container = add_definitions(root);
    let existing: HashSet<String> = container
        .elements()
        .filter_map(Element::id)
        .map(str::to_owned)
        .collect();
    for el in defs.entries {
        if el.id().is_some_and(|id| existing.contains(id)) {
            continue;
        }
        container.push(el);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/defs.rs"]
mod tests;
