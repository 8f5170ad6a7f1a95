use std::collections::HashMap;

use crate::scene::model::{Design, Layer};

/// Id-indexed parent/child view over a design's flat layer list.
///
/// Layers are addressed by their index in [`Design::layers`]. Sibling lists are sorted by
/// ascending z-index, stable on insertion order. When several layers share an id, the first one
/// owns it: parent references resolve to that layer only.
#[derive(Debug)]
pub struct LayerTree<'a> {
    layers: &'a [Layer],
    owners: HashMap<&'a str, usize>,
    roots: Vec<usize>,
    children: HashMap<usize, Vec<usize>>,
}

impl<'a> LayerTree<'a> {
    /// Index a design's layers.
    ///
    /// A layer is a root when it has no parent or when its parent id matches no layer in the
    /// design. Layers whose parent chain forms a cycle are never reachable from a root.
    pub fn new(design: &'a Design) -> Self {
        Self::from_layers(&design.layers)
    }

    /// Index a layer slice.
    pub fn from_layers(layers: &'a [Layer]) -> Self {
        let mut owners: HashMap<&'a str, usize> = HashMap::new();
        for (i, layer) in layers.iter().enumerate() {
            owners.entry(layer.id.as_str()).or_insert(i);
        }

        let mut roots = Vec::new();
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, layer) in layers.iter().enumerate() {
            match layer.parent().and_then(|p| owners.get(p)) {
                Some(&parent) => children.entry(parent).or_default().push(i),
                None => roots.push(i),
            }
        }

        sort_siblings(layers, &mut roots);
        for list in children.values_mut() {
            sort_siblings(layers, list);
        }

        Self {
            layers,
            owners,
            roots,
            children,
        }
    }

    /// Root layer indices in paint order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Index of the layer that owns `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.owners.get(id).copied()
    }

    /// Index of `layer` when it is one of this tree's layers, compared by address rather than id.
    pub fn position(&self, layer: &Layer) -> Option<usize> {
        self.index_of(&layer.id)
            .filter(|&i| std::ptr::eq(&self.layers[i], layer))
            .or_else(|| self.layers.iter().position(|l| std::ptr::eq(l, layer)))
    }

    /// Children of the layer at `index` in paint order.
    pub fn children_at(&self, index: usize) -> &[usize] {
        self.children
            .get(&index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Children of the layer owning `parent_id` in paint order.
    pub fn children_of(&self, parent_id: &str) -> &[usize] {
        self.index_of(parent_id)
            .map(|i| self.children_at(i))
            .unwrap_or_default()
    }

    /// Layer at `index`.
    pub fn layer(&self, index: usize) -> &'a Layer {
        &self.layers[index]
    }

    /// Root layers in paint order.
    pub fn root_layers(&self) -> impl Iterator<Item = &'a Layer> + '_ {
        self.roots.iter().map(|&i| &self.layers[i])
    }

    /// Ids of layers that can never be reached from a root (parent cycles).
    pub fn unreachable(&self) -> Vec<&'a str> {
        let mut seen = vec![false; self.layers.len()];
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(i) = stack.pop() {
            if std::mem::replace(&mut seen[i], true) {
                continue;
            }
            stack.extend_from_slice(self.children_at(i));
        }
        self.layers
            .iter()
            .zip(seen)
            .filter(|(_, s)| !s)
            .map(|(l, _)| l.id.as_str())
            .collect()
    }
}

fn sort_siblings(layers: &[Layer], list: &mut [usize]) {
    // `sort_by_key` is stable, and `list` is built in insertion order.
    list.sort_by_key(|&i| layers[i].z_index);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/hierarchy.rs"]
mod tests;
