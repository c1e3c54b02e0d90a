use crate::node::{NodeAttributes, NodePath};
use serde_json::Value;

/// Observable tri-state of a node's selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unselected,
    Selected,
    Indeterminate,
}

impl SelectionState {
    pub fn of(attrs: &NodeAttributes, node: &Value) -> Self {
        if attrs.is_indeterminate(node) {
            SelectionState::Indeterminate
        } else if attrs.is_selected(node) {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }
}

/// One sibling collection together with the node that owns it.
///
/// The root level has no owner, so aggregation there is a no-op.
pub enum Level<'a> {
    Root(&'a mut [Value]),
    Children(&'a mut Value),
}

/// Tri-state aggregation over sibling collections.
#[derive(Debug, Clone)]
pub struct SelectionAggregator<'a> {
    attrs: &'a NodeAttributes,
}

impl<'a> SelectionAggregator<'a> {
    pub fn new(attrs: &'a NodeAttributes) -> Self {
        Self { attrs }
    }

    /// Set every sibling to `selected` and mirror the same decision onto the
    /// owning node without counting.
    pub fn select_all(&self, level: Level<'_>, selected: bool) {
        match level {
            Level::Root(nodes) => self.set_all(nodes, selected),
            Level::Children(parent) => {
                if let Some(children) = self.attrs.children_mut(parent) {
                    self.set_all(children, selected);
                }
                self.set_determinate(parent, selected);
            }
        }
    }

    /// Recompute the owning node from its direct children.
    pub fn validate(&self, level: Level<'_>) {
        let Level::Children(parent) = level else {
            return;
        };
        let children = self.attrs.children(parent);
        if children.is_empty() {
            return;
        }

        let num_nodes = children.len();
        let num_selected = children.iter().filter(|node| self.attrs.is_selected(node)).count();
        let num_indeterminate = children
            .iter()
            .filter(|node| self.attrs.is_indeterminate(node))
            .count();

        let (selected, indeterminate) = if num_selected == 0 {
            (false, num_indeterminate > 0)
        } else if num_selected == num_nodes {
            (true, false)
        } else {
            (false, true)
        };
        self.attrs.set_selected(parent, selected);
        self.attrs.set_indeterminate(parent, indeterminate);
    }

    /// Select or deselect a node with its whole subtree, then recompute every
    /// ancestor from the deepest one upwards.
    ///
    /// Returns `false` when `path` does not resolve.
    pub fn apply_selection(&self, roots: &mut [Value], path: &NodePath, selected: bool) -> bool {
        let Some(node) = self.attrs.node_at_mut(roots, path) else {
            return false;
        };
        self.select_subtree(node, selected);
        self.validate_ancestors(roots, path);
        true
    }

    /// Apply `selected` to a whole level and everything below it.
    ///
    /// For the root level (`path` empty) every top-level subtree changes; for
    /// any other path the node's children level changes, the node mirrors it
    /// and its ancestors are recomputed.
    pub fn apply_select_all(&self, roots: &mut [Value], path: &NodePath, selected: bool) -> bool {
        if path.is_root() {
            for node in roots.iter_mut() {
                self.select_subtree(node, selected);
            }
            return true;
        }
        self.apply_selection(roots, path, selected)
    }

    /// Upward validate pass starting at the parent of `path`.
    pub fn validate_ancestors(&self, roots: &mut [Value], path: &NodePath) {
        for ancestor in path.ancestors() {
            if let Some(node) = self.attrs.node_at_mut(roots, &ancestor) {
                self.validate(Level::Children(node));
            }
        }
    }

    /// Post-order validate over the whole forest.
    pub fn normalize(&self, roots: &mut [Value]) {
        for node in roots.iter_mut() {
            self.normalize_node(node);
        }
    }

    fn normalize_node(&self, node: &mut Value) {
        if !self.attrs.has_children(node) {
            // leaves are never partial
            if self.attrs.is_indeterminate(node) {
                self.attrs.set_indeterminate(node, false);
            }
            return;
        }
        if let Some(children) = self.attrs.children_mut(node) {
            for child in children.iter_mut() {
                self.normalize_node(child);
            }
        }
        self.validate(Level::Children(node));
    }

    fn select_subtree(&self, node: &mut Value, selected: bool) {
        if let Some(children) = self.attrs.children_mut(node) {
            for child in children.iter_mut() {
                self.select_subtree(child, selected);
            }
        }
        self.set_determinate(node, selected);
    }

    fn set_all(&self, nodes: &mut [Value], selected: bool) {
        for node in nodes.iter_mut() {
            self.set_determinate(node, selected);
        }
    }

    fn set_determinate(&self, node: &mut Value, selected: bool) {
        self.attrs.set_selected(node, selected);
        self.attrs.set_indeterminate(node, false);
    }
}

/// Paths of all selected nodes, pre-order
pub fn selected_paths(attrs: &NodeAttributes, roots: &[Value]) -> Vec<NodePath> {
    let mut paths = Vec::new();
    collect_selected(attrs, roots, &NodePath::root(), &mut paths);
    paths
}

/// Labels of selected leaves, pre-order
pub fn selected_leaf_labels(attrs: &NodeAttributes, roots: &[Value]) -> Vec<String> {
    selected_paths(attrs, roots)
        .iter()
        .filter_map(|path| attrs.node_at(roots, path))
        .filter(|node| !attrs.has_children(node))
        .map(|node| attrs.label(node).into_owned())
        .collect()
}

fn collect_selected(
    attrs: &NodeAttributes,
    nodes: &[Value],
    prefix: &NodePath,
    paths: &mut Vec<NodePath>,
) {
    for (index, node) in nodes.iter().enumerate() {
        let path = prefix.child(index);
        if attrs.is_selected(node) {
            paths.push(path.clone());
        }
        collect_selected(attrs, attrs.children(node), &path, paths);
    }
}
