use crate::node::{NodeAttributes, NodePath};
use crate::settings::TreeViewOptions;
use crate::toggle::ToggleState;
use serde_json::Value;

pub const NODE_CLASS: &str = "tree-view-node";
pub const LEAF_CLASS: &str = "tree-view-node-leaf";
pub const COLLAPSED_CLASS: &str = "tree-view-node-collapsed";

/// Static description of one entry of a rendered level.
///
/// Selection and visibility change in place and are observed separately;
/// everything here only changes when the bound collection is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEntry {
    pub path: NodePath,
    pub label: String,
    pub show_checkbox: bool,
    pub toggle: ToggleState,
    pub child_count: usize,
}

impl NodeEntry {
    pub fn is_leaf(&self) -> bool {
        self.toggle.is_leaf()
    }

    /// ARIA level, 1-based
    pub fn aria_level(&self) -> usize {
        self.path.depth() + 1
    }

    pub fn class_names(&self, collapsed: bool) -> Vec<&'static str> {
        let mut classes = vec![NODE_CLASS];
        if self.is_leaf() {
            classes.push(LEAF_CLASS);
        } else if collapsed {
            classes.push(COLLAPSED_CLASS);
        }
        classes
    }
}

/// Entries of the level whose nodes are `nodes`, addressed below `prefix`
pub fn level_entries(nodes: &[Value], prefix: &NodePath, options: &TreeViewOptions) -> Vec<NodeEntry> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let path = prefix.child(index);
            let child_count = options.attributes.children(node).len();
            NodeEntry {
                toggle: ToggleState::initial(child_count > 0, path.depth(), options.expand_depth),
                label: options.attributes.label(node).into_owned(),
                show_checkbox: options.use_checkboxes,
                child_count,
                path,
            }
        })
        .collect()
}

/// Nodes of the level owned by `owner`; the root path yields the roots
pub fn level_nodes<'a>(
    roots: &'a [Value],
    owner: &NodePath,
    attrs: &NodeAttributes,
) -> Option<&'a [Value]> {
    if owner.is_root() {
        return Some(roots);
    }
    attrs.node_at(roots, owner).map(|node| attrs.children(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ExpandDepth, TreeViewSettings};
    use serde_json::json;

    fn roots() -> Vec<Value> {
        vec![
            json!({"name": "Fruit", "items": [{"name": "Apple"}, {"name": "Pear"}]}),
            json!({"name": "Nuts", "items": []}),
        ]
    }

    fn options() -> TreeViewOptions {
        let settings = TreeViewSettings {
            label_attribute: "name".to_string(),
            children_attribute: "items".to_string(),
            expand_by_default_depth: ExpandDepth::Levels(1),
            ..Default::default()
        };
        TreeViewOptions::from_settings(&settings)
    }

    #[test]
    fn entries_carry_leaf_marker_label_and_checkbox() {
        let entries = level_entries(&roots(), &NodePath::root(), &options());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "Fruit");
        assert!(!entries[0].is_leaf());
        assert_eq!(entries[0].child_count, 2);
        assert!(entries[1].is_leaf());
        assert!(entries.iter().all(|entry| entry.show_checkbox));
        assert!(!entries[0].toggle.is_collapsed());
    }

    #[test]
    fn nested_levels_reuse_the_same_options() {
        let roots = roots();
        let options = options();
        let fruit = NodePath::new(vec![0]);
        let nested = level_nodes(&roots, &fruit, &options.attributes).unwrap();
        let entries = level_entries(nested, &fruit, &options);
        assert_eq!(entries[1].label, "Pear");
        assert_eq!(entries[1].path, NodePath::new(vec![0, 1]));
        assert_eq!(entries[1].aria_level(), 2);
    }

    #[test]
    fn checkbox_markup_follows_options() {
        let mut options = options();
        options.use_checkboxes = false;
        let entries = level_entries(&roots(), &NodePath::root(), &options);
        assert!(entries.iter().all(|entry| !entry.show_checkbox));
    }

    #[test]
    fn class_names_mark_leaves_and_collapsed_branches() {
        let entries = level_entries(&roots(), &NodePath::root(), &options());
        assert_eq!(entries[0].class_names(true), vec![NODE_CLASS, COLLAPSED_CLASS]);
        assert_eq!(entries[0].class_names(false), vec![NODE_CLASS]);
        assert_eq!(entries[1].class_names(true), vec![NODE_CLASS, LEAF_CLASS]);
    }
}
