use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

// ===== NODE ATTRIBUTES =====

/// Attribute names used to read and write host-owned node records.
///
/// Nodes are plain JSON objects supplied by the application. The tree only
/// reads `label` and `children` and only writes the three state attributes,
/// always through the names configured here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAttributes {
    pub label: String,
    pub children: String,
    pub selected: String,
    pub indeterminate: String,
    pub visible: String,
}

impl Default for NodeAttributes {
    fn default() -> Self {
        crate::settings::TreeViewSettings::default().attributes()
    }
}

impl NodeAttributes {
    /// Display label; non-string labels are shown as their JSON text
    pub fn label<'a>(&self, node: &'a Value) -> Cow<'a, str> {
        match node.get(&self.label) {
            Some(Value::String(label)) => Cow::Borrowed(label.as_str()),
            Some(Value::Null) | None => Cow::Borrowed(""),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    pub fn children<'a>(&self, node: &'a Value) -> &'a [Value] {
        node.get(&self.children)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn children_mut<'a>(&self, node: &'a mut Value) -> Option<&'a mut Vec<Value>> {
        node.get_mut(&self.children).and_then(Value::as_array_mut)
    }

    /// Branch iff the children collection is non-empty
    pub fn has_children(&self, node: &Value) -> bool {
        !self.children(node).is_empty()
    }

    pub fn is_selected(&self, node: &Value) -> bool {
        flag(node, &self.selected).unwrap_or(false)
    }

    pub fn set_selected(&self, node: &mut Value, selected: bool) {
        set_flag(node, &self.selected, selected);
    }

    pub fn is_indeterminate(&self, node: &Value) -> bool {
        flag(node, &self.indeterminate).unwrap_or(false)
    }

    pub fn set_indeterminate(&self, node: &mut Value, indeterminate: bool) {
        set_flag(node, &self.indeterminate, indeterminate);
    }

    /// Nodes that were never evaluated against a filter count as visible.
    pub fn is_visible(&self, node: &Value) -> bool {
        flag(node, &self.visible).unwrap_or(true)
    }

    pub fn set_visible(&self, node: &mut Value, visible: bool) {
        set_flag(node, &self.visible, visible);
    }

    /// True for attributes the tree writes itself
    pub fn is_state_attribute(&self, key: &str) -> bool {
        key == self.selected || key == self.indeterminate || key == self.visible
    }

    pub fn node_at<'a>(&self, roots: &'a [Value], path: &NodePath) -> Option<&'a Value> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = roots.get(*first)?;
        for index in rest {
            node = self.children(node).get(*index)?;
        }
        Some(node)
    }

    pub fn node_at_mut<'a>(&self, roots: &'a mut [Value], path: &NodePath) -> Option<&'a mut Value> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = roots.get_mut(*first)?;
        for index in rest {
            node = self.children_mut(node)?.get_mut(*index)?;
        }
        Some(node)
    }

    /// Pre-order walk over every node of the forest.
    pub fn walk_mut(&self, roots: &mut [Value], visit: &mut impl FnMut(&NodePath, &mut Value)) {
        self.walk_level_mut(roots, &NodePath::root(), visit);
    }

    fn walk_level_mut(
        &self,
        nodes: &mut [Value],
        prefix: &NodePath,
        visit: &mut impl FnMut(&NodePath, &mut Value),
    ) {
        for (index, node) in nodes.iter_mut().enumerate() {
            let path = prefix.child(index);
            visit(&path, node);
            if let Some(children) = self.children_mut(node) {
                self.walk_level_mut(children, &path, visit);
            }
        }
    }
}

fn flag(node: &Value, attribute: &str) -> Option<bool> {
    node.get(attribute).and_then(Value::as_bool)
}

fn set_flag(node: &mut Value, attribute: &str, value: bool) {
    if let Some(record) = node.as_object_mut() {
        record.insert(attribute.to_string(), Value::Bool(value));
    }
}

// ===== NODE PATH =====

/// Index path from the root collection to a node.
///
/// The empty path addresses the root level itself, which has no parent node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Zero for top-level nodes
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Ancestor node paths, nearest first. The root level is not included.
    pub fn ancestors(&self) -> impl Iterator<Item = NodePath> + '_ {
        (1..self.0.len()).rev().map(|len| Self(self.0[..len].to_vec()))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        write!(f, "{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forest() -> Vec<Value> {
        vec![
            json!({"label": "Fruit", "children": [
                {"label": "Apple"},
                {"label": "Citrus", "children": [{"label": "Lemon"}, {"label": "Lime"}]},
            ]}),
            json!({"label": 42, "children": []}),
        ]
    }

    #[test]
    fn label_falls_back_for_missing_and_non_string_values() {
        let attrs = NodeAttributes::default();
        let nodes = forest();
        assert_eq!(attrs.label(&nodes[0]), "Fruit");
        assert_eq!(attrs.label(&nodes[1]), "42");
        assert_eq!(attrs.label(&json!({})), "");
    }

    #[test]
    fn empty_children_array_is_a_leaf() {
        let attrs = NodeAttributes::default();
        let nodes = forest();
        assert!(attrs.has_children(&nodes[0]));
        assert!(!attrs.has_children(&nodes[1]));
        assert!(!attrs.has_children(&json!({"label": "x"})));
    }

    #[test]
    fn node_lookup_by_path() {
        let attrs = NodeAttributes::default();
        let mut nodes = forest();
        let lime = NodePath::new(vec![0, 1, 1]);
        assert_eq!(attrs.label(attrs.node_at(&nodes, &lime).unwrap()), "Lime");
        assert!(attrs.node_at(&nodes, &NodePath::new(vec![0, 5])).is_none());
        assert!(attrs.node_at(&nodes, &NodePath::root()).is_none());

        let node = attrs.node_at_mut(&mut nodes, &lime).unwrap();
        attrs.set_selected(node, true);
        assert!(attrs.is_selected(attrs.node_at(&nodes, &lime).unwrap()));
    }

    #[test]
    fn state_flags_use_configured_names() {
        let mut attrs = NodeAttributes::default();
        attrs.selected = "checked".to_string();
        let mut node = json!({"label": "a"});
        attrs.set_selected(&mut node, true);
        assert_eq!(node["checked"], json!(true));
        assert!(attrs.is_visible(&node));
        attrs.set_visible(&mut node, false);
        assert!(!attrs.is_visible(&node));
        assert!(attrs.is_state_attribute("checked"));
        assert!(!attrs.is_state_attribute("label"));
    }

    #[test]
    fn path_ancestors_nearest_first() {
        let path = NodePath::new(vec![2, 0, 3]);
        let ancestors: Vec<NodePath> = path.ancestors().collect();
        assert_eq!(ancestors, vec![NodePath::new(vec![2, 0]), NodePath::new(vec![2])]);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.parent(), Some(NodePath::new(vec![2, 0])));
        assert_eq!(path.to_string(), "2/0/3");
        assert_eq!(NodePath::root().to_string(), "root");
    }

    #[test]
    fn walk_visits_every_node_in_pre_order() {
        let attrs = NodeAttributes::default();
        let mut nodes = forest();
        let mut seen = Vec::new();
        attrs.walk_mut(&mut nodes, &mut |path, node| {
            seen.push((path.to_string(), attrs.label(node).into_owned()));
        });
        let labels: Vec<&str> = seen.iter().map(|(_, label)| label.as_str()).collect();
        assert_eq!(labels, vec!["Fruit", "Apple", "Citrus", "Lemon", "Lime", "42"]);
        assert_eq!(seen[3].0, "0/1/0");
    }
}
