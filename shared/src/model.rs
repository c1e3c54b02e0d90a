use crate::checkbox::{CheckboxState, ClickOutcome};
use crate::error::{FilterError, TreeModelError};
use crate::filter::{FilterEvaluator, FilterScope};
use crate::node::NodePath;
use crate::selection::{self, SelectionAggregator};
use crate::settings::TreeViewOptions;
use serde_json::Value;

/// Messages consumed by a [`TreeModel`].
///
/// Selection events are applied in two phases within one call: the subtree
/// first, then every ancestor is recomputed bottom-up.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    /// Bind a new collection; this is the only event that changes structure
    ReplaceCollection(Vec<Value>),
    /// User clicked the checkbox of the node at `path`
    CheckboxClicked { path: NodePath },
    /// Select or deselect the level owned by `path` (root path = whole tree)
    SelectAll { path: NodePath, selected: bool },
    /// A node changed outside the tree; recompute its ancestors
    Validate { path: NodePath },
    SetFilterVariable { name: String, value: Value },
}

/// What an applied event changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeUpdate {
    Unchanged,
    Structure,
    Selection,
    /// Result of a checkbox click
    Clicked(ClickOutcome),
    Visibility,
}

/// State of one tree instance: the bound collection plus its resolved
/// options, filter and filter variables.
#[derive(Debug, Clone)]
pub struct TreeModel {
    roots: Vec<Value>,
    options: TreeViewOptions,
    filter: FilterEvaluator,
    scope: FilterScope,
    collection_revision: u64,
    state_revision: u64,
}

impl TreeModel {
    pub fn new(roots: Vec<Value>, options: TreeViewOptions) -> Self {
        let mut model = Self {
            roots,
            options,
            filter: FilterEvaluator::unfiltered(),
            scope: FilterScope::new(),
            collection_revision: 0,
            state_revision: 0,
        };
        model.normalize();
        // an unfiltered refresh can't fail
        let _ = model.refresh_visibility();
        model
    }

    /// Install a filter and compute visibility for the current variables
    pub fn with_filter(mut self, filter: FilterEvaluator, scope: FilterScope) -> Result<Self, FilterError> {
        self.filter = filter;
        self.scope = scope;
        self.refresh_visibility()?;
        Ok(self)
    }

    pub fn roots(&self) -> &[Value] {
        &self.roots
    }

    pub fn options(&self) -> &TreeViewOptions {
        &self.options
    }

    pub fn filter(&self) -> &FilterEvaluator {
        &self.filter
    }

    pub fn scope(&self) -> &FilterScope {
        &self.scope
    }

    /// Bumped only when the collection is replaced
    pub fn collection_revision(&self) -> u64 {
        self.collection_revision
    }

    /// Bumped on every in-place change of node state
    pub fn state_revision(&self) -> u64 {
        self.state_revision
    }

    pub fn node(&self, path: &NodePath) -> Option<&Value> {
        self.options.attributes.node_at(&self.roots, path)
    }

    pub fn checkbox_state(&self, path: &NodePath) -> Option<CheckboxState> {
        self.node(path)
            .map(|node| CheckboxState::of(&self.options.attributes, node))
    }

    /// Unknown paths read as hidden
    pub fn is_visible(&self, path: &NodePath) -> bool {
        self.node(path)
            .is_some_and(|node| self.options.attributes.is_visible(node))
    }

    pub fn selected_paths(&self) -> Vec<NodePath> {
        selection::selected_paths(&self.options.attributes, &self.roots)
    }

    pub fn selected_leaf_labels(&self) -> Vec<String> {
        selection::selected_leaf_labels(&self.options.attributes, &self.roots)
    }

    pub fn apply(&mut self, event: TreeEvent) -> Result<TreeUpdate, TreeModelError> {
        let update = match event {
            TreeEvent::ReplaceCollection(roots) => {
                self.roots = roots;
                self.collection_revision += 1;
                self.normalize();
                self.refresh_visibility()?;
                TreeUpdate::Structure
            }
            TreeEvent::CheckboxClicked { path } => {
                let state = self
                    .checkbox_state(&path)
                    .ok_or_else(|| TreeModelError::UnknownPath(path.clone()))?;
                let outcome = state.click();
                self.select(&path, outcome.select_all)?;
                TreeUpdate::Clicked(outcome)
            }
            TreeEvent::SelectAll { path, selected } => {
                let aggregator = SelectionAggregator::new(&self.options.attributes);
                if !aggregator.apply_select_all(&mut self.roots, &path, selected) {
                    return Err(TreeModelError::UnknownPath(path));
                }
                TreeUpdate::Selection
            }
            TreeEvent::Validate { path } => {
                if !path.is_root() && self.node(&path).is_none() {
                    return Err(TreeModelError::UnknownPath(path));
                }
                SelectionAggregator::new(&self.options.attributes)
                    .validate_ancestors(&mut self.roots, &path);
                TreeUpdate::Selection
            }
            TreeEvent::SetFilterVariable { name, value } => {
                let changed = self.scope.set(name.as_str(), value);
                if !changed || !self.filter.watches(&name) {
                    return Ok(TreeUpdate::Unchanged);
                }
                self.refresh_visibility()?;
                TreeUpdate::Visibility
            }
        };
        self.state_revision += 1;
        Ok(update)
    }

    fn select(&mut self, path: &NodePath, selected: bool) -> Result<(), TreeModelError> {
        let aggregator = SelectionAggregator::new(&self.options.attributes);
        if aggregator.apply_selection(&mut self.roots, path, selected) {
            Ok(())
        } else {
            Err(TreeModelError::UnknownPath(path.clone()))
        }
    }

    fn normalize(&mut self) {
        SelectionAggregator::new(&self.options.attributes).normalize(&mut self.roots);
    }

    fn refresh_visibility(&mut self) -> Result<(), FilterError> {
        self.filter
            .refresh(&mut self.roots, &self.scope, &self.options.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterExpression, PredicateRegistry};
    use serde_json::json;

    fn collection() -> Vec<Value> {
        vec![
            json!({"label": "Fruit", "children": [
                {"label": "Apple"},
                {"label": "Banana"},
            ]}),
            json!({"label": "Vegetables", "children": [{"label": "Leek"}]}),
        ]
    }

    fn filtered_model() -> TreeModel {
        let expression = FilterExpression::parse("filter:query").unwrap();
        let filter = FilterEvaluator::new(Some(expression), PredicateRegistry::with_builtins()).unwrap();
        TreeModel::new(collection(), TreeViewOptions::default())
            .with_filter(filter, FilterScope::new().with("query", ""))
            .unwrap()
    }

    #[test]
    fn clicking_a_leaf_updates_its_parent() {
        let mut model = TreeModel::new(collection(), TreeViewOptions::default());
        let update = model
            .apply(TreeEvent::CheckboxClicked { path: NodePath::new(vec![0, 1]) })
            .unwrap();
        assert!(matches!(update, TreeUpdate::Clicked(outcome) if outcome.select_all));
        assert_eq!(
            model.checkbox_state(&NodePath::new(vec![0])),
            Some(CheckboxState::Indeterminate)
        );
        assert_eq!(model.selected_leaf_labels(), vec!["Banana"]);
    }

    #[test]
    fn clicking_an_indeterminate_parent_selects_its_subtree() {
        let mut model = TreeModel::new(collection(), TreeViewOptions::default());
        model
            .apply(TreeEvent::CheckboxClicked { path: NodePath::new(vec![0, 0]) })
            .unwrap();
        let update = model
            .apply(TreeEvent::CheckboxClicked { path: NodePath::new(vec![0]) })
            .unwrap();
        let TreeUpdate::Clicked(outcome) = update else {
            panic!("expected a click outcome");
        };
        assert!(outcome.select_all);
        assert_eq!(
            model.checkbox_state(&NodePath::new(vec![0])),
            Some(CheckboxState::Checked)
        );
        assert_eq!(model.selected_leaf_labels(), vec!["Apple", "Banana"]);

        model
            .apply(TreeEvent::CheckboxClicked { path: NodePath::new(vec![0]) })
            .unwrap();
        assert!(model.selected_paths().is_empty());
    }

    #[test]
    fn select_all_on_root_level_selects_everything() {
        let mut model = TreeModel::new(collection(), TreeViewOptions::default());
        model
            .apply(TreeEvent::SelectAll { path: NodePath::root(), selected: true })
            .unwrap();
        assert_eq!(model.selected_paths().len(), 5);
    }

    #[test]
    fn validate_after_external_change() {
        let mut roots = collection();
        roots[1]["children"][0]["selected"] = json!(true);
        let mut model = TreeModel::new(roots, TreeViewOptions::default());
        // normalized on construction
        assert_eq!(
            model.checkbox_state(&NodePath::new(vec![1])),
            Some(CheckboxState::Checked)
        );
        let update = model
            .apply(TreeEvent::Validate { path: NodePath::new(vec![1, 0]) })
            .unwrap();
        assert_eq!(update, TreeUpdate::Selection);
        assert_eq!(
            model.checkbox_state(&NodePath::new(vec![1])),
            Some(CheckboxState::Checked)
        );
    }

    #[test]
    fn unknown_paths_are_reported() {
        let mut model = TreeModel::new(collection(), TreeViewOptions::default());
        let revision = model.state_revision();
        let error = model
            .apply(TreeEvent::CheckboxClicked { path: NodePath::new(vec![7]) })
            .unwrap_err();
        assert_eq!(error, TreeModelError::UnknownPath(NodePath::new(vec![7])));
        assert_eq!(model.state_revision(), revision);
    }

    #[test]
    fn filter_variable_changes_recompute_visibility() {
        let mut model = filtered_model();
        assert!(model.is_visible(&NodePath::new(vec![1])));

        let update = model
            .apply(TreeEvent::SetFilterVariable {
                name: "query".to_string(),
                value: json!("ban"),
            })
            .unwrap();
        assert_eq!(update, TreeUpdate::Visibility);
        assert!(model.is_visible(&NodePath::new(vec![0])));
        assert!(model.is_visible(&NodePath::new(vec![0, 1])));
        assert!(!model.is_visible(&NodePath::new(vec![0, 0])));
        assert!(!model.is_visible(&NodePath::new(vec![1])));
    }

    #[test]
    fn unwatched_or_unchanged_variables_do_nothing() {
        let mut model = filtered_model();
        let revision = model.state_revision();
        let unwatched = model
            .apply(TreeEvent::SetFilterVariable {
                name: "other".to_string(),
                value: json!("x"),
            })
            .unwrap();
        let unchanged = model
            .apply(TreeEvent::SetFilterVariable {
                name: "query".to_string(),
                value: json!(""),
            })
            .unwrap();
        assert_eq!(unwatched, TreeUpdate::Unchanged);
        assert_eq!(unchanged, TreeUpdate::Unchanged);
        assert_eq!(model.state_revision(), revision);
    }

    #[test]
    fn replacing_the_collection_bumps_both_revisions() {
        let mut model = filtered_model();
        model
            .apply(TreeEvent::SetFilterVariable {
                name: "query".to_string(),
                value: json!("leek"),
            })
            .unwrap();
        let update = model
            .apply(TreeEvent::ReplaceCollection(vec![json!({"label": "Leek soup"}), json!({"label": "Tea"})]))
            .unwrap();
        assert_eq!(update, TreeUpdate::Structure);
        assert_eq!(model.collection_revision(), 1);
        assert!(model.is_visible(&NodePath::new(vec![0])));
        assert!(!model.is_visible(&NodePath::new(vec![1])));
    }
}
