use futures::StreamExt;
use futures::channel::mpsc::{UnboundedSender, unbounded};
use serde_json::Value;
use shared::{
    CheckboxState, NodeEntry, NodePath, TreeEvent, TreeModel, TreeUpdate, TreeViewOptions,
    level_entries, level_nodes,
};
use std::sync::Arc;
use zoon::*;

/// Event-driven owner of one tree's state.
///
/// Every change goes through [`TreeEvent`]s queued on an unbounded channel;
/// a single task drains the queue and applies them to the model in order,
/// so renderers only ever observe fully aggregated state.
#[derive(Clone)]
pub struct TreeViewController {
    model: Mutable<TreeModel>,
    event_sender: UnboundedSender<TreeEvent>,
    _event_loop: Arc<TaskHandle>,
}

impl TreeViewController {
    pub fn new(collection: Vec<Value>, options: TreeViewOptions) -> Self {
        Self::from_model(TreeModel::new(collection, options))
    }

    /// Wrap an already configured model, e.g. one with a filter installed
    pub fn from_model(model: TreeModel) -> Self {
        zoon::println!(
            "🌳 TREE_VIEW: Bound {} root nodes{}",
            model.roots().len(),
            model
                .filter()
                .expression()
                .map(|expression| format!(" with filter `{}`", expression.source()))
                .unwrap_or_default()
        );
        let model = Mutable::new(model);
        let (event_sender, mut event_receiver) = unbounded::<TreeEvent>();
        let event_loop = Task::start_droppable({
            let model = model.clone();
            async move {
                while let Some(event) = event_receiver.next().await {
                    apply_event(&model, event);
                }
            }
        });
        Self {
            model,
            event_sender,
            _event_loop: Arc::new(event_loop),
        }
    }

    pub fn send(&self, event: TreeEvent) {
        if let Err(error) = self.event_sender.unbounded_send(event) {
            zoon::eprintln!("🌳 TREE_VIEW: Event dropped: {error}");
        }
    }

    pub fn checkbox_clicked(&self, path: NodePath) {
        self.send(TreeEvent::CheckboxClicked { path });
    }

    pub fn select_all(&self, path: NodePath, selected: bool) {
        self.send(TreeEvent::SelectAll { path, selected });
    }

    pub fn set_filter_variable(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.send(TreeEvent::SetFilterVariable {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn replace_collection(&self, collection: Vec<Value>) {
        self.send(TreeEvent::ReplaceCollection(collection));
    }

    /// Entries of the level owned by `owner`, empty when the path no longer resolves
    pub fn level_entries(&self, owner: &NodePath) -> Vec<NodeEntry> {
        let model = self.model.lock_ref();
        let options = model.options();
        level_nodes(model.roots(), owner, &options.attributes)
            .map(|nodes| level_entries(nodes, owner, options))
            .unwrap_or_default()
    }

    /// Fires once per bound collection; drives structural re-render
    pub fn collection_revision_signal(&self) -> impl Signal<Item = u64> + Unpin {
        self.model.signal_ref(TreeModel::collection_revision).dedupe()
    }

    pub fn checkbox_state_signal(&self, path: NodePath) -> impl Signal<Item = CheckboxState> + Unpin {
        self.model
            .signal_ref(move |model| {
                model
                    .checkbox_state(&path)
                    .unwrap_or(CheckboxState::Unchecked)
            })
            .dedupe()
    }

    pub fn visible_signal(&self, path: NodePath) -> impl Signal<Item = bool> + Unpin {
        self.model
            .signal_ref(move |model| model.is_visible(&path))
            .dedupe()
    }

    pub fn selected_leaf_labels_signal(&self) -> impl Signal<Item = Vec<String>> + Unpin {
        self.model
            .signal_ref(TreeModel::selected_leaf_labels)
            .dedupe_cloned()
    }
}

fn apply_event(model: &Mutable<TreeModel>, event: TreeEvent) {
    let mut model = model.lock_mut();
    match model.apply(event) {
        Ok(TreeUpdate::Structure) => {
            zoon::println!(
                "🌳 TREE_VIEW: Collection replaced ({} root nodes, revision {})",
                model.roots().len(),
                model.collection_revision()
            );
        }
        Ok(_) => {}
        Err(error) => zoon::eprintln!("🌳 TREE_VIEW: Event failed: {error}"),
    }
}
