use super::controller::TreeViewController;
use super::item_renderer::render_level;
use crate::tokens::*;
use shared::NodePath;
use zoon::*;

/// Fluent configuration of a tree view element
pub struct TreeViewBuilder {
    controller: Option<TreeViewController>,
    aria_label: Option<String>,
    empty_state_message: String,
}

impl TreeViewBuilder {
    pub fn new() -> Self {
        Self {
            controller: None,
            aria_label: None,
            empty_state_message: "No items".to_string(),
        }
    }

    pub fn controller(mut self, controller: TreeViewController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Message shown while the bound collection is empty
    pub fn empty_state_message(mut self, message: impl Into<String>) -> Self {
        self.empty_state_message = message.into();
        self
    }

    pub fn build(self) -> impl Element {
        let Self {
            controller,
            aria_label,
            empty_state_message,
        } = self;

        let Some(controller) = controller else {
            zoon::eprintln!("🌳 TREE_VIEW: Built without a controller");
            return empty_state(empty_state_message).unify();
        };

        El::new()
            .s(Width::fill())
            .s(font_sans())
            .update_raw_el(move |raw_el| match aria_label {
                Some(label) => raw_el.attr("aria-label", &label),
                None => raw_el,
            })
            // structure only changes when a new collection is bound
            .child_signal(controller.collection_revision_signal().map({
                let controller = controller.clone();
                move |_| {
                    if controller.level_entries(&NodePath::root()).is_empty() {
                        empty_state(empty_state_message.clone()).unify()
                    } else {
                        render_level(&controller, NodePath::root()).unify()
                    }
                }
            }))
            .unify()
    }
}

impl Default for TreeViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_state(message: String) -> impl Element {
    El::new()
        .s(Padding::all(SPACING_12))
        .s(Font::new().size(FONT_SIZE_14).italic().color_signal(neutral_8()))
        .child(Text::new(message))
}
