// Recursive tree view with tri-state checkboxes and filter-driven visibility.
//
// The controller owns the model and applies events; the item renderer
// materializes one level at a time and observes per-node state through
// fine-grained signals.

mod builder;
mod controller;
mod item_renderer;

pub use builder::TreeViewBuilder;
pub use controller::TreeViewController;
pub use item_renderer::{aria_expanded, toggle_glyph};

pub fn tree_view() -> TreeViewBuilder {
    TreeViewBuilder::new()
}
