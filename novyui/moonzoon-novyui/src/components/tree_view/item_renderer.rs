use super::controller::TreeViewController;
use crate::components::checkbox::CheckboxBuilder;
use crate::tokens::*;
use shared::render::{COLLAPSED_CLASS, LEAF_CLASS, NODE_CLASS};
use shared::{NodeEntry, NodePath, ToggleState};
use zoon::*;

const TOGGLE_SIZE: u32 = 16;

/// Glyph of the toggle affordance
pub fn toggle_glyph(state: ToggleState) -> &'static str {
    if state.is_leaf() {
        "•"
    } else if state.is_collapsed() {
        "▸"
    } else {
        "▾"
    }
}

pub fn aria_expanded(state: ToggleState) -> Option<&'static str> {
    match (state.is_leaf(), state.is_collapsed()) {
        (true, _) => None,
        (false, true) => Some("false"),
        (false, false) => Some("true"),
    }
}

/// One level of the tree: the roots when `owner` is the root path, otherwise
/// the children of `owner`. Every nested level shares the controller and
/// therefore the same options.
pub(super) fn render_level(controller: &TreeViewController, owner: NodePath) -> impl Element {
    let role = if owner.is_root() { "tree" } else { "group" };
    let entries = controller.level_entries(&owner);
    Column::new()
        .s(Width::growable())
        .update_raw_el(move |raw_el| raw_el.attr("role", role))
        .items(
            entries
                .into_iter()
                .map(|entry| render_entry(controller, entry).unify()),
        )
}

fn render_entry(controller: &TreeViewController, entry: NodeEntry) -> impl Element {
    // render-local, dropped together with the element
    let toggle = Mutable::new(entry.toggle);
    let path = entry.path.clone();
    let aria_level = entry.aria_level().to_string();
    let is_leaf = entry.is_leaf();

    let row = Row::new()
        .s(Gap::new().x(SPACING_6))
        .s(Align::new().center_y())
        .s(Padding::new()
            .left(entry.path.depth() as u32 * TREE_INDENT)
            .y(SPACING_2))
        .item(toggle_button(&toggle))
        .item(
            entry
                .show_checkbox
                .then(|| node_checkbox(controller, &entry)),
        )
        .item(node_label(&toggle, entry.label));

    Column::new()
        .s(Width::growable())
        .update_raw_el({
            let toggle = toggle.clone();
            let visible = controller.visible_signal(path.clone());
            move |raw_el| {
                let raw_el = raw_el
                    .class(NODE_CLASS)
                    .attr("role", "treeitem")
                    .attr("aria-level", &aria_level)
                    .style_signal(
                        "display",
                        visible.map(|visible| (!visible).then_some("none")),
                    );
                if is_leaf {
                    raw_el.class(LEAF_CLASS)
                } else {
                    raw_el
                        .class_signal(COLLAPSED_CLASS, toggle.signal().map(ToggleState::is_collapsed))
                        .attr_signal("aria-expanded", toggle.signal().map(aria_expanded))
                }
            }
        })
        .item(row)
        .item_signal(toggle.signal().map({
            let controller = controller.clone();
            move |state| {
                (!state.is_leaf() && !state.is_collapsed())
                    .then(|| render_level(&controller, path.clone()).unify())
            }
        }))
}

fn toggle_button(toggle: &Mutable<ToggleState>) -> impl Element {
    Button::new()
        .s(Width::exact(TOGGLE_SIZE))
        .s(Height::exact(TOGGLE_SIZE))
        .s(Padding::all(0))
        .s(Font::new().size(FONT_SIZE_12).center().color_signal(neutral_8()))
        .s(Cursor::new(CursorIcon::Pointer))
        .label_signal(toggle.signal().map(toggle_glyph))
        .update_raw_el(|raw_el| raw_el.attr("aria-hidden", "true"))
        .on_press_event({
            let toggle = toggle.clone();
            move |event| {
                event.pass_to_parent(false);
                toggle.update_mut(|state| {
                    state.toggle();
                });
            }
        })
}

fn node_checkbox(controller: &TreeViewController, entry: &NodeEntry) -> impl Element {
    let path = entry.path.clone();
    let controller_for_click = controller.clone();
    CheckboxBuilder::new()
        .label(entry.label.clone())
        .state_signal(controller.checkbox_state_signal(path.clone()))
        .on_click(move || controller_for_click.checkbox_clicked(path.clone()))
        .build()
}

/// Clicking the label toggles like the affordance does
fn node_label(toggle: &Mutable<ToggleState>, label: String) -> impl Element {
    El::new()
        .s(Font::new().size(FONT_SIZE_14).color_signal(neutral_11()).no_wrap())
        .s(Cursor::new(CursorIcon::Pointer))
        .child(Text::new(label))
        .on_click({
            let toggle = toggle.clone();
            move || {
                toggle.update_mut(|state| {
                    state.toggle();
                });
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ExpandDepth;

    #[test]
    fn glyphs_distinguish_leaves_and_branch_states() {
        let leaf = ToggleState::initial(false, 0, ExpandDepth::COLLAPSED);
        let mut branch = ToggleState::initial(true, 0, ExpandDepth::COLLAPSED);
        assert_eq!(toggle_glyph(leaf), "•");
        assert_eq!(toggle_glyph(branch), "▸");
        branch.toggle();
        assert_eq!(toggle_glyph(branch), "▾");
    }

    #[test]
    fn aria_expanded_is_omitted_for_leaves() {
        let leaf = ToggleState::initial(false, 0, ExpandDepth::All);
        let branch = ToggleState::initial(true, 3, ExpandDepth::All);
        assert_eq!(aria_expanded(leaf), None);
        assert_eq!(aria_expanded(branch), Some("true"));
    }
}
