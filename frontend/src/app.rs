//! Demo application: a filter input above a checkbox tree and a summary of
//! the selected leaves.

use moonzoon_novyui::*;
use serde_json::Value;
use shared::{
    FilterEvaluator, FilterExpression, FilterScope, NodePath, PredicateRegistry, TreeModel,
    TreeViewOptions,
};
use zoon::*;

use crate::config::{demo_tree_options, load_demo_collection, load_settings};

/// Filter variable bound to the search input
const QUERY_VARIABLE: &str = "query";
const TREE_FILTER: &str = "filter:query";

pub struct TreeDemoApp {
    pub controller: TreeViewController,
    pub query: Mutable<String>,
}

impl TreeDemoApp {
    pub fn new() -> Self {
        let provider = load_settings();
        let options = demo_tree_options(&provider);
        let model = filtered_model(load_demo_collection(), options);
        Self {
            controller: TreeViewController::from_model(model),
            query: Mutable::new(String::new()),
        }
    }

    pub fn root(&self) -> impl Element {
        Column::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Padding::all(SPACING_16))
            .s(Gap::new().y(SPACING_12))
            .s(font_sans())
            .s(Background::new().color_signal(neutral_1()))
            .s(Font::new().color_signal(neutral_11()))
            .item(self.header())
            .item(self.search_input())
            .item(
                El::new()
                    .s(Width::fill())
                    .s(Padding::all(SPACING_8))
                    .s(RoundedCorners::all(6))
                    .s(Background::new().color_signal(neutral_3()))
                    .child(
                        tree_view()
                            .controller(self.controller.clone())
                            .aria_label("Accessories")
                            .empty_state_message("Nothing to show")
                            .build(),
                    ),
            )
            .item(self.selection_summary())
    }

    fn header(&self) -> impl Element {
        Row::new()
            .s(Width::fill())
            .s(Gap::new().x(SPACING_8))
            .item(
                El::new()
                    .s(Width::fill())
                    .s(Font::new().size(FONT_SIZE_16).weight(FontWeight::SemiBold))
                    .child("Tree view"),
            )
            .item(action_button("Select all", {
                let controller = self.controller.clone();
                move || controller.select_all(NodePath::root(), true)
            }))
            .item(action_button("Clear", {
                let controller = self.controller.clone();
                move || controller.select_all(NodePath::root(), false)
            }))
            .item(action_button("Reload", {
                let controller = self.controller.clone();
                move || controller.replace_collection(load_demo_collection())
            }))
            .item(action_button("Theme", toggle_theme))
    }

    fn search_input(&self) -> impl Element {
        TextInput::new()
            .s(Width::fill())
            .s(Padding::new().x(SPACING_8).y(SPACING_4))
            .s(RoundedCorners::all(4))
            .s(Borders::all_signal(
                neutral_5().map(|color| Border::new().width(1).color(color)),
            ))
            .s(Background::new().color_signal(neutral_1()))
            .label_hidden("Filter tree")
            .placeholder(Placeholder::new("Filter…"))
            .text_signal(self.query.signal_cloned())
            .on_change({
                let query = self.query.clone();
                let controller = self.controller.clone();
                move |text| {
                    controller.set_filter_variable(QUERY_VARIABLE, Value::String(text.clone()));
                    query.set_neq(text);
                }
            })
    }

    fn selection_summary(&self) -> impl Element {
        El::new()
            .s(Font::new().size(FONT_SIZE_14).color_signal(neutral_8()))
            .child(Text::with_signal(
                self.controller
                    .selected_leaf_labels_signal()
                    .map(|labels| selection_summary(&labels)),
            ))
    }
}

fn filtered_model(collection: Vec<Value>, options: TreeViewOptions) -> TreeModel {
    let filter = FilterExpression::parse(TREE_FILTER)
        .and_then(|expression| FilterEvaluator::new(Some(expression), PredicateRegistry::with_builtins()));
    let model = TreeModel::new(collection, options);
    let filter = match filter {
        Ok(filter) => filter,
        Err(error) => {
            zoon::eprintln!("🌳 TREE_VIEW: Filter `{TREE_FILTER}` disabled: {error}");
            return model;
        }
    };
    let fallback = model.clone();
    model
        .with_filter(filter, FilterScope::new().with(QUERY_VARIABLE, ""))
        .unwrap_or_else(|error| {
            zoon::eprintln!("🌳 TREE_VIEW: Filter `{TREE_FILTER}` disabled: {error}");
            fallback
        })
}

fn action_button(label: &'static str, on_press: impl FnMut() + 'static) -> impl Element {
    Button::new()
        .s(Padding::new().x(SPACING_8).y(SPACING_4))
        .s(RoundedCorners::all(4))
        .s(Font::new().size(FONT_SIZE_12).color_signal(primary_7()))
        .s(Borders::all_signal(
            primary_7().map(|color| Border::new().width(1).color(color)),
        ))
        .label(label)
        .on_press(on_press)
}

pub fn selection_summary(labels: &[String]) -> String {
    match labels {
        [] => "Nothing selected".to_string(),
        [only] => format!("Selected: {only}"),
        labels => format!("Selected ({}): {}", labels.len(), labels.join(", ")),
    }
}
