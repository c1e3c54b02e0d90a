use serde_json::Value;
use shared::{
    ExpandDepth, SettingsOverrides, SettingsProvider, TreeViewOptions, TreeViewSettings,
};

const TREE_VIEW_TOML: &str = include_str!("../assets/tree_view.toml");
const DEMO_TREE_JSON: &str = include_str!("../assets/demo_tree.json");

/// Application-wide settings with the embedded `tree_view.toml` applied.
///
/// A broken document is reported and the built-in defaults are used instead.
pub fn load_settings() -> SettingsProvider {
    let mut provider = SettingsProvider::new(TreeViewSettings::default());
    let overrides = match SettingsOverrides::from_toml_str(TREE_VIEW_TOML) {
        Ok(overrides) => overrides,
        Err(error) => {
            zoon::eprintln!("⚙️ CONFIG: Ignoring tree_view.toml: {error}");
            return provider;
        }
    };
    if let Err(error) = provider.set(&overrides) {
        zoon::eprintln!("⚙️ CONFIG: Ignoring tree_view.toml: {error}");
    }
    provider
}

/// Options of the demo tree: its first level starts expanded
pub fn demo_tree_options(provider: &SettingsProvider) -> TreeViewOptions {
    let overrides = SettingsOverrides {
        expand_by_default_depth: Some(ExpandDepth::Levels(1)),
        ..SettingsOverrides::default()
    };
    let settings = provider.get();
    TreeViewOptions::resolve(&settings, &overrides).unwrap_or_else(|error| {
        zoon::eprintln!("⚙️ CONFIG: Invalid demo tree overrides: {error}");
        TreeViewOptions::from_settings(&settings)
    })
}

pub fn load_demo_collection() -> Vec<Value> {
    parse_collection(DEMO_TREE_JSON).unwrap_or_else(|error| {
        zoon::eprintln!("⚙️ CONFIG: Invalid demo_tree.json: {error}");
        Vec::new()
    })
}

fn parse_collection(json: &str) -> Result<Vec<Value>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_settings_parse() {
        let overrides = SettingsOverrides::from_toml_str(TREE_VIEW_TOML).unwrap();
        assert_eq!(overrides.expand_by_default_depth, Some(ExpandDepth::COLLAPSED));
        assert_eq!(overrides.use_checkboxes, Some(true));
    }

    #[test]
    fn demo_tree_overrides_fall_back_to_settings() {
        let provider = load_settings();
        let options = demo_tree_options(&provider);
        assert_eq!(options.expand_depth, ExpandDepth::Levels(1));
        assert_eq!(options.attributes.label, "label");
        assert!(options.use_checkboxes);
    }

    #[test]
    fn embedded_collection_parses() {
        let collection = parse_collection(DEMO_TREE_JSON).unwrap();
        assert_eq!(collection.len(), 4);
        assert!(parse_collection("{\"label\": \"not a list\"}").is_err());
    }
}
