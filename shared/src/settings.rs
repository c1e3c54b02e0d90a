use crate::error::SettingsError;
use crate::node::NodeAttributes;
use serde::{Deserialize, Serialize};

// ===== EXPAND DEPTH =====

/// How far branches are expanded when a tree is first rendered.
///
/// Stored as an integer in TOML: `-1` expands everything, `0` keeps the
/// tree fully collapsed and `n` expands branches above depth `n`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "i32", into = "i32")]
pub enum ExpandDepth {
    All,
    Levels(u32),
}

impl ExpandDepth {
    pub const COLLAPSED: ExpandDepth = ExpandDepth::Levels(0);

    /// Whether a branch at `depth` (top level = 0) starts expanded
    pub fn is_expanded_at(self, depth: usize) -> bool {
        match self {
            ExpandDepth::All => true,
            ExpandDepth::Levels(levels) => depth < levels as usize,
        }
    }
}

impl Default for ExpandDepth {
    fn default() -> Self {
        ExpandDepth::COLLAPSED
    }
}

impl TryFrom<i32> for ExpandDepth {
    type Error = SettingsError;

    fn try_from(depth: i32) -> Result<Self, Self::Error> {
        match depth {
            -1 => Ok(ExpandDepth::All),
            depth if depth >= 0 => Ok(ExpandDepth::Levels(depth as u32)),
            depth => Err(SettingsError::InvalidExpandDepth(depth)),
        }
    }
}

impl From<ExpandDepth> for i32 {
    fn from(depth: ExpandDepth) -> Self {
        match depth {
            ExpandDepth::All => -1,
            ExpandDepth::Levels(levels) => i32::try_from(levels).unwrap_or(i32::MAX),
        }
    }
}

// ===== SETTINGS =====

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TreeViewSettings {
    /// Node attribute holding the display label
    pub label_attribute: String,
    /// Node attribute holding the child collection
    pub children_attribute: String,
    /// Node attribute holding the selected flag
    pub selected_attribute: String,
    pub expand_by_default_depth: ExpandDepth,
    /// Whether checkbox markup is rendered at all
    pub use_checkboxes: bool,
    /// (internal) Node attribute tracking partial selection
    pub indeterminate_attribute: String,
    /// (internal) Node attribute tracking filter visibility
    pub visible_attribute: String,
}

impl Default for TreeViewSettings {
    fn default() -> Self {
        Self {
            label_attribute: "label".to_string(),
            children_attribute: "children".to_string(),
            selected_attribute: "selected".to_string(),
            expand_by_default_depth: ExpandDepth::COLLAPSED,
            use_checkboxes: true,
            indeterminate_attribute: "__ivhTreeviewIntermediate".to_string(),
            visible_attribute: "__ivhTreeviewVisible".to_string(),
        }
    }
}

impl TreeViewSettings {
    /// Parse a complete settings document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: TreeViewSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// New settings value with `overrides` applied on top of `self`
    pub fn with_overrides(&self, overrides: &SettingsOverrides) -> Result<Self, SettingsError> {
        let mut settings = self.clone();
        if let Some(label) = &overrides.label_attribute {
            settings.label_attribute = label.clone();
        }
        if let Some(children) = &overrides.children_attribute {
            settings.children_attribute = children.clone();
        }
        if let Some(selected) = &overrides.selected_attribute {
            settings.selected_attribute = selected.clone();
        }
        if let Some(depth) = overrides.expand_by_default_depth {
            settings.expand_by_default_depth = depth;
        }
        if let Some(use_checkboxes) = overrides.use_checkboxes {
            settings.use_checkboxes = use_checkboxes;
        }
        if let Some(indeterminate) = &overrides.indeterminate_attribute {
            settings.indeterminate_attribute = indeterminate.clone();
        }
        if let Some(visible) = &overrides.visible_attribute {
            settings.visible_attribute = visible.clone();
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let named = [
            ("label_attribute", &self.label_attribute),
            ("children_attribute", &self.children_attribute),
            ("selected_attribute", &self.selected_attribute),
            ("indeterminate_attribute", &self.indeterminate_attribute),
            ("visible_attribute", &self.visible_attribute),
        ];
        if let Some((field, _)) = named.iter().find(|(_, value)| value.is_empty()) {
            return Err(SettingsError::EmptyAttribute(*field));
        }

        let state = [
            &self.selected_attribute,
            &self.indeterminate_attribute,
            &self.visible_attribute,
        ];
        for (index, name) in state.iter().enumerate() {
            if state[index + 1..].contains(name) {
                return Err(SettingsError::DuplicateStateAttribute(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn attributes(&self) -> NodeAttributes {
        NodeAttributes {
            label: self.label_attribute.clone(),
            children: self.children_attribute.clone(),
            selected: self.selected_attribute.clone(),
            indeterminate: self.indeterminate_attribute.clone(),
            visible: self.visible_attribute.clone(),
        }
    }
}

/// Partial settings, used both for application configuration and per-tree overrides.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SettingsOverrides {
    pub label_attribute: Option<String>,
    pub children_attribute: Option<String>,
    pub selected_attribute: Option<String>,
    pub expand_by_default_depth: Option<ExpandDepth>,
    pub use_checkboxes: Option<bool>,
    pub indeterminate_attribute: Option<String>,
    pub visible_attribute: Option<String>,
}

impl SettingsOverrides {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == SettingsOverrides::default()
    }
}

/// Application-owned settings holder.
///
/// Configure it once with `set` before building trees; every `get` hands out
/// an independent copy so later configuration never reaches trees that are
/// already rendered.
#[derive(Debug, Clone, Default)]
pub struct SettingsProvider {
    settings: TreeViewSettings,
}

impl SettingsProvider {
    pub fn new(settings: TreeViewSettings) -> Self {
        Self { settings }
    }

    pub fn set(&mut self, overrides: &SettingsOverrides) -> Result<(), SettingsError> {
        self.settings = self.settings.with_overrides(overrides)?;
        Ok(())
    }

    pub fn get(&self) -> TreeViewSettings {
        self.settings.clone()
    }
}

// ===== RESOLVED OPTIONS =====

/// Configuration of one tree instance, forwarded unchanged to every nested level
#[derive(Debug, Clone, PartialEq)]
pub struct TreeViewOptions {
    pub attributes: NodeAttributes,
    pub use_checkboxes: bool,
    pub expand_depth: ExpandDepth,
}

impl TreeViewOptions {
    pub fn from_settings(settings: &TreeViewSettings) -> Self {
        Self {
            attributes: settings.attributes(),
            use_checkboxes: settings.use_checkboxes,
            expand_depth: settings.expand_by_default_depth,
        }
    }

    /// Per-tree overrides win; anything unset falls back to `settings`
    pub fn resolve(
        settings: &TreeViewSettings,
        overrides: &SettingsOverrides,
    ) -> Result<Self, SettingsError> {
        Ok(Self::from_settings(&settings.with_overrides(overrides)?))
    }
}

impl Default for TreeViewOptions {
    fn default() -> Self {
        Self::from_settings(&TreeViewSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = TreeViewSettings::default();
        assert_eq!(settings.label_attribute, "label");
        assert_eq!(settings.children_attribute, "children");
        assert_eq!(settings.selected_attribute, "selected");
        assert_eq!(settings.expand_by_default_depth, ExpandDepth::COLLAPSED);
        assert!(settings.use_checkboxes);
        assert_eq!(settings.indeterminate_attribute, "__ivhTreeviewIntermediate");
        assert_eq!(settings.visible_attribute, "__ivhTreeviewVisible");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_flags_written_by_other_widgets_are_read() {
        let attrs = TreeViewSettings::default().attributes();
        let node = serde_json::json!({"label": "a", "__ivhTreeviewIntermediate": true});
        assert!(attrs.is_indeterminate(&node));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = TreeViewSettings::from_toml_str(
            r#"
            label_attribute = "name"
            expand_by_default_depth = -1
            "#,
        )
        .unwrap();
        assert_eq!(settings.label_attribute, "name");
        assert_eq!(settings.expand_by_default_depth, ExpandDepth::All);
        assert_eq!(settings.children_attribute, "children");
    }

    #[test]
    fn invalid_depth_is_rejected() {
        let error = TreeViewSettings::from_toml_str("expand_by_default_depth = -3").unwrap_err();
        assert!(matches!(error, SettingsError::Toml(_)));
        assert!(matches!(
            ExpandDepth::try_from(-2),
            Err(SettingsError::InvalidExpandDepth(-2))
        ));
    }

    #[test]
    fn empty_and_duplicate_attributes_are_rejected() {
        let overrides = SettingsOverrides {
            label_attribute: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            TreeViewSettings::default().with_overrides(&overrides),
            Err(SettingsError::EmptyAttribute("label_attribute"))
        ));

        let overrides = SettingsOverrides {
            visible_attribute: Some("selected".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            TreeViewSettings::default().with_overrides(&overrides),
            Err(SettingsError::DuplicateStateAttribute(name)) if name == "selected"
        ));
    }

    #[test]
    fn provider_hands_out_independent_copies() {
        let mut provider = SettingsProvider::default();
        let before = provider.get();

        let overrides = SettingsOverrides::from_toml_str("use_checkboxes = false").unwrap();
        provider.set(&overrides).unwrap();

        assert!(before.use_checkboxes);
        assert!(!provider.get().use_checkboxes);

        let mut copy = provider.get();
        copy.label_attribute = "mutated".to_string();
        assert_eq!(provider.get().label_attribute, "label");
    }

    #[test]
    fn per_tree_overrides_fall_back_to_settings() {
        let settings = TreeViewSettings {
            label_attribute: "title".to_string(),
            expand_by_default_depth: ExpandDepth::Levels(2),
            ..Default::default()
        };
        let overrides = SettingsOverrides {
            children_attribute: Some("items".to_string()),
            use_checkboxes: Some(false),
            ..Default::default()
        };
        let options = TreeViewOptions::resolve(&settings, &overrides).unwrap();
        assert_eq!(options.attributes.label, "title");
        assert_eq!(options.attributes.children, "items");
        assert!(!options.use_checkboxes);
        assert_eq!(options.expand_depth, ExpandDepth::Levels(2));
        assert!(SettingsOverrides::default().is_empty());
    }

    #[test]
    fn expand_depth_levels() {
        assert!(ExpandDepth::All.is_expanded_at(10));
        assert!(!ExpandDepth::COLLAPSED.is_expanded_at(0));
        assert!(ExpandDepth::Levels(2).is_expanded_at(1));
        assert!(!ExpandDepth::Levels(2).is_expanded_at(2));
        assert_eq!(i32::from(ExpandDepth::All), -1);
    }
}
