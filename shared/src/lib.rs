//! Framework-free core of the tree view: node attribute access, settings,
//! tri-state selection, filter expressions and per-level rendering data.
//!
//! Nothing here depends on the UI framework, so the whole behaviour can be
//! exercised with plain `cargo test`.

pub mod checkbox;
pub mod error;
pub mod filter;
pub mod model;
pub mod node;
pub mod render;
pub mod selection;
pub mod settings;
pub mod toggle;

pub use checkbox::{CheckboxState, ClickOutcome};
pub use error::{FilterError, SettingsError, TreeModelError};
pub use filter::{FilterEvaluator, FilterExpression, FilterParam, FilterScope, FilterStage, PredicateRegistry};
pub use model::{TreeEvent, TreeModel, TreeUpdate};
pub use node::{NodeAttributes, NodePath};
pub use render::{NodeEntry, level_entries, level_nodes};
pub use selection::{Level, SelectionAggregator, SelectionState};
pub use settings::{ExpandDepth, SettingsOverrides, SettingsProvider, TreeViewOptions, TreeViewSettings};
pub use toggle::ToggleState;
