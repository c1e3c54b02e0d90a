use crate::node::NodePath;

/// Errors raised while loading or merging tree view settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid tree view settings: {0}")]
    Toml(#[from] toml::de::Error),
    /// An attribute name was configured as an empty string
    #[error("`{0}` must not be empty")]
    EmptyAttribute(&'static str),
    #[error("expand depth must be -1 or greater, got {0}")]
    InvalidExpandDepth(i32),
    /// Two state attributes share a name and would overwrite each other
    #[error("state attribute `{0}` is configured more than once")]
    DuplicateStateAttribute(String),
}

/// Errors raised while parsing or evaluating a filter expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Stage at `index` has no content, e.g. `a || b`
    #[error("filter stage {index} is empty")]
    EmptyStage { index: usize },
    #[error("filter stage `{stage}` does not start with a predicate name")]
    InvalidStageName { stage: String },
    #[error("unterminated string literal in filter stage `{stage}`")]
    UnterminatedString { stage: String },
    /// A parameter is neither a literal nor a variable reference
    #[error("invalid parameter `{parameter}` in filter stage `{stage}`")]
    InvalidParameter { stage: String, parameter: String },
    #[error("unknown filter predicate `{0}`")]
    UnknownPredicate(String),
}

/// Errors raised while applying a [`crate::model::TreeEvent`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeModelError {
    /// The event addressed a node that is not (or no longer) in the collection
    #[error("no tree node at path {0}")]
    UnknownPath(NodePath),
    #[error(transparent)]
    Filter(#[from] FilterError),
}
