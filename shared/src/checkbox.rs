use crate::node::NodeAttributes;
use crate::selection::SelectionState;
use serde_json::Value;

/// Visual state of a node's checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckboxState {
    pub fn of(attrs: &NodeAttributes, node: &Value) -> Self {
        SelectionState::of(attrs, node).into()
    }

    /// Value for the `aria-checked` attribute
    pub fn aria_checked(self) -> &'static str {
        match self {
            CheckboxState::Unchecked => "false",
            CheckboxState::Checked => "true",
            CheckboxState::Indeterminate => "mixed",
        }
    }

    /// Resolve a user click into the select-all decision for the node's subtree.
    ///
    /// An indeterminate box is persisted as unselected, so the click becomes
    /// "select everything below" and never lands on a partial state.
    pub fn click(self) -> ClickOutcome {
        ClickOutcome {
            select_all: !matches!(self, CheckboxState::Checked),
        }
    }

    /// State shown right after a select-all at this node
    pub fn after_select_all(selected: bool) -> Self {
        if selected {
            CheckboxState::Checked
        } else {
            CheckboxState::Unchecked
        }
    }
}

impl From<SelectionState> for CheckboxState {
    fn from(state: SelectionState) -> Self {
        match state {
            SelectionState::Unselected => CheckboxState::Unchecked,
            SelectionState::Selected => CheckboxState::Checked,
            SelectionState::Indeterminate => CheckboxState::Indeterminate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Payload of the select-all applied to the subtree
    pub select_all: bool,
}
