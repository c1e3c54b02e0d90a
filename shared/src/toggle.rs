use crate::settings::ExpandDepth;

/// Expand/collapse state of one rendered entry.
///
/// Lives only as long as the rendered entry; it is not written back to the
/// node record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState {
    leaf: bool,
    collapsed: bool,
}

impl ToggleState {
    /// Initial state for an entry at `depth` (top level = 0)
    pub fn initial(has_children: bool, depth: usize, expand_depth: ExpandDepth) -> Self {
        Self {
            leaf: !has_children,
            collapsed: has_children && !expand_depth.is_expanded_at(depth),
        }
    }

    pub fn is_leaf(self) -> bool {
        self.leaf
    }

    pub fn is_collapsed(self) -> bool {
        self.collapsed
    }

    /// Flip the collapsed flag; leaves never change
    pub fn toggle(&mut self) -> bool {
        if !self.leaf {
            self.collapsed = !self.collapsed;
        }
        self.collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_never_toggle() {
        let mut state = ToggleState::initial(false, 0, ExpandDepth::COLLAPSED);
        assert!(!state.is_collapsed());
        state.toggle();
        state.toggle();
        state.toggle();
        assert!(!state.is_collapsed());
        assert!(state.is_leaf());
    }

    #[test]
    fn branches_toggle_and_even_clicks_restore() {
        let mut state = ToggleState::initial(true, 0, ExpandDepth::COLLAPSED);
        let original = state;
        assert!(state.is_collapsed());
        assert!(!state.toggle());
        assert!(state.toggle());
        assert_eq!(state, original);
    }

    #[test]
    fn initial_state_follows_expand_depth() {
        assert!(!ToggleState::initial(true, 5, ExpandDepth::All).is_collapsed());
        assert!(!ToggleState::initial(true, 0, ExpandDepth::Levels(1)).is_collapsed());
        assert!(ToggleState::initial(true, 1, ExpandDepth::Levels(1)).is_collapsed());
    }
}
