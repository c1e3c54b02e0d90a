// Spacing scale in px

pub const SPACING_2: u32 = 2;
pub const SPACING_4: u32 = 4;
pub const SPACING_6: u32 = 6;
pub const SPACING_8: u32 = 8;
pub const SPACING_12: u32 = 12;
pub const SPACING_16: u32 = 16;

/// Horizontal indent added per nesting level of a tree
pub const TREE_INDENT: u32 = SPACING_16;
