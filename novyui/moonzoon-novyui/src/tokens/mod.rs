// Design tokens shared by the tree view components

pub mod color;
pub mod spacing;
pub mod theme;
pub mod typography;

pub use color::*;
pub use spacing::*;
pub use theme::*;
pub use typography::*;
