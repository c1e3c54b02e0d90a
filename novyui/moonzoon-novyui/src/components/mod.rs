pub mod checkbox;
pub mod tree_view;

pub use checkbox::*;
pub use tree_view::*;
