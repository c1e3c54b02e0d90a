//! # MoonZoon NovyUI tree components
//!
//! Design tokens plus a tri-state checkbox and a recursive, filterable tree
//! view for MoonZoon applications.
//!
//! ```rust,ignore
//! use moonzoon_novyui::*;
//! use zoon::*;
//!
//! fn files(collection: Vec<serde_json::Value>) -> impl Element {
//!     let controller = TreeViewController::new(collection, Default::default());
//!     tree_view().controller(controller).build()
//! }
//! ```

pub mod components;
pub mod tokens;

pub use components::*;
pub use tokens::*;

pub use zoon;
