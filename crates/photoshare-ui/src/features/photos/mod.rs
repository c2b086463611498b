//! Photo list slice shared by the feed and profile pages.
//!
//! # Design
//! - One paginated controller per mounted list, owned by the view.
//! - Deletion removes the object first, then the row, and only touches local
//!   state once both succeeded.

pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod view;
