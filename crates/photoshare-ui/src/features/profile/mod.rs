//! Profile page slice.
//!
//! # Design
//! - Profile row and album summaries load in parallel; either failing fails
//!   the page.
//! - The photo grid reuses the shared photo list filtered by owner.

pub mod api;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
