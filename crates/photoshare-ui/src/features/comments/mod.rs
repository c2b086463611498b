//! Comment thread slice for the photo detail page.
//!
//! # Design
//! - The thread is loaded once per photo; mutations patch it after the backend
//!   confirmed them.
//! - New comments are appended so the thread stays oldest-first.

pub mod api;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
