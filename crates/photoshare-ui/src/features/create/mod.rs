//! Post creation slice.
//!
//! # Design
//! - The draft is plain data; the view fills it and hands it to `create_post`.
//! - Uploaded objects get a random 32-hex name under the owner folder.
//! - A failed step surfaces a message and leaves the draft intact.

pub mod api;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
