//! Search page slice: users and albums matched by name.
//!
//! # Design
//! - Controller logic lives in `core::search`; this slice maps backend rows
//!   into display hits and renders them.

pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod view;
