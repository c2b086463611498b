//! Feed page slice.
//!
//! # Design
//! - Filter inputs update state immediately; the URL follows at most twice a
//!   second with a trailing write of the latest filters.
//! - Listing and deletion reuse the shared photo list slice.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
