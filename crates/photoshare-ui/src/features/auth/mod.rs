//! Sign-in, registration and session restore.
//!
//! # Design
//! - Flows return session data or a user-facing message; the caller turns the
//!   result into an `AuthEvent` for the store.
//! - Sign-out always ends the local session, even if the revoke call fails.

pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod view;
