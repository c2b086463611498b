//! Core, DOM-free primitives shared by the feature slices.
pub mod auth;
pub mod backend;
pub mod config;
pub mod filters;
pub mod logic;
pub mod paging;
pub mod search;
pub mod store;
pub mod throttle;

#[cfg(test)]
pub(crate) mod testing;
