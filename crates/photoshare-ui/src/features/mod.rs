//! Feature slices: per-page state, backend calls and views.

pub mod auth;
pub mod comments;
pub mod create;
pub mod feed;
pub mod photos;
pub mod profile;
pub mod search;
