//! Presentational components shared by the pages.

pub(crate) mod album_select;
pub(crate) mod avatar;
pub(crate) mod comment_item;
pub(crate) mod delete_confirmation;
pub(crate) mod image_upload;
pub(crate) mod photo_card;
pub(crate) mod shell;
pub(crate) mod spinner;
