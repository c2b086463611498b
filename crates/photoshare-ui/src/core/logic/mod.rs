//! Request-shaping helpers for the row and storage APIs, kept pure for native tests.

use crate::core::filters::FeedFilters;
use crate::core::paging::PageWindow;

/// Columns selected for feed and detail photo rows.
pub const PHOTO_SELECT: &str = "*,profiles(display_name),albums(name)";
/// Columns selected for comment rows.
pub const COMMENT_SELECT: &str = "*,profiles(display_name)";
/// Columns selected for album summaries on the profile page.
pub const ALBUM_SUMMARY_SELECT: &str =
    "id,name,photo_count:photos(count),preview_photo:photos(path)";
/// Columns selected for user search hits.
pub const USER_SEARCH_SELECT: &str =
    "id,display_name,photos(path),photo_count:photos(count),albums(count)";
/// Columns selected for album search hits.
pub const ALBUM_SEARCH_SELECT: &str = "id,name,user_id,photos(path),photo_count:photos(count)";

fn eq(value: &str) -> String {
    format!("eq.{}", urlencoding::encode(value))
}

fn ilike_contains(term: &str) -> String {
    let cleaned: String = term.trim().chars().filter(|ch| *ch != '*').collect();
    format!("ilike.*{}*", urlencoding::encode(&cleaned))
}

/// Photo listing path for the given filters, newest first.
#[must_use]
pub fn photos_path(filters: &FeedFilters) -> String {
    let mut path = format!("/rest/v1/photos?select={PHOTO_SELECT}&order=created_at.desc");
    if let Some(user_id) = &filters.user_id {
        path.push_str("&user_id=");
        path.push_str(&eq(user_id));
    }
    if let Some(album_id) = &filters.album_id {
        path.push_str("&album_id=");
        path.push_str(&eq(album_id));
    }
    path
}

/// Single photo lookup path.
#[must_use]
pub fn photo_path(id: &str) -> String {
    format!("/rest/v1/photos?select={PHOTO_SELECT}&id={}", eq(id))
}

/// Filter path addressing one row by id, for deletes and updates.
#[must_use]
pub fn row_by_id_path(table: &str, id: &str) -> String {
    format!("/rest/v1/{table}?id={}", eq(id))
}

/// Comments for a photo, oldest first.
#[must_use]
pub fn comments_path(photo_id: &str) -> String {
    format!(
        "/rest/v1/comments?select={COMMENT_SELECT}&photo_id={}&order=created_at.asc",
        eq(photo_id)
    )
}

/// Insert path returning the stored comment with its author embed.
#[must_use]
pub fn comment_insert_path() -> String {
    format!("/rest/v1/comments?select={COMMENT_SELECT}")
}

/// Albums owned by a user, by name.
#[must_use]
pub fn albums_path(owner: &str) -> String {
    format!(
        "/rest/v1/albums?select=id,user_id,name&user_id={}&order=name.asc",
        eq(owner)
    )
}

/// Album summaries for the profile page; one preview row per album.
#[must_use]
pub fn album_summaries_path(owner: &str) -> String {
    format!(
        "/rest/v1/albums?select={ALBUM_SUMMARY_SELECT}&user_id={}&preview_photo.limit=1&order=name.asc",
        eq(owner)
    )
}

/// Profile lookup path.
#[must_use]
pub fn profile_path(id: &str) -> String {
    format!("/rest/v1/profiles?select=*&id={}", eq(id))
}

/// User search path; previews capped at three rows.
#[must_use]
pub fn user_search_path(term: &str) -> String {
    format!(
        "/rest/v1/profiles?select={USER_SEARCH_SELECT}&display_name={}&photos.limit=3&order=display_name.asc",
        ilike_contains(term)
    )
}

/// Album search path; previews capped at three rows.
#[must_use]
pub fn album_search_path(term: &str) -> String {
    format!(
        "/rest/v1/albums?select={ALBUM_SEARCH_SELECT}&name={}&photos.limit=3&order=name.asc",
        ilike_contains(term)
    )
}

/// `Range` header value for a window.
#[must_use]
pub fn range_header(window: PageWindow) -> String {
    format!("{}-{}", window.start(), window.end_inclusive())
}

/// Total row count from a `Content-Range` header (`0-5/42`, `*/0`).
/// Returns `None` when the total is unknown (`0-5/*`) or the header is malformed.
#[must_use]
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}

/// Object key relative to the bucket root.
#[must_use]
pub fn object_key(owner: &str, file_name: &str) -> String {
    format!("{owner}/{file_name}")
}

/// Storage upload path for an object.
#[must_use]
pub fn object_upload_path(bucket: &str, owner: &str, file_name: &str) -> String {
    format!(
        "/storage/v1/object/{bucket}/{}",
        object_key(owner, file_name)
    )
}
