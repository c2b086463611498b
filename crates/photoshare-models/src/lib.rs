#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Wire DTOs for the Photoshare backend.
//!
//! The hosted backend exposes rows through a PostgREST-style API, objects through
//! a storage API and sessions through an auth API. These types mirror the JSON
//! those endpoints exchange, including embedded relations (`profiles(...)`,
//! `albums(...)`) and aggregate embeds (`photos(count)`), so the UI never touches
//! raw `serde_json::Value` trees.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Album identifiers are integer primary keys.
pub type AlbumId = i64;

/// Maximum number of preview photos embedded in a search hit.
pub const SEARCH_PREVIEW_LIMIT: usize = 3;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Embedded `profiles(display_name)` relation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthorRef {
    #[serde(default)]
    /// Display name of the owning profile, when set.
    pub display_name: Option<String>,
}

/// Embedded `albums(name)` relation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumRef {
    /// Album name.
    pub name: String,
}

/// Aggregate embed row returned for `relation(count)` selections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CountRow {
    /// Number of related rows.
    pub count: u64,
}

/// Embedded `photos(path)` row used for previews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PathRow {
    #[serde(default)]
    /// Object file name relative to the owner folder.
    pub path: Option<String>,
}

fn first_count(rows: &[CountRow]) -> u64 {
    rows.first().map_or(0, |row| row.count)
}

fn preview_paths(rows: &[PathRow], limit: usize) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.path.as_deref())
        .filter(|path| !path.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Photo row with its denormalised author and album names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    /// Photo identifier.
    pub id: String,
    /// Owning user identifier.
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    /// Object file name inside the owner folder.
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    /// Free-text description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    /// Album the photo belongs to, if any.
    pub album_id: Option<AlbumId>,
    #[serde(rename = "profiles", default, skip_serializing_if = "Option::is_none")]
    /// Embedded author profile.
    pub author: Option<AuthorRef>,
    #[serde(rename = "albums", default, skip_serializing_if = "Option::is_none")]
    /// Embedded album.
    pub album: Option<AlbumRef>,
}

impl Photo {
    /// Author display name, if the embed was selected and populated.
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|author| author.display_name.as_deref())
    }

    /// Album name, if the photo belongs to an album and the embed was selected.
    #[must_use]
    pub fn album_name(&self) -> Option<&str> {
        self.album.as_ref().map(|album| album.name.as_str())
    }
}

/// Album row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Album {
    /// Album identifier.
    pub id: AlbumId,
    /// Owning user identifier.
    pub user_id: String,
    /// Album name.
    pub name: String,
}

/// Album with its derived photo count and a single preview photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumSummary {
    /// Album identifier.
    pub id: AlbumId,
    /// Album name.
    pub name: String,
    #[serde(rename = "photo_count", default)]
    /// Raw aggregate embed.
    pub photo_counts: Vec<CountRow>,
    #[serde(rename = "preview_photo", default)]
    /// Raw preview embed (limited to one row by the query).
    pub preview_photos: Vec<PathRow>,
}

impl AlbumSummary {
    /// Number of photos in the album.
    #[must_use]
    pub fn photo_count(&self) -> u64 {
        first_count(&self.photo_counts)
    }

    /// Path of the preview photo, if the album is not empty.
    #[must_use]
    pub fn preview_path(&self) -> Option<&str> {
        self.preview_photos
            .iter()
            .find_map(|row| row.path.as_deref())
            .filter(|path| !path.is_empty())
    }
}

/// Comment row with its denormalised author name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Comment identifier.
    pub id: String,
    /// Parent photo identifier.
    pub photo_id: String,
    /// Author identifier.
    pub user_id: String,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    #[serde(rename = "profiles", default, skip_serializing_if = "Option::is_none")]
    /// Embedded author profile.
    pub author: Option<AuthorRef>,
}

impl Comment {
    /// Author display name, if populated.
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|author| author.display_name.as_deref())
    }
}

/// Profile row. The identifier is shared with the auth user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Profile (and auth user) identifier.
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    /// Display name.
    pub display_name: String,
    #[serde(default)]
    /// Avatar object path relative to the owner folder.
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Single upper-case initial used when no avatar is set.
    #[must_use]
    pub fn initial(&self) -> String {
        self.display_name
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |ch| ch.to_uppercase().collect())
    }
}

/// Profile row matched by a display-name search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSearchRow {
    /// Profile identifier.
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    /// Display name.
    pub display_name: String,
    #[serde(default)]
    /// Up to three preview photos.
    pub photos: Vec<PathRow>,
    #[serde(rename = "photo_count", default)]
    /// Raw photo aggregate embed.
    pub photo_counts: Vec<CountRow>,
    #[serde(rename = "albums", default)]
    /// Raw album aggregate embed.
    pub album_counts: Vec<CountRow>,
}

impl UserSearchRow {
    /// Number of photos the user owns.
    #[must_use]
    pub fn photo_count(&self) -> u64 {
        first_count(&self.photo_counts)
    }

    /// Number of albums the user owns.
    #[must_use]
    pub fn album_count(&self) -> u64 {
        first_count(&self.album_counts)
    }

    /// Non-empty preview paths, capped at [`SEARCH_PREVIEW_LIMIT`].
    #[must_use]
    pub fn preview_paths(&self) -> Vec<String> {
        preview_paths(&self.photos, SEARCH_PREVIEW_LIMIT)
    }
}

/// Album row matched by a name search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumSearchRow {
    /// Album identifier.
    pub id: AlbumId,
    /// Album name.
    pub name: String,
    /// Owning user identifier.
    pub user_id: String,
    #[serde(default)]
    /// Up to three preview photos.
    pub photos: Vec<PathRow>,
    #[serde(rename = "photo_count", default)]
    /// Raw photo aggregate embed.
    pub photo_counts: Vec<CountRow>,
}

impl AlbumSearchRow {
    /// Number of photos in the album.
    #[must_use]
    pub fn photo_count(&self) -> u64 {
        first_count(&self.photo_counts)
    }

    /// Non-empty preview paths, capped at [`SEARCH_PREVIEW_LIMIT`].
    #[must_use]
    pub fn preview_paths(&self) -> Vec<String> {
        preview_paths(&self.photos, SEARCH_PREVIEW_LIMIT)
    }
}

/// Insert payload for a new photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPhoto {
    /// Owner identifier.
    pub user_id: String,
    /// Trimmed description.
    pub description: String,
    /// Uploaded object file name; `None` for text-only posts.
    pub path: Option<String>,
    /// Selected album, if any.
    pub album_id: Option<AlbumId>,
}

/// Insert payload for a new comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    /// Parent photo identifier.
    pub photo_id: String,
    /// Author identifier.
    pub user_id: String,
    /// Trimmed comment body.
    pub text: String,
}

/// Insert payload for a new album.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAlbum {
    /// Owner identifier.
    pub user_id: String,
    /// Trimmed album name.
    pub name: String,
}

/// Partial profile update. Only the display name is editable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name.
    pub display_name: String,
}

/// Body of a storage removal request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageRemoveRequest {
    /// Object keys relative to the bucket root.
    pub prefixes: Vec<String>,
}

/// Email/password credential pair used for sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordCredentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Refresh-token grant body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshTokenRequest {
    /// Refresh token from the persisted session.
    pub refresh_token: String,
}

/// Metadata attached to a new account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Display name copied into the profile row by the backend.
    pub display_name: Option<String>,
}

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// User metadata.
    pub data: UserMetadata,
}

/// Authenticated user as reported by the auth API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// User identifier (also the profile identifier).
    pub id: String,
    #[serde(default)]
    /// Account email.
    pub email: Option<String>,
    #[serde(default)]
    /// User metadata.
    pub user_metadata: UserMetadata,
}

/// Session returned by password and refresh-token grants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionPayload {
    /// Bearer token for row and storage requests.
    pub access_token: String,
    /// Token used to mint a new access token.
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    #[serde(default)]
    /// Absolute expiry as a unix timestamp, when reported.
    pub expires_at: Option<i64>,
    /// Session owner.
    pub user: AuthUser,
}

/// Sign-up response: a session when confirmation is disabled, otherwise the
/// pending user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SignUpResponse {
    /// Account created and signed in.
    Session(SessionPayload),
    /// Account created; email confirmation pending.
    Pending(AuthUser),
}

/// Error body returned by the row, storage and auth APIs.
///
/// The three services disagree on field names, so every known spelling is
/// optional and [`BackendErrorBody::summary`] picks the first populated one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BackendErrorBody {
    #[serde(default)]
    /// Row/storage API message.
    pub message: Option<String>,
    #[serde(default)]
    /// Auth API message.
    pub msg: Option<String>,
    #[serde(default)]
    /// OAuth-style description.
    pub error_description: Option<String>,
    #[serde(default)]
    /// OAuth-style error code or storage error label.
    pub error: Option<String>,
    #[serde(default)]
    /// Extra detail from the row API.
    pub details: Option<String>,
    #[serde(default)]
    /// Hint from the row API.
    pub hint: Option<String>,
}

impl BackendErrorBody {
    /// Most descriptive message carried by the body.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        [
            &self.message,
            &self.msg,
            &self.error_description,
            &self.error,
            &self.details,
        ]
        .into_iter()
        .flatten()
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
    }
}
