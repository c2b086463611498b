//! Backend seams for rows, objects and sessions.
//!
//! # Design
//! - Feature `api` modules talk to `&dyn Backend` / `&dyn AuthClient` so they
//!   run natively against an in-memory fake and in the browser against the
//!   HTTP client.
//! - Futures are `?Send`; everything runs on the browser event loop.
//! - One error taxonomy for every call; views turn it into a string.

use async_trait::async_trait;
use photoshare_models::{
    Album, AlbumSearchRow, AlbumSummary, AuthUser, Comment, NewAlbum, NewComment, NewPhoto,
    PasswordCredentials, Photo, Profile, ProfileUpdate, SessionPayload, SignUpRequest,
    SignUpResponse, UserSearchRow,
};
use thiserror::Error;

use crate::core::filters::FeedFilters;
use crate::core::paging::{PageSlice, PageWindow};

/// Failure taxonomy for backend calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message decoded from the error body, or the status text.
        message: String,
    },
    /// A single-row lookup matched nothing.
    #[error("not found")]
    NotFound,
    /// Input rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Convenience constructor for local validation failures.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the failure says nothing about the request itself: the backend
    /// was unreachable or failed server-side.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::NotFound | Self::Validation(_) | Self::Decode(_) => false,
        }
    }
}

/// Row and object storage operations.
#[async_trait(?Send)]
pub trait Backend {
    /// Photos matching the filters, newest first, for one window.
    async fn list_photos(
        &self,
        filters: &FeedFilters,
        window: PageWindow,
    ) -> Result<PageSlice<Photo>, BackendError>;

    /// A single photo with its author embed.
    async fn get_photo(&self, id: &str) -> Result<Option<Photo>, BackendError>;

    /// Insert a photo row.
    async fn insert_photo(&self, photo: &NewPhoto) -> Result<(), BackendError>;

    /// Delete a photo row by id.
    async fn delete_photo_row(&self, id: &str) -> Result<(), BackendError>;

    /// Upload an object into `owner/file_name`.
    async fn upload_object(
        &self,
        owner: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError>;

    /// Remove the object at `owner/file_name`.
    async fn remove_object(&self, owner: &str, file_name: &str) -> Result<(), BackendError>;

    /// Public URL for the object at `owner/file_name`.
    fn public_url(&self, owner: &str, file_name: &str) -> String;

    /// Comments for a photo, oldest first.
    async fn list_comments(&self, photo_id: &str) -> Result<Vec<Comment>, BackendError>;

    /// Insert a comment and return the stored row with its author embed.
    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, BackendError>;

    /// Delete a comment by id.
    async fn delete_comment(&self, id: &str) -> Result<(), BackendError>;

    /// Albums owned by `owner`.
    async fn list_albums(&self, owner: &str) -> Result<Vec<Album>, BackendError>;

    /// Albums owned by `owner` with photo counts and a preview photo.
    async fn list_album_summaries(&self, owner: &str) -> Result<Vec<AlbumSummary>, BackendError>;

    /// Insert an album and return the stored row.
    async fn insert_album(&self, album: &NewAlbum) -> Result<Album, BackendError>;

    /// Profile row by id.
    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, BackendError>;

    /// Update a profile row.
    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<(), BackendError>;

    /// Profiles whose display name contains `term` (case-insensitive).
    async fn search_users(
        &self,
        term: &str,
        window: PageWindow,
    ) -> Result<PageSlice<UserSearchRow>, BackendError>;

    /// Albums whose name contains `term` (case-insensitive).
    async fn search_albums(
        &self,
        term: &str,
        window: PageWindow,
    ) -> Result<PageSlice<AlbumSearchRow>, BackendError>;
}

/// Session operations.
#[async_trait(?Send)]
pub trait AuthClient {
    /// Password grant.
    async fn sign_in(&self, credentials: &PasswordCredentials)
    -> Result<SessionPayload, BackendError>;

    /// Create an account.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, BackendError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    /// User behind `access_token`.
    async fn current_user(&self, access_token: &str) -> Result<AuthUser, BackendError>;

    /// Refresh-token grant.
    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionPayload, BackendError>;
}
