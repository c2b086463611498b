//! `gloo-net` client for the hosted row, storage and auth APIs.
//!
//! # Design
//! - One client per app boot; the bearer token is swapped in place when the
//!   session changes.
//! - Request paths come from `core::logic` so their shape is tested natively.
//! - Non-success responses are decoded into [`BackendError::Rejected`] with the
//!   backend's own message when it sent one.

use std::cell::RefCell;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use photoshare_models::{
    Album, AlbumSearchRow, AlbumSummary, AuthUser, BackendErrorBody, Comment, NewAlbum,
    NewComment, NewPhoto, PasswordCredentials, Photo, Profile, ProfileUpdate,
    RefreshTokenRequest, SessionPayload, SignUpRequest, SignUpResponse, StorageRemoveRequest,
    UserSearchRow,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::backend::{AuthClient, Backend, BackendError};
use crate::core::config::BackendConfig;
use crate::core::filters::FeedFilters;
use crate::core::logic::{
    album_search_path, album_summaries_path, albums_path, comment_insert_path, comments_path,
    object_key, object_upload_path, parse_content_range, photo_path, photos_path, profile_path,
    range_header, row_by_id_path, user_search_path,
};
use crate::core::paging::{PageSlice, PageWindow};

const RANGE_NOT_SATISFIABLE: u16 = 416;

fn transport(err: gloo_net::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

fn encode<T: Serialize>(err_context: &str, value: &T) -> Result<String, BackendError> {
    serde_json::to_string(value)
        .map_err(|err| BackendError::Decode(format!("{err_context}: {err}")))
}

async fn rejection(response: Response) -> BackendError {
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<BackendErrorBody>(&body)
        .ok()
        .and_then(|body| body.summary())
        .unwrap_or_else(|| {
            if status_text.is_empty() {
                format!("request failed with status {status}")
            } else {
                status_text
            }
        });
    BackendError::Rejected { status, message }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response
        .json::<T>()
        .await
        .map_err(|err| BackendError::Decode(err.to_string()))
}

/// HTTP client bound to one backend deployment.
pub(crate) struct SupabaseClient {
    config: BackendConfig,
    access_token: RefCell<Option<String>>,
}

impl SupabaseClient {
    pub(crate) fn new(config: BackendConfig) -> Self {
        Self {
            config,
            access_token: RefCell::new(None),
        }
    }

    /// Swap the bearer token used for row and storage calls.
    pub(crate) fn set_auth(&self, access_token: Option<String>) {
        *self.access_token.borrow_mut() = access_token;
    }

    fn request(&self, build: fn(&str) -> Request, path: &str) -> Request {
        let bearer = self
            .access_token
            .borrow()
            .clone()
            .unwrap_or_else(|| self.config.anon_key.clone());
        build(&self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {bearer}"))
    }

    fn request_as(&self, build: fn(&str) -> Request, path: &str, access_token: &str) -> Request {
        build(&self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {access_token}"))
    }

    fn with_json<T: Serialize>(request: Request, value: &T) -> Result<Request, BackendError> {
        let body = encode("request body", value)?;
        Ok(request
            .header("Content-Type", "application/json")
            .body(body))
    }

    async fn send(request: Request) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(transport)?;
        if response.ok() {
            Ok(response)
        } else {
            Err(rejection(response).await)
        }
    }

    async fn get_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, BackendError> {
        decode(Self::send(self.request(Request::get, path)).await?).await
    }

    async fn get_first<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, BackendError> {
        Ok(self.get_rows(path).await?.into_iter().next())
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        window: PageWindow,
    ) -> Result<PageSlice<T>, BackendError> {
        let response = self
            .request(Request::get, path)
            .header("Range-Unit", "items")
            .header("Range", &range_header(window))
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(transport)?;
        let total = response
            .headers()
            .get("content-range")
            .and_then(|value| parse_content_range(&value));
        if response.status() == RANGE_NOT_SATISFIABLE {
            return Ok(PageSlice {
                items: Vec::new(),
                total,
            });
        }
        if !response.ok() {
            return Err(rejection(response).await);
        }
        Ok(PageSlice {
            items: decode(response).await?,
            total,
        })
    }

    async fn insert_returning<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = Self::with_json(
            self.request(Request::post, path)
                .header("Prefer", "return=representation"),
            body,
        )?;
        let rows: Vec<T> = decode(Self::send(request).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("insert returned no rows".to_string()))
    }
}

#[async_trait(?Send)]
impl Backend for SupabaseClient {
    async fn list_photos(
        &self,
        filters: &FeedFilters,
        window: PageWindow,
    ) -> Result<PageSlice<Photo>, BackendError> {
        self.get_page(&photos_path(filters), window).await
    }

    async fn get_photo(&self, id: &str) -> Result<Option<Photo>, BackendError> {
        self.get_first(&photo_path(id)).await
    }

    async fn insert_photo(&self, photo: &NewPhoto) -> Result<(), BackendError> {
        let request = Self::with_json(
            self.request(Request::post, "/rest/v1/photos")
                .header("Prefer", "return=minimal"),
            photo,
        )?;
        Self::send(request).await.map(|_| ())
    }

    async fn delete_photo_row(&self, id: &str) -> Result<(), BackendError> {
        Self::send(self.request(Request::delete, &row_by_id_path("photos", id)))
            .await
            .map(|_| ())
    }

    async fn upload_object(
        &self,
        owner: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let body = js_sys::Uint8Array::from(bytes.as_slice());
        let request = self
            .request(
                Request::post,
                &object_upload_path(&self.config.bucket, owner, file_name),
            )
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(body);
        Self::send(request).await.map(|_| ())
    }

    async fn remove_object(&self, owner: &str, file_name: &str) -> Result<(), BackendError> {
        let request = Self::with_json(
            self.request(
                Request::delete,
                &format!("/storage/v1/object/{}", self.config.bucket),
            ),
            &StorageRemoveRequest {
                prefixes: vec![object_key(owner, file_name)],
            },
        )?;
        Self::send(request).await.map(|_| ())
    }

    fn public_url(&self, owner: &str, file_name: &str) -> String {
        self.config.public_object_url(owner, file_name)
    }

    async fn list_comments(&self, photo_id: &str) -> Result<Vec<Comment>, BackendError> {
        self.get_rows(&comments_path(photo_id)).await
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, BackendError> {
        self.insert_returning(&comment_insert_path(), comment).await
    }

    async fn delete_comment(&self, id: &str) -> Result<(), BackendError> {
        Self::send(self.request(Request::delete, &row_by_id_path("comments", id)))
            .await
            .map(|_| ())
    }

    async fn list_albums(&self, owner: &str) -> Result<Vec<Album>, BackendError> {
        self.get_rows(&albums_path(owner)).await
    }

    async fn list_album_summaries(&self, owner: &str) -> Result<Vec<AlbumSummary>, BackendError> {
        self.get_rows(&album_summaries_path(owner)).await
    }

    async fn insert_album(&self, album: &NewAlbum) -> Result<Album, BackendError> {
        self.insert_returning("/rest/v1/albums?select=id,user_id,name", album)
            .await
    }

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, BackendError> {
        self.get_first(&profile_path(id)).await
    }

    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<(), BackendError> {
        let request = Self::with_json(
            self.request(Request::patch, &row_by_id_path("profiles", id))
                .header("Prefer", "return=minimal"),
            update,
        )?;
        Self::send(request).await.map(|_| ())
    }

    async fn search_users(
        &self,
        term: &str,
        window: PageWindow,
    ) -> Result<PageSlice<UserSearchRow>, BackendError> {
        self.get_page(&user_search_path(term), window).await
    }

    async fn search_albums(
        &self,
        term: &str,
        window: PageWindow,
    ) -> Result<PageSlice<AlbumSearchRow>, BackendError> {
        self.get_page(&album_search_path(term), window).await
    }
}

#[async_trait(?Send)]
impl AuthClient for SupabaseClient {
    async fn sign_in(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<SessionPayload, BackendError> {
        let request = Self::with_json(
            self.request_as(
                Request::post,
                "/auth/v1/token?grant_type=password",
                &self.config.anon_key,
            ),
            credentials,
        )?;
        decode(Self::send(request).await?).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, BackendError> {
        let request = Self::with_json(
            self.request_as(Request::post, "/auth/v1/signup", &self.config.anon_key),
            request,
        )?;
        decode(Self::send(request).await?).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        Self::send(self.request_as(Request::post, "/auth/v1/logout", access_token))
            .await
            .map(|_| ())
    }

    async fn current_user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        decode(Self::send(self.request_as(Request::get, "/auth/v1/user", access_token)).await?)
            .await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionPayload, BackendError> {
        let request = Self::with_json(
            self.request_as(
                Request::post,
                "/auth/v1/token?grant_type=refresh_token",
                &self.config.anon_key,
            ),
            &RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
            },
        )?;
        decode(Self::send(request).await?).await
    }
}
