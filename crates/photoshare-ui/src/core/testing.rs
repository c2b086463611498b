//! In-memory backend for native tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use photoshare_models::{
    Album, AlbumRef, AlbumSearchRow, AlbumSummary, AuthUser, AuthorRef, Comment, CountRow,
    NewAlbum, NewComment, NewPhoto, PasswordCredentials, PathRow, Photo, Profile, ProfileUpdate,
    SessionPayload, SignUpRequest, SignUpResponse, UserSearchRow,
};

use crate::core::backend::{AuthClient, Backend, BackendError};
use crate::core::filters::FeedFilters;
use crate::core::paging::{PageSlice, PageWindow};

pub(crate) fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0)
        .single()
        .unwrap_or_default()
}

pub(crate) fn photo(id: &str, user_id: &str, seconds: i64) -> Photo {
    Photo {
        id: id.to_string(),
        user_id: user_id.to_string(),
        path: format!("{id}.jpg"),
        description: format!("photo {id}"),
        created_at: timestamp(seconds),
        album_id: None,
        author: Some(AuthorRef {
            display_name: Some(user_id.to_string()),
        }),
        album: None,
    }
}

fn window_of<T: Clone>(rows: &[T], window: PageWindow) -> PageSlice<T> {
    let start = usize::try_from(window.start()).unwrap_or(usize::MAX);
    let items = rows
        .iter()
        .skip(start)
        .take(window.page_size as usize)
        .cloned()
        .collect();
    PageSlice {
        items,
        total: Some(rows.len() as u64),
    }
}

/// Scriptable in-memory backend.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub(crate) photos: RefCell<Vec<Photo>>,
    pub(crate) comments: RefCell<Vec<Comment>>,
    pub(crate) albums: RefCell<Vec<Album>>,
    pub(crate) profiles: RefCell<Vec<Profile>>,
    pub(crate) objects: RefCell<BTreeSet<String>>,
    pub(crate) users: RefCell<HashMap<String, (String, AuthUser)>>,
    failures: RefCell<HashMap<&'static str, BackendError>>,
    calls: RefCell<Vec<String>>,
    next_id: Cell<u64>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make the next call to `operation` fail with `error`.
    pub(crate) fn fail_next(&self, operation: &'static str, error: BackendError) {
        self.failures.borrow_mut().insert(operation, error);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn add_user(&self, id: &str, email: &str, password: &str, display_name: &str) {
        self.users.borrow_mut().insert(
            email.to_string(),
            (
                password.to_string(),
                AuthUser {
                    id: id.to_string(),
                    email: Some(email.to_string()),
                    user_metadata: photoshare_models::UserMetadata {
                        display_name: Some(display_name.to_string()),
                    },
                },
            ),
        );
        self.profiles.borrow_mut().push(Profile {
            id: id.to_string(),
            display_name: display_name.to_string(),
            avatar_url: None,
        });
    }

    fn enter(&self, operation: &'static str) -> Result<(), BackendError> {
        self.calls.borrow_mut().push(operation.to_string());
        match self.failures.borrow_mut().remove(operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{prefix}{id}")
    }

    fn display_name(&self, user_id: &str) -> Option<String> {
        self.profiles
            .borrow()
            .iter()
            .find(|profile| profile.id == user_id)
            .map(|profile| profile.display_name.clone())
    }

    fn session_for(user: &AuthUser) -> SessionPayload {
        SessionPayload {
            access_token: format!("token-{}", user.id),
            refresh_token: format!("refresh-{}", user.id),
            expires_in: 3600,
            expires_at: None,
            user: user.clone(),
        }
    }

    fn user_by_token(&self, token: &str, prefix: &str) -> Option<AuthUser> {
        let id = token.strip_prefix(prefix)?;
        self.users
            .borrow()
            .values()
            .find(|(_, user)| user.id == id)
            .map(|(_, user)| user.clone())
    }

    fn previews(&self, predicate: impl Fn(&Photo) -> bool) -> (Vec<PathRow>, u64) {
        let photos = self.photos.borrow();
        let matching: Vec<&Photo> = photos.iter().filter(|photo| predicate(photo)).collect();
        let previews = matching
            .iter()
            .take(3)
            .map(|photo| PathRow {
                path: Some(photo.path.clone()),
            })
            .collect();
        (previews, matching.len() as u64)
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn list_photos(
        &self,
        filters: &FeedFilters,
        window: PageWindow,
    ) -> Result<PageSlice<Photo>, BackendError> {
        self.enter("list_photos")?;
        let mut rows: Vec<Photo> = self
            .photos
            .borrow()
            .iter()
            .filter(|photo| {
                filters
                    .user_id
                    .as_ref()
                    .is_none_or(|user_id| &photo.user_id == user_id)
                    && filters
                        .album_id
                        .as_ref()
                        .is_none_or(|album_id| photo.album_id.map(|id| id.to_string()).as_ref() == Some(album_id))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(window_of(&rows, window))
    }

    async fn get_photo(&self, id: &str) -> Result<Option<Photo>, BackendError> {
        self.enter("get_photo")?;
        Ok(self.photos.borrow().iter().find(|photo| photo.id == id).cloned())
    }

    async fn insert_photo(&self, photo: &NewPhoto) -> Result<(), BackendError> {
        self.enter("insert_photo")?;
        let id = self.next_id("photo-");
        let album = photo.album_id.and_then(|album_id| {
            self.albums
                .borrow()
                .iter()
                .find(|album| album.id == album_id)
                .map(|album| AlbumRef {
                    name: album.name.clone(),
                })
        });
        self.photos.borrow_mut().push(Photo {
            id,
            user_id: photo.user_id.clone(),
            path: photo.path.clone().unwrap_or_default(),
            description: photo.description.clone(),
            created_at: timestamp(10_000),
            album_id: photo.album_id,
            author: Some(AuthorRef {
                display_name: self.display_name(&photo.user_id),
            }),
            album,
        });
        Ok(())
    }

    async fn delete_photo_row(&self, id: &str) -> Result<(), BackendError> {
        self.enter("delete_photo_row")?;
        self.photos.borrow_mut().retain(|photo| photo.id != id);
        Ok(())
    }

    async fn upload_object(
        &self,
        owner: &str,
        file_name: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), BackendError> {
        self.enter("upload_object")?;
        self.objects
            .borrow_mut()
            .insert(format!("{owner}/{file_name}"));
        Ok(())
    }

    async fn remove_object(&self, owner: &str, file_name: &str) -> Result<(), BackendError> {
        self.enter("remove_object")?;
        self.objects
            .borrow_mut()
            .remove(&format!("{owner}/{file_name}"));
        Ok(())
    }

    fn public_url(&self, owner: &str, file_name: &str) -> String {
        format!("https://cdn.test/{owner}/{file_name}")
    }

    async fn list_comments(&self, photo_id: &str) -> Result<Vec<Comment>, BackendError> {
        self.enter("list_comments")?;
        let mut rows: Vec<Comment> = self
            .comments
            .borrow()
            .iter()
            .filter(|comment| comment.photo_id == photo_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, BackendError> {
        self.enter("insert_comment")?;
        let stored = Comment {
            id: self.next_id("comment-"),
            photo_id: comment.photo_id.clone(),
            user_id: comment.user_id.clone(),
            text: comment.text.clone(),
            created_at: timestamp(20_000),
            author: Some(AuthorRef {
                display_name: self.display_name(&comment.user_id),
            }),
        };
        self.comments.borrow_mut().push(stored.clone());
        Ok(stored)
    }

    async fn delete_comment(&self, id: &str) -> Result<(), BackendError> {
        self.enter("delete_comment")?;
        self.comments.borrow_mut().retain(|comment| comment.id != id);
        Ok(())
    }

    async fn list_albums(&self, owner: &str) -> Result<Vec<Album>, BackendError> {
        self.enter("list_albums")?;
        Ok(self
            .albums
            .borrow()
            .iter()
            .filter(|album| album.user_id == owner)
            .cloned()
            .collect())
    }

    async fn list_album_summaries(&self, owner: &str) -> Result<Vec<AlbumSummary>, BackendError> {
        self.enter("list_album_summaries")?;
        let albums: Vec<Album> = self
            .albums
            .borrow()
            .iter()
            .filter(|album| album.user_id == owner)
            .cloned()
            .collect();
        Ok(albums
            .into_iter()
            .map(|album| {
                let (previews, count) = self.previews(|photo| photo.album_id == Some(album.id));
                AlbumSummary {
                    id: album.id,
                    name: album.name,
                    photo_counts: vec![CountRow { count }],
                    preview_photos: previews.into_iter().take(1).collect(),
                }
            })
            .collect())
    }

    async fn insert_album(&self, album: &NewAlbum) -> Result<Album, BackendError> {
        self.enter("insert_album")?;
        let id = self.albums.borrow().iter().map(|album| album.id).max().unwrap_or(0) + 1;
        let stored = Album {
            id,
            user_id: album.user_id.clone(),
            name: album.name.clone(),
        };
        self.albums.borrow_mut().push(stored.clone());
        Ok(stored)
    }

    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, BackendError> {
        self.enter("get_profile")?;
        Ok(self
            .profiles
            .borrow()
            .iter()
            .find(|profile| profile.id == id)
            .cloned())
    }

    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<(), BackendError> {
        self.enter("update_profile")?;
        let mut profiles = self.profiles.borrow_mut();
        let profile = profiles
            .iter_mut()
            .find(|profile| profile.id == id)
            .ok_or(BackendError::NotFound)?;
        profile.display_name.clone_from(&update.display_name);
        Ok(())
    }

    async fn search_users(
        &self,
        term: &str,
        window: PageWindow,
    ) -> Result<PageSlice<UserSearchRow>, BackendError> {
        self.enter("search_users")?;
        let needle = term.to_lowercase();
        let profiles: Vec<Profile> = self
            .profiles
            .borrow()
            .iter()
            .filter(|profile| profile.display_name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let rows: Vec<UserSearchRow> = profiles
            .into_iter()
            .map(|profile| {
                let (photos, count) = self.previews(|photo| photo.user_id == profile.id);
                let albums = self
                    .albums
                    .borrow()
                    .iter()
                    .filter(|album| album.user_id == profile.id)
                    .count() as u64;
                UserSearchRow {
                    id: profile.id,
                    display_name: profile.display_name,
                    photos,
                    photo_counts: vec![CountRow { count }],
                    album_counts: vec![CountRow { count: albums }],
                }
            })
            .collect();
        Ok(window_of(&rows, window))
    }

    async fn search_albums(
        &self,
        term: &str,
        window: PageWindow,
    ) -> Result<PageSlice<AlbumSearchRow>, BackendError> {
        self.enter("search_albums")?;
        let needle = term.to_lowercase();
        let albums: Vec<Album> = self
            .albums
            .borrow()
            .iter()
            .filter(|album| album.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let rows: Vec<AlbumSearchRow> = albums
            .into_iter()
            .map(|album| {
                let (photos, count) = self.previews(|photo| photo.album_id == Some(album.id));
                AlbumSearchRow {
                    id: album.id,
                    name: album.name,
                    user_id: album.user_id,
                    photos,
                    photo_counts: vec![CountRow { count }],
                }
            })
            .collect();
        Ok(window_of(&rows, window))
    }
}

#[async_trait(?Send)]
impl AuthClient for FakeBackend {
    async fn sign_in(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<SessionPayload, BackendError> {
        self.enter("sign_in")?;
        let users = self.users.borrow();
        match users.get(&credentials.email) {
            Some((password, user)) if *password == credentials.password => {
                Ok(Self::session_for(user))
            }
            _ => Err(BackendError::Rejected {
                status: 400,
                message: "Invalid login credentials".to_string(),
            }),
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, BackendError> {
        self.enter("sign_up")?;
        if self.users.borrow().contains_key(&request.email) {
            return Err(BackendError::Rejected {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        let id = self.next_id("user-");
        let display_name = request.data.display_name.clone().unwrap_or_default();
        self.add_user(&id, &request.email, &request.password, &display_name);
        let users = self.users.borrow();
        let (_, user) = users
            .get(&request.email)
            .ok_or(BackendError::NotFound)?;
        Ok(SignUpResponse::Session(Self::session_for(user)))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), BackendError> {
        self.enter("sign_out")
    }

    async fn current_user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        self.enter("current_user")?;
        self.user_by_token(access_token, "token-")
            .ok_or(BackendError::Rejected {
                status: 401,
                message: "invalid JWT".to_string(),
            })
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionPayload, BackendError> {
        self.enter("refresh_session")?;
        self.user_by_token(refresh_token, "refresh-")
            .map(|user| Self::session_for(&user))
            .ok_or(BackendError::Rejected {
                status: 400,
                message: "Invalid Refresh Token".to_string(),
            })
    }
}
