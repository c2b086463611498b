//! Backend calls for post creation.

use photoshare_models::{Album, AlbumId, NewAlbum, NewPhoto};

use crate::core::backend::{Backend, BackendError};
use crate::features::create::state::{AlbumChoice, PostDraft, upload_file_name};

/// Albums owned by the current user, for the picker.
///
/// # Errors
///
/// Propagates backend failures unchanged.
pub async fn load_albums(backend: &dyn Backend, owner: &str) -> Result<Vec<Album>, BackendError> {
    backend.list_albums(owner).await
}

/// Create an album owned by `owner`.
///
/// # Errors
///
/// Returns a validation error for a blank name, otherwise propagates backend
/// failures.
pub async fn create_album(
    backend: &dyn Backend,
    owner: &str,
    name: &str,
) -> Result<Album, BackendError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BackendError::validation("Album name cannot be empty"));
    }
    let album = backend
        .insert_album(&NewAlbum {
            user_id: owner.to_string(),
            name: name.to_string(),
        })
        .await?;
    tracing::info!(album_id = album.id, "album created");
    Ok(album)
}

async fn resolve_album(
    backend: &dyn Backend,
    owner: &str,
    choice: &AlbumChoice,
) -> Result<Option<AlbumId>, BackendError> {
    match choice {
        AlbumChoice::None => Ok(None),
        AlbumChoice::Existing(id) => Ok(Some(*id)),
        AlbumChoice::New(name) => Ok(Some(create_album(backend, owner, name).await?.id)),
    }
}

/// Upload the image (if any), resolve the album and insert the photo row.
///
/// # Errors
///
/// Returns a validation error for a blank description; otherwise the first
/// failing backend step.
pub async fn create_post(
    backend: &dyn Backend,
    owner: &str,
    draft: &PostDraft,
) -> Result<(), BackendError> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(BackendError::validation("Description is required"));
    }

    let path = match &draft.image {
        Some(image) => {
            let file_name = upload_file_name(&image.file_name);
            backend
                .upload_object(owner, &file_name, image.bytes.clone(), &image.content_type)
                .await?;
            Some(file_name)
        }
        None => None,
    };
    let album_id = resolve_album(backend, owner, &draft.album).await?;

    backend
        .insert_photo(&NewPhoto {
            user_id: owner.to_string(),
            description: description.to_string(),
            path,
            album_id,
        })
        .await?;
    tracing::info!(owner, album_id, "post created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::create::state::ImageUpload;
    use crate::core::testing::FakeBackend;

    fn image() -> ImageUpload {
        ImageUpload {
            file_name: "beach.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn post_with_image_and_new_album() {
        let backend = FakeBackend::new();
        backend.add_user("u1", "ann@example.com", "secret1", "ann");
        let draft = PostDraft {
            description: "  Sunset  ".into(),
            album: AlbumChoice::New("Trips".into()),
            image: Some(image()),
        };
        create_post(&backend, "u1", &draft).await.expect("created");

        assert_eq!(backend.calls(), ["upload_object", "insert_album", "insert_photo"]);
        let photos = backend.photos.borrow();
        let stored = &photos[0];
        assert_eq!(stored.description, "Sunset");
        assert_eq!(stored.album_name(), Some("Trips"));
        assert!(stored.path.ends_with(".png"));
        assert!(backend.objects.borrow().contains(&format!("u1/{}", stored.path)));
    }

    #[tokio::test]
    async fn text_only_post_skips_upload() {
        let backend = FakeBackend::new();
        let draft = PostDraft {
            description: "hello".into(),
            ..PostDraft::default()
        };
        create_post(&backend, "u1", &draft).await.expect("created");
        assert_eq!(backend.calls(), ["insert_photo"]);
        assert!(backend.photos.borrow()[0].path.is_empty());
    }

    #[tokio::test]
    async fn blank_description_is_rejected_before_upload() {
        let backend = FakeBackend::new();
        let draft = PostDraft {
            description: " ".into(),
            album: AlbumChoice::None,
            image: Some(image()),
        };
        let err = create_post(&backend, "u1", &draft).await.expect_err("invalid");
        assert_eq!(err, BackendError::validation("Description is required"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_aborts_insert() {
        let backend = FakeBackend::new();
        backend.fail_next(
            "upload_object",
            BackendError::Rejected {
                status: 413,
                message: "Payload too large".into(),
            },
        );
        let draft = PostDraft {
            description: "big".into(),
            album: AlbumChoice::Existing(4),
            image: Some(image()),
        };
        let err = create_post(&backend, "u1", &draft).await.expect_err("fails");
        assert_eq!(err.to_string(), "Payload too large");
        assert!(backend.photos.borrow().is_empty());
    }

    #[tokio::test]
    async fn create_album_returns_id_for_selection() {
        let backend = FakeBackend::new();
        let first = create_album(&backend, "u1", " Pets ").await.expect("album");
        let second = create_album(&backend, "u1", "Food").await.expect("album");
        assert_eq!(first.name, "Pets");
        assert_ne!(first.id, second.id);
        assert_eq!(load_albums(&backend, "u1").await.expect("albums").len(), 2);
        assert!(create_album(&backend, "u1", "").await.is_err());
    }
}
