//! Backend calls for comment threads.

use photoshare_models::{Comment, NewComment, Photo};

use crate::core::backend::{Backend, BackendError};

/// Longest accepted comment body, in characters.
pub const MAX_COMMENT_LEN: usize = 2_000;

/// Load the photo being discussed.
///
/// # Errors
///
/// Returns [`BackendError::NotFound`] when the photo does not exist.
pub async fn load_photo(backend: &dyn Backend, photo_id: &str) -> Result<Photo, BackendError> {
    backend
        .get_photo(photo_id)
        .await?
        .ok_or(BackendError::NotFound)
}

/// Load every comment for a photo, oldest first.
///
/// # Errors
///
/// Propagates backend failures unchanged.
pub async fn load_comments(
    backend: &dyn Backend,
    photo_id: &str,
) -> Result<Vec<Comment>, BackendError> {
    backend.list_comments(photo_id).await
}

/// Validate and insert a comment; returns the stored row with its author.
///
/// # Errors
///
/// Returns a validation error for blank or oversized text, otherwise
/// propagates backend failures.
pub async fn add_comment(
    backend: &dyn Backend,
    photo_id: &str,
    author_id: &str,
    text: &str,
) -> Result<Comment, BackendError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(BackendError::validation("Comment cannot be empty"));
    }
    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(BackendError::validation(format!(
            "Comment must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    backend
        .insert_comment(&NewComment {
            photo_id: photo_id.to_string(),
            user_id: author_id.to_string(),
            text: text.to_string(),
        })
        .await
}

/// Delete a comment.
///
/// # Errors
///
/// Propagates backend failures unchanged.
pub async fn delete_comment(backend: &dyn Backend, comment_id: &str) -> Result<(), BackendError> {
    backend.delete_comment(comment_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeBackend, photo, timestamp};
    use crate::features::comments::state::CommentThread;
    use photoshare_models::AuthorRef;

    fn backend() -> FakeBackend {
        let backend = FakeBackend::new();
        backend.add_user("u1", "ann@example.com", "secret1", "ann");
        backend.photos.borrow_mut().push(photo("p1", "u1", 0));
        for (index, text) in ["first", "second"].iter().enumerate() {
            backend.comments.borrow_mut().push(Comment {
                id: format!("c{index}"),
                photo_id: "p1".into(),
                user_id: "u1".into(),
                text: (*text).to_string(),
                created_at: timestamp(i64::try_from(index).unwrap_or_default()),
                author: Some(AuthorRef {
                    display_name: Some("ann".into()),
                }),
            });
        }
        backend
    }

    #[tokio::test]
    async fn added_comment_is_appended_with_author() {
        let backend = backend();
        let mut thread = CommentThread::new("p1");
        thread.apply_loaded("p1", load_comments(&backend, "p1").await);
        assert!(!thread.is_loading());
        assert_eq!(thread.comments().len(), 2);

        let stored = add_comment(&backend, "p1", "u1", "  nice  ").await.expect("insert");
        thread.push(stored);
        let last = thread.comments().last().expect("last");
        assert_eq!(last.text, "nice");
        assert_eq!(last.author_name(), Some("ann"));
        assert_eq!(thread.comments().len(), 3);
        assert!(
            thread
                .comments()
                .windows(2)
                .all(|pair| pair[0].created_at <= pair[1].created_at)
        );
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_locally() {
        let backend = backend();
        let err = add_comment(&backend, "p1", "u1", "   ").await.expect_err("blank");
        assert!(matches!(err, BackendError::Validation(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_filters_locally_after_success() {
        let backend = backend();
        let mut thread = CommentThread::new("p1");
        thread.apply_loaded("p1", load_comments(&backend, "p1").await);
        delete_comment(&backend, "c0").await.expect("delete");
        thread.remove("c0");
        assert_eq!(thread.comments().len(), 1);
        assert_eq!(thread.comments()[0].id, "c1");
    }

    #[tokio::test]
    async fn failed_delete_keeps_comment() {
        let backend = backend();
        let mut thread = CommentThread::new("p1");
        thread.apply_loaded("p1", load_comments(&backend, "p1").await);
        backend.fail_next("delete_comment", BackendError::Transport("offline".into()));
        if delete_comment(&backend, "c0").await.is_ok() {
            thread.remove("c0");
        }
        assert_eq!(thread.comments().len(), 2);
    }

    #[tokio::test]
    async fn missing_photo_is_not_found() {
        let backend = backend();
        assert_eq!(
            load_photo(&backend, "nope").await,
            Err(BackendError::NotFound)
        );
        assert_eq!(load_photo(&backend, "p1").await.expect("photo").id, "p1");
    }

    #[test]
    fn load_for_other_photo_is_ignored() {
        let mut thread = CommentThread::new("p1");
        thread.apply_loaded("p2", Ok(Vec::new()));
        assert!(thread.is_loading());
        thread.apply_loaded("p1", Err(BackendError::Transport("x".into())));
        assert_eq!(thread.error(), Some("network error: x"));
    }
}
