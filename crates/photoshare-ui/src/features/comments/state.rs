//! Comment thread state.

use photoshare_models::Comment;

use crate::core::backend::BackendError;

/// Comments for one photo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentThread {
    photo_id: String,
    comments: Vec<Comment>,
    loading: bool,
    error: Option<String>,
}

impl CommentThread {
    /// Empty thread in the loading state.
    #[must_use]
    pub fn new(photo_id: impl Into<String>) -> Self {
        Self {
            photo_id: photo_id.into(),
            comments: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Apply the initial load. Results for another photo are ignored.
    pub fn apply_loaded(&mut self, photo_id: &str, result: Result<Vec<Comment>, BackendError>) {
        if photo_id != self.photo_id {
            return;
        }
        self.loading = false;
        match result {
            Ok(comments) => {
                self.comments = comments;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Append a stored comment.
    pub fn push(&mut self, comment: Comment) {
        if comment.photo_id == self.photo_id {
            self.comments.push(comment);
        }
    }

    /// Remove a deleted comment.
    pub fn remove(&mut self, comment_id: &str) {
        self.comments.retain(|comment| comment.id != comment_id);
    }

    /// Photo the thread belongs to.
    #[must_use]
    pub fn photo_id(&self) -> &str {
        &self.photo_id
    }

    /// Comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Whether the initial load is pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load failure message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::timestamp;

    fn comment(id: &str, photo_id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            photo_id: photo_id.to_string(),
            user_id: "u1".to_string(),
            text: format!("comment {id}"),
            created_at: timestamp(0),
            author: None,
        }
    }

    #[test]
    fn load_for_other_photo_is_ignored() {
        let mut thread = CommentThread::new("p1");
        thread.apply_loaded("p2", Ok(vec![comment("c1", "p2")]));
        assert!(thread.is_loading());
        assert!(thread.comments().is_empty());
    }

    #[test]
    fn push_appends_and_remove_filters() {
        let mut thread = CommentThread::new("p1");
        thread.apply_loaded("p1", Ok(vec![comment("c1", "p1")]));
        thread.push(comment("c2", "p1"));
        thread.push(comment("c3", "elsewhere"));
        let ids: Vec<&str> = thread.comments().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2"]);

        thread.remove("c1");
        assert_eq!(thread.comments().len(), 1);
        assert_eq!(thread.comments()[0].id, "c2");
    }

    #[test]
    fn failed_load_records_message() {
        let mut thread = CommentThread::new("p1");
        thread.apply_loaded("p1", Err(BackendError::Transport("offline".to_string())));
        assert!(!thread.is_loading());
        assert_eq!(thread.error(), Some("network error: offline"));
    }
}
