//! Profile page state.

use photoshare_models::{AlbumSummary, Photo, Profile};

use crate::core::backend::BackendError;

/// Profile row plus album summaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileBundle {
    /// Profile row.
    pub profile: Profile,
    /// Albums with counts and previews.
    pub albums: Vec<AlbumSummary>,
}

/// Load status of the profile page.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ProfileState {
    /// Fetch in flight.
    #[default]
    Loading,
    /// No profile with that id.
    NotFound,
    /// Fetch failed.
    Failed(String),
    /// Loaded.
    Ready(ProfileBundle),
}

impl ProfileState {
    /// State for a finished load.
    #[must_use]
    pub fn from_result(result: Result<ProfileBundle, BackendError>) -> Self {
        match result {
            Ok(bundle) => Self::Ready(bundle),
            Err(BackendError::NotFound) => Self::NotFound,
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    /// Patch the display name after a confirmed update.
    pub fn rename(&mut self, display_name: &str) {
        if let Self::Ready(bundle) = self {
            bundle.profile.display_name = display_name.to_string();
        }
    }

    /// Patch the album summaries after one of the owner's photos was deleted.
    ///
    /// The album count drops by one and a preview pointing at the removed
    /// object is cleared until the summaries are reloaded.
    pub fn photo_removed(&mut self, photo: &Photo) {
        let (Self::Ready(bundle), Some(album_id)) = (self, photo.album_id) else {
            return;
        };
        let Some(album) = bundle.albums.iter_mut().find(|album| album.id == album_id) else {
            return;
        };
        if let Some(counted) = album.photo_counts.first_mut() {
            counted.count = counted.count.saturating_sub(1);
        }
        if album.preview_path() == Some(photo.path.as_str()) {
            album.preview_photos.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::photo;
    use photoshare_models::{CountRow, PathRow};

    fn bundle() -> ProfileBundle {
        ProfileBundle {
            profile: Profile {
                id: "u1".to_string(),
                display_name: "alice".to_string(),
                avatar_url: None,
            },
            albums: Vec::new(),
        }
    }

    fn album(id: i64, count: u64, preview: &str) -> AlbumSummary {
        AlbumSummary {
            id,
            name: format!("album {id}"),
            photo_counts: vec![CountRow { count }],
            preview_photos: vec![PathRow {
                path: Some(preview.to_string()),
            }],
        }
    }

    #[test]
    fn deleted_photo_patches_its_album_summary() {
        let mut loaded = bundle();
        loaded.albums = vec![album(1, 3, "p1.jpg"), album(2, 2, "p9.jpg")];
        let mut state = ProfileState::from_result(Ok(loaded));

        let mut removed = photo("p1", "u1", 0);
        removed.album_id = Some(1);
        state.photo_removed(&removed);

        let ProfileState::Ready(patched) = &state else {
            panic!("expected a loaded profile");
        };
        assert_eq!(patched.albums[0].photo_count(), 2);
        assert_eq!(patched.albums[0].preview_path(), None);
        assert_eq!(patched.albums[1].photo_count(), 2);
        assert_eq!(patched.albums[1].preview_path(), Some("p9.jpg"));
    }

    #[test]
    fn photo_outside_albums_leaves_summaries_alone() {
        let mut loaded = bundle();
        loaded.albums = vec![album(1, 3, "p1.jpg")];
        let mut state = ProfileState::from_result(Ok(loaded.clone()));
        state.photo_removed(&photo("p1", "u1", 0));
        assert_eq!(state, ProfileState::Ready(loaded));
    }

    #[test]
    fn not_found_is_distinct_from_failure() {
        assert_eq!(
            ProfileState::from_result(Err(BackendError::NotFound)),
            ProfileState::NotFound
        );
        assert_eq!(
            ProfileState::from_result(Err(BackendError::Decode("bad".to_string()))),
            ProfileState::Failed("unexpected response: bad".to_string())
        );
    }

    #[test]
    fn rename_only_touches_loaded_profiles() {
        let mut state = ProfileState::from_result(Ok(bundle()));
        state.rename("bob");
        let ProfileState::Ready(loaded) = &state else {
            panic!("expected a loaded profile");
        };
        assert_eq!(loaded.profile.display_name, "bob");

        let mut loading = ProfileState::Loading;
        loading.rename("bob");
        assert_eq!(loading, ProfileState::Loading);
    }
}
