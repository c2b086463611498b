//! Feed filters and their URL query representation.
//!
//! # Design
//! - Filter state is normalised on entry: trimmed, empty becomes `None`.
//! - The query struct omits empty keys so shared links stay short.

use serde::{Deserialize, Serialize};

/// Active feed filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedFilters {
    /// Restrict to photos owned by this user.
    pub user_id: Option<String>,
    /// Restrict to photos in this album.
    pub album_id: Option<String>,
}

/// URL query keys for the feed route (`?profile=..&album=..`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Owner filter.
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Album filter.
    pub album: Option<String>,
}

fn normalise(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl FeedFilters {
    /// Build normalised filters.
    #[must_use]
    pub fn new(user_id: Option<&str>, album_id: Option<&str>) -> Self {
        Self {
            user_id: normalise(user_id),
            album_id: normalise(album_id),
        }
    }

    /// Filters restricted to a single owner.
    #[must_use]
    pub fn for_user(user_id: &str) -> Self {
        Self::new(Some(user_id), None)
    }

    /// Copy with the owner filter replaced.
    #[must_use]
    pub fn with_user(&self, user_id: &str) -> Self {
        Self::new(Some(user_id), self.album_id.as_deref())
    }

    /// Copy with the album filter replaced.
    #[must_use]
    pub fn with_album(&self, album_id: &str) -> Self {
        Self::new(self.user_id.as_deref(), Some(album_id))
    }

    /// Whether no filter is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.album_id.is_none()
    }

    /// Filters read from the URL query.
    #[must_use]
    pub fn from_query(query: &FeedQuery) -> Self {
        Self::new(query.profile.as_deref(), query.album.as_deref())
    }

    /// URL query for these filters.
    #[must_use]
    pub fn to_query(&self) -> FeedQuery {
        FeedQuery {
            profile: self.user_id.clone(),
            album: self.album_id.clone(),
        }
    }
}
