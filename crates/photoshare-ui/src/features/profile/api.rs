//! Backend calls for the profile page.

use futures_util::future::join;
use photoshare_models::ProfileUpdate;

use crate::core::backend::{Backend, BackendError};
use crate::features::profile::state::ProfileBundle;

/// Longest accepted display name, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 50;

/// Load the profile row and album summaries concurrently.
///
/// # Errors
///
/// Returns [`BackendError::NotFound`] when no profile exists, otherwise the
/// first backend failure.
pub async fn load_profile(backend: &dyn Backend, id: &str) -> Result<ProfileBundle, BackendError> {
    let (profile, albums) = join(backend.get_profile(id), backend.list_album_summaries(id)).await;
    let profile = profile?.ok_or(BackendError::NotFound)?;
    Ok(ProfileBundle {
        profile,
        albums: albums?,
    })
}

/// Validate and store a new display name; returns the stored value.
///
/// # Errors
///
/// Returns a validation error for blank or oversized names, otherwise
/// propagates backend failures.
pub async fn update_display_name(
    backend: &dyn Backend,
    id: &str,
    display_name: &str,
) -> Result<String, BackendError> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(BackendError::validation("Display name cannot be empty"));
    }
    if display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(BackendError::validation(format!(
            "Display name must be at most {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    backend
        .update_profile(
            id,
            &ProfileUpdate {
                display_name: display_name.to_string(),
            },
        )
        .await?;
    Ok(display_name.to_string())
}
