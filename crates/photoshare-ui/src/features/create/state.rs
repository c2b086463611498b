//! Post draft and album picker state.

use photoshare_models::{Album, AlbumId};
use uuid::Uuid;

/// Album selection for a new post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AlbumChoice {
    /// Post outside any album.
    #[default]
    None,
    /// Existing album.
    Existing(AlbumId),
    /// Album to create on submit.
    New(String),
}

/// Image picked in the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    /// Name of the file on the user's machine.
    pub file_name: String,
    /// MIME type reported by the browser.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Form contents for a new post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Description text.
    pub description: String,
    /// Album selection.
    pub album: AlbumChoice,
    /// Optional image.
    pub image: Option<ImageUpload>,
}

/// One row of the album picker dropdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlbumOption {
    /// Hint shown while nothing is typed.
    Hint,
    /// Offer to create an album with the typed name.
    Create(String),
    /// Clear the selection.
    NoAlbum,
    /// Pick an existing album.
    Existing {
        /// Album id.
        id: AlbumId,
        /// Album name.
        name: String,
    },
}

/// Dropdown rows for the typed text.
#[must_use]
pub fn album_options(albums: &[Album], typed: &str) -> Vec<AlbumOption> {
    let typed = typed.trim();
    let mut options = Vec::with_capacity(albums.len() + 2);
    if typed.is_empty() {
        options.push(AlbumOption::Hint);
    } else if !albums.iter().any(|album| album.name == typed) {
        options.push(AlbumOption::Create(typed.to_string()));
    }
    options.push(AlbumOption::NoAlbum);
    options.extend(albums.iter().map(|album| AlbumOption::Existing {
        id: album.id,
        name: album.name.clone(),
    }));
    options
}

/// Interpret free text typed into the picker.
#[must_use]
pub fn resolve_typed_album(albums: &[Album], typed: &str) -> AlbumChoice {
    let typed = typed.trim();
    if typed.is_empty() {
        return AlbumChoice::None;
    }
    albums
        .iter()
        .find(|album| album.name == typed)
        .map_or_else(
            || AlbumChoice::New(typed.to_string()),
            |album| AlbumChoice::Existing(album.id),
        )
}

/// Lower-cased extension of a file name, if it has one.
#[must_use]
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Random object name keeping the original extension.
#[must_use]
pub fn upload_file_name(original: &str) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    match file_extension(original) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}
