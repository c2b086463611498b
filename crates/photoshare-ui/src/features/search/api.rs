//! Backend calls for the search page.

use photoshare_models::{AlbumSearchRow, UserSearchRow};

use crate::core::backend::{Backend, BackendError};
use crate::core::paging::{FetchTicket, PageSlice};
use crate::core::search::{SearchCategory, SearchHit};

fn user_hit(backend: &dyn Backend, row: UserSearchRow) -> SearchHit {
    SearchHit {
        category: SearchCategory::User,
        preview_urls: row
            .preview_paths()
            .iter()
            .map(|path| backend.public_url(&row.id, path))
            .collect(),
        photo_count: row.photo_count(),
        album_count: Some(row.album_count()),
        owner_id: row.id.clone(),
        title: row.display_name,
        id: row.id,
    }
}

fn album_hit(backend: &dyn Backend, row: AlbumSearchRow) -> SearchHit {
    SearchHit {
        category: SearchCategory::Album,
        preview_urls: row
            .preview_paths()
            .iter()
            .map(|path| backend.public_url(&row.user_id, path))
            .collect(),
        photo_count: row.photo_count(),
        album_count: None,
        id: row.id.to_string(),
        title: row.name,
        owner_id: row.user_id,
    }
}

/// Fetch one window of user hits.
///
/// # Errors
///
/// Propagates backend failures unchanged.
pub async fn fetch_users(
    backend: &dyn Backend,
    ticket: &FetchTicket<String>,
) -> Result<PageSlice<SearchHit>, BackendError> {
    let slice = backend.search_users(&ticket.filters, ticket.window).await?;
    Ok(PageSlice {
        items: slice
            .items
            .into_iter()
            .map(|row| user_hit(backend, row))
            .collect(),
        total: slice.total,
    })
}

/// Fetch one window of album hits.
///
/// # Errors
///
/// Propagates backend failures unchanged.
pub async fn fetch_albums(
    backend: &dyn Backend,
    ticket: &FetchTicket<String>,
) -> Result<PageSlice<SearchHit>, BackendError> {
    let slice = backend.search_albums(&ticket.filters, ticket.window).await?;
    Ok(PageSlice {
        items: slice
            .items
            .into_iter()
            .map(|row| album_hit(backend, row))
            .collect(),
        total: slice.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::{SearchController, SearchEffect};
    use crate::core::testing::{FakeBackend, photo};
    use photoshare_models::Album;

    fn backend() -> FakeBackend {
        let backend = FakeBackend::new();
        backend.add_user("u1", "anna@example.com", "secret1", "Anna");
        backend.add_user("u2", "bob@example.com", "secret1", "Bob");
        backend.albums.borrow_mut().push(Album {
            id: 1,
            user_id: "u2".into(),
            name: "Annapurna trek".into(),
        });
        for index in 0..4 {
            let mut row = photo(&format!("p{index}"), "u1", index);
            row.album_id = None;
            backend.photos.borrow_mut().push(row);
        }
        let mut trek = photo("t1", "u2", 9);
        trek.album_id = Some(1);
        backend.photos.borrow_mut().push(trek);
        backend
    }

    #[tokio::test]
    async fn merged_results_list_users_then_albums() {
        let backend = backend();
        let mut search = SearchController::new();
        let SearchEffect::Debounce { generation, .. } = search.set_query("ann") else {
            panic!("expected debounce");
        };
        let fetch = search.fire(generation).expect("fetch");
        let users = fetch.users.expect("users");
        let albums = fetch.albums.expect("albums");
        let album_result = fetch_albums(&backend, &albums).await;
        let user_result = fetch_users(&backend, &users).await;
        search.apply_albums(&albums, album_result);
        search.apply_users(&users, user_result);

        let hits: Vec<&SearchHit> = search.results().collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].category, SearchCategory::User);
        assert_eq!(hits[0].title, "Anna");
        assert_eq!(hits[0].photo_count, 4);
        assert_eq!(hits[0].album_count, Some(0));
        assert_eq!(hits[0].preview_urls.len(), 3);
        assert!(hits[0].preview_urls[0].starts_with("https://cdn.test/u1/"));

        assert_eq!(hits[1].category, SearchCategory::Album);
        assert_eq!(hits[1].id, "1");
        assert_eq!(hits[1].owner_id, "u2");
        assert_eq!(hits[1].preview_urls, ["https://cdn.test/u2/t1.jpg"]);
        assert!(!search.has_more());
    }

    #[tokio::test]
    async fn failures_surface_as_controller_error() {
        let backend = backend();
        backend.fail_next("search_users", BackendError::Transport("timeout".into()));
        let mut search = SearchController::new();
        let SearchEffect::Debounce { generation, .. } = search.set_query("bob") else {
            panic!("expected debounce");
        };
        let fetch = search.fire(generation).expect("fetch");
        let users = fetch.users.expect("users");
        search.apply_users(&users, fetch_users(&backend, &users).await);
        assert_eq!(search.error(), Some("network error: timeout"));
    }
}
