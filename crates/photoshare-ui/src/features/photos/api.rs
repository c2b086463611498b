//! Backend calls for photo lists.

use photoshare_models::Photo;

use crate::core::backend::{Backend, BackendError};
use crate::core::filters::FeedFilters;
use crate::core::paging::{FetchTicket, PageSlice, PagedList};

/// Fetch the window described by `ticket`.
///
/// # Errors
///
/// Propagates backend failures unchanged.
pub async fn fetch_page(
    backend: &dyn Backend,
    ticket: &FetchTicket<FeedFilters>,
) -> Result<PageSlice<Photo>, BackendError> {
    backend.list_photos(&ticket.filters, ticket.window).await
}

/// Remove the stored object, then the row.
///
/// # Errors
///
/// Fails as soon as either step fails; nothing is rolled back.
pub async fn delete_photo(backend: &dyn Backend, photo: &Photo) -> Result<(), BackendError> {
    if !photo.path.is_empty() {
        backend.remove_object(&photo.user_id, &photo.path).await?;
    }
    backend.delete_photo_row(&photo.id).await?;
    tracing::info!(photo_id = %photo.id, "photo deleted");
    Ok(())
}

/// Drop a deleted photo from a list.
pub fn forget_photo<F: Clone + PartialEq>(list: &mut PagedList<Photo, F>, photo_id: &str) {
    list.remove_where(|photo| photo.id == photo_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paging::{ApplyOutcome, FEED_PAGE_SIZE};
    use crate::core::testing::{FakeBackend, photo};

    fn seeded(count: i64) -> FakeBackend {
        let backend = FakeBackend::new();
        for index in 0..count {
            let owner = if index % 2 == 0 { "u1" } else { "u2" };
            let row = photo(&format!("p{index}"), owner, index);
            backend.objects.borrow_mut().insert(format!("{owner}/{}", row.path));
            backend.photos.borrow_mut().push(row);
        }
        backend
    }

    #[tokio::test]
    async fn feed_reaches_end_after_three_pages() {
        let backend = seeded(14);
        let mut list = PagedList::new(FEED_PAGE_SIZE, FeedFilters::default());
        let mut ticket = list.set_filters(FeedFilters::default());
        loop {
            let result = fetch_page(&backend, &ticket).await;
            assert_eq!(list.apply(&ticket, result), ApplyOutcome::Applied);
            match list.load_more() {
                Some(next) => ticket = next,
                None => break,
            }
        }
        assert_eq!(list.items().len(), 14);
        assert_eq!(list.page(), 2);
        assert!(!list.has_more());
        assert_eq!(list.items()[0].id, "p13");
    }

    #[tokio::test]
    async fn user_filter_narrows_results() {
        let backend = seeded(5);
        let mut list = PagedList::new(FEED_PAGE_SIZE, FeedFilters::default());
        let ticket = list.set_filters(FeedFilters::for_user("u2"));
        let result = fetch_page(&backend, &ticket).await;
        list.apply(&ticket, result);
        assert!(list.items().iter().all(|photo| photo.user_id == "u2"));
        assert_eq!(list.total(), Some(2));
    }

    #[tokio::test]
    async fn delete_removes_object_then_row() {
        let backend = seeded(3);
        let mut list = PagedList::new(FEED_PAGE_SIZE, FeedFilters::default());
        let ticket = list.reload();
        list.apply(&ticket, fetch_page(&backend, &ticket).await);

        let target = list.items()[1].clone();
        delete_photo(&backend, &target).await.expect("delete");
        forget_photo(&mut list, &target.id);

        assert_eq!(backend.calls()[1..], ["remove_object", "delete_photo_row"]);
        assert!(!backend.objects.borrow().contains(&format!("{}/{}", target.user_id, target.path)));
        assert!(list.items().iter().all(|photo| photo.id != target.id));
        assert_eq!(list.total(), Some(2));
    }

    #[tokio::test]
    async fn paging_after_delete_shows_every_remaining_row() {
        let backend = seeded(8);
        let mut list = PagedList::new(FEED_PAGE_SIZE, FeedFilters::default());
        let mut ticket = list.reload();
        list.apply(&ticket, fetch_page(&backend, &ticket).await);
        assert_eq!(list.items().len(), 6);

        let target = list.items()[0].clone();
        delete_photo(&backend, &target).await.expect("delete");
        forget_photo(&mut list, &target.id);

        while let Some(next) = list.load_more() {
            ticket = next;
            list.apply(&ticket, fetch_page(&backend, &ticket).await);
        }

        let shown: Vec<&str> = list.items().iter().map(|photo| photo.id.as_str()).collect();
        assert_eq!(shown, ["p6", "p5", "p4", "p3", "p2", "p1", "p0"]);
        assert_eq!(list.total(), Some(7));
        assert!(!list.has_more());
    }

    #[tokio::test]
    async fn failed_row_delete_leaves_list_untouched() {
        let backend = seeded(3);
        let mut list = PagedList::new(FEED_PAGE_SIZE, FeedFilters::default());
        let ticket = list.reload();
        list.apply(&ticket, fetch_page(&backend, &ticket).await);
        let target = list.items()[0].clone();

        backend.fail_next(
            "delete_photo_row",
            BackendError::Rejected {
                status: 403,
                message: "permission denied".into(),
            },
        );
        let result = delete_photo(&backend, &target).await;
        assert!(result.is_err());
        assert_eq!(list.items().len(), 3);
        assert_eq!(backend.photos.borrow().len(), 3);
    }

    #[tokio::test]
    async fn failed_object_removal_skips_row_delete() {
        let backend = seeded(1);
        let target = backend.photos.borrow()[0].clone();
        backend.fail_next("remove_object", BackendError::Transport("offline".into()));
        assert!(delete_photo(&backend, &target).await.is_err());
        assert_eq!(backend.calls(), ["remove_object"]);
        assert_eq!(backend.photos.borrow().len(), 1);
    }
}
