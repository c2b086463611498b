//! Paginated list controller shared by the feed, profile grid and search.
//!
//! # Design
//! - Every fetch is described by a [`FetchTicket`] carrying the generation it
//!   was issued under; results from an older generation are dropped.
//! - `page` only advances when a page actually lands, so a failed load-more
//!   retries the same window.
//! - Local removals patch the reported total and shift later windows back by
//!   the number of removed rows, so the next page starts where the server's
//!   remaining rows now begin.

use crate::core::backend::BackendError;

/// Page size for the feed and the profile photo grid.
pub const FEED_PAGE_SIZE: u32 = 6;
/// Page size for each search sub-query.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Zero-based page window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    /// Zero-based page index.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Rows removed locally since the first page, subtracted from the offset.
    pub shift: u64,
}

impl PageWindow {
    /// First row offset covered by the window.
    #[must_use]
    pub const fn start(self) -> u64 {
        (self.page as u64 * self.page_size as u64).saturating_sub(self.shift)
    }

    /// Last row offset covered by the window (inclusive, as range headers expect).
    #[must_use]
    pub const fn end_inclusive(self) -> u64 {
        (self.start() + self.page_size as u64).saturating_sub(1)
    }
}

/// One page of rows plus the total the server reported for the whole query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSlice<T> {
    /// Rows in server order.
    pub items: Vec<T>,
    /// Exact count for the filter, when the server reported one.
    pub total: Option<u64>,
}

/// Describes a fetch the view must perform and hand back to [`PagedList::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket<F> {
    /// Generation the ticket was issued under.
    pub generation: u64,
    /// Filters captured at issue time.
    pub filters: F,
    /// Window to request.
    pub window: PageWindow,
    /// Whether results extend the current items or replace them.
    pub append: bool,
}

/// Whether a resolved fetch was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// State was updated from the result.
    Applied,
    /// The ticket belonged to an older generation; the result was discarded.
    Stale,
}

/// Paginated list state for a filter type `F`.
#[derive(Clone, Debug, PartialEq)]
pub struct PagedList<T, F> {
    items: Vec<T>,
    page: u32,
    page_size: u32,
    loading: bool,
    error: Option<String>,
    has_more: bool,
    filters: F,
    total: Option<u64>,
    removed: u64,
    generation: u64,
}

impl<T, F: Clone + PartialEq> PagedList<T, F> {
    /// Create an idle, empty list. Call [`PagedList::set_filters`] or
    /// [`PagedList::reload`] to issue the first fetch.
    #[must_use]
    pub const fn new(page_size: u32, filters: F) -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            page_size,
            loading: false,
            error: None,
            has_more: false,
            filters,
            total: None,
            removed: 0,
            generation: 0,
        }
    }

    /// Replace the filters and issue a first-page ticket under a new generation.
    pub fn set_filters(&mut self, filters: F) -> FetchTicket<F> {
        self.reset(filters);
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            filters: self.filters.clone(),
            window: self.window(0),
            append: false,
        }
    }

    /// Re-issue the first page for the current filters.
    pub fn reload(&mut self) -> FetchTicket<F> {
        let filters = self.filters.clone();
        self.set_filters(filters)
    }

    /// Replace the filters and clear results without issuing a fetch.
    pub fn reset(&mut self, filters: F) {
        self.generation += 1;
        self.filters = filters;
        self.items.clear();
        self.page = 0;
        self.total = None;
        self.removed = 0;
        self.has_more = false;
        self.error = None;
        self.loading = false;
    }

    /// Issue a ticket for the next page, or `None` when there is nothing more to
    /// load or a fetch is already in flight.
    pub fn load_more(&mut self) -> Option<FetchTicket<F>> {
        if !self.has_more || self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(FetchTicket {
            generation: self.generation,
            filters: self.filters.clone(),
            window: self.window(self.page + 1),
            append: true,
        })
    }

    /// Apply a resolved fetch. Results for a superseded generation are ignored.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket<F>,
        result: Result<PageSlice<T>, BackendError>,
    ) -> ApplyOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                page = ticket.window.page,
                "dropping stale page result"
            );
            return ApplyOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(slice) => {
                let returned = slice.items.len() as u64;
                if ticket.append {
                    self.items.extend(slice.items);
                } else {
                    self.items = slice.items;
                }
                self.page = ticket.window.page;
                self.total = slice.total;
                self.has_more = slice
                    .total
                    .is_some_and(|total| ticket.window.start() + returned < total);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(page = ticket.window.page, error = %err, "page fetch failed");
                self.error = Some(err.to_string());
                if !ticket.append {
                    self.items.clear();
                    self.total = None;
                    self.has_more = false;
                }
            }
        }
        ApplyOutcome::Applied
    }

    /// Invalidate outstanding tickets (component teardown).
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    /// Remove matching items, decrement the reported total and shift the
    /// following windows so no server row is skipped.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        let removed = before - self.items.len();
        if removed > 0 {
            self.removed += removed as u64;
            self.total = self
                .total
                .map(|total| total.saturating_sub(removed as u64));
            let loaded = self.items.len() as u64;
            self.has_more = self.total.is_some_and(|total| loaded < total);
        }
        removed
    }

    /// Accumulated items in server order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Index of the last successfully loaded page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the most recent failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether another page is available.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Active filters.
    #[must_use]
    pub const fn filters(&self) -> &F {
        &self.filters
    }

    /// Last reported total, adjusted for local removals.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    const fn window(&self, page: u32) -> PageWindow {
        PageWindow {
            page,
            page_size: self.page_size,
            shift: self.removed,
        }
    }
}
