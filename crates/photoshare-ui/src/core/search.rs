//! Debounced two-category search controller.
//!
//! # Design
//! - Users and albums are independent [`PagedList`]s keyed by the trimmed term,
//!   so each keeps its own total and `has_more`.
//! - Typing bumps a debounce generation; only the timer for the latest
//!   generation may fire a fetch.
//! - Load-more is issued immediately and only for categories with more rows.

use crate::core::backend::BackendError;
use crate::core::paging::{ApplyOutcome, FetchTicket, PageSlice, PagedList, SEARCH_PAGE_SIZE};

/// Quiet period before a typed query is executed.
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Kind of search hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchCategory {
    /// A profile matched by display name.
    User,
    /// An album matched by name.
    Album,
}

/// One search result row, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    /// Result kind.
    pub category: SearchCategory,
    /// Profile or album id.
    pub id: String,
    /// Display name or album name.
    pub title: String,
    /// Owning user (the user itself for user hits).
    pub owner_id: String,
    /// Number of photos.
    pub photo_count: u64,
    /// Number of albums; user hits only.
    pub album_count: Option<u64>,
    /// Up to three preview image URLs.
    pub preview_urls: Vec<String>,
}

/// What the view should do after the query changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEffect {
    /// Nothing to fetch; results were cleared.
    Clear,
    /// Start a timer and call [`SearchController::fire`] with `generation`.
    Debounce {
        /// Debounce generation to hand back.
        generation: u64,
        /// Timer delay.
        delay_ms: u32,
    },
}

/// Fetches to perform, per category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFetch {
    /// User sub-query ticket.
    pub users: Option<FetchTicket<String>>,
    /// Album sub-query ticket.
    pub albums: Option<FetchTicket<String>>,
}

impl SearchFetch {
    /// Whether there is nothing to fetch.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.users.is_none() && self.albums.is_none()
    }
}

/// Search page state.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchController {
    query: String,
    debounce_generation: u64,
    pending: bool,
    users: PagedList<SearchHit, String>,
    albums: PagedList<SearchHit, String>,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    /// Empty controller.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            debounce_generation: 0,
            pending: false,
            users: PagedList::new(SEARCH_PAGE_SIZE, String::new()),
            albums: PagedList::new(SEARCH_PAGE_SIZE, String::new()),
        }
    }

    /// Record a new query value and reset results.
    pub fn set_query(&mut self, query: &str) -> SearchEffect {
        self.query = query.to_string();
        self.debounce_generation += 1;
        let term = query.trim().to_string();
        self.users.reset(term.clone());
        self.albums.reset(term.clone());
        if term.is_empty() {
            self.pending = false;
            return SearchEffect::Clear;
        }
        self.pending = true;
        SearchEffect::Debounce {
            generation: self.debounce_generation,
            delay_ms: SEARCH_DEBOUNCE_MS,
        }
    }

    /// Debounce timer elapsed for `generation`. Returns `None` when a newer
    /// query superseded it.
    pub fn fire(&mut self, generation: u64) -> Option<SearchFetch> {
        if generation != self.debounce_generation || !self.pending {
            tracing::debug!(
                generation,
                current = self.debounce_generation,
                "ignoring superseded search timer"
            );
            return None;
        }
        self.pending = false;
        let term = self.query.trim().to_string();
        Some(SearchFetch {
            users: Some(self.users.set_filters(term.clone())),
            albums: Some(self.albums.set_filters(term)),
        })
    }

    /// Next page for every category that still has more rows.
    pub fn load_more(&mut self) -> SearchFetch {
        if self.pending {
            return SearchFetch::default();
        }
        SearchFetch {
            users: self.users.load_more(),
            albums: self.albums.load_more(),
        }
    }

    /// Apply a user sub-query result.
    pub fn apply_users(
        &mut self,
        ticket: &FetchTicket<String>,
        result: Result<PageSlice<SearchHit>, BackendError>,
    ) -> ApplyOutcome {
        self.users.apply(ticket, result)
    }

    /// Apply an album sub-query result.
    pub fn apply_albums(
        &mut self,
        ticket: &FetchTicket<String>,
        result: Result<PageSlice<SearchHit>, BackendError>,
    ) -> ApplyOutcome {
        self.albums.apply(ticket, result)
    }

    /// Invalidate timers and in-flight fetches (teardown).
    pub fn cancel(&mut self) {
        self.debounce_generation += 1;
        self.pending = false;
        self.users.cancel();
        self.albums.cancel();
    }

    /// Raw query as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// User hits followed by album hits.
    pub fn results(&self) -> impl Iterator<Item = &SearchHit> {
        self.users.items().iter().chain(self.albums.items())
    }

    /// Whether any category can load another page.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.users.has_more() || self.albums.has_more()
    }

    /// Waiting for the debounce timer or a fetch.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending || self.users.is_loading() || self.albums.is_loading()
    }

    /// First recorded sub-query error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.users.error().or_else(|| self.albums.error())
    }

    /// Whether the current term returned nothing and nothing is pending.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        !self.query.trim().is_empty()
            && !self.is_loading()
            && self.error().is_none()
            && self.users.items().is_empty()
            && self.albums.items().is_empty()
    }
}
