//! Filter-to-URL synchronisation for the feed.

use crate::core::filters::{FeedFilters, FeedQuery};
use crate::core::throttle::{Throttle, ThrottleDecision, URL_WRITE_INTERVAL_MS};

/// Instruction for the view after the filters changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlWrite {
    /// Replace the URL query now.
    Now(FeedQuery),
    /// Start a timer; call [`FeedUrlSync::flush`] when it fires.
    After {
        /// Timer delay.
        delay_ms: u32,
    },
    /// A trailing write is already scheduled.
    Pending,
}

/// Throttled mirror of the feed filters into the URL query.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedUrlSync {
    throttle: Throttle,
    latest: FeedFilters,
}

impl Default for FeedUrlSync {
    fn default() -> Self {
        Self::new(FeedFilters::default())
    }
}

impl FeedUrlSync {
    /// Start from the filters currently reflected in the URL.
    #[must_use]
    pub fn new(initial: FeedFilters) -> Self {
        Self {
            throttle: Throttle::new(URL_WRITE_INTERVAL_MS),
            latest: initial,
        }
    }

    /// Record new filters at `now_ms`.
    pub fn update(&mut self, filters: FeedFilters, now_ms: f64) -> UrlWrite {
        self.latest = filters;
        match self.throttle.offer(now_ms) {
            ThrottleDecision::EmitNow => UrlWrite::Now(self.latest.to_query()),
            ThrottleDecision::Schedule { delay_ms } => UrlWrite::After { delay_ms },
            ThrottleDecision::Coalesced => UrlWrite::Pending,
        }
    }

    /// Trailing write: the latest filters as a URL query.
    pub fn flush(&mut self, now_ms: f64) -> FeedQuery {
        self.throttle.fired(now_ms);
        self.latest.to_query()
    }

    /// Drop a pending trailing write.
    pub fn cancel(&mut self) {
        self.throttle.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_edits_write_leading_and_latest_trailing() {
        let mut sync = FeedUrlSync::default();
        assert_eq!(
            sync.update(FeedFilters::new(Some("a"), None), 0.0),
            UrlWrite::Now(FeedQuery {
                profile: Some("a".into()),
                album: None
            })
        );
        assert_eq!(
            sync.update(FeedFilters::new(Some("ab"), None), 50.0),
            UrlWrite::After { delay_ms: 450 }
        );
        assert_eq!(
            sync.update(FeedFilters::new(Some("abc"), Some("2")), 80.0),
            UrlWrite::Pending
        );
        assert_eq!(
            sync.flush(500.0),
            FeedQuery {
                profile: Some("abc".into()),
                album: Some("2".into())
            }
        );
    }

    #[test]
    fn cleared_filters_write_empty_query() {
        let mut sync = FeedUrlSync::new(FeedFilters::for_user("u1"));
        assert_eq!(
            sync.update(FeedFilters::default(), 0.0),
            UrlWrite::Now(FeedQuery::default())
        );
    }
}
