//! Leading-edge throttle with a single trailing emission.
//!
//! The clock is passed in so the policy can be tested without timers; the
//! caller owns the actual timeout and reports back through [`Throttle::fired`].

/// Interval between URL writes for the feed filters.
pub const URL_WRITE_INTERVAL_MS: u32 = 500;

/// What the caller should do with an offered value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Emit the value immediately.
    EmitNow,
    /// Schedule a trailing emission of the latest value after `delay_ms`.
    Schedule {
        /// Milliseconds until the window closes.
        delay_ms: u32,
    },
    /// A trailing emission is already scheduled and will pick up the latest value.
    Coalesced,
}

/// Throttle state.
#[derive(Clone, Debug, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    last_emit_ms: Option<f64>,
    scheduled: bool,
}

impl Throttle {
    /// Create a throttle allowing one emission per `interval_ms`.
    #[must_use]
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms),
            last_emit_ms: None,
            scheduled: false,
        }
    }

    /// Offer a new value at `now_ms`.
    pub fn offer(&mut self, now_ms: f64) -> ThrottleDecision {
        if self.scheduled {
            return ThrottleDecision::Coalesced;
        }
        match self.last_emit_ms {
            Some(last) if now_ms - last < self.interval_ms => {
                self.scheduled = true;
                let remaining = (self.interval_ms - (now_ms - last)).ceil().max(0.0);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let delay_ms = remaining as u32;
                ThrottleDecision::Schedule { delay_ms }
            }
            _ => {
                self.last_emit_ms = Some(now_ms);
                ThrottleDecision::EmitNow
            }
        }
    }

    /// Record that the scheduled trailing emission ran at `now_ms`.
    pub fn fired(&mut self, now_ms: f64) {
        self.scheduled = false;
        self.last_emit_ms = Some(now_ms);
    }

    /// Drop any pending trailing emission (teardown).
    pub fn cancel(&mut self) {
        self.scheduled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_emits_leading_then_single_trailing() {
        let mut throttle = Throttle::new(URL_WRITE_INTERVAL_MS);
        assert_eq!(throttle.offer(0.0), ThrottleDecision::EmitNow);
        assert_eq!(
            throttle.offer(100.0),
            ThrottleDecision::Schedule { delay_ms: 400 }
        );
        assert_eq!(throttle.offer(200.0), ThrottleDecision::Coalesced);
        assert_eq!(throttle.offer(499.0), ThrottleDecision::Coalesced);
        throttle.fired(500.0);
        assert_eq!(
            throttle.offer(600.0),
            ThrottleDecision::Schedule { delay_ms: 400 }
        );
    }

    #[test]
    fn quiet_period_emits_immediately() {
        let mut throttle = Throttle::new(URL_WRITE_INTERVAL_MS);
        assert_eq!(throttle.offer(0.0), ThrottleDecision::EmitNow);
        assert_eq!(throttle.offer(750.0), ThrottleDecision::EmitNow);
    }

    #[test]
    fn cancel_allows_new_schedule() {
        let mut throttle = Throttle::new(URL_WRITE_INTERVAL_MS);
        throttle.offer(0.0);
        assert!(matches!(throttle.offer(10.0), ThrottleDecision::Schedule { .. }));
        throttle.cancel();
        assert!(matches!(throttle.offer(20.0), ThrottleDecision::Schedule { .. }));
    }
}
