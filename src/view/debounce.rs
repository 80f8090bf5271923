use std::time::{Duration, Instant};

/// Trailing-edge debouncer: fires once after `quiet` has elapsed since the last trigger.
///
/// Time is passed in by the caller so event loops and tests control the clock.
#[derive(Clone, Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending_since: Option<Instant>,
}

impl Debouncer {
    /// Create an idle debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending_since: None,
        }
    }

    /// Quiet period.
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record an event at `now`, restarting the quiet period.
    pub fn trigger(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    /// Return `true` exactly once when the quiet period has elapsed since the last trigger.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.saturating_duration_since(since) >= self.quiet => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// Whether an event is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Drop any pending event.
    pub fn cancel(&mut self) {
        self.pending_since = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/debounce.rs"]
mod tests;
