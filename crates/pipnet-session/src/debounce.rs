//! Debounced rebuild scheduling.
//!
//! Field edits arrive per keystroke; re-encoding runs once the input settles.
//! A schedule call overwrites any pending deadline (last write wins), so
//! intermediate keystroke values are never re-encoded. The clock is passed in
//! by the caller, which keeps tests deterministic.

use std::time::{Duration, Instant};

/// Default settle delay before a rebuild fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            deadline: None,
        }
    }

    /// Schedule (or reschedule) the deadline relative to `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Consume the deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline, reporting whether one existed.
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        d.schedule(t0);
        assert!(!d.fire_if_due(t0 + Duration::from_millis(50)));
        assert!(d.fire_if_due(t0 + Duration::from_millis(100)));
        // One-shot.
        assert!(!d.fire_if_due(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_reschedule_cancels_prior_deadline() {
        let mut d = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        d.schedule(t0);
        d.schedule(t0 + Duration::from_millis(80));
        // The first deadline has passed but was superseded.
        assert!(!d.fire_if_due(t0 + Duration::from_millis(120)));
        assert!(d.fire_if_due(t0 + Duration::from_millis(180)));
    }

    #[test]
    fn test_take_pending() {
        let mut d = Debouncer::default();
        assert!(!d.take_pending());
        d.schedule(Instant::now());
        assert!(d.is_pending());
        assert!(d.take_pending());
        assert!(!d.is_pending());
    }
}
