//! Trailing-edge debounce timer driven by an injected clock.

use std::time::{Duration, Instant};

/// Single pending deadline; a newer schedule replaces the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)starts the timer at `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the pending deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use std::time::{Duration, Instant};

    #[test]
    fn fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(start);

        assert!(!debouncer.fire_if_due(start + Duration::from_millis(299)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(300)));
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(900)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn newer_schedule_resets_instead_of_stacking() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(200));

        assert!(!debouncer.fire_if_due(start + Duration::from_millis(350)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.fire_if_due(start + Duration::from_secs(1)));
    }
}
