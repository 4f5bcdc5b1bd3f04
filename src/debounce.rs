//! Trailing-edge debouncing against a millisecond clock.
//!
//! Scheduling replaces whatever was pending, so only the latest value fires,
//! and only once the delay has elapsed since it was scheduled. The event loop
//! polls [`Debouncer::take_ready`] and uses [`Debouncer::deadline`] to bound
//! how long it may block waiting for input.

#[derive(Clone, Debug)]
/// Holds at most one pending value until its quiet period has passed.
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// Creates a debouncer firing `delay_ms` after the latest schedule.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Schedules `value`, cancelling any value still pending.
    pub fn schedule(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms));
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns the pending value once its delay has elapsed.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<T> {
        let (_, queued_at) = self.pending.as_ref()?;
        if now_ms.saturating_sub(*queued_at) >= self.delay_ms {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    #[must_use]
    /// Whether a value is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    /// Clock time at which the pending value becomes ready.
    pub fn deadline(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, queued_at)| queued_at + self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;

    #[test]
    fn test_waits_for_quiet_period() {
        let mut debouncer = Debouncer::new(100);
        debouncer.schedule("a", 0);

        assert!(debouncer.take_ready(50).is_none());
        assert_eq!(debouncer.take_ready(100), Some("a"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_latest_value_wins() {
        let mut debouncer = Debouncer::new(300);
        debouncer.schedule("x", 0);
        debouncer.schedule("xi", 120);
        debouncer.schedule("xim", 250);

        assert!(debouncer.take_ready(400).is_none());
        assert_eq!(debouncer.deadline(), Some(550));
        assert_eq!(debouncer.take_ready(550), Some("xim"));
        assert!(debouncer.take_ready(10_000).is_none());
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = Debouncer::new(10);
        debouncer.schedule(1, 0);
        debouncer.cancel();
        assert!(debouncer.take_ready(100).is_none());
        assert_eq!(debouncer.deadline(), None);
    }
}
