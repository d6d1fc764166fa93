use std::time::{Duration, Instant};

/// Fixed-period timer polled by the event loop. Fires at most once per poll,
/// missed periods are dropped rather than replayed.
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Interval { period, next: now + period }
    }

    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }

    /// Re-arm a full period from `now`, used after a pause.
    pub fn reset(&mut self, now: Instant) {
        self.next = now + self.period;
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_after_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(10 * MS, t0);

        assert!(!iv.fire(t0));
        assert!(!iv.fire(t0 + 9 * MS));
        assert!(iv.fire(t0 + 10 * MS));
        assert!(!iv.fire(t0 + 11 * MS));
        assert!(iv.fire(t0 + 20 * MS));
    }

    #[test]
    fn test_keeps_cadence_with_late_polls() {
        let t0 = Instant::now();
        let mut iv = Interval::new(10 * MS, t0);

        assert!(iv.fire(t0 + 13 * MS));
        assert!(iv.fire(t0 + 20 * MS));
    }

    #[test]
    fn test_drops_missed_periods() {
        let t0 = Instant::now();
        let mut iv = Interval::new(10 * MS, t0);

        assert!(iv.fire(t0 + 55 * MS));
        assert!(!iv.fire(t0 + 56 * MS));
        assert!(iv.fire(t0 + 65 * MS));
    }

    #[test]
    fn test_reset_and_until_next() {
        let t0 = Instant::now();
        let mut iv = Interval::new(10 * MS, t0);
        assert_eq!(iv.until_next(t0 + 4 * MS), 6 * MS);

        iv.reset(t0 + 100 * MS);
        assert!(!iv.fire(t0 + 105 * MS));
        assert!(iv.fire(t0 + 110 * MS));
        assert_eq!(iv.until_next(t0 + 500 * MS), Duration::from_secs(0));
    }
}
