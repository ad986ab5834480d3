use std::time::{Duration, Instant};

/// Handle of the repeating tick schedule.
///
/// Behaves like an interval timer: every due deadline fires once and the next
/// deadline is one period later. Missed deadlines are skipped, never replayed.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
    fired: u64,
}

impl Ticker {
    /// Schedules the first tick one period after `now`.
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
            fired: 0,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Number of ticks fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Consumes the current deadline if it has passed and schedules the next.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.fired += 1;
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
