use std::time::{Duration, Instant};

/// Deadline-based periodic trigger, polled from the host loop.
#[derive(Debug, Clone, Default)]
pub struct PeriodicTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl PeriodicTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arms the timer; the first fire is one interval after `now`.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        if interval.is_zero() {
            self.stop();
            return;
        }
        self.interval = interval;
        self.next_due = Some(now + interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Fires at most once per call. Missed periods are not replayed: the next
    /// deadline is one interval after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/timer.rs"]
mod tests;
