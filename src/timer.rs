use std::time::{Duration, Instant};

/// A deadline owned by whoever scheduled it and polled from the event-loop
/// tick. Scheduling again replaces the pending deadline, and dropping or
/// cancelling the owner discards it, so a superseded callback never fires.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    due: Option<Instant>,
    period: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot deadline `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
        self.period = None;
    }

    /// Repeating deadline every `period`, first firing one period from `now`.
    pub fn repeat(&mut self, now: Instant, period: Duration) {
        self.due = Some(now + period);
        self.period = Some(period);
    }

    pub fn cancel(&mut self) {
        self.due = None;
        self.period = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// True once per elapsed deadline. A repeating timer re-arms from `now`
    /// so a stalled loop does not fire a burst of missed ticks.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = self.period.map(|period| now + period);
                true
            }
            _ => false,
        }
    }
}
