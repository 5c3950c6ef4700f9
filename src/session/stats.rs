use crate::session::round::Round;

/// Numbers shown in the stats panel, rounded for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
}

impl StatsSnapshot {
    pub fn of(round: &Round) -> Self {
        Self {
            wpm: round.wpm().round().max(0.0) as u32,
            accuracy: round.accuracy().round().clamp(0.0, 100.0) as u32,
            errors: round.error_count,
        }
    }
}

/// Tracks the last published snapshot so observers are only told about
/// real changes.
#[derive(Clone, Debug, Default)]
pub struct StatsAggregator {
    current: StatsSnapshot,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self {
            current: StatsSnapshot {
                accuracy: 100,
                ..StatsSnapshot::default()
            },
        }
    }

    pub fn current(&self) -> StatsSnapshot {
        self.current
    }

    /// Returns the new snapshot when it differs from the last one.
    pub fn refresh(&mut self, round: &Round) -> Option<StatsSnapshot> {
        let next = StatsSnapshot::of(round);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}
