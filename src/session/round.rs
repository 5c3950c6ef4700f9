use std::time::Instant;

use crate::session::input::{CharStatus, chars_match};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No keystroke yet, timer not started.
    Idle,
    Active,
    /// Every target character has been typed.
    Complete,
}

/// State of one round: the target text and the attempt at it.
#[derive(Clone, Debug)]
pub struct Round {
    pub id: u64,
    pub target: Vec<char>,
    pub typed: Vec<char>,
    pub error_count: usize,
    /// Every keystroke that reached the round, accepted or not. Backspace
    /// never decrements it.
    pub total_keystrokes: usize,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub(crate) accuracy: f64,
    pub(crate) wpm: f64,
}

impl Round {
    pub fn new(id: u64, text: &str) -> Self {
        Self {
            id,
            target: text.chars().collect(),
            typed: Vec::new(),
            error_count: 0,
            total_keystrokes: 0,
            started_at: None,
            finished_at: None,
            accuracy: 100.0,
            wpm: 0.0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.typed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.typed.len() >= self.target.len()
    }

    pub fn phase(&self) -> Phase {
        if self.started_at.is_some() && self.is_complete() {
            Phase::Complete
        } else if self.started_at.is_some() {
            Phase::Active
        } else {
            Phase::Idle
        }
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed_text(&self) -> String {
        self.typed.iter().collect()
    }

    /// Next character to type, if any.
    pub fn next_char(&self) -> Option<char> {
        self.target.get(self.typed.len()).copied()
    }

    /// Last character the user typed this round.
    pub fn previous_char(&self) -> Option<char> {
        self.typed.last().copied()
    }

    /// Per-position classification of the typed prefix.
    pub fn statuses(&self) -> impl Iterator<Item = CharStatus> + '_ {
        self.typed
            .iter()
            .zip(&self.target)
            .map(|(&actual, &expected)| {
                if chars_match(expected, actual) {
                    CharStatus::Correct
                } else {
                    CharStatus::Incorrect(actual)
                }
            })
    }

    /// Mismatches between the typed prefix and the target, counted afresh.
    pub fn rescan_errors(&self) -> usize {
        self.statuses()
            .filter(|s| matches!(s, CharStatus::Incorrect(_)))
            .count()
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn wpm(&self) -> f64 {
        self.wpm
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => now.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Five keystrokes per word over the elapsed minutes.
    pub fn recompute_wpm(&mut self, now: Instant) {
        let minutes = self.elapsed_secs(now) / 60.0;
        self.wpm = if minutes > 0.0 {
            ((self.total_keystrokes as f64 / 5.0) / minutes).max(0.0)
        } else {
            0.0
        };
    }

    pub(crate) fn recompute_accuracy(&mut self, total: usize) {
        self.accuracy = if total == 0 {
            100.0
        } else {
            ((total as f64 - self.error_count as f64) / total as f64 * 100.0).clamp(0.0, 100.0)
        };
    }

    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        self.typed.len() as f64 / self.target.len() as f64
    }
}
