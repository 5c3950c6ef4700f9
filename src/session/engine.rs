use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use crate::session::input::{self, KeystrokeEvent, KeystrokeOutcome};
use crate::session::result::{RoundContext, RoundResult};
use crate::session::round::{Phase, Round};
use crate::session::stats::{StatsAggregator, StatsSnapshot};
use crate::timer::Timer;

/// Pause between the last keystroke of a round and the next round, long
/// enough to show the fully coloured text.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(300);
pub const WPM_TICK: Duration = Duration::from_secs(1);

/// Notifications for the presentation and feedback layers.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Keystroke(KeystrokeEvent),
    StatsChanged(StatsSnapshot),
    /// The completion delay of round `round_id` elapsed; the owner should
    /// start the next round.
    RoundComplete { round_id: u64 },
}

/// Owns the active round and the timers that act on it. Starting a new
/// round drops the old state and cancels both timers.
pub struct TypingSession {
    round: Round,
    correction_mode: bool,
    completion: Timer,
    wpm_tick: Timer,
    stats: StatsAggregator,
    events: VecDeque<SessionEvent>,
    next_round_id: u64,
}

impl TypingSession {
    pub fn new(text: &str, correction_mode: bool) -> Self {
        Self {
            round: Round::new(1, text),
            correction_mode,
            completion: Timer::new(),
            wpm_tick: Timer::new(),
            stats: StatsAggregator::new(),
            events: VecDeque::new(),
            next_round_id: 2,
        }
    }

    pub fn start_round(&mut self, text: &str) {
        self.completion.cancel();
        self.wpm_tick.cancel();
        self.round = Round::new(self.next_round_id, text);
        self.next_round_id += 1;
        self.publish_stats();
        debug!("round {} started with {} chars", self.round.id, self.round.target.len());
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.current()
    }

    pub fn correction_mode(&self) -> bool {
        self.correction_mode
    }

    pub fn set_correction_mode(&mut self, enabled: bool) {
        self.correction_mode = enabled;
    }

    pub fn completion_pending(&self) -> bool {
        self.completion.is_pending()
    }

    pub fn type_char(&mut self, ch: char, now: Instant) -> KeystrokeOutcome {
        let was_idle = self.round.started_at.is_none();
        let outcome = input::process_char(&mut self.round, ch, self.correction_mode, now);
        self.after_keystroke(outcome, was_idle, now);
        outcome
    }

    pub fn backspace(&mut self, now: Instant) -> bool {
        if !input::process_backspace(&mut self.round) {
            return false;
        }
        self.after_removal(now);
        true
    }

    /// Applies an edited input value in one go, the way a text field
    /// reports it.
    pub fn sync_input(&mut self, value: &str, now: Instant) -> Vec<KeystrokeOutcome> {
        let before = self.round.typed.len();
        let was_idle = self.round.started_at.is_none();
        let outcomes = input::sync_input(&mut self.round, value, self.correction_mode, now);
        if outcomes.is_empty() && self.round.typed.len() < before {
            self.after_removal(now);
        }
        let mut first = was_idle;
        for outcome in outcomes.iter().copied() {
            self.after_keystroke(outcome, first, now);
            first = false;
        }
        if !self.round.is_complete() {
            self.completion.cancel();
        }
        outcomes
    }

    /// Drives the WPM tick and the completion delay.
    pub fn tick(&mut self, now: Instant) {
        if self.wpm_tick.fire(now) && self.round.phase() == Phase::Active {
            self.round.recompute_wpm(now);
            self.publish_stats();
        }
        if self.completion.fire(now) {
            self.wpm_tick.cancel();
            self.events.push_back(SessionEvent::RoundComplete {
                round_id: self.round.id,
            });
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    pub fn result(&self, context: RoundContext<'_>, now: Instant) -> RoundResult {
        RoundResult::from_round(&self.round, context, now)
    }

    fn after_keystroke(&mut self, outcome: KeystrokeOutcome, was_idle: bool, now: Instant) {
        let Some(event) = outcome.event().copied() else {
            return;
        };
        if was_idle {
            self.wpm_tick.repeat(now, WPM_TICK);
        }
        self.events.push_back(SessionEvent::Keystroke(event));

        if matches!(outcome, KeystrokeOutcome::Accepted(_)) && self.round.is_complete() {
            self.round.recompute_wpm(now);
            self.completion.schedule(now, COMPLETION_DELAY);
            debug!("round {} typed out, completing", self.round.id);
        }
        self.publish_stats();
    }

    fn after_removal(&mut self, now: Instant) {
        if !self.round.is_complete() {
            self.completion.cancel();
        }
        if self.round.started_at.is_some() {
            self.round.recompute_wpm(now);
        }
        self.publish_stats();
    }

    fn publish_stats(&mut self) {
        if let Some(snapshot) = self.stats.refresh(&self.round) {
            self.events.push_back(SessionEvent::StatsChanged(snapshot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completions(events: &[SessionEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, SessionEvent::RoundComplete { .. }))
            .count()
    }

    #[test]
    fn first_keystroke_starts_the_clock() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("abc", false);
        assert_eq!(session.phase(), Phase::Idle);
        session.type_char('a', t0);
        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.round().started_at, Some(t0));
    }

    #[test]
    fn wpm_updates_on_tick_while_active() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("abcdefghij", false);
        for (i, ch) in "abcde".chars().enumerate() {
            session.type_char(ch, t0 + Duration::from_millis(i as u64 * 100));
        }
        session.drain_events();
        session.tick(t0 + Duration::from_secs(60));
        assert_eq!(session.stats().wpm, 1);
        assert!(
            session
                .drain_events()
                .iter()
                .any(|e| matches!(e, SessionEvent::StatsChanged(_)))
        );
    }

    #[test]
    fn completion_fires_once_after_delay() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("hi", false);
        session.type_char('h', t0);
        session.type_char('i', t0);
        session.type_char('!', t0);
        assert!(session.completion_pending());

        session.tick(t0 + Duration::from_millis(100));
        assert_eq!(completions(&session.drain_events()), 0);
        session.tick(t0 + COMPLETION_DELAY);
        session.tick(t0 + Duration::from_secs(2));
        assert_eq!(completions(&session.drain_events()), 1);
    }

    #[test]
    fn backspace_at_boundary_cancels_pending_completion() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("ab", false);
        session.type_char('a', t0);
        session.type_char('b', t0);
        assert!(session.backspace(t0 + Duration::from_millis(100)));
        assert!(!session.completion_pending());

        session.type_char('b', t0 + Duration::from_millis(200));
        session.tick(t0 + Duration::from_millis(300));
        assert_eq!(completions(&session.drain_events()), 0);
        session.tick(t0 + Duration::from_millis(500));
        assert_eq!(completions(&session.drain_events()), 1);
    }

    #[test]
    fn new_round_cancels_timers() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("a", false);
        session.type_char('a', t0);
        let first_id = session.round().id;
        session.start_round("next");
        assert_ne!(session.round().id, first_id);
        assert_eq!(session.phase(), Phase::Idle);
        session.tick(t0 + Duration::from_secs(5));
        assert_eq!(completions(&session.drain_events()), 0);
    }

    #[test]
    fn blocked_keystroke_is_still_reported() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("cat", true);
        session.type_char('c', t0);
        let outcome = session.type_char('x', t0);
        assert!(matches!(outcome, KeystrokeOutcome::Blocked(_)));
        let events = session.drain_events();
        let wrong = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Keystroke(k) if !k.correct))
            .count();
        assert_eq!(wrong, 1);
    }
}
