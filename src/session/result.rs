use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::round::Round;

/// Summary of a finished round, kept in the in-memory history.
#[derive(Clone, Debug, Serialize)]
pub struct RoundResult {
    pub round_id: u64,
    pub wpm: f64,
    pub accuracy: f64,
    pub errors: usize,
    pub total_keystrokes: usize,
    pub total_chars: usize,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
    pub mode: String,
    pub language: String,
    pub layout: String,
}

/// Where a round was played, recorded alongside its numbers.
#[derive(Clone, Copy, Debug)]
pub struct RoundContext<'a> {
    pub mode: &'a str,
    pub language: &'a str,
    pub layout: &'a str,
}

impl RoundResult {
    pub fn from_round(round: &Round, context: RoundContext<'_>, now: Instant) -> Self {
        Self {
            round_id: round.id,
            wpm: round.wpm(),
            accuracy: round.accuracy(),
            errors: round.error_count,
            total_keystrokes: round.total_keystrokes,
            total_chars: round.target.len(),
            elapsed_secs: round.elapsed_secs(now),
            timestamp: Utc::now(),
            mode: context.mode.to_string(),
            language: context.language.to_string(),
            layout: context.layout.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::engine::TypingSession;

    const CONTEXT: RoundContext<'static> = RoundContext {
        mode: "practice",
        language: "en",
        layout: "en-us",
    };

    #[test]
    fn result_copies_the_round_counters() {
        let t0 = Instant::now();
        let mut session = TypingSession::new("ab", false);
        session.type_char('a', t0);
        session.type_char('x', t0 + Duration::from_millis(100));
        session.backspace(t0 + Duration::from_millis(200));
        session.type_char('b', t0 + Duration::from_millis(300));

        let result = RoundResult::from_round(session.round(), CONTEXT, t0 + Duration::from_secs(1));
        assert_eq!(result.round_id, 1);
        assert_eq!(result.errors, 0);
        assert_eq!(result.total_keystrokes, 3);
        assert_eq!(result.total_chars, 2);
        assert_eq!(result.accuracy, 100.0);
        assert_eq!(result.layout, "en-us");
    }

    #[test]
    fn serializes_to_json() {
        let result = RoundResult::from_round(&Round::new(1, "a"), CONTEXT, Instant::now());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "practice");
        assert_eq!(json["total_chars"], 1);
    }
}
