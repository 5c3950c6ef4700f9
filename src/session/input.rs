use std::time::Instant;

use crate::keyboard::resolver::is_space;
use crate::session::round::Round;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeystrokeEvent {
    pub expected: char,
    pub actual: char,
    pub timestamp: Instant,
    pub correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeystrokeOutcome {
    /// The character was appended, correct or not.
    Accepted(KeystrokeEvent),
    /// Correction mode held the cursor on a wrong character.
    Blocked(KeystrokeEvent),
    /// The round is already fully typed; the keystroke is dropped.
    Overflow,
}

impl KeystrokeOutcome {
    pub fn event(&self) -> Option<&KeystrokeEvent> {
        match self {
            KeystrokeOutcome::Accepted(event) | KeystrokeOutcome::Blocked(event) => Some(event),
            KeystrokeOutcome::Overflow => None,
        }
    }
}

/// A typed space satisfies a non-breaking space in the target.
pub fn chars_match(expected: char, actual: char) -> bool {
    expected == actual || (is_space(expected) && is_space(actual))
}

pub fn process_char(
    round: &mut Round,
    ch: char,
    correction_mode: bool,
    now: Instant,
) -> KeystrokeOutcome {
    let Some(expected) = round.next_char() else {
        return KeystrokeOutcome::Overflow;
    };

    if round.started_at.is_none() {
        round.started_at = Some(now);
    }
    round.total_keystrokes += 1;

    let correct = chars_match(expected, ch);
    if !correct {
        round.error_count += 1;
    }
    round.recompute_accuracy(round.total_keystrokes);

    let event = KeystrokeEvent {
        expected,
        actual: ch,
        timestamp: now,
        correct,
    };

    if !correct && correction_mode {
        return KeystrokeOutcome::Blocked(event);
    }

    round.typed.push(ch);
    if round.is_complete() {
        round.finished_at = Some(now);
    }
    KeystrokeOutcome::Accepted(event)
}

/// Shortens the typed input to `len` characters and resynchronizes the
/// error count by rescanning. Accuracy is recomputed over the remaining
/// input only; the keystroke total is left alone. Returns false when
/// nothing was removed.
pub fn truncate(round: &mut Round, len: usize) -> bool {
    if len >= round.typed.len() {
        return false;
    }
    round.typed.truncate(len);
    round.finished_at = None;
    round.error_count = round.rescan_errors();
    round.recompute_accuracy(len);
    true
}

pub fn process_backspace(round: &mut Round) -> bool {
    let len = round.typed.len();
    len > 0 && truncate(round, len - 1)
}

/// Applies a whole new input value (as an input field would report it):
/// removes back to the common prefix, then appends the rest one character
/// at a time.
pub fn sync_input(
    round: &mut Round,
    input: &str,
    correction_mode: bool,
    now: Instant,
) -> Vec<KeystrokeOutcome> {
    let input: Vec<char> = input.chars().collect();
    let common = round
        .typed
        .iter()
        .zip(&input)
        .take_while(|(a, b)| a == b)
        .count();
    truncate(round, common);
    input[common..]
        .iter()
        .map(|&ch| process_char(round, ch, correction_mode, now))
        .collect()
}
