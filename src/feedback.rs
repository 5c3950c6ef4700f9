use std::io::{self, Write};

use log::debug;

/// Receives keystroke and round notifications from the application. How
/// they are rendered (sound, flash, nothing) is up to the implementation.
pub trait Feedback {
    fn keystroke(&mut self, correct: bool);

    fn round_complete(&mut self) {}

    fn set_enabled(&mut self, enabled: bool);
}

/// Rings the terminal bell on every mistyped key.
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    fn keystroke(&mut self, correct: bool) {
        if correct || !self.enabled {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            debug!("bell failed: {err}");
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
