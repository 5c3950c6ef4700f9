use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::input::CharStatus;
use crate::session::round::Round;
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    round: &'a Round,
    theme: &'a Theme,
    title: Option<String>,
}

impl<'a> TypingArea<'a> {
    pub fn new(round: &'a Round, theme: &'a Theme) -> Self {
        Self {
            round,
            theme,
            title: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// How a target character is drawn. Non-breaking spaces get a visible mark
/// so the learner knows a space is expected.
fn display_char(ch: char) -> char {
    match ch {
        '\u{00A0}' => '\u{2423}', // ␣
        _ => ch,
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let statuses: Vec<CharStatus> = self.round.statuses().collect();
        let cursor = self.round.cursor();

        let spans: Vec<Span> = self
            .round
            .target
            .iter()
            .enumerate()
            .map(|(idx, &target_ch)| {
                let (display, style) = match statuses.get(idx) {
                    Some(CharStatus::Correct) => (
                        display_char(target_ch),
                        Style::default().fg(colors.text_correct()),
                    ),
                    // Show what was actually typed, except where it was a space.
                    Some(CharStatus::Incorrect(actual)) => (
                        if *actual == ' ' { display_char(target_ch) } else { *actual },
                        Style::default()
                            .fg(colors.text_incorrect())
                            .bg(colors.text_incorrect_bg())
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                    None if idx == cursor => (
                        display_char(target_ch),
                        Style::default()
                            .fg(colors.text_cursor_fg())
                            .bg(colors.text_cursor_bg()),
                    ),
                    None => (
                        display_char(target_ch),
                        Style::default().fg(colors.text_pending()),
                    ),
                };
                Span::styled(display.to_string(), style)
            })
            .collect();

        let mut block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        if let Some(title) = self.title {
            block = block.title(title);
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
