use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::engine::TypingSession;
use crate::session::result::RoundResult;
use crate::ui::theme::{Theme, ThemeColors};

pub struct StatsSidebar<'a> {
    session: &'a TypingSession,
    last_result: Option<&'a RoundResult>,
    history: &'a [RoundResult],
    now: Instant,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        session: &'a TypingSession,
        last_result: Option<&'a RoundResult>,
        history: &'a [RoundResult],
        now: Instant,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            last_result,
            history,
            now,
            theme,
        }
    }
}

/// Format a delta value with arrow indicator
fn format_delta(delta: f64, suffix: &str) -> String {
    if delta > 0.0 {
        format!("\u{2191}+{:.1}{suffix}", delta)
    } else if delta < 0.0 {
        format!("\u{2193}{:.1}{suffix}", delta)
    } else {
        format!("={suffix}")
    }
}

fn delta_color(delta: f64, colors: &ThemeColors) -> ratatui::style::Color {
    if delta > 0.0 {
        colors.success()
    } else if delta < 0.0 {
        colors.error()
    } else {
        colors.text_pending()
    }
}

fn accuracy_color(accuracy: f64, colors: &ThemeColors) -> ratatui::style::Color {
    if accuracy >= 95.0 {
        colors.success()
    } else if accuracy >= 85.0 {
        colors.warning()
    } else {
        colors.error()
    }
}

/// Difference between the last result and the mean of the ones before it.
fn deltas_vs_prior(history: &[RoundResult]) -> Option<(f64, f64)> {
    let (last, prior) = history.split_last()?;
    if prior.is_empty() {
        return None;
    }
    let n = prior.len() as f64;
    let avg_wpm = prior.iter().map(|r| r.wpm).sum::<f64>() / n;
    let avg_acc = prior.iter().map(|r| r.accuracy).sum::<f64>() / n;
    Some((last.wpm - avg_wpm, last.accuracy - avg_acc))
}

fn label_line<'s>(label: String, value: String, style: Style, colors: &ThemeColors) -> Line<'s> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(colors.fg())),
        Span::styled(value, style),
    ])
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let last_height = if self.last_result.is_some() { 10 } else { 0 };
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Min(last_height)])
            .split(area);

        // Current round
        {
            let round = self.session.round();
            let stats = self.session.stats();
            let lines = vec![
                label_line(
                    t!("stats.wpm").to_string(),
                    stats.wpm.to_string(),
                    Style::default().fg(colors.accent()),
                    colors,
                ),
                Line::from(""),
                label_line(
                    t!("stats.accuracy").to_string(),
                    format!("{}%", stats.accuracy),
                    Style::default().fg(accuracy_color(f64::from(stats.accuracy), colors)),
                    colors,
                ),
                Line::from(""),
                label_line(
                    t!("stats.errors").to_string(),
                    stats.errors.to_string(),
                    Style::default().fg(colors.error()),
                    colors,
                ),
                Line::from(""),
                label_line(
                    t!("stats.progress").to_string(),
                    format!("{:.0}%", round.progress() * 100.0),
                    Style::default().fg(colors.accent()),
                    colors,
                ),
                label_line(
                    t!("stats.time").to_string(),
                    format!("{:.1}s", round.elapsed_secs(self.now)),
                    Style::default().fg(colors.fg()),
                    colors,
                ),
            ];

            let block = Block::bordered()
                .title(t!("stats.title").to_string())
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(lines).block(block).render(sections[0], buf);
        }

        // Last round with deltas against the earlier ones
        if let Some(last) = self.last_result {
            let deltas = deltas_vs_prior(self.history);

            let mut lines = vec![label_line(
                t!("stats.wpm").to_string(),
                format!("{:.0}", last.wpm),
                Style::default().fg(colors.accent()),
                colors,
            )];
            if let Some((wpm_delta, _)) = deltas {
                lines.push(Line::from(vec![
                    Span::styled(
                        t!("stats.vs_avg").to_string(),
                        Style::default().fg(colors.text_pending()),
                    ),
                    Span::styled(
                        format_delta(wpm_delta, ""),
                        Style::default().fg(delta_color(wpm_delta, colors)),
                    ),
                ]));
            }
            lines.push(label_line(
                t!("stats.accuracy").to_string(),
                format!("{:.1}%", last.accuracy),
                Style::default().fg(accuracy_color(last.accuracy, colors)),
                colors,
            ));
            if let Some((_, acc_delta)) = deltas {
                lines.push(Line::from(vec![
                    Span::styled(
                        t!("stats.vs_avg").to_string(),
                        Style::default().fg(colors.text_pending()),
                    ),
                    Span::styled(
                        format_delta(acc_delta, "%"),
                        Style::default().fg(delta_color(acc_delta, colors)),
                    ),
                ]));
            }
            lines.push(label_line(
                t!("stats.errors").to_string(),
                last.errors.to_string(),
                Style::default().fg(colors.error()),
                colors,
            ));
            lines.push(label_line(
                t!("stats.time").to_string(),
                format!("{:.1}s", last.elapsed_secs),
                Style::default().fg(colors.fg()),
                colors,
            ));
            lines.push(label_line(
                t!("stats.rounds").to_string(),
                self.history.len().to_string(),
                Style::default().fg(colors.fg()),
                colors,
            ));

            let block = Block::bordered()
                .title(t!("stats.last_round").to_string())
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(lines).block(block).render(sections[1], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::result::RoundContext;
    use crate::session::round::Round;

    fn result(wpm: f64, accuracy: f64) -> RoundResult {
        let context = RoundContext {
            mode: "practice",
            language: "en",
            layout: "en-us",
        };
        let mut result = RoundResult::from_round(&Round::new(1, "a"), context, Instant::now());
        result.wpm = wpm;
        result.accuracy = accuracy;
        result
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(2.5, ""), "\u{2191}+2.5");
        assert_eq!(format_delta(-1.0, "%"), "\u{2193}-1.0%");
        assert_eq!(format_delta(0.0, "%"), "=%");
    }

    #[test]
    fn test_deltas_need_prior_rounds() {
        assert_eq!(deltas_vs_prior(&[]), None);
        assert_eq!(deltas_vs_prior(&[result(40.0, 90.0)]), None);

        let history = [result(30.0, 90.0), result(50.0, 100.0), result(50.0, 97.0)];
        let (wpm, acc) = deltas_vs_prior(&history).unwrap();
        assert!((wpm - 10.0).abs() < 1e-9);
        assert!((acc - 2.0).abs() < 1e-9);
    }
}
