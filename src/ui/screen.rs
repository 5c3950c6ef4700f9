use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;

use crate::app::App;
use crate::generator::Mode;
use crate::ui::components::hand_hint::HandHint;
use crate::ui::components::keyboard_diagram::KeyboardDiagram;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::stats_sidebar::StatsSidebar;
use crate::ui::components::typing_area::TypingArea;
use crate::ui::layout::{AppLayout, pack_hint_lines};

const KEYBOARD_HEIGHT: u16 = 7;
const HANDS_HEIGHT: u16 = 6;
const PROGRESS_HEIGHT: u16 = 3;

pub fn mode_name(mode: Mode) -> String {
    match mode {
        Mode::Practice => t!("mode.practice").to_string(),
        Mode::Beginner => t!("mode.beginner").to_string(),
        Mode::Custom => t!("mode.custom").to_string(),
    }
}

fn on_off(value: bool) -> String {
    if value {
        t!("state.on").to_string()
    } else {
        t!("state.off").to_string()
    }
}

fn footer_hints() -> Vec<String> {
    [
        t!("footer.mode"),
        t!("footer.language"),
        t!("footer.layout"),
        t!("footer.hints"),
        t!("footer.correction"),
        t!("footer.keyboard"),
        t!("footer.hands"),
        t!("footer.colors"),
        t!("footer.sound"),
        t!("footer.theme"),
        t!("footer.interface"),
        t!("footer.quit"),
    ]
    .into_iter()
    .map(|hint| hint.to_string())
    .collect()
}

/// Draws the whole tutor screen for the current state of `app`.
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    let colors = &app.theme.colors;

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg())),
        area,
    );

    let hints = pack_hint_lines(&footer_hints(), usize::from(area.width));
    let app_layout = AppLayout::new(area, hints.len() as u16);
    let tier = app_layout.tier;

    let hint_layout = app
        .reference_layout()
        .map(|layout| layout.name.to_string())
        .unwrap_or_else(|| t!("state.none").to_string());
    let mut header_text = format!(
        " {}: {} | {}: {} | {}: {} | {}: {} | {}: {}",
        t!("header.mode"),
        mode_name(app.mode()),
        t!("header.language"),
        app.config.learning_language,
        t!("header.layout"),
        app.layout().name,
        t!("header.hints"),
        hint_layout,
        t!("header.correction"),
        on_off(app.config.correction_mode),
    );
    if !tier.show_sidebar() {
        let stats = app.session.stats();
        header_text.push_str(&format!(
            " | {}{} | {}{}%",
            t!("stats.wpm"),
            stats.wpm,
            t!("stats.accuracy"),
            stats.accuracy
        ));
    }
    let header = Paragraph::new(Line::from(Span::styled(
        header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let height = app_layout.main.height;
    let show_progress = tier.fits_progress_bar(height);
    let show_kbd = app.config.show_keyboard && tier.fits_keyboard(height);
    let show_hands = app.config.show_hands && tier.fits_hands(height);

    let mut constraints: Vec<Constraint> = vec![Constraint::Min(4)];
    if show_progress {
        constraints.push(Constraint::Length(PROGRESS_HEIGHT));
    }
    if show_kbd {
        constraints.push(Constraint::Length(KEYBOARD_HEIGHT));
    }
    if show_hands {
        constraints.push(Constraint::Length(HANDS_HEIGHT));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let round = app.session.round();
    let typing = TypingArea::new(round, &app.theme).title(format!(" {} ", mode_name(app.mode())));
    frame.render_widget(typing, main_layout[0]);

    let guide = app.guide();
    let mut idx = 1;
    if show_progress {
        let progress = ProgressBar::new(&t!("stats.progress"), round.progress(), &app.theme);
        frame.render_widget(progress, main_layout[idx]);
        idx += 1;
    }

    if show_kbd {
        let kbd = KeyboardDiagram::new(app.layout(), guide.as_ref(), app.last_pressed, &app.theme)
            .show_colors(app.config.show_colors)
            .compact(tier.compact_keyboard())
            .title(format!(" {} ", app.layout().name));
        frame.render_widget(kbd, main_layout[idx]);
        idx += 1;
    }

    if show_hands {
        let hands = HandHint::new(guide.as_ref(), round.next_char(), app.layout(), &app.theme)
            .reference(app.reference_layout())
            .show_colors(app.config.show_colors);
        frame.render_widget(hands, main_layout[idx]);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = StatsSidebar::new(
            &app.session,
            app.last_result.as_ref(),
            &app.history,
            now,
            &app.theme,
        );
        frame.render_widget(sidebar, sidebar_area);
    }

    let footer_lines: Vec<Line> = hints
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), app_layout.footer);
}
