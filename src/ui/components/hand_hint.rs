use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier as TextModifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::keyboard::display;
use crate::keyboard::finger::{Finger, FingerGroup, Hand};
use crate::keyboard::guide::KeyGuide;
use crate::keyboard::layout::KeyboardLayout;
use crate::keyboard::resolver::{HintSource, Modifier};
use crate::ui::theme::{Theme, ThemeColors};

/// Finger slots left to right, as seen from above both hands.
const SLOTS: [(Hand, Finger); 10] = [
    (Hand::Left, Finger::Pinky),
    (Hand::Left, Finger::Ring),
    (Hand::Left, Finger::Middle),
    (Hand::Left, Finger::Index),
    (Hand::Left, Finger::Thumb),
    (Hand::Right, Finger::Thumb),
    (Hand::Right, Finger::Index),
    (Hand::Right, Finger::Middle),
    (Hand::Right, Finger::Ring),
    (Hand::Right, Finger::Pinky),
];

/// Both hands with the finger for the next key lit, plus a one-line
/// instruction underneath.
pub struct HandHint<'a> {
    guide: Option<&'a KeyGuide>,
    next_char: Option<char>,
    layout: &'a KeyboardLayout,
    reference: Option<&'a KeyboardLayout>,
    show_colors: bool,
    theme: &'a Theme,
}

impl<'a> HandHint<'a> {
    pub fn new(
        guide: Option<&'a KeyGuide>,
        next_char: Option<char>,
        layout: &'a KeyboardLayout,
        theme: &'a Theme,
    ) -> Self {
        Self {
            guide,
            next_char,
            layout,
            reference: None,
            show_colors: true,
            theme,
        }
    }

    pub fn reference(mut self, reference: Option<&'a KeyboardLayout>) -> Self {
        self.reference = reference;
        self
    }

    pub fn show_colors(mut self, show_colors: bool) -> Self {
        self.show_colors = show_colors;
        self
    }

    fn slot_label(hand: Hand, finger: Finger) -> &'static str {
        match (hand, finger) {
            (_, Finger::Thumb) => "\u{2423}",
            (Hand::Left, Finger::Pinky) => "1",
            (Hand::Left, Finger::Ring) => "2",
            (Hand::Left, Finger::Middle) => "3",
            (Hand::Left, Finger::Index) => "4",
            (Hand::Right, Finger::Index) => "5",
            (Hand::Right, Finger::Middle) => "6",
            (Hand::Right, Finger::Ring) => "7",
            (Hand::Right, Finger::Pinky) => "8",
        }
    }

    fn slot_style(&self, hand: Hand, finger: Finger) -> Style {
        let colors = &self.theme.colors;
        if let Some(guide) = self.guide {
            if guide.hand == hand && guide.finger == finger {
                return Style::default()
                    .fg(colors.bg())
                    .bg(colors.next_key())
                    .add_modifier(TextModifier::BOLD);
            }
            if guide.modifier_hand == Some(hand) && finger == Finger::Pinky {
                return Style::default().fg(colors.bg()).bg(colors.modifier_key());
            }
        }
        match FingerGroup::for_finger(hand, finger) {
            Some(group) if self.show_colors => Style::default()
                .fg(colors.bg())
                .bg(ThemeColors::zone(group.get())),
            _ => Style::default().fg(colors.key_fg()).bg(colors.key_bg()),
        }
    }

    /// Localized instruction for the next keystroke.
    pub fn instruction(&self) -> String {
        let Some(guide) = self.guide else {
            return match self.next_char {
                Some(ch) => t!("hint.unmapped", ch = ch, layout = self.layout.name).to_string(),
                None => t!("round.complete").to_string(),
            };
        };

        let key = match display::key_display_name(guide.key_id) {
            "" => guide.character.to_uppercase().to_string(),
            name => name.to_string(),
        };
        let mut text = t!(
            "hint.press",
            key = key,
            hand = hand_name(guide.hand),
            finger = finger_name(guide.finger)
        )
        .to_string();

        match guide.modifier {
            Modifier::Shift => {
                if let Some(hand) = guide.modifier_hand {
                    text.push_str(", ");
                    text.push_str(&t!("hint.shift", key = "Shift", hand = hand_name(hand)));
                }
            }
            Modifier::AltGr => {
                text.push_str(", ");
                text.push_str(&t!("hint.alt_gr"));
            }
            Modifier::None => {}
        }

        if guide.source == HintSource::Reference
            && let Some(reference) = self.reference
        {
            text.push(' ');
            text.push_str(&t!("hint.reference", layout = reference.name));
        }
        text
    }
}

fn hand_name(hand: Hand) -> String {
    match hand {
        Hand::Left => t!("hands.left").to_string(),
        Hand::Right => t!("hands.right").to_string(),
    }
}

fn finger_name(finger: Finger) -> String {
    match finger {
        Finger::Pinky => t!("finger.pinky").to_string(),
        Finger::Ring => t!("finger.ring").to_string(),
        Finger::Middle => t!("finger.middle").to_string(),
        Finger::Index => t!("finger.index").to_string(),
        Finger::Thumb => t!("finger.thumb").to_string(),
    }
}

impl Widget for HandHint<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut fingers: Vec<Span> = Vec::with_capacity(SLOTS.len() + 1);
        for (i, &(hand, finger)) in SLOTS.iter().enumerate() {
            if i == 5 {
                fingers.push(Span::raw("   "));
            }
            let label = format!(" {} ", Self::slot_label(hand, finger));
            fingers.push(Span::styled(label, self.slot_style(hand, finger)));
            fingers.push(Span::raw(" "));
        }

        let lines = vec![
            Line::from(fingers).alignment(Alignment::Center),
            Line::from(""),
            Line::from(Span::styled(
                self.instruction(),
                Style::default().fg(colors.fg()),
            ))
            .alignment(Alignment::Center),
        ];

        let block = Block::bordered()
            .title(t!("hands.title").to_string())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
