use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::keyboard::display;
use crate::keyboard::finger;
use crate::keyboard::guide::KeyGuide;
use crate::keyboard::layout::{KeyDefinition, KeyWidth, KeyboardLayout};
use crate::keyboard::resolver::HintSource;
use crate::ui::theme::{Theme, ThemeColors};

/// On-screen keyboard for one layout with the next key, its modifier and the
/// last pressed key highlighted.
pub struct KeyboardDiagram<'a> {
    layout: &'a KeyboardLayout,
    guide: Option<&'a KeyGuide>,
    last_pressed: Option<&'a str>,
    show_colors: bool,
    compact: bool,
    title: String,
    theme: &'a Theme,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(
        layout: &'a KeyboardLayout,
        guide: Option<&'a KeyGuide>,
        last_pressed: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            layout,
            guide,
            last_pressed,
            show_colors: true,
            compact: false,
            title: String::new(),
            theme,
        }
    }

    pub fn show_colors(mut self, show_colors: bool) -> Self {
        self.show_colors = show_colors;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn unit(&self) -> u16 {
        if self.compact { 4 } else { 5 }
    }

    /// Cap text. A key hinted from the reference layout shows the character
    /// being typed instead of the selected layout's legend.
    fn cap(&self, key: &KeyDefinition) -> String {
        match self.guide {
            Some(guide) if guide.source == HintSource::Reference && guide.key_id == key.id => {
                guide.character.to_string()
            }
            _ => display::key_cap(key),
        }
    }

    fn key_style(&self, key: &KeyDefinition) -> Style {
        let colors = &self.theme.colors;
        let base = Style::default().fg(colors.key_fg()).bg(colors.key_bg());

        if let Some(guide) = self.guide {
            if guide.key_id == key.id {
                return Style::default()
                    .fg(colors.bg())
                    .bg(colors.next_key())
                    .add_modifier(Modifier::BOLD);
            }
            if guide.shift_key == Some(key.id) {
                return Style::default()
                    .fg(colors.bg())
                    .bg(colors.modifier_key())
                    .add_modifier(Modifier::BOLD);
            }
        }
        if self.last_pressed == Some(key.id) {
            return Style::default()
                .fg(colors.bg())
                .bg(colors.last_pressed());
        }
        if self.show_colors
            && let Some(group) = finger::effective_group(key.id, key.group)
        {
            return Style::default()
                .fg(colors.bg())
                .bg(ThemeColors::zone(group.get()));
        }
        base
    }

    fn row_width(&self, row: &[KeyDefinition]) -> u16 {
        row.iter().map(|key| key.width.cells(self.unit())).sum()
    }
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(self.title.as_str())
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let widest = self
            .layout
            .rows
            .iter()
            .map(|row| self.row_width(row))
            .max()
            .unwrap_or(0);
        if inner.height < self.layout.rows.len() as u16 || inner.width < widest {
            return;
        }
        let left = inner.x + (inner.width - widest) / 2;

        for (row_idx, row) in self.layout.rows.iter().enumerate() {
            let y = inner.y + row_idx as u16;
            let mut x = if row.iter().all(|key| key.width == KeyWidth::Space) {
                left + (widest.saturating_sub(self.row_width(row))) / 2
            } else {
                left
            };

            for key in row {
                let width = key.width.cells(self.unit());
                let text = format!("{:^w$}", self.cap(key), w = usize::from(width - 1));
                buf.set_string(x, y, &text, self.key_style(key));
                x += width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::layout::SHIFT_RIGHT;
    use crate::keyboard::registry::LayoutRegistry;

    fn layout(id: &str) -> &'static KeyboardLayout {
        LayoutRegistry::builtin().get(id).unwrap()
    }

    #[test]
    fn next_key_and_shift_are_highlighted() {
        let theme = Theme::default();
        let us = layout("en-us");
        let guide = KeyGuide::compute('A', None, us, None).unwrap();
        let diagram = KeyboardDiagram::new(us, Some(&guide), Some("ab01"), &theme);

        let a = us.key("ac01").unwrap();
        let shift = us.key(SHIFT_RIGHT).unwrap();
        let z = us.key("ab01").unwrap();
        assert_eq!(diagram.key_style(a).bg, Some(theme.colors.next_key()));
        assert_eq!(diagram.key_style(shift).bg, Some(theme.colors.modifier_key()));
        assert_eq!(diagram.key_style(z).bg, Some(theme.colors.last_pressed()));
    }

    #[test]
    fn zone_colours_can_be_switched_off() {
        let theme = Theme::default();
        let us = layout("en-us");
        let j = us.key("ac07").unwrap();
        let coloured = KeyboardDiagram::new(us, None, None, &theme);
        assert_eq!(coloured.key_style(j).bg, Some(ThemeColors::zone(5)));
        let plain = KeyboardDiagram::new(us, None, None, &theme).show_colors(false);
        assert_eq!(plain.key_style(j).bg, Some(theme.colors.key_bg()));
    }

    #[test]
    fn reference_hint_relabels_the_key() {
        let theme = Theme::default();
        let us = layout("en-us");
        let guide = KeyGuide::compute('ж', None, us, Some(layout("ru-ru"))).unwrap();
        let diagram = KeyboardDiagram::new(us, Some(&guide), None, &theme);
        let key = us.key(guide.key_id).unwrap();
        assert_eq!(diagram.cap(key), "ж");
    }

    #[test]
    fn renders_every_row() {
        let theme = Theme::default();
        let us = layout("en-us");
        let area = Rect::new(0, 0, 90, 7);
        let mut buf = Buffer::empty(area);
        KeyboardDiagram::new(us, None, None, &theme).render(area, &mut buf);
        let row: String = (1..89).map(|x| buf[(x, 3)].symbol().to_string()).collect();
        assert!(row.contains('A'));
        assert!(row.contains("Caps"));
    }
}
