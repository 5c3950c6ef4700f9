use crate::keyboard::finger::Hand;
use crate::keyboard::layout::{
    KeyDefinition, KeyboardLayout, SHIFT_LEFT, SHIFT_RIGHT, SPACE_KEY,
};

const NO_BREAK_SPACE: char = '\u{00A0}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    None,
    Shift,
    AltGr,
}

/// Character slots of a key, in lookup precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyField {
    Primary,
    Shifted,
    AltGr,
}

impl KeyField {
    pub const SEARCH_ORDER: [KeyField; 3] = [KeyField::Primary, KeyField::Shifted, KeyField::AltGr];

    pub fn of(self, key: &KeyDefinition) -> Option<char> {
        match self {
            KeyField::Primary => key.primary,
            KeyField::Shifted => key.shifted,
            KeyField::AltGr => key.alt_gr,
        }
    }
}

/// Where a target character lives on a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub key_id: &'static str,
    pub modifier: Modifier,
    /// Shift key to hold, on the side opposite the hand typing the key.
    pub shift_key: Option<&'static str>,
}

impl Resolution {
    pub fn hand_for_modifier(&self) -> Option<Hand> {
        match self.shift_key {
            Some(SHIFT_LEFT) => Some(Hand::Left),
            Some(SHIFT_RIGHT) => Some(Hand::Right),
            _ => None,
        }
    }
}

/// Which layout produced a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintSource {
    Selected,
    Reference,
}

pub fn is_space(ch: char) -> bool {
    ch == ' ' || ch == NO_BREAK_SPACE
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn search(
    layout: &KeyboardLayout,
    matches: impl Fn(char) -> bool,
) -> Option<(&KeyDefinition, KeyField)> {
    KeyField::SEARCH_ORDER.into_iter().find_map(|field| {
        layout
            .keys()
            .find(|key| field.of(key).is_some_and(&matches))
            .map(|key| (key, field))
    })
}

/// Key producing `ch` in any of its slots, ignoring case.
pub fn find_key(layout: &KeyboardLayout, ch: char) -> Option<&KeyDefinition> {
    if is_space(ch) {
        return layout.key(SPACE_KEY);
    }
    search(layout, |c| eq_ignore_case(c, ch)).map(|(key, _)| key)
}

/// Key id for a raw key the user just pressed, for the "last pressed"
/// highlight. Editing sentinels resolve to their own keys.
pub fn resolve_pressed(layout: &KeyboardLayout, raw: char) -> Option<&'static str> {
    find_key(layout, raw).map(|key| key.id)
}

/// Finds the key and modifier needed to type `ch`. `None` means the layout
/// cannot produce the character and nothing should be highlighted.
pub fn resolve(layout: &KeyboardLayout, ch: char) -> Option<Resolution> {
    if is_space(ch) {
        return Some(Resolution {
            key_id: SPACE_KEY,
            modifier: Modifier::None,
            shift_key: None,
        });
    }

    let upper = ch.is_uppercase();
    let exact = if upper { search(layout, |c| c == ch) } else { None };
    let (key, _) = exact.or_else(|| search(layout, |c| eq_ignore_case(c, ch)))?;

    let modifier = modifier_for(key, ch, upper);
    let shift_key = (modifier == Modifier::Shift).then(|| shift_key_for(layout, key));

    Some(Resolution {
        key_id: key.id,
        modifier,
        shift_key,
    })
}

/// Resolves on the selected layout first and on `reference` when the
/// selected layout cannot produce the character. Key ids are positional, so
/// a reference hit still names a key of the selected layout.
pub fn resolve_with_reference(
    layout: &KeyboardLayout,
    reference: Option<&KeyboardLayout>,
    ch: char,
) -> Option<(Resolution, HintSource)> {
    if let Some(resolution) = resolve(layout, ch) {
        return Some((resolution, HintSource::Selected));
    }
    let reference = reference.filter(|r| r.id != layout.id)?;
    resolve(reference, ch).map(|resolution| (resolution, HintSource::Reference))
}

fn modifier_for(key: &KeyDefinition, ch: char, upper: bool) -> Modifier {
    let on = |slot: Option<char>| slot.is_some_and(|c| eq_ignore_case(c, ch));

    let shift = if upper {
        key.shifted == Some(ch)
    } else {
        on(key.shifted) && !on(key.primary)
    };
    if shift {
        return Modifier::Shift;
    }
    if on(key.alt_gr) && !on(key.primary) && !on(key.shifted) {
        return Modifier::AltGr;
    }
    Modifier::None
}

fn shift_key_for(layout: &KeyboardLayout, key: &KeyDefinition) -> &'static str {
    if key.primary.is_some_and(|p| layout.is_left_hand(p)) {
        SHIFT_RIGHT
    } else {
        SHIFT_LEFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::display::BACKSPACE;
    use crate::keyboard::registry::LayoutRegistry;

    fn layout(id: &str) -> &'static KeyboardLayout {
        LayoutRegistry::builtin().get(id).unwrap()
    }

    #[test]
    fn lowercase_letter_needs_no_modifier() {
        let r = resolve(layout("en-us"), 'a').unwrap();
        assert_eq!(r.key_id, "ac01");
        assert_eq!(r.modifier, Modifier::None);
        assert_eq!(r.shift_key, None);
    }

    #[test]
    fn uppercase_uses_opposite_shift() {
        let q = resolve(layout("en-us"), 'Q').unwrap();
        assert_eq!(q.key_id, "ad01");
        assert_eq!(q.modifier, Modifier::Shift);
        assert_eq!(q.shift_key, Some(SHIFT_RIGHT));
        assert_eq!(q.hand_for_modifier(), Some(Hand::Right));

        let p = resolve(layout("en-us"), 'P').unwrap();
        assert_eq!(p.key_id, "ad10");
        assert_eq!(p.shift_key, Some(SHIFT_LEFT));
        assert_eq!(p.hand_for_modifier(), Some(Hand::Left));
    }

    #[test]
    fn shifted_punctuation_requires_shift() {
        let bang = resolve(layout("en-us"), '!').unwrap();
        assert_eq!(bang.key_id, "ae01");
        assert_eq!(bang.modifier, Modifier::Shift);
        assert_eq!(bang.shift_key, Some(SHIFT_RIGHT));

        let one = resolve(layout("en-us"), '1').unwrap();
        assert_eq!(one.modifier, Modifier::None);
    }

    #[test]
    fn azerty_digits_are_shifted() {
        let one = resolve(layout("fr-fr"), '1').unwrap();
        assert_eq!(one.key_id, "ae01");
        assert_eq!(one.modifier, Modifier::Shift);
        let amp = resolve(layout("fr-fr"), '&').unwrap();
        assert_eq!(amp.modifier, Modifier::None);
    }

    #[test]
    fn alt_gr_characters_report_modifier_without_shift_side() {
        let at = resolve(layout("de-de"), '@').unwrap();
        assert_eq!(at.key_id, "ad01");
        assert_eq!(at.modifier, Modifier::AltGr);
        assert_eq!(at.shift_key, None);
        assert_eq!(at.hand_for_modifier(), None);

        let euro = resolve(layout("es-es"), '€').unwrap();
        assert_eq!(euro.key_id, "ad03");
        assert_eq!(euro.modifier, Modifier::AltGr);
    }

    #[test]
    fn both_spaces_resolve_to_space_bar() {
        for ch in [' ', '\u{00A0}'] {
            let r = resolve(layout("en-us"), ch).unwrap();
            assert_eq!(r.key_id, SPACE_KEY);
            assert_eq!(r.modifier, Modifier::None);
        }
    }

    #[test]
    fn missing_character_is_not_found() {
        assert_eq!(resolve(layout("en-us"), 'ж'), None);
        assert_eq!(resolve(layout("en-us"), '☃'), None);
    }

    #[test]
    fn resolution_is_idempotent() {
        for id in ["en-us", "de-de", "uk-ua"] {
            let l = layout(id);
            for ch in "AbЖ!@ ß€ї".chars() {
                assert_eq!(resolve(l, ch), resolve(l, ch), "{id} {ch}");
            }
        }
    }

    #[test]
    fn cyrillic_capitals_on_russian() {
        let zh = resolve(layout("ru-ru"), 'Ж').unwrap();
        assert_eq!(zh.key_id, "ac10");
        assert_eq!(zh.modifier, Modifier::Shift);
        assert_eq!(zh.shift_key, Some(SHIFT_LEFT));

        let f = resolve(layout("ru-ru"), 'Ф').unwrap();
        assert_eq!(f.shift_key, Some(SHIFT_RIGHT));
    }

    #[test]
    fn reference_layout_fills_gaps() {
        let us = layout("en-us");
        let uk = layout("uk-ua");

        let (r, source) = resolve_with_reference(us, Some(uk), 'ф').unwrap();
        assert_eq!(source, HintSource::Reference);
        assert_eq!(r.key_id, "ac01");

        let (_, source) = resolve_with_reference(us, Some(uk), 'a').unwrap();
        assert_eq!(source, HintSource::Selected);

        assert!(resolve_with_reference(us, None, 'ф').is_none());
        assert!(resolve_with_reference(us, Some(us), 'ф').is_none());
    }

    #[test]
    fn pressed_sentinels_map_to_editing_keys() {
        let us = layout("en-us");
        assert_eq!(resolve_pressed(us, BACKSPACE), Some("backspace"));
        assert_eq!(resolve_pressed(us, '\n'), Some("enter"));
        assert_eq!(resolve_pressed(us, '\t'), Some("tab"));
        assert_eq!(resolve_pressed(us, 'K'), Some("ac08"));
        assert_eq!(resolve_pressed(us, 'й'), None);
    }
}
