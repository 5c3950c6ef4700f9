use std::collections::HashSet;

use serde::Serialize;

use crate::keyboard::layouts::LayoutSpec;

pub const SPACE_KEY: &str = "space";
pub const SHIFT_LEFT: &str = "shift-l";
pub const SHIFT_RIGHT: &str = "shift-r";
pub const TAB_KEY: &str = "tab";
pub const CAPS_LOCK: &str = "caps_lock";
pub const BACKSPACE_KEY: &str = "backspace";
pub const ENTER_KEY: &str = "enter";

/// Marks an absent shifted/AltGr slot inside a row table token.
const EMPTY_SLOT: char = '\0';

const NUMBER_ROW: [&str; 13] = [
    "tlde", "ae01", "ae02", "ae03", "ae04", "ae05", "ae06", "ae07", "ae08", "ae09", "ae10",
    "ae11", "ae12",
];
const TOP_ROW: [&str; 13] = [
    "ad01", "ad02", "ad03", "ad04", "ad05", "ad06", "ad07", "ad08", "ad09", "ad10", "ad11",
    "ad12", "bksl",
];
const HOME_ROW: [&str; 12] = [
    "ac01", "ac02", "ac03", "ac04", "ac05", "ac06", "ac07", "ac08", "ac09", "ac10", "ac11",
    "ac12",
];
const BOTTOM_ROW: [&str; 10] = [
    "ab01", "ab02", "ab03", "ab04", "ab05", "ab06", "ab07", "ab08", "ab09", "ab10",
];

/// Rendering width hint for the keyboard diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyWidth {
    Normal,
    Tab,
    Caps,
    Enter,
    Shift,
    Space,
}

impl KeyWidth {
    /// Width in terminal cells for a diagram with the given base key width.
    pub fn cells(self, unit: u16) -> u16 {
        match self {
            KeyWidth::Normal => unit,
            KeyWidth::Tab => unit + unit / 2,
            KeyWidth::Caps => unit + unit * 3 / 4,
            KeyWidth::Enter => unit * 2 + unit / 4,
            KeyWidth::Shift => unit * 2 + unit / 4,
            KeyWidth::Space => unit * 6,
        }
    }
}

/// One physical key of a layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyDefinition {
    pub id: &'static str,
    /// Character produced without modifiers. `None` for pure modifiers
    /// (Shift, Caps Lock).
    pub primary: Option<char>,
    pub shifted: Option<char>,
    pub alt_gr: Option<char>,
    /// Finger zone 1..=8. Absent for keys whose zone is fixed by the
    /// classifier (Shift, Tab, Caps Lock, Backspace, Enter, Space).
    pub group: Option<u8>,
    pub width: KeyWidth,
}

impl KeyDefinition {
    fn special(id: &'static str, primary: Option<char>, width: KeyWidth) -> Self {
        Self {
            id,
            primary,
            shifted: None,
            alt_gr: None,
            group: None,
            width,
        }
    }

    fn from_token(id: &'static str, token: &str) -> Self {
        let mut chars = token.chars().map(|c| (c != EMPTY_SLOT).then_some(c));
        let primary = chars.next().flatten();
        let shifted = chars.next().flatten();
        let alt_gr = chars.next().flatten();
        Self {
            id,
            primary,
            shifted,
            alt_gr,
            group: position_group(id),
            width: KeyWidth::Normal,
        }
    }

    /// Short label for the diagram: the primary character, uppercased
    /// when the key is a letter.
    pub fn label(&self) -> Option<char> {
        let primary = self.primary?;
        match self.shifted {
            Some(shifted) if primary.to_uppercase().eq(std::iter::once(shifted)) => Some(shifted),
            _ => Some(primary),
        }
    }
}

/// Standard row-staggered finger zones, shared by every layout since key ids
/// name physical positions.
fn position_group(id: &str) -> Option<u8> {
    if matches!(id, "tlde" | "lsgt") {
        return Some(1);
    }
    if matches!(id, "bksl") {
        return Some(8);
    }
    let column: u8 = id.get(2..)?.parse().ok()?;
    let group = match column {
        1 => 1,
        2 => 2,
        3 => 3,
        4 | 5 => 4,
        6 | 7 => 5,
        8 => 6,
        9 => 7,
        _ => 8,
    };
    Some(group)
}

/// Catalog entry without the key table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub language: &'static str,
    pub flag: &'static str,
}

#[derive(Clone, Debug)]
pub struct KeyboardLayout {
    pub id: &'static str,
    pub name: &'static str,
    pub language: &'static str,
    pub flag: &'static str,
    pub rows: Vec<Vec<KeyDefinition>>,
    /// Lowercased primary characters typed by the left hand.
    pub left_hand_keys: HashSet<char>,
}

impl KeyboardLayout {
    pub fn from_spec(spec: &LayoutSpec) -> Self {
        let [number, top, home, bottom] = spec.rows;

        let mut number_row: Vec<KeyDefinition> = tokens(number)
            .zip(NUMBER_ROW)
            .map(|(token, id)| KeyDefinition::from_token(id, token))
            .collect();
        number_row.push(KeyDefinition::special(
            BACKSPACE_KEY,
            Some(crate::keyboard::display::BACKSPACE),
            KeyWidth::Tab,
        ));

        let mut top_row = vec![KeyDefinition::special(TAB_KEY, Some('\t'), KeyWidth::Tab)];
        top_row.extend(
            tokens(top)
                .zip(TOP_ROW)
                .map(|(token, id)| KeyDefinition::from_token(id, token)),
        );

        let mut home_row = vec![KeyDefinition::special(CAPS_LOCK, None, KeyWidth::Caps)];
        home_row.extend(
            tokens(home)
                .zip(HOME_ROW)
                .map(|(token, id)| KeyDefinition::from_token(id, token)),
        );
        home_row.push(KeyDefinition::special(ENTER_KEY, Some('\n'), KeyWidth::Enter));

        // ISO boards carry an extra key between left Shift and the first letter.
        let bottom_tokens: Vec<&str> = tokens(bottom).collect();
        let iso = bottom_tokens.len() > BOTTOM_ROW.len();
        let mut bottom_row = vec![KeyDefinition::special(SHIFT_LEFT, None, KeyWidth::Shift)];
        let ids = iso
            .then_some("lsgt")
            .into_iter()
            .chain(BOTTOM_ROW.iter().copied());
        bottom_row.extend(
            bottom_tokens
                .iter()
                .zip(ids)
                .map(|(token, id)| KeyDefinition::from_token(id, token)),
        );
        bottom_row.push(KeyDefinition::special(SHIFT_RIGHT, None, KeyWidth::Shift));

        let space_row = vec![KeyDefinition::special(SPACE_KEY, Some(' '), KeyWidth::Space)];

        let rows = vec![number_row, top_row, home_row, bottom_row, space_row];
        let left_hand_keys = rows
            .iter()
            .flatten()
            .filter(|key| key.group.is_some_and(|g| g <= 4))
            .filter_map(|key| key.primary)
            .flat_map(char::to_lowercase)
            .collect();

        Self {
            id: spec.id,
            name: spec.name,
            language: spec.language,
            flag: spec.flag,
            rows,
            left_hand_keys,
        }
    }

    pub fn meta(&self) -> LayoutMeta {
        LayoutMeta {
            id: self.id,
            name: self.name,
            language: self.language,
            flag: self.flag,
        }
    }

    /// All keys in row order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyDefinition> {
        self.rows.iter().flatten()
    }

    pub fn key(&self, id: &str) -> Option<&KeyDefinition> {
        self.keys().find(|key| key.id == id)
    }

    pub fn is_left_hand(&self, ch: char) -> bool {
        ch.to_lowercase().all(|c| self.left_hand_keys.contains(&c))
    }
}

fn tokens(row: &str) -> impl Iterator<Item = &str> {
    row.split_whitespace()
}
