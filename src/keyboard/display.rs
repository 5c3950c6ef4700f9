//! Display names for keys that do not print a character.
//!
//! Backspace travels through the input path as a sentinel char so it can be
//! looked up on a layout like any other key.

use crate::keyboard::layout::{
    BACKSPACE_KEY, CAPS_LOCK, ENTER_KEY, KeyDefinition, SHIFT_LEFT, SHIFT_RIGHT, SPACE_KEY,
    TAB_KEY,
};

/// Sentinel char for Backspace.
pub const BACKSPACE: char = '\x08';

/// Human-readable name for a special key id, `""` for character keys.
pub fn key_display_name(key_id: &str) -> &'static str {
    match key_id {
        BACKSPACE_KEY => "Backspace",
        TAB_KEY => "Tab",
        ENTER_KEY => "Enter",
        CAPS_LOCK => "Caps Lock",
        SHIFT_LEFT | SHIFT_RIGHT => "Shift",
        SPACE_KEY => "Space",
        _ => "",
    }
}

/// Short label for the keyboard diagram, `""` for character keys.
pub fn key_short_label(key_id: &str) -> &'static str {
    match key_id {
        BACKSPACE_KEY => "⌫",
        TAB_KEY => "Tab",
        ENTER_KEY => "Ent",
        CAPS_LOCK => "Caps",
        SHIFT_LEFT | SHIFT_RIGHT => "Shift",
        _ => "",
    }
}

/// Text drawn on a key cap.
pub fn key_cap(key: &KeyDefinition) -> String {
    match key_short_label(key.id) {
        "" => key.label().map(String::from).unwrap_or_default(),
        label => label.to_string(),
    }
}
