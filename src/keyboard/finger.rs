use crate::keyboard::layout::{
    BACKSPACE_KEY, CAPS_LOCK, ENTER_KEY, KeyDefinition, KeyboardLayout, SHIFT_LEFT, SHIFT_RIGHT,
    SPACE_KEY, TAB_KEY,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerAssignment {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerAssignment {
    pub fn new(hand: Hand, finger: Finger) -> Self {
        Self { hand, finger }
    }
}

/// One of the eight colour zones: 1/8 pinkies, 2/7 ring, 3/6 middle,
/// 4/5 index, left hand first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FingerGroup(u8);

impl FingerGroup {
    pub const LEFT_PINKY: FingerGroup = FingerGroup(1);
    pub const RIGHT_PINKY: FingerGroup = FingerGroup(8);

    pub fn new(group: u8) -> Option<Self> {
        (1..=8).contains(&group).then_some(Self(group))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn hand(self) -> Hand {
        if self.0 <= 4 { Hand::Left } else { Hand::Right }
    }

    pub fn finger(self) -> Finger {
        match self.0 {
            1 | 8 => Finger::Pinky,
            2 | 7 => Finger::Ring,
            3 | 6 => Finger::Middle,
            _ => Finger::Index,
        }
    }

    pub fn assignment(self) -> FingerAssignment {
        FingerAssignment::new(self.hand(), self.finger())
    }

    /// Zone of a hand and finger; thumbs have none.
    pub fn for_finger(hand: Hand, finger: Finger) -> Option<Self> {
        let offset = match finger {
            Finger::Pinky => 1,
            Finger::Ring => 2,
            Finger::Middle => 3,
            Finger::Index => 4,
            Finger::Thumb => return None,
        };
        match hand {
            Hand::Left => Self::new(offset),
            Hand::Right => Self::new(9 - offset),
        }
    }
}

/// Zone used for colouring a key, after the fixed overrides for the
/// modifier and editing keys. Space has no zone.
pub fn effective_group(key_id: &str, declared: Option<u8>) -> Option<FingerGroup> {
    match key_id {
        SHIFT_LEFT | SHIFT_RIGHT | TAB_KEY | CAPS_LOCK => Some(FingerGroup::LEFT_PINKY),
        BACKSPACE_KEY | ENTER_KEY => Some(FingerGroup::RIGHT_PINKY),
        SPACE_KEY => None,
        _ => declared.and_then(FingerGroup::new),
    }
}

/// Hand that should hit Space after `previous`: the right thumb follows a
/// left-hand character, otherwise the left.
pub fn space_hand(previous: Option<char>, layout: &KeyboardLayout) -> Hand {
    match previous {
        Some(ch) if layout.is_left_hand(ch) => Hand::Right,
        _ => Hand::Left,
    }
}

/// Hand and finger for pressing `key`, with `previous` deciding Space.
pub fn assignment_for_key(
    key: &KeyDefinition,
    previous: Option<char>,
    layout: &KeyboardLayout,
) -> Option<FingerAssignment> {
    if key.id == SPACE_KEY {
        return Some(FingerAssignment::new(
            space_hand(previous, layout),
            Finger::Thumb,
        ));
    }
    effective_group(key.id, key.group).map(FingerGroup::assignment)
}
