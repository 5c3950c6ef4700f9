use crate::keyboard::finger::{self, Finger, FingerAssignment, FingerGroup, Hand};
use crate::keyboard::layout::{KeyboardLayout, SPACE_KEY};
use crate::keyboard::resolver::{self, HintSource, Modifier};

/// Everything the on-screen keyboard needs to guide the next keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyGuide {
    pub character: char,
    pub key_id: &'static str,
    pub modifier: Modifier,
    /// Colour zone after overrides; `None` for Space.
    pub effective_group: Option<FingerGroup>,
    pub hand: Hand,
    pub finger: Finger,
    pub shift_key: Option<&'static str>,
    pub modifier_hand: Option<Hand>,
    pub source: HintSource,
}

impl KeyGuide {
    /// Guide for typing `next` right after `previous`. Returns `None` when
    /// neither the selected nor the reference layout has the character.
    pub fn compute(
        next: char,
        previous: Option<char>,
        layout: &KeyboardLayout,
        reference: Option<&KeyboardLayout>,
    ) -> Option<Self> {
        let (resolution, source) = resolver::resolve_with_reference(layout, reference, next)?;
        let source_layout = match (source, reference) {
            (HintSource::Reference, Some(reference)) => reference,
            _ => layout,
        };

        let key = source_layout.key(resolution.key_id)?;
        let hand_layout = if key.id == SPACE_KEY {
            previous_layout(previous, layout, reference)
        } else {
            source_layout
        };
        let FingerAssignment { hand, finger } =
            finger::assignment_for_key(key, previous, hand_layout)?;
        let effective_group = FingerGroup::for_finger(hand, finger);

        Some(Self {
            character: next,
            key_id: resolution.key_id,
            modifier: resolution.modifier,
            effective_group,
            hand,
            finger,
            shift_key: resolution.shift_key,
            modifier_hand: resolution.hand_for_modifier(),
            source,
        })
    }

    /// True when Space should be hit with the right thumb.
    pub fn is_right_space(&self) -> bool {
        self.key_id == SPACE_KEY && self.hand == Hand::Right
    }

    pub fn highlights(&self, key_id: &str) -> bool {
        self.key_id == key_id || self.shift_key == Some(key_id)
    }
}

/// Layout that can type `previous`, for deciding the Space hand.
fn previous_layout<'a>(
    previous: Option<char>,
    layout: &'a KeyboardLayout,
    reference: Option<&'a KeyboardLayout>,
) -> &'a KeyboardLayout {
    match (previous, reference) {
        (Some(ch), Some(reference)) if resolver::find_key(layout, ch).is_none() => reference,
        _ => layout,
    }
}
