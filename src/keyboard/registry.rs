use std::sync::OnceLock;

use log::warn;

use crate::error::{Result, TutorError};
use crate::keyboard::layout::{KeyboardLayout, LayoutMeta};
use crate::keyboard::layouts::{DEFAULT_LAYOUT, LAYOUTS, LayoutSpec};
use crate::keyboard::resolver;

static BUILTIN: OnceLock<LayoutRegistry> = OnceLock::new();

/// Immutable catalog of keyboard layouts. Never empty, so there is always
/// a first layout to fall back to.
#[derive(Debug)]
pub struct LayoutRegistry {
    layouts: Vec<KeyboardLayout>,
}

impl LayoutRegistry {
    /// The built-in catalog, parsed on first use and shared afterwards.
    pub fn builtin() -> &'static LayoutRegistry {
        BUILTIN.get_or_init(|| Self::parse(LAYOUTS))
    }

    pub fn from_specs(specs: &[LayoutSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(TutorError::NoLayouts);
        }
        Ok(Self::parse(specs))
    }

    fn parse(specs: &[LayoutSpec]) -> Self {
        Self {
            layouts: specs.iter().map(KeyboardLayout::from_spec).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Result<&KeyboardLayout> {
        self.layouts
            .iter()
            .find(|layout| layout.id == id)
            .ok_or_else(|| TutorError::LayoutNotFound(id.to_string()))
    }

    /// Looks up `id`, falling back to the default layout (or the first
    /// registered one) when it is unknown.
    pub fn get_or_default(&self, id: &str) -> &KeyboardLayout {
        match self.get(id) {
            Ok(layout) => layout,
            Err(err) => {
                warn!("{err}; using {DEFAULT_LAYOUT}");
                self.get(DEFAULT_LAYOUT).unwrap_or(&self.layouts[0])
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.layouts.iter().any(|layout| layout.id == id)
    }

    pub fn list_all(&self) -> Vec<LayoutMeta> {
        self.layouts.iter().map(KeyboardLayout::meta).collect()
    }

    /// Case-insensitive search over primary, shifted and AltGr characters.
    pub fn find_key_by_char(&self, layout_id: &str, ch: char) -> Result<Option<&'static str>> {
        let layout = self.get(layout_id)?;
        Ok(resolver::find_key(layout, ch).map(|key| key.id))
    }

    /// First registered layout whose spoken language is `language`.
    pub fn default_for_language(&self, language: &str) -> Option<&KeyboardLayout> {
        self.layouts.iter().find(|layout| layout.language == language)
    }

    /// Id following `current` in catalog order, wrapping around.
    pub fn next_id(&self, current: &str) -> &'static str {
        let idx = self
            .layouts
            .iter()
            .position(|layout| layout.id == current)
            .map_or(0, |i| (i + 1) % self.layouts.len());
        self.layouts[idx].id
    }
}
