use crate::generator::{TextGenerator, normalize_text};

/// User-supplied text, reused for every round until replaced.
pub struct CustomText {
    text: String,
}

impl CustomText {
    /// Normalizes to NFC and collapses line breaks, tabs and repeated
    /// spaces into single spaces. Non-breaking spaces are kept.
    pub fn new(raw: &str) -> Self {
        let text = normalize_text(raw)
            .split(|c: char| c.is_ascii_whitespace())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextGenerator for CustomText {
    fn generate(&mut self, _word_count: usize) -> String {
        self.text.clone()
    }
}
