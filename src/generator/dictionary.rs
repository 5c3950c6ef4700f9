use std::collections::BTreeMap;

use log::warn;
use rust_embed::Embed;

use crate::error::{Result, TutorError};
use crate::generator::normalize_text;

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Candidate words per learning language.
#[derive(Clone, Debug, Default)]
pub struct WordLists {
    lists: BTreeMap<String, Vec<String>>,
}

impl WordLists {
    /// Loads every embedded `<language>.json` list.
    pub fn load() -> Self {
        let mut lists = BTreeMap::new();
        for file in WordAssets::iter() {
            let Some(language) = file.strip_suffix(".json") else {
                continue;
            };
            let Some(asset) = WordAssets::get(&file) else {
                continue;
            };
            match serde_json::from_slice::<Vec<String>>(asset.data.as_ref()) {
                Ok(words) => {
                    lists.insert(language.to_string(), clean(words));
                }
                Err(err) => warn!("word list {file} failed to parse: {err}"),
            }
        }
        Self { lists }
    }

    pub fn from_lists<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        Self {
            lists: lists
                .into_iter()
                .map(|(language, words)| (language.into(), clean(words)))
                .collect(),
        }
    }

    /// Words for `language`; an absent or empty list is an error so the
    /// caller can fall back to another language.
    pub fn words(&self, language: &str) -> Result<&[String]> {
        match self.lists.get(language) {
            Some(words) if !words.is_empty() => Ok(words),
            _ => Err(TutorError::WordListEmpty(language.to_string())),
        }
    }

    pub fn contains(&self, language: &str) -> bool {
        self.words(language).is_ok()
    }

    pub fn languages(&self) -> Vec<&str> {
        self.lists
            .iter()
            .filter(|(_, words)| !words.is_empty())
            .map(|(language, _)| language.as_str())
            .collect()
    }

    /// Language after `current` in sorted order, wrapping around.
    pub fn next_language(&self, current: &str) -> String {
        let languages = self.languages();
        let idx = languages
            .iter()
            .position(|&l| l == current)
            .map_or(0, |i| (i + 1) % languages.len().max(1));
        languages
            .get(idx)
            .copied()
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string()
    }
}

fn clean(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| normalize_text(w.trim()))
        .filter(|w| !w.is_empty() && !w.contains(char::is_whitespace))
        .collect()
}
