pub mod beginner;
pub mod custom;
pub mod dictionary;
pub mod practice;

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use icu_normalizer::ComposingNormalizerBorrowed;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};
use crate::generator::beginner::BeginnerGenerator;
use crate::generator::custom::CustomText;
use crate::generator::dictionary::WordLists;
use crate::generator::practice::PracticeGenerator;
use crate::timer::Timer;

pub const DEFAULT_WORD_COUNT: usize = 8;
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

pub trait TextGenerator {
    fn generate(&mut self, word_count: usize) -> String;

    /// Redraws any cached material. Generators without a pool ignore it.
    fn update(&mut self, _word_count: usize) {}
}

/// Canonical composition, so precomposed keystrokes match the target.
pub fn normalize_text(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text)
        .into_owned()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Practice,
    Beginner,
    Custom,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Practice, Mode::Beginner, Mode::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Practice => "practice",
            Mode::Beginner => "beginner",
            Mode::Custom => "custom",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Mode::Practice => Mode::Beginner,
            Mode::Beginner => Mode::Custom,
            Mode::Custom => Mode::Practice,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| TutorError::InvalidSetting {
                key: "mode".to_string(),
                value: s.to_string(),
            })
    }
}

/// Produces the target text of each round for one mode and language.
///
/// Owns the pool refresh timer; a generator that is replaced takes its
/// timer with it.
pub struct RoundGenerator {
    mode: Mode,
    language: String,
    word_count: usize,
    source: Box<dyn TextGenerator>,
    refresh: Timer,
}

impl RoundGenerator {
    pub fn new(
        mode: Mode,
        language: &str,
        lists: &WordLists,
        word_count: usize,
        custom_text: &str,
        rng: SmallRng,
    ) -> Result<Self> {
        let word_count = word_count.max(1);
        let custom = CustomText::new(custom_text);
        let (mode, source): (Mode, Box<dyn TextGenerator>) = match mode {
            Mode::Custom if !custom.is_empty() => (Mode::Custom, Box::new(custom)),
            Mode::Custom | Mode::Practice => {
                if mode == Mode::Custom {
                    warn!("custom text is empty, practicing random words instead");
                }
                let words = lists.words(language)?.to_vec();
                (Mode::Practice, Box::new(PracticeGenerator::new(words, rng)))
            }
            Mode::Beginner => {
                let words = lists.words(language)?.to_vec();
                (Mode::Beginner, Box::new(BeginnerGenerator::new(words, rng)))
            }
        };
        debug!("generator ready: mode={mode} language={language} words={word_count}");

        Ok(Self {
            mode,
            language: language.to_string(),
            word_count,
            source,
            refresh: Timer::new(),
        })
    }

    /// Same as `new` with an entropy-seeded rng.
    pub fn with_entropy(
        mode: Mode,
        language: &str,
        lists: &WordLists,
        word_count: usize,
        custom_text: &str,
    ) -> Result<Self> {
        Self::new(
            mode,
            language,
            lists,
            word_count,
            custom_text,
            SmallRng::from_entropy(),
        )
    }

    /// Effective mode; an empty custom text degrades to practice.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Takes effect from the next generated round.
    pub fn set_word_count(&mut self, word_count: usize) {
        self.word_count = word_count.max(1);
    }

    pub fn next_text(&mut self) -> String {
        self.source.generate(self.word_count)
    }

    pub fn update(&mut self) {
        self.source.update(self.word_count);
    }

    pub fn start_refresh(&mut self, now: Instant, period: Duration) {
        self.refresh.repeat(now, period);
    }

    pub fn stop(&mut self) {
        self.refresh.cancel();
    }

    /// Drives the refresh timer. Returns true when the pool was redrawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.refresh.fire(now) {
            self.update();
            debug!("word pool refreshed for {}", self.language);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists() -> WordLists {
        WordLists::from_lists([
            ("en", vec!["cat".to_string(), "dog".to_string(), "owl".to_string()]),
            ("xx", Vec::new()),
        ])
    }

    fn seeded(mode: Mode, language: &str, custom: &str) -> Result<RoundGenerator> {
        RoundGenerator::new(mode, language, &lists(), 4, custom, SmallRng::seed_from_u64(5))
    }

    #[test]
    fn practice_round_has_word_count_words() {
        let mut generator = seeded(Mode::Practice, "en", "").unwrap();
        assert_eq!(generator.next_text().split(' ').count(), 4);
    }

    #[test]
    fn word_count_change_applies_to_the_next_round() {
        let mut generator = seeded(Mode::Beginner, "en", "").unwrap();
        generator.set_word_count(2);
        assert_eq!(generator.next_text().split(' ').count(), 2);
        generator.set_word_count(0);
        assert_eq!(generator.next_text().split(' ').count(), 1);
    }

    #[test]
    fn beginner_round_repeats_one_word() {
        let mut generator = seeded(Mode::Beginner, "en", "").unwrap();
        let text = generator.next_text();
        let first = text.split(' ').next().unwrap().to_string();
        assert!(text.split(' ').all(|w| w == first));
    }

    #[test]
    fn custom_round_passes_text_through() {
        let mut generator = seeded(Mode::Custom, "xx", "hello   there").unwrap();
        assert_eq!(generator.mode(), Mode::Custom);
        assert_eq!(generator.next_text(), "hello there");
        assert_eq!(generator.next_text(), "hello there");
    }

    #[test]
    fn empty_custom_text_falls_back_to_practice() {
        let generator = seeded(Mode::Custom, "en", "  ").unwrap();
        assert_eq!(generator.mode(), Mode::Practice);
    }

    #[test]
    fn empty_word_list_is_reported() {
        assert!(matches!(
            seeded(Mode::Practice, "xx", ""),
            Err(TutorError::WordListEmpty(_))
        ));
        assert!(matches!(
            seeded(Mode::Beginner, "missing", ""),
            Err(TutorError::WordListEmpty(_))
        ));
    }

    #[test]
    fn refresh_timer_fires_and_stops() {
        let t0 = Instant::now();
        let mut generator = seeded(Mode::Practice, "en", "").unwrap();
        generator.start_refresh(t0, DEFAULT_REFRESH);
        assert!(!generator.tick(t0 + Duration::from_secs(30)));
        assert!(generator.tick(t0 + Duration::from_secs(60)));
        generator.stop();
        assert!(!generator.tick(t0 + Duration::from_secs(600)));
    }

    #[test]
    fn mode_parses_and_cycles() {
        assert_eq!("beginner".parse::<Mode>().unwrap(), Mode::Beginner);
        assert!("expert".parse::<Mode>().is_err());
        assert_eq!(Mode::Custom.next(), Mode::Practice);
    }
}
