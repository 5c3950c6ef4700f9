use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};
use crate::generator::dictionary::{DEFAULT_LANGUAGE, WordLists};
use crate::generator::{DEFAULT_WORD_COUNT, Mode};
use crate::keyboard::layouts::DEFAULT_LAYOUT;
use crate::keyboard::registry::LayoutRegistry;

pub const INTERFACE_LANGUAGES: [&str; 6] = ["en", "uk", "ru", "de", "fr", "es"];

/// String-keyed settings access. The session core reads through this and
/// never writes; the application writes on hotkeys.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default)]
    pub hint_layout: Option<String>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_language")]
    pub learning_language: String,
    #[serde(default = "default_language")]
    pub interface_language: String,
    #[serde(default)]
    pub correction_mode: bool,
    #[serde(default = "default_true")]
    pub show_keyboard: bool,
    #[serde(default = "default_true")]
    pub show_hands: bool,
    #[serde(default = "default_true")]
    pub show_colors: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default)]
    pub custom_text: String,
}

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_true() -> bool {
    true
}
fn default_word_count() -> usize {
    DEFAULT_WORD_COUNT
}
fn default_refresh_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            hint_layout: None,
            mode: Mode::default(),
            learning_language: default_language(),
            interface_language: default_language(),
            correction_mode: false,
            show_keyboard: true,
            show_hands: true,
            show_colors: true,
            sound: true,
            dark_mode: true,
            word_count: default_word_count(),
            refresh_secs: default_refresh_secs(),
            custom_text: String::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyguide")
            .join("config.toml")
    }

    /// Resets values that name something this build does not ship.
    /// Call after loading so stale files from older versions still start.
    pub fn normalize(&mut self, registry: &LayoutRegistry, lists: &WordLists) {
        if !registry.contains(&self.layout) {
            warn!("unknown layout `{}`, using {DEFAULT_LAYOUT}", self.layout);
            self.layout = default_layout();
        }
        if let Some(hint) = &self.hint_layout
            && !registry.contains(hint)
        {
            warn!("unknown hint layout `{hint}`, disabling hints");
            self.hint_layout = None;
        }
        if !lists.contains(&self.learning_language) {
            warn!(
                "no words for `{}`, using {DEFAULT_LANGUAGE}",
                self.learning_language
            );
            self.learning_language = default_language();
        }
        if !INTERFACE_LANGUAGES.contains(&self.interface_language.as_str()) {
            self.interface_language = default_language();
        }
        if self.word_count == 0 {
            self.word_count = default_word_count();
        }
        if self.refresh_secs == 0 {
            self.refresh_secs = default_refresh_secs();
        }
    }

    /// Persists, logging failures instead of returning them.
    pub fn save_quietly(&self) {
        match self.save() {
            Ok(()) => info!("settings saved"),
            Err(err) => warn!("failed to save settings: {err}"),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_count<T: std::str::FromStr + PartialOrd + Default>(key: &str, value: &str) -> Result<T> {
    match value.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> TutorError {
    TutorError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl SettingsStore for Config {
    fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "layout" => self.layout.clone(),
            "hint_layout" => self.hint_layout.clone()?,
            "mode" => self.mode.to_string(),
            "learning_language" => self.learning_language.clone(),
            "interface_language" => self.interface_language.clone(),
            "correction_mode" => self.correction_mode.to_string(),
            "show_keyboard" => self.show_keyboard.to_string(),
            "show_hands" => self.show_hands.to_string(),
            "show_colors" => self.show_colors.to_string(),
            "sound" => self.sound.to_string(),
            "dark_mode" => self.dark_mode.to_string(),
            "word_count" => self.word_count.to_string(),
            "refresh_secs" => self.refresh_secs.to_string(),
            "custom_text" => self.custom_text.clone(),
            _ => return None,
        };
        Some(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "layout" => self.layout = value.to_string(),
            "hint_layout" => {
                self.hint_layout = (!value.is_empty()).then(|| value.to_string());
            }
            "mode" => self.mode = value.parse()?,
            "learning_language" => self.learning_language = value.to_string(),
            "interface_language" => self.interface_language = value.to_string(),
            "correction_mode" => self.correction_mode = parse_bool(key, value)?,
            "show_keyboard" => self.show_keyboard = parse_bool(key, value)?,
            "show_hands" => self.show_hands = parse_bool(key, value)?,
            "show_colors" => self.show_colors = parse_bool(key, value)?,
            "sound" => self.sound = parse_bool(key, value)?,
            "dark_mode" => self.dark_mode = parse_bool(key, value)?,
            "word_count" => self.word_count = parse_count(key, value)?,
            "refresh_secs" => self.refresh_secs = parse_count(key, value)?,
            "custom_text" => self.custom_text = value.to_string(),
            _ => return Err(TutorError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }
}

/// Plain key/value store for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The settings the round logic depends on. A change to any of them
/// starts a new round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreSettings {
    pub layout: String,
    pub mode: Mode,
    pub learning_language: String,
    pub correction_mode: bool,
}

impl CoreSettings {
    /// Missing or unparseable values fall back to defaults.
    pub fn read(store: &dyn SettingsStore) -> Self {
        Self {
            layout: store.get("layout").unwrap_or_else(default_layout),
            mode: store
                .get("mode")
                .and_then(|m| m.parse().ok())
                .unwrap_or_default(),
            learning_language: store
                .get("learning_language")
                .unwrap_or_else(default_language),
            correction_mode: store
                .get("correction_mode")
                .and_then(|v| parse_bool("correction_mode", &v).ok())
                .unwrap_or(false),
        }
    }

    /// Any change to a core setting restarts the round.
    pub fn needs_new_round(&self, next: &CoreSettings) -> bool {
        self != next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.layout, "en-us");
        assert_eq!(config.word_count, 8);
        assert!(config.dark_mode);
        assert!(!config.correction_mode);
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
layout = "de-de"
mode = "beginner"
correction_mode = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.layout, "de-de");
        assert_eq!(config.mode, Mode::Beginner);
        assert!(config.correction_mode);
        assert_eq!(config.refresh_secs, 60);
        assert_eq!(config.hint_layout, None);
    }

    #[test]
    fn test_normalize_resets_unknown_values() {
        let lists = WordLists::from_lists([("en", vec!["cat".to_string()])]);
        let mut config = Config {
            layout: "dvorak-xx".to_string(),
            hint_layout: Some("nope".to_string()),
            learning_language: "tlh".to_string(),
            interface_language: "zz".to_string(),
            word_count: 0,
            ..Config::default()
        };
        config.normalize(LayoutRegistry::builtin(), &lists);
        assert_eq!(config.layout, "en-us");
        assert_eq!(config.hint_layout, None);
        assert_eq!(config.learning_language, "en");
        assert_eq!(config.interface_language, "en");
        assert_eq!(config.word_count, 8);
    }

    #[test]
    fn test_normalize_keeps_known_values() {
        let lists = WordLists::from_lists([("fr", vec!["chat".to_string()])]);
        let mut config = Config {
            layout: "fr-fr".to_string(),
            hint_layout: Some("en-us".to_string()),
            learning_language: "fr".to_string(),
            ..Config::default()
        };
        config.normalize(LayoutRegistry::builtin(), &lists);
        assert_eq!(config.layout, "fr-fr");
        assert_eq!(config.hint_layout.as_deref(), Some("en-us"));
        assert_eq!(config.learning_language, "fr");
    }

    #[test]
    fn test_store_get_set() {
        let mut config = Config::default();
        config.set("mode", "custom").unwrap();
        config.set("correction_mode", "on").unwrap();
        config.set("hint_layout", "ru-ru").unwrap();
        assert_eq!(config.get("mode").as_deref(), Some("custom"));
        assert_eq!(config.get("correction_mode").as_deref(), Some("true"));
        assert_eq!(config.get("hint_layout").as_deref(), Some("ru-ru"));

        config.set("hint_layout", "").unwrap();
        assert_eq!(config.get("hint_layout"), None);
    }

    #[test]
    fn test_store_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("word_count", "0"),
            Err(TutorError::InvalidSetting { .. })
        ));
        assert!(matches!(
            config.set("sound", "loud"),
            Err(TutorError::InvalidSetting { .. })
        ));
        assert!(matches!(
            config.set("volume", "3"),
            Err(TutorError::UnknownSetting(_))
        ));
        assert_eq!(config.word_count, 8);
    }

    #[test]
    fn test_core_settings_from_memory_store() {
        let store = MemoryStore::with([
            ("layout", "uk-ua"),
            ("mode", "beginner"),
            ("learning_language", "uk"),
            ("correction_mode", "true"),
        ]);
        let core = CoreSettings::read(&store);
        assert_eq!(core.layout, "uk-ua");
        assert_eq!(core.mode, Mode::Beginner);
        assert_eq!(core.learning_language, "uk");
        assert!(core.correction_mode);

        let defaults = CoreSettings::read(&MemoryStore::new());
        assert_eq!(defaults.layout, "en-us");
        assert_eq!(defaults.mode, Mode::Practice);
    }

    #[test]
    fn test_any_core_change_needs_new_round() {
        let base = CoreSettings::read(&Config::default());
        assert!(!base.needs_new_round(&base.clone()));

        let mut next = base.clone();
        next.correction_mode = true;
        assert!(base.needs_new_round(&next));

        let mut next = base.clone();
        next.layout = "de-de".to_string();
        assert!(base.needs_new_round(&next));
    }
}
