use std::time::{Duration, Instant};

use log::{info, warn};

use crate::config::{Config, CoreSettings, INTERFACE_LANGUAGES, SettingsStore};
use crate::error::{Result, TutorError};
use crate::feedback::Feedback;
use crate::generator::dictionary::{DEFAULT_LANGUAGE, WordLists};
use crate::generator::{Mode, RoundGenerator};
use crate::keyboard::display::BACKSPACE;
use crate::keyboard::guide::KeyGuide;
use crate::keyboard::layout::KeyboardLayout;
use crate::keyboard::registry::LayoutRegistry;
use crate::keyboard::resolver;
use crate::session::engine::{SessionEvent, TypingSession};
use crate::session::result::{RoundContext, RoundResult};
use crate::ui::theme::Theme;

pub const HISTORY_LIMIT: usize = 50;

/// Inputs the generator was built from; a change means a new generator.
#[derive(Clone, Debug, PartialEq, Eq)]
struct GeneratorInputs {
    mode: Mode,
    language: String,
    custom_text: String,
}

impl GeneratorInputs {
    fn of(config: &Config) -> Self {
        Self {
            mode: config.mode,
            language: config.learning_language.clone(),
            custom_text: config.custom_text.clone(),
        }
    }
}

pub struct App {
    pub config: Config,
    pub session: TypingSession,
    pub theme: Theme,
    pub history: Vec<RoundResult>,
    pub last_result: Option<RoundResult>,
    /// Key id of the most recent raw key press.
    pub last_pressed: Option<&'static str>,
    pub should_quit: bool,
    registry: &'static LayoutRegistry,
    word_lists: WordLists,
    generator: RoundGenerator,
    generator_inputs: GeneratorInputs,
    feedback: Box<dyn Feedback>,
    core: CoreSettings,
    persist: bool,
}

impl App {
    /// Builds the application around `config`. With `persist` set, every
    /// settings change is written back to the config file.
    pub fn new(
        mut config: Config,
        registry: &'static LayoutRegistry,
        word_lists: WordLists,
        mut feedback: Box<dyn Feedback>,
        persist: bool,
        now: Instant,
    ) -> Result<Self> {
        config.normalize(registry, &word_lists);
        rust_i18n::set_locale(&config.interface_language);

        let mut generator = build_generator(&config, &word_lists)?;
        config.learning_language = generator.language().to_string();
        generator.start_refresh(now, refresh_period(&config));
        let session = TypingSession::new(&generator.next_text(), config.correction_mode);
        feedback.set_enabled(config.sound);

        Ok(Self {
            theme: Theme::for_mode(config.dark_mode),
            core: CoreSettings::read(&config),
            generator_inputs: GeneratorInputs::of(&config),
            config,
            session,
            history: Vec::new(),
            last_result: None,
            last_pressed: None,
            should_quit: false,
            registry,
            word_lists,
            generator,
            feedback,
            persist,
        })
    }

    pub fn layout(&self) -> &'static KeyboardLayout {
        self.registry.get_or_default(&self.config.layout)
    }

    /// Layout hints fall back to: the configured hint layout, else the
    /// learning language's default layout. Never the selected layout itself.
    pub fn reference_layout(&self) -> Option<&'static KeyboardLayout> {
        let layout = self.layout();
        let reference = match &self.config.hint_layout {
            Some(id) => self.registry.get(id).ok(),
            None => self
                .registry
                .default_for_language(&self.config.learning_language),
        };
        reference.filter(|r| r.id != layout.id)
    }

    /// Effective mode of the running generator.
    pub fn mode(&self) -> Mode {
        self.generator.mode()
    }

    /// Guide for the next character of the round, `None` when the round is
    /// typed out or no layout has the character.
    pub fn guide(&self) -> Option<KeyGuide> {
        let round = self.session.round();
        let next = round.next_char()?;
        KeyGuide::compute(
            next,
            round.previous_char(),
            self.layout(),
            self.reference_layout(),
        )
    }

    pub fn type_char(&mut self, ch: char, now: Instant) {
        self.last_pressed = self.pressed_key(ch);
        self.session.type_char(ch, now);
        self.dispatch_events(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        self.last_pressed = self.pressed_key(BACKSPACE);
        self.session.backspace(now);
        self.dispatch_events(now);
    }

    /// Pasted text is applied as one edit of the input, after whatever has
    /// been typed so far. Control characters are dropped.
    pub fn paste(&mut self, text: &str, now: Instant) {
        let mut value = self.session.round().typed_text();
        value.extend(text.chars().filter(|ch| !ch.is_control()));
        self.session.sync_input(&value, now);
        self.last_pressed = None;
        self.dispatch_events(now);
    }

    /// Event-loop tick: pool refresh, WPM tick and round completion.
    pub fn tick(&mut self, now: Instant) {
        self.generator.tick(now);
        self.session.tick(now);
        self.dispatch_events(now);
    }

    fn pressed_key(&self, raw: char) -> Option<&'static str> {
        resolver::resolve_pressed(self.layout(), raw).or_else(|| {
            self.reference_layout()
                .and_then(|reference| resolver::resolve_pressed(reference, raw))
        })
    }

    fn dispatch_events(&mut self, now: Instant) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::Keystroke(keystroke) => self.feedback.keystroke(keystroke.correct),
                SessionEvent::RoundComplete { round_id } if round_id == self.session.round().id => {
                    self.finish_round(now);
                }
                SessionEvent::RoundComplete { .. } | SessionEvent::StatsChanged(_) => {}
            }
        }
    }

    fn finish_round(&mut self, now: Instant) {
        let context = RoundContext {
            mode: self.generator.mode().as_str(),
            language: self.generator.language(),
            layout: &self.config.layout,
        };
        let result = self.session.result(context, now);
        info!(
            "round {} complete: {:.0} wpm, {:.1}% accuracy, {} errors",
            result.round_id, result.wpm, result.accuracy, result.errors
        );
        self.feedback.round_complete();

        self.history.push(result.clone());
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.last_result = Some(result);
        self.next_round();
    }

    fn next_round(&mut self) {
        let text = self.generator.next_text();
        self.session.start_round(&text);
    }

    /// Writes one setting and reacts to it. A change to a core setting or
    /// to the text source discards the running round. On error the
    /// configuration and the running generator are left as they were.
    pub fn update_setting(&mut self, key: &str, value: &str, now: Instant) -> Result<()> {
        let mut next = self.config.clone();
        next.set(key, value)?;
        next.normalize(self.registry, &self.word_lists);

        let inputs = GeneratorInputs::of(&next);
        let rebuild = inputs != self.generator_inputs;
        if rebuild {
            let mut generator = build_generator(&next, &self.word_lists)?;
            next.learning_language = generator.language().to_string();
            generator.start_refresh(now, refresh_period(&next));
            self.generator.stop();
            self.generator = generator;
            self.generator_inputs = GeneratorInputs::of(&next);
        } else {
            self.generator.set_word_count(next.word_count);
            if next.refresh_secs != self.config.refresh_secs {
                self.generator.start_refresh(now, refresh_period(&next));
            }
        }
        self.config = next;

        rust_i18n::set_locale(&self.config.interface_language);
        if key == "dark_mode" {
            self.theme = Theme::for_mode(self.config.dark_mode);
        }
        self.feedback.set_enabled(self.config.sound);

        let core = CoreSettings::read(&self.config);
        if rebuild || self.core.needs_new_round(&core) {
            self.session.set_correction_mode(core.correction_mode);
            self.next_round();
            self.core = core;
        }

        if self.persist {
            self.config.save_quietly();
        }
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str, now: Instant) {
        if let Err(err) = self.update_setting(key, value, now) {
            warn!("could not change {key}: {err}");
        }
    }

    fn toggle(&mut self, key: &str, now: Instant) {
        let current = self.config.get(key).is_some_and(|v| v == "true");
        self.apply(key, if current { "false" } else { "true" }, now);
    }

    pub fn cycle_mode(&mut self, now: Instant) {
        let next = self.config.mode.next();
        self.apply("mode", next.as_str(), now);
    }

    pub fn cycle_language(&mut self, now: Instant) {
        let next = self.word_lists.next_language(&self.config.learning_language);
        self.apply("learning_language", &next, now);
    }

    pub fn cycle_layout(&mut self, now: Instant) {
        let next = self.registry.next_id(&self.config.layout);
        self.apply("layout", next, now);
    }

    /// Steps through automatic hints (empty) and then every layout.
    pub fn cycle_hint_layout(&mut self, now: Instant) {
        let ids: Vec<&str> = self.registry.list_all().iter().map(|m| m.id).collect();
        let next = match self.config.hint_layout.as_deref() {
            None => ids.first().copied().unwrap_or(""),
            Some(current) => match ids.iter().position(|&id| id == current) {
                Some(i) if i + 1 < ids.len() => ids[i + 1],
                _ => "",
            },
        };
        self.apply("hint_layout", next, now);
    }

    pub fn cycle_interface_language(&mut self, now: Instant) {
        let idx = INTERFACE_LANGUAGES
            .iter()
            .position(|&l| l == self.config.interface_language)
            .map_or(0, |i| (i + 1) % INTERFACE_LANGUAGES.len());
        self.apply("interface_language", INTERFACE_LANGUAGES[idx], now);
    }

    pub fn toggle_correction(&mut self, now: Instant) {
        self.toggle("correction_mode", now);
    }

    pub fn toggle_keyboard(&mut self, now: Instant) {
        self.toggle("show_keyboard", now);
    }

    pub fn toggle_hands(&mut self, now: Instant) {
        self.toggle("show_hands", now);
    }

    pub fn toggle_colors(&mut self, now: Instant) {
        self.toggle("show_colors", now);
    }

    pub fn toggle_sound(&mut self, now: Instant) {
        self.toggle("sound", now);
    }

    pub fn toggle_dark_mode(&mut self, now: Instant) {
        self.toggle("dark_mode", now);
    }

    /// Switches to custom mode with `text` as the round text.
    pub fn set_custom_text(&mut self, text: &str, now: Instant) -> Result<()> {
        let previous = std::mem::replace(&mut self.config.custom_text, text.to_string());
        let result = self.update_setting("mode", Mode::Custom.as_str(), now);
        if result.is_err() {
            self.config.custom_text = previous;
        }
        result
    }
}

fn refresh_period(config: &Config) -> Duration {
    Duration::from_secs(config.refresh_secs.max(1))
}

/// Builds the generator for the configured language, falling back to the
/// default language when its word list is unusable. The generator reports
/// the language it settled on.
fn build_generator(config: &Config, lists: &WordLists) -> Result<RoundGenerator> {
    let build = |language: &str| {
        RoundGenerator::with_entropy(
            config.mode,
            language,
            lists,
            config.word_count,
            &config.custom_text,
        )
    };
    match build(&config.learning_language) {
        Err(TutorError::WordListEmpty(language)) if language != DEFAULT_LANGUAGE => {
            warn!("no words for {language}, falling back to {DEFAULT_LANGUAGE}");
            build(DEFAULT_LANGUAGE)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::keyboard::layout::{BACKSPACE_KEY, SHIFT_RIGHT};
    use crate::keyboard::resolver::HintSource;
    use crate::session::engine::COMPLETION_DELAY;
    use crate::session::round::Phase;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<bool>>>);

    impl Feedback for Recorder {
        fn keystroke(&mut self, correct: bool) {
            self.0.borrow_mut().push(correct);
        }

        fn set_enabled(&mut self, _enabled: bool) {}
    }

    fn lists() -> WordLists {
        WordLists::from_lists([
            ("en", vec!["cat".to_string(), "dog".to_string()]),
            ("uk", vec!["кіт".to_string(), "пес".to_string()]),
        ])
    }

    fn custom_app(text: &str) -> App {
        let config = Config {
            mode: Mode::Custom,
            custom_text: text.to_string(),
            ..Config::default()
        };
        App::new(
            config,
            LayoutRegistry::builtin(),
            lists(),
            Box::new(Recorder::default()),
            false,
            Instant::now(),
        )
        .unwrap()
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for ch in text.chars() {
            app.type_char(ch, now);
        }
    }

    #[test]
    fn completed_round_is_recorded_and_replaced() {
        let t0 = Instant::now();
        let mut app = custom_app("hi");
        let first = app.session.round().id;
        type_text(&mut app, "hi", t0);
        assert_eq!(app.session.phase(), Phase::Complete);

        app.tick(t0 + COMPLETION_DELAY);
        assert_ne!(app.session.round().id, first);
        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.history.len(), 1);
        let last = app.last_result.as_ref().unwrap();
        assert_eq!(last.errors, 0);
        assert_eq!(last.mode, "custom");
    }

    #[test]
    fn history_keeps_the_most_recent_rounds() {
        let mut now = Instant::now();
        let mut app = custom_app("a");
        for _ in 0..HISTORY_LIMIT + 5 {
            app.type_char('a', now);
            now += COMPLETION_DELAY;
            app.tick(now);
        }
        assert_eq!(app.history.len(), HISTORY_LIMIT);
    }

    #[test]
    fn mode_change_starts_a_new_round() {
        let t0 = Instant::now();
        let mut app = custom_app("hello");
        app.type_char('h', t0);
        let before = app.session.round().id;

        app.cycle_mode(t0);
        assert_eq!(app.config.mode, Mode::Practice);
        assert_eq!(app.mode(), Mode::Practice);
        assert_ne!(app.session.round().id, before);
        assert!(app.session.round().typed.is_empty());
    }

    #[test]
    fn correction_toggle_restarts_round_with_gate() {
        let t0 = Instant::now();
        let mut app = custom_app("cat");
        app.toggle_correction(t0);
        assert!(app.config.correction_mode);
        type_text(&mut app, "cx", t0);
        assert_eq!(app.session.round().typed_text(), "c");
        assert_eq!(app.session.round().error_count, 1);
    }

    #[test]
    fn display_toggles_keep_the_round() {
        let t0 = Instant::now();
        let mut app = custom_app("cat");
        app.type_char('c', t0);
        let id = app.session.round().id;
        app.toggle_keyboard(t0);
        app.toggle_dark_mode(t0);
        assert!(!app.config.show_keyboard);
        assert_eq!(app.theme.name, "light");
        assert_eq!(app.session.round().id, id);
    }

    fn practice_app(config: Config, lists: WordLists) -> App {
        App::new(
            config,
            LayoutRegistry::builtin(),
            lists,
            Box::new(Recorder::default()),
            false,
            Instant::now(),
        )
        .unwrap()
    }

    #[test]
    fn word_count_change_sizes_the_next_round() {
        let t0 = Instant::now();
        let mut app = practice_app(Config::default(), lists());
        let id = app.session.round().id;
        app.update_setting("word_count", "3", t0).unwrap();
        assert_eq!(app.session.round().id, id);

        let target = app.session.round().target_text();
        type_text(&mut app, &target, t0);
        app.tick(t0 + COMPLETION_DELAY);
        assert_ne!(app.session.round().id, id);
        assert_eq!(app.session.round().target_text().split(' ').count(), 3);
    }

    #[test]
    fn refresh_period_change_rearms_the_pool_refresh() {
        let t0 = Instant::now();
        let mut app = practice_app(Config::default(), lists());
        app.update_setting("refresh_secs", "5", t0).unwrap();
        assert!(!app.generator.tick(t0 + Duration::from_secs(4)));
        assert!(app.generator.tick(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn failed_rebuild_keeps_the_running_generator() {
        let t0 = Instant::now();
        let config = Config {
            learning_language: "uk".to_string(),
            ..Config::default()
        };
        let only_uk = WordLists::from_lists([("uk", vec!["кіт".to_string()])]);
        let mut app = practice_app(config, only_uk);
        let id = app.session.round().id;

        // unknown languages normalize to the default, which has no words here
        assert!(matches!(
            app.update_setting("learning_language", "fr", t0),
            Err(TutorError::WordListEmpty(_))
        ));
        assert_eq!(app.config.learning_language, "uk");
        assert_eq!(app.generator.language(), "uk");
        assert_eq!(app.session.round().id, id);
        assert!(app.generator.tick(Instant::now() + refresh_period(&app.config)));
    }

    #[test]
    fn unknown_language_falls_back_to_default() {
        let config = Config {
            learning_language: "xx".to_string(),
            ..Config::default()
        };
        let app = App::new(
            config,
            LayoutRegistry::builtin(),
            lists(),
            Box::new(Recorder::default()),
            false,
            Instant::now(),
        )
        .unwrap();
        assert_eq!(app.config.learning_language, "en");
        assert!(!app.session.round().target.is_empty());
    }

    #[test]
    fn guide_follows_the_cursor() {
        let t0 = Instant::now();
        let mut app = custom_app("aB");
        assert_eq!(app.guide().unwrap().key_id, "ac01");
        app.type_char('a', t0);
        let guide = app.guide().unwrap();
        assert_eq!(guide.key_id, "ab05");
        assert_eq!(guide.shift_key, Some(SHIFT_RIGHT));
        app.type_char('B', t0);
        assert!(app.guide().is_none());
    }

    #[test]
    fn foreign_text_uses_language_layout_for_hints() {
        let config = Config {
            mode: Mode::Custom,
            custom_text: "кіт".to_string(),
            learning_language: "uk".to_string(),
            ..Config::default()
        };
        let app = App::new(
            config,
            LayoutRegistry::builtin(),
            lists(),
            Box::new(Recorder::default()),
            false,
            Instant::now(),
        )
        .unwrap();
        assert_eq!(app.reference_layout().map(|l| l.id), Some("uk-ua"));
        let guide = app.guide().unwrap();
        assert_eq!(guide.source, HintSource::Reference);
        assert_eq!(guide.key_id, "ad04");
    }

    #[test]
    fn last_pressed_key_is_tracked() {
        let t0 = Instant::now();
        let mut app = custom_app("cat");
        app.type_char('c', t0);
        assert_eq!(app.last_pressed, Some("ab03"));
        app.backspace(t0);
        assert_eq!(app.last_pressed, Some(BACKSPACE_KEY));
        app.type_char('€', t0);
        assert_eq!(app.last_pressed, None);
    }

    #[test]
    fn feedback_hears_every_keystroke() {
        let recorder = Recorder::default();
        let seen = recorder.0.clone();
        let mut app = App::new(
            Config {
                mode: Mode::Custom,
                custom_text: "ab".to_string(),
                correction_mode: true,
                ..Config::default()
            },
            LayoutRegistry::builtin(),
            lists(),
            Box::new(recorder),
            false,
            Instant::now(),
        )
        .unwrap();
        type_text(&mut app, "axb", Instant::now());
        assert_eq!(*seen.borrow(), vec![true, false, true]);
    }

    #[test]
    fn paste_appends_to_the_typed_input() {
        let t0 = Instant::now();
        let mut app = custom_app("one two");
        type_text(&mut app, "on", t0);
        app.paste("e\t tx", t0);
        assert_eq!(app.session.round().typed_text(), "one tx");
        assert_eq!(app.session.round().error_count, 1);
        assert_eq!(app.last_pressed, None);
    }

    #[test]
    fn hint_layout_cycles_through_auto() {
        let t0 = Instant::now();
        let mut app = custom_app("a");
        app.cycle_hint_layout(t0);
        assert_eq!(app.config.hint_layout.as_deref(), Some("en-us"));
        for _ in 0..LayoutRegistry::builtin().list_all().len() {
            app.cycle_hint_layout(t0);
        }
        assert_eq!(app.config.hint_layout, None);
    }
}
