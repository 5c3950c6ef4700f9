use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use keyguide::app::App;
use keyguide::config::{Config, SettingsStore};
use keyguide::event::{AppEvent, EventHandler};
use keyguide::feedback::TerminalBell;
use keyguide::generator::Mode;
use keyguide::generator::dictionary::WordLists;
use keyguide::keyboard::registry::LayoutRegistry;
use keyguide::ui::screen;

#[derive(Parser)]
#[command(
    name = "keyguide",
    version,
    about = "Terminal touch-typing tutor with a layout-aware keyboard guide"
)]
struct Cli {
    #[arg(short, long, help = "Keyboard layout id (see --list-layouts)")]
    layout: Option<String>,

    #[arg(long, help = "Layout used for hints when a character is not on the selected layout")]
    hint_layout: Option<String>,

    #[arg(short = 'g', long, help = "Learning language (en, uk, ru, de, fr, es)")]
    language: Option<String>,

    #[arg(short, long, help = "Round mode (practice, beginner, custom)")]
    mode: Option<Mode>,

    #[arg(short, long, help = "Number of words per practice round")]
    words: Option<usize>,

    #[arg(short, long, help = "Block keystrokes until the previous mistake is fixed")]
    correction: Option<bool>,

    #[arg(short, long, help = "Custom round text (switches to custom mode)")]
    text: Option<String>,

    #[arg(long, help = "Read custom round text from a file", conflicts_with = "text")]
    text_file: Option<PathBuf>,

    #[arg(long, help = "Write logs to this file instead of the data directory")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Print the available keyboard layouts and exit")]
    list_layouts: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let registry = LayoutRegistry::builtin();

    if cli.list_layouts {
        for meta in registry.list_all() {
            println!("{:<12} {} {} ({})", meta.id, meta.flag, meta.name, meta.language);
        }
        return Ok(());
    }

    init_logging(cli.log_file.as_deref());

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!("could not load config, using defaults: {err}");
        Config::default()
    });
    apply_overrides(&mut config, &cli)?;

    let custom_text = match (&cli.text, &cli.text_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("reading custom text from {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let feedback = Box::new(TerminalBell::stdout(config.sound));
    let mut app = App::new(
        config,
        registry,
        WordLists::load(),
        feedback,
        true,
        Instant::now(),
    )?;
    if let Some(text) = custom_text {
        app.set_custom_text(&text, Instant::now())?;
    }
    info!(
        "starting with layout {} in {} mode",
        app.config.layout,
        app.mode()
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    // Release and repeat events are reported separately when supported
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file because the terminal belongs to the UI. Logging is
/// skipped when the file cannot be opened.
fn init_logging(path: Option<&Path>) {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyguide")
            .join("keyguide.log"),
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("KEYGUIDE_LOG", "warn"),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init();
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(layout) = &cli.layout {
        config.set("layout", layout)?;
    }
    if let Some(hint_layout) = &cli.hint_layout {
        config.set("hint_layout", hint_layout)?;
    }
    if let Some(language) = &cli.language {
        config.set("learning_language", language)?;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(words) = cli.words {
        config.set("word_count", &words.to_string())?;
    }
    if let Some(correction) = cli.correction {
        config.correction_mode = correction;
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| screen::render(frame, app, Instant::now()))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.paste(&text, Instant::now()),
            AppEvent::Tick | AppEvent::Resize => {}
        }
        // Timers fire from here so a steady key stream cannot starve them
        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    let now = Instant::now();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::F(2) => app.cycle_mode(now),
        KeyCode::F(3) => app.cycle_language(now),
        KeyCode::F(4) => app.cycle_layout(now),
        KeyCode::F(5) => app.cycle_hint_layout(now),
        KeyCode::F(6) => app.toggle_correction(now),
        KeyCode::F(7) => app.toggle_keyboard(now),
        KeyCode::F(8) => app.toggle_hands(now),
        KeyCode::F(9) => app.toggle_colors(now),
        KeyCode::F(10) => app.toggle_sound(now),
        KeyCode::F(11) => app.toggle_dark_mode(now),
        KeyCode::F(12) => app.cycle_interface_language(now),
        KeyCode::Backspace => app.backspace(now),
        // AltGr arrives as Ctrl+Alt on some terminals
        KeyCode::Char(ch)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT) =>
        {
            app.type_char(ch, now)
        }
        _ => {}
    }
}
