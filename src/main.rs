mod ui;

use chrono::Utc;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::ThreadRng;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use shanhai::core::constants::{INPUT_POLL_MS, TICK_INTERVAL_MS};
use shanhai::core::{BattleReport, KeyPress};
use shanhai::persistence::{self, SaveData};
use shanhai::titles::GeneratedTitle;
use shanhai::{BattleEngine, EngineEvent};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use ui::battle_scene::draw_battle_scene;
use ui::honors_scene::HonorsScreen;
use ui::monster_select::{MonsterSelectScreen, SelectAction};
use ui::report_scene::draw_battle_report;
use ui::Feed;

enum Screen {
    Battle,
    SelectMonster,
    Report,
    Honors,
}

fn main() -> io::Result<()> {
    let mut save_override: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("shanhai {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Shanhai - Typing battles against mythical beasts\n");
                println!("Usage: shanhai [options]\n");
                println!("Options:");
                println!("  --data <path>  Use this save file instead of ~/.shanhai/data.json");
                println!("  --version      Show version information");
                println!("  --help         Show this help message\n");
                println!("Set SHANHAI_LOG_PATH to write logs to a file.");
                std::process::exit(0);
            }
            "--data" => match args.next() {
                Some(path) => save_override = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--data needs a path");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'shanhai --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();

    let save_path = match save_override {
        Some(path) => Some(path),
        None => match persistence::default_save_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "progress will not be saved");
                None
            }
        },
    };
    let save = save_path
        .as_deref()
        .map(persistence::load_or_default)
        .unwrap_or_default();
    let mut host = Host::new(save, save_path, now_ms());
    info!(monster = %host.engine.monster().name, "session started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut host);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableBracketedPaste)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    host.save(now_ms());
    info!("session ended");
    result
}

/// Logs go to the file named by `SHANHAI_LOG_PATH`; the TUI owns stdout.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shanhai=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    let Some(path) = std::env::var_os("SHANHAI_LOG_PATH") else {
        builder.with_writer(io::sink).init();
        return;
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(e) => {
            eprintln!("Could not open log file {:?}: {}", path, e);
            builder.with_writer(io::sink).init();
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, host: &mut Host) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        let now = now_ms();
        terminal.draw(|frame| host.draw(frame, now))?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if !host.handle_key(key, now_ms()) {
                        return Ok(());
                    }
                }
                Event::Paste(text) => host.paste(&text, now_ms()),
                _ => {}
            }
        }

        // Engine timers every 100ms
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            let now = now_ms();
            let events = host.engine.tick(now);
            host.apply(events, now);
            last_tick = Instant::now();
        }
    }
}

struct Host {
    engine: BattleEngine,
    save_path: Option<PathBuf>,
    editor: String,
    feed: Feed,
    screen: Screen,
    select: MonsterSelectScreen,
    honors: HonorsScreen,
    report: Option<BattleReport>,
    rng: ThreadRng,
}

impl Host {
    fn new(save: SaveData, save_path: Option<PathBuf>, now_ms: i64) -> Self {
        Self {
            engine: BattleEngine::from_save(save, now_ms),
            save_path,
            editor: String::new(),
            feed: Feed::new(),
            screen: Screen::Battle,
            select: MonsterSelectScreen::new(),
            honors: HonorsScreen::new(),
            report: None,
            rng: rand::thread_rng(),
        }
    }

    fn draw(&self, frame: &mut Frame, now_ms: i64) {
        match self.screen {
            Screen::Battle => draw_battle_scene(frame, &self.engine, &self.editor, &self.feed, now_ms),
            Screen::Report => {
                draw_battle_scene(frame, &self.engine, &self.editor, &self.feed, now_ms);
                if let Some(report) = &self.report {
                    draw_battle_report(frame, report, self.engine.rerolls_remaining());
                }
            }
            Screen::SelectMonster => {
                let area = frame.size();
                self.select.draw(frame, area, &self.engine.monster().id);
            }
            Screen::Honors => {
                let area = frame.size();
                self.honors
                    .draw(frame, area, &self.engine.player().unlocked_titles);
            }
        }
    }

    /// Write a snapshot; failures are logged and play continues.
    fn save(&mut self, now_ms: i64) {
        let snapshot = self.engine.snapshot(now_ms);
        let Some(path) = &self.save_path else {
            return;
        };
        if let Err(e) = persistence::save(path, &snapshot) {
            error!(path = %path.display(), error = %e, "failed to save progress");
        }
    }

    fn apply(&mut self, events: Vec<EngineEvent>, now_ms: i64) {
        let mut save_requested = false;
        for event in events {
            match event {
                EngineEvent::HpChanged { .. } | EngineEvent::ComboChanged { .. } => {}
                EngineEvent::TreasureFound {
                    tier, emoji, name, ..
                } => {
                    self.feed
                        .log(format!("{} Found {} (tier {})", emoji, name, tier));
                }
                EngineEvent::TitleUnlocked { title, star } => {
                    self.feed
                        .log(format!("🏆 Title unlocked: {} ({}★)", title, star));
                    if let Some(report) = self.report.as_mut() {
                        report.title = GeneratedTitle { title, star };
                    }
                }
                EngineEvent::MonsterDefeated(report) => {
                    self.report = Some(*report);
                    self.screen = Screen::Report;
                }
                EngineEvent::Notification(notice) => {
                    debug!(key = notice.key(), "notification");
                    self.feed.notify(notice.message(), now_ms);
                }
                EngineEvent::KeySound(sound) => self.feed.set_sound(sound),
                EngineEvent::SaveRequested => save_requested = true,
            }
        }
        if save_requested {
            self.save(now_ms);
        }
    }

    /// Returns false when the player asked to quit.
    fn handle_key(&mut self, key: KeyEvent, now_ms: i64) -> bool {
        // Terminals rarely report releases, so each press is its own down/up pair
        if key.kind == KeyEventKind::Release {
            return true;
        }
        match self.screen {
            Screen::Battle => return self.handle_battle_key(key, now_ms),
            Screen::Report => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    let events = self.engine.reroll_title(now_ms, &mut self.rng);
                    self.apply(events, now_ms);
                }
                KeyCode::Enter | KeyCode::Esc => {
                    self.engine.close_battle_report();
                    self.report = None;
                    self.screen = Screen::Battle;
                }
                _ => {}
            },
            Screen::SelectMonster => match self.select.handle_key(key) {
                SelectAction::None => {}
                SelectAction::Cancel => self.screen = Screen::Battle,
                SelectAction::Choose(choice) => match self.engine.select_monster(choice, now_ms) {
                    Ok(events) => {
                        self.apply(events, now_ms);
                        self.feed.notify(
                            format!("{} appears!", self.engine.monster().display_name()),
                            now_ms,
                        );
                        self.report = None;
                        self.screen = Screen::Battle;
                    }
                    Err(e) => self.select.error = Some(e.to_string()),
                },
            },
            Screen::Honors => {
                let titles = &self.engine.player().unlocked_titles;
                match key.code {
                    KeyCode::Up => self.honors.move_up(),
                    KeyCode::Down => self.honors.move_down(titles.len()),
                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        if let Some(title) = self.honors.selected(titles).cloned() {
                            let events = self.engine.remove_title(&title.title, title.unlocked_at);
                            self.apply(events, now_ms);
                            self.honors
                                .clamp(self.engine.player().unlocked_titles.len());
                        }
                    }
                    KeyCode::Esc => self.screen = Screen::Battle,
                    _ => {}
                }
            }
        }
        true
    }

    fn handle_battle_key(&mut self, key: KeyEvent, now_ms: i64) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if ctrl => return false,
            KeyCode::Char('n') if ctrl => {
                self.select.reset();
                self.screen = Screen::SelectMonster;
                return true;
            }
            KeyCode::Char('t') if ctrl => {
                self.screen = Screen::Honors;
                return true;
            }
            KeyCode::Char('l') if ctrl => {
                self.editor.clear();
                self.engine.on_document_switched(0, now_ms);
                self.feed.notify("A fresh scroll.".to_string(), now_ms);
                return true;
            }
            _ => {}
        }

        if let Some(press) = key_press(&key) {
            let events = self.engine.on_key_down(&press);
            self.apply(events, now_ms);
        }
        if self.edit(&key) {
            let events = self.engine.on_text_changed(
                self.editor.chars().count(),
                now_ms,
                &mut self.rng,
            );
            self.apply(events, now_ms);
        }
        self.engine.on_key_up();
        true
    }

    /// Apply a key to the editor buffer; true when the text changed.
    fn edit(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.editor.push(c),
            KeyCode::Enter => self.editor.push('\n'),
            KeyCode::Tab => self.editor.push('\t'),
            KeyCode::Backspace => return self.editor.pop().is_some(),
            _ => return false,
        }
        true
    }

    fn paste(&mut self, text: &str, now_ms: i64) {
        if !matches!(self.screen, Screen::Battle) || text.is_empty() {
            return;
        }
        self.editor.push_str(text);
        let events = self
            .engine
            .on_text_changed(self.editor.chars().count(), now_ms, &mut self.rng);
        self.apply(events, now_ms);
    }
}

/// Browser-style key code names, the vocabulary `KeySound::for_code` speaks.
fn key_code_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{}", c),
        KeyCode::Char(_) => "Unidentified".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        _ => return None,
    };
    Some(name)
}

fn key_press(key: &KeyEvent) -> Option<KeyPress> {
    Some(KeyPress {
        code: key_code_name(key.code)?,
        is_repeat: key.kind == KeyEventKind::Repeat,
        is_composing: false,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        meta: key
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_names() {
        assert_eq!(key_code_name(KeyCode::Char('a')).as_deref(), Some("KeyA"));
        assert_eq!(key_code_name(KeyCode::Char('7')).as_deref(), Some("Digit7"));
        assert_eq!(key_code_name(KeyCode::Char(' ')).as_deref(), Some("Space"));
        assert_eq!(key_code_name(KeyCode::F(1)), None);
    }

    #[test]
    fn test_key_press_flags() {
        let mut event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        event.kind = KeyEventKind::Repeat;
        let press = key_press(&event).unwrap();
        assert!(press.ctrl && press.is_repeat);
        assert!(press.has_modifier());
    }

    #[test]
    fn test_editor_edits() {
        let mut host = Host::new(SaveData::default(), None, 0);
        assert!(host.edit(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(host.edit(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(host.editor, "x\n");
        assert!(!host.edit(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(host.edit(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert!(host.edit(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert!(!host.edit(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
    }
}
