pub mod battle_scene;
pub mod honors_scene;
pub mod monster_select;
pub mod report_scene;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use shanhai::core::constants::NOTIFICATION_DURATION_MS;
use shanhai::core::KeySound;
use std::collections::VecDeque;

const FEED_CAPACITY: usize = 50;

/// Host-side presentation state: the notification banner, the loot log and
/// the last key sound. Nothing here feeds back into the engine.
#[derive(Debug, Default)]
pub struct Feed {
    notification: Option<(String, i64)>,
    entries: VecDeque<String>,
    last_sound: Option<KeySound>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` in the banner until `NOTIFICATION_DURATION_MS` passes.
    pub fn notify(&mut self, message: String, now_ms: i64) {
        self.notification = Some((message, now_ms + NOTIFICATION_DURATION_MS));
    }

    pub fn notification(&self, now_ms: i64) -> Option<&str> {
        match &self.notification {
            Some((message, expires_at)) if now_ms < *expires_at => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn log(&mut self, entry: String) {
        self.entries.push_front(entry);
        self.entries.truncate(FEED_CAPACITY);
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn set_sound(&mut self, sound: KeySound) {
        self.last_sound = Some(sound);
    }

    pub fn last_sound(&self) -> Option<KeySound> {
        self.last_sound
    }
}

/// Draws the one-line notification banner, blank when nothing is active
pub fn draw_banner(frame: &mut Frame, area: Rect, message: Option<&str>) {
    let Some(message) = message else {
        frame.render_widget(Paragraph::new(""), area);
        return;
    };
    let banner = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", message),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .style(Style::default().bg(Color::Rgb(40, 40, 20)));
    frame.render_widget(banner, area);
}

pub fn stars(count: u8) -> String {
    "★".repeat(count as usize)
}

pub fn tier_color(tier: u8) -> Color {
    match tier {
        1 => Color::White,
        2 => Color::Green,
        3 => Color::Blue,
        4 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// A rectangle of the given size centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}

pub fn sound_label(sound: KeySound) -> &'static str {
    match sound {
        KeySound::Key => "key",
        KeySound::Key2 => "key2",
        KeySound::Enter => "enter",
        KeySound::Space => "space",
        KeySound::Delete => "delete",
    }
}
