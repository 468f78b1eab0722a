use super::{stars, tier_color};
use chrono::{TimeZone, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use shanhai::core::constants::TIER_COUNT;
use shanhai::titles::{count_by_star, sorted_by_star, Title};

/// Title collection browser, best titles first.
pub struct HonorsScreen {
    cursor: usize,
}

impl HonorsScreen {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Keep the cursor valid after a removal.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn selected<'a>(&self, titles: &'a [Title]) -> Option<&'a Title> {
        sorted_by_star(titles).get(self.cursor).copied()
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, titles: &[Title]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(1), // Star summary
                Constraint::Min(3),    // List
                Constraint::Length(1), // Controls
            ])
            .split(area);

        let title = Paragraph::new(format!("Hall of Titles ({})", titles.len()))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let counts = count_by_star(titles);
        let summary: Vec<Span> = (1..=TIER_COUNT)
            .rev()
            .map(|star| {
                Span::styled(
                    format!("{} {}   ", stars(star), counts[(star - 1) as usize]),
                    Style::default().fg(tier_color(star)),
                )
            })
            .collect();
        f.render_widget(
            Paragraph::new(Line::from(summary)).alignment(Alignment::Center),
            chunks[1],
        );

        let sorted = sorted_by_star(titles);
        let lines: Vec<Line> = if sorted.is_empty() {
            vec![Line::from(Span::styled(
                "Defeat a monster to earn your first title.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            sorted
                .into_iter()
                .enumerate()
                .map(|(i, title)| title_line(title, i == self.cursor))
                .collect()
        };
        let visible = chunks[2].height.saturating_sub(2) as usize;
        let scroll = self.cursor.saturating_sub(visible.saturating_sub(1));
        let list = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Titles"))
            .scroll((scroll as u16, 0));
        f.render_widget(list, chunks[2]);

        let controls = Paragraph::new("[↑/↓] Move  [D] Remove  [Esc] Back")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[3]);
    }
}

fn title_line(title: &Title, selected: bool) -> Line<'_> {
    let unlocked = Utc
        .timestamp_millis_opt(title.unlocked_at)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let mut style = Style::default().fg(tier_color(title.star));
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::from(vec![
        Span::raw(if selected { "> " } else { "  " }),
        Span::styled(format!("{:<5} ", stars(title.star)), style),
        Span::styled(title.title.as_str(), style),
        Span::styled(format!("  {}", unlocked), Style::default().fg(Color::DarkGray)),
    ])
}
