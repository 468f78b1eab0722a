use super::{draw_banner, sound_label, stars, tier_color, Feed};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use shanhai::core::constants::TIER_COUNT;
use shanhai::loot::treasure_info;
use shanhai::BattleEngine;

/// Draws the main battle screen: monster, combo meter, ledger, editor and loot log
pub fn draw_battle_scene(
    frame: &mut Frame,
    engine: &BattleEngine,
    editor: &str,
    feed: &Feed,
    now_ms: i64,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Notification banner
            Constraint::Length(5), // Monster
            Constraint::Length(3), // Combo meter
            Constraint::Length(3), // Treasure ledger
            Constraint::Min(3),    // Editor
            Constraint::Length(7), // Loot log
            Constraint::Length(1), // Footer
        ])
        .split(frame.size());

    draw_banner(frame, chunks[0], feed.notification(now_ms));
    draw_monster(frame, chunks[1], engine);
    draw_combo(frame, chunks[2], engine, now_ms);
    draw_ledger(frame, chunks[3], engine);
    draw_editor(frame, chunks[4], editor);
    draw_log(frame, chunks[5], feed);
    draw_footer(frame, chunks[6], feed);
}

fn draw_monster(frame: &mut Frame, area: Rect, engine: &BattleEngine) {
    let monster = engine.monster();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} ", monster.display_name(), stars(monster.tier)))
        .border_style(Style::default().fg(tier_color(monster.tier)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HP gauge
            Constraint::Length(1), // Description
            Constraint::Min(0),    // Hint
        ])
        .split(inner);

    let ratio = monster.hp_ratio();
    let hp_color = if ratio > 0.66 {
        Color::Red
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Green
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(hp_color).add_modifier(Modifier::BOLD))
        .label(format!("HP {}/{}", monster.current_hp, monster.max_hp))
        .ratio(ratio.clamp(0.0, 1.0));
    frame.render_widget(gauge, rows[0]);

    let description = Paragraph::new(Span::styled(
        monster.description.as_str(),
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ));
    frame.render_widget(description, rows[1]);

    let hint = if monster.is_defeated() {
        Some("Defeated! Press Ctrl+N to challenge another monster.")
    } else if engine.awaiting_challenge() {
        Some("Start typing to attack, or press Ctrl+N to choose an opponent.")
    } else {
        None
    };
    if let Some(hint) = hint {
        let hint = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        frame.render_widget(hint, rows[2]);
    }
}

fn draw_combo(frame: &mut Frame, area: Rect, engine: &BattleEngine, now_ms: i64) {
    let combo = engine.combo();
    let mut spans = vec![
        Span::styled("Combo ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            combo.combo_count.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ];
    let multiplier = engine.bonus_multiplier();
    if multiplier > 1 {
        spans.push(Span::styled(
            format!("  x{} loot", multiplier),
            Style::default().fg(Color::Yellow),
        ));
    }
    if combo.is_flow_state {
        spans.push(Span::styled(
            "  FLOW",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(remaining) = engine.combo_time_remaining(now_ms) {
        spans.push(Span::styled(
            format!("  ({:.1}s)", remaining as f64 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let meter = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Flow"))
        .alignment(Alignment::Center);
    frame.render_widget(meter, area);
}

fn draw_ledger(frame: &mut Frame, area: Rect, engine: &BattleEngine) {
    let player = engine.player();
    let mut spans = Vec::new();
    for tier in 1..=TIER_COUNT {
        if let Some(info) = treasure_info(&player.current_theme, tier) {
            spans.push(Span::raw(format!("{} ", info.emoji)));
            spans.push(Span::styled(
                format!("{:<4}", player.treasure_tiers.count(tier)),
                Style::default().fg(tier_color(tier)),
            ));
        }
    }
    let ledger = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Treasures"))
        .alignment(Alignment::Center);
    frame.render_widget(ledger, area);
}

fn draw_editor(frame: &mut Frame, area: Rect, editor: &str) {
    let visible = area.height.saturating_sub(2) as usize;
    let all: Vec<&str> = editor.split('\n').collect();
    let start = all.len().saturating_sub(visible);
    let mut lines: Vec<Line> = all[start..].iter().map(|l| Line::from(*l)).collect();
    if let Some(last) = lines.pop() {
        let mut spans = last.spans;
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Scroll ({} chars)", editor.chars().count())),
    );
    frame.render_widget(widget, area);
}

fn draw_log(frame: &mut Frame, area: Rect, feed: &Feed) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = feed
        .entries()
        .take(visible)
        .map(|entry| Line::from(entry.as_str()))
        .collect();
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Loot"));
    frame.render_widget(widget, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, feed: &Feed) {
    let mut spans = vec![Span::styled(
        "[Esc] Quit  [Ctrl+N] Monsters  [Ctrl+T] Titles  [Ctrl+L] New scroll",
        Style::default().fg(Color::Gray),
    )];
    if let Some(sound) = feed.last_sound() {
        spans.push(Span::styled(
            format!("  ♪ {}", sound_label(sound)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
