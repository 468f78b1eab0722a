use super::{centered_rect, stars, tier_color};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use shanhai::core::BattleReport;
use shanhai::loot::treasure_info;

/// Draws the victory report as an overlay on top of the battle screen
pub fn draw_battle_report(frame: &mut Frame, report: &BattleReport, rerolls_remaining: Option<u32>) {
    let area = centered_rect(56, 18, frame.size());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Victory!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} has been defeated", report.monster.display_name())),
        Line::from(""),
        Line::from(format!("Duration:     {}", report.duration_label())),
        Line::from(format!("Total damage: {}", report.total_damage)),
        Line::from(format!("Max combo:    {}", report.max_combo)),
        Line::from(""),
    ];

    if report.treasures_earned.is_empty() {
        lines.push(Line::from("No treasures this battle"));
    } else {
        let mut spans = vec![Span::raw("Treasures: ")];
        for (tier, count) in &report.treasures_earned {
            if let Some(info) = treasure_info(&report.theme_id, *tier) {
                spans.push(Span::styled(
                    format!("{} x{}  ", info.emoji, count),
                    Style::default().fg(tier_color(*tier)),
                ));
            }
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(
            "Victory bonus: treasures doubled",
            Style::default().fg(Color::Green),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("New title unlocked"));
    lines.push(Line::from(vec![
        Span::styled(
            report.title.title.as_str(),
            Style::default()
                .fg(tier_color(report.title.star))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(stars(report.title.star), Style::default().fg(Color::Yellow)),
    ]));
    lines.push(Line::from(""));

    let controls = match rerolls_remaining {
        Some(0) | None => "[Enter] Continue".to_string(),
        Some(n) => format!("[R] Reroll title ({} left)  [Enter] Continue", n),
    };
    lines.push(Line::from(Span::styled(controls, Style::default().fg(Color::Gray))));

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Battle Report ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(widget, area);
}
