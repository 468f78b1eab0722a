use super::{stars, tier_color};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use shanhai::core::constants::TIER_COUNT;
use shanhai::loot::{theme, THEMES};
use shanhai::monster::{templates_by_theme, CustomMonster, MonsterChoice, MonsterTemplate};

pub enum SelectAction {
    None,
    Cancel,
    Choose(MonsterChoice),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Star,
    Theme,
}

struct CustomForm {
    name: String,
    star: u8,
    theme_index: usize,
    field: Field,
}

impl CustomForm {
    fn new() -> Self {
        Self {
            name: String::new(),
            star: 1,
            theme_index: 0,
            field: Field::Name,
        }
    }

    fn next_field(&mut self) {
        self.field = match self.field {
            Field::Name => Field::Star,
            Field::Star => Field::Theme,
            Field::Theme => Field::Name,
        };
    }

    fn prev_field(&mut self) {
        self.field = match self.field {
            Field::Name => Field::Theme,
            Field::Star => Field::Name,
            Field::Theme => Field::Star,
        };
    }

    fn adjust(&mut self, forward: bool) {
        match self.field {
            Field::Name => {}
            Field::Star => {
                self.star = if forward {
                    (self.star % TIER_COUNT) + 1
                } else if self.star <= 1 {
                    TIER_COUNT
                } else {
                    self.star - 1
                };
            }
            Field::Theme => {
                let len = THEMES.len();
                self.theme_index = if forward {
                    (self.theme_index + 1) % len
                } else {
                    (self.theme_index + len - 1) % len
                };
            }
        }
    }

    fn to_choice(&self) -> MonsterChoice {
        MonsterChoice::Custom(CustomMonster {
            name: self.name.trim().to_string(),
            star: self.star,
            theme: THEMES[self.theme_index].id.to_string(),
        })
    }
}

/// Monster picker: the catalog grouped by theme, plus a custom-monster form.
pub struct MonsterSelectScreen {
    entries: Vec<&'static MonsterTemplate>,
    cursor: usize,
    form: Option<CustomForm>,
    pub error: Option<String>,
}

impl MonsterSelectScreen {
    pub fn new() -> Self {
        Self {
            entries: templates_by_theme()
                .into_iter()
                .flat_map(|(_, members)| members)
                .collect(),
            cursor: 0,
            form: None,
            error: None,
        }
    }

    pub fn reset(&mut self) {
        self.form = None;
        self.error = None;
    }

    /// The last row opens the custom form.
    fn custom_row(&self) -> usize {
        self.entries.len()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SelectAction {
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor < self.custom_row() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter => {
                if self.cursor == self.custom_row() {
                    self.form = Some(CustomForm::new());
                    self.error = None;
                } else if let Some(template) = self.entries.get(self.cursor) {
                    return SelectAction::Choose(MonsterChoice::Template(template.id.to_string()));
                }
            }
            KeyCode::Esc => return SelectAction::Cancel,
            _ => {}
        }
        SelectAction::None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> SelectAction {
        let Some(form) = self.form.as_mut() else {
            return SelectAction::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.error = None;
            }
            KeyCode::Enter => return SelectAction::Choose(form.to_choice()),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.adjust(false),
            KeyCode::Right => form.adjust(true),
            KeyCode::Backspace if form.field == Field::Name => {
                form.name.pop();
            }
            KeyCode::Char(c) if form.field == Field::Name => form.name.push(c),
            _ => {}
        }
        SelectAction::None
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, current_id: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(5),    // List or form
                Constraint::Length(2), // Validation
                Constraint::Length(1), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Choose Your Opponent")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        match &self.form {
            Some(form) => draw_form(f, chunks[1], form),
            None => self.draw_list(f, chunks[1], current_id),
        }

        if let Some(error) = &self.error {
            let validation = Paragraph::new(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ));
            f.render_widget(validation, chunks[2]);
        }

        let controls = if self.form.is_some() {
            "[Tab] Next field  [←/→] Change  [Enter] Summon  [Esc] Back"
        } else {
            "[↑/↓] Move  [Enter] Select  [Esc] Cancel"
        };
        let controls = Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[3]);
    }

    fn draw_list(&self, f: &mut Frame, area: Rect, current_id: &str) {
        let mut lines = Vec::new();
        let mut index = 0;
        let mut cursor_line = 0;
        for (theme_id, members) in templates_by_theme() {
            lines.push(Line::from(Span::styled(
                theme(theme_id).name,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )));
            for template in members {
                let selected = index == self.cursor;
                if selected {
                    cursor_line = lines.len();
                }
                let marker = if selected { "> " } else { "  " };
                let current = if template.id == current_id { " (current)" } else { "" };
                let style = if selected {
                    Style::default()
                        .fg(tier_color(template.tier))
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(tier_color(template.tier))
                };
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!(
                            "{} {:<5} {:>5} HP{}",
                            template.name,
                            stars(template.tier),
                            template.max_hp,
                            current
                        ),
                        style,
                    ),
                ]));
                index += 1;
            }
        }

        let custom_selected = self.cursor == self.custom_row();
        if custom_selected {
            cursor_line = lines.len();
        }
        lines.push(Line::from(Span::styled(
            if custom_selected {
                "> + Custom monster"
            } else {
                "  + Custom monster"
            },
            Style::default().fg(Color::Green),
        )));

        // Keep the cursor on screen
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = cursor_line.saturating_sub(visible.saturating_sub(1));
        let list = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Monsters"))
            .scroll((scroll as u16, 0));
        f.render_widget(list, area);
    }
}

fn draw_form(f: &mut Frame, area: Rect, form: &CustomForm) {
    let field_style = |field: Field| {
        if form.field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let lines = vec![
        Line::from(vec![
            Span::raw("Name:  "),
            Span::styled(format!("{}_", form.name), field_style(Field::Name)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Star:  "),
            Span::styled(
                format!("< {} >", stars(form.star)),
                field_style(Field::Star),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Theme: "),
            Span::styled(
                format!("< {} >", THEMES[form.theme_index].name),
                field_style(Field::Theme),
            ),
        ]),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Custom Monster"),
    );
    f.render_widget(widget, area);
}
