use crate::core::constants::{CUSTOM_MONSTER_HP, TIER_COUNT};
use crate::loot::themes::is_known_theme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remaining HP after taking `damage`, never below zero.
pub fn apply_damage(hp: u32, damage: u32) -> u32 {
    hp.saturating_sub(damage)
}

/// Static monster definition from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub en_name: Option<&'static str>,
    pub tier: u8,
    pub max_hp: u32,
    pub theme: &'static str,
    pub description: &'static str,
}

/// The monster currently being fought.
///
/// Fields missing from a save take neutral values; [`Monster::sanitize`]
/// repairs the tier and HP afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Monster {
    pub id: String,
    pub name: String,
    #[serde(
        rename = "en_name",
        alias = "enName",
        skip_serializing_if = "Option::is_none"
    )]
    pub en_name: Option<String>,
    pub tier: u8,
    pub max_hp: u32,
    pub current_hp: u32,
    pub theme: String,
    pub description: String,
    /// Unix ms when the battle began. Zero in saves from before it was tracked.
    pub battle_start_time: i64,
}

impl Monster {
    pub fn from_template(template: &MonsterTemplate, now_ms: i64) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.to_string(),
            en_name: template.en_name.map(str::to_string),
            tier: template.tier,
            max_hp: template.max_hp,
            current_hp: template.max_hp,
            theme: template.theme.to_string(),
            description: template.description.to_string(),
            battle_start_time: now_ms,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.current_hp >= self.max_hp
    }

    /// Apply damage and return how much HP was actually removed.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = apply_damage(self.current_hp, damage);
        before - self.current_hp
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn restore_full(&mut self) {
        self.current_hp = self.max_hp;
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    /// `English (Chinese)` when an English name exists.
    pub fn display_name(&self) -> String {
        match &self.en_name {
            Some(en) if !en.is_empty() => format!("{} ({})", en, self.name),
            _ => self.name.clone(),
        }
    }

    /// Repair values a hand-edited or truncated save could carry.
    pub fn sanitize(&mut self) {
        self.tier = self.tier.clamp(1, TIER_COUNT);
        if self.max_hp == 0 {
            self.max_hp = 1;
        }
        self.current_hp = self.current_hp.min(self.max_hp);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonsterError {
    #[error("monster name cannot be empty")]
    EmptyName,
    #[error("star rating must be 1-5, got {0}")]
    InvalidStar(u8),
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error("no monster template with id {0}")]
    UnknownTemplate(String),
}

/// A user-defined opponent. HP comes from the star rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMonster {
    pub name: String,
    pub star: u8,
    pub theme: String,
}

impl CustomMonster {
    pub fn validate(&self) -> Result<(), MonsterError> {
        if self.name.trim().is_empty() {
            return Err(MonsterError::EmptyName);
        }
        if !(1..=TIER_COUNT).contains(&self.star) {
            return Err(MonsterError::InvalidStar(self.star));
        }
        if !is_known_theme(&self.theme) {
            return Err(MonsterError::UnknownTheme(self.theme.clone()));
        }
        Ok(())
    }

    pub fn into_monster(self, now_ms: i64) -> Result<Monster, MonsterError> {
        self.validate()?;
        let max_hp = CUSTOM_MONSTER_HP[(self.star - 1) as usize];
        Ok(Monster {
            id: format!("custom-{now_ms}"),
            name: self.name.trim().to_string(),
            en_name: None,
            tier: self.star,
            max_hp,
            current_hp: max_hp,
            theme: self.theme,
            description: "A custom opponent of your own making.".to_string(),
            battle_start_time: now_ms,
        })
    }
}

/// What the player picked in the challenge dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonsterChoice {
    Template(String),
    Custom(CustomMonster),
}

impl MonsterChoice {
    pub fn into_monster(self, now_ms: i64) -> Result<Monster, MonsterError> {
        match self {
            MonsterChoice::Template(id) => super::data::find_template(&id)
                .map(|t| Monster::from_template(t, now_ms))
                .ok_or(MonsterError::UnknownTemplate(id)),
            MonsterChoice::Custom(custom) => custom.into_monster(now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::monster::data::default_template;
    use super::*;

    fn custom(name: &str, star: u8, theme: &str) -> CustomMonster {
        CustomMonster {
            name: name.to_string(),
            star,
            theme: theme.to_string(),
        }
    }

    #[test]
    fn test_apply_damage_clamps_at_zero() {
        assert_eq!(apply_damage(10, 3), 7);
        assert_eq!(apply_damage(3, 10), 0);
        assert_eq!(apply_damage(0, 0), 0);
    }

    fn dangkang() -> Monster {
        Monster::from_template(default_template(), 0)
    }

    #[test]
    fn test_take_damage_reports_applied_amount() {
        let mut monster = dangkang();
        monster.current_hp = 5;
        assert_eq!(monster.take_damage(8), 5);
        assert!(monster.is_defeated());
        assert_eq!(monster.take_damage(8), 0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut monster = dangkang();
        monster.current_hp = monster.max_hp - 1;
        monster.heal(5);
        assert!(monster.is_full_hp());
        assert_eq!(monster.current_hp, monster.max_hp);
    }

    #[test]
    fn test_custom_monster_hp_by_star() {
        for (star, hp) in [(1u8, 50u32), (2, 250), (3, 500), (4, 1000), (5, 2000)] {
            let monster = custom("Inkblot", star, "sea").into_monster(42).unwrap();
            assert_eq!(monster.max_hp, hp);
            assert_eq!(monster.current_hp, hp);
            assert_eq!(monster.tier, star);
            assert_eq!(monster.id, "custom-42");
            assert_eq!(monster.battle_start_time, 42);
        }
    }

    #[test]
    fn test_custom_monster_validation() {
        assert_eq!(
            custom("  ", 1, "sea").validate(),
            Err(MonsterError::EmptyName)
        );
        assert_eq!(
            custom("Inkblot", 0, "sea").validate(),
            Err(MonsterError::InvalidStar(0))
        );
        assert_eq!(
            custom("Inkblot", 6, "sea").validate(),
            Err(MonsterError::InvalidStar(6))
        );
        assert_eq!(
            custom("Inkblot", 3, "").validate(),
            Err(MonsterError::UnknownTheme(String::new()))
        );
    }

    #[test]
    fn test_template_choice() {
        let monster = MonsterChoice::Template("kun".to_string())
            .into_monster(7)
            .unwrap();
        assert_eq!(monster.tier, 5);
        assert!(monster.is_full_hp());
        assert!(matches!(
            MonsterChoice::Template("nope".to_string()).into_monster(7),
            Err(MonsterError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_display_name_prefers_english_pairing() {
        let monster = dangkang();
        assert_eq!(monster.display_name(), "Dangkang (当康)");
        let plain = custom("Inkblot", 1, "sea").into_monster(0).unwrap();
        assert_eq!(plain.display_name(), "Inkblot");
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let mut monster = dangkang();
        monster.tier = 9;
        monster.max_hp = 0;
        monster.current_hp = 40;
        monster.sanitize();
        assert_eq!(monster.tier, 5);
        assert_eq!(monster.max_hp, 1);
        assert_eq!(monster.current_hp, 1);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let monster: Monster =
            serde_json::from_str(r#"{"id":"x","name":"Wisp","maxHp":30,"currentHp":12}"#).unwrap();
        assert_eq!(monster.name, "Wisp");
        assert_eq!(monster.current_hp, 12);
        assert_eq!(monster.battle_start_time, 0);
        assert_eq!(monster.en_name, None);
        assert_eq!(monster.description, "");
    }

    #[test]
    fn test_missing_fields_do_not_borrow_the_default_template() {
        let mut monster: Monster =
            serde_json::from_str(r#"{"id":"custom-1","name":"Inkblot"}"#).unwrap();
        monster.sanitize();
        assert_eq!(monster.display_name(), "Inkblot");
        assert_eq!(monster.tier, 1);
        assert_eq!(monster.max_hp, 1);
    }

    #[test]
    fn test_english_name_key() {
        let monster: Monster =
            serde_json::from_str(r#"{"id":"kun","name":"鲲","en_name":"Kun"}"#).unwrap();
        assert_eq!(monster.en_name.as_deref(), Some("Kun"));
        let camel: Monster =
            serde_json::from_str(r#"{"id":"kun","name":"鲲","enName":"Kun"}"#).unwrap();
        assert_eq!(camel.en_name.as_deref(), Some("Kun"));

        let value = serde_json::to_value(dangkang()).unwrap();
        assert_eq!(value["en_name"], "Dangkang");
        assert!(value.get("enName").is_none());
    }
}
