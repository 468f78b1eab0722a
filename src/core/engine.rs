//! The battle engine: the one owner of all game state.
//!
//! The host forwards editor notifications (`on_key_down`, `on_key_up`,
//! `on_text_changed`, `on_document_switched`), user actions
//! (`select_monster`, `reroll_title`) and a periodic `tick`. Each call mutates
//! state synchronously and returns the [`EngineEvent`]s it produced, in
//! order. Renderers read state through the accessors and never mutate it.

use super::battle::{battle_duration_secs, BattleReport, BattleStats};
use super::constants::{IDLE_REGEN_AMOUNT, IDLE_REGEN_INTERVAL_MS};
use super::events::{EngineEvent, Notice};
use super::input::{InputAggregator, KeyPress, KeySound};
use super::player::PlayerData;
use super::timers::TimerSlot;
use crate::combo::{ComboOutcome, ComboState, ComboTracker};
use crate::config::Settings;
use crate::dice::Dice;
use crate::loot::{resolve_loot, treasure_info};
use crate::monster::{default_template, Monster, MonsterChoice, MonsterError};
use crate::persistence::SaveData;
use crate::titles::{generate_title, remove_title, RerollSession};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BattleEngine {
    settings: Settings,
    player: PlayerData,
    monster: Monster,
    input: InputAggregator,
    combo: ComboTracker,
    battle: BattleStats,
    idle_timer: TimerSlot,
    reroll: Option<RerollSession>,
}

impl BattleEngine {
    /// Fresh player facing the default monster.
    pub fn new(settings: Settings, now_ms: i64) -> Self {
        Self::from_save(
            SaveData {
                settings,
                ..SaveData::default()
            },
            now_ms,
        )
    }

    /// Restore from a save.
    ///
    /// A monster left alone for longer than the flow hold time has fully
    /// healed by the time the player returns.
    pub fn from_save(save: SaveData, now_ms: i64) -> Self {
        let SaveData {
            mut settings,
            player_data,
            active_monster,
        } = save;
        settings.normalize();

        let mut monster = active_monster
            .unwrap_or_else(|| Monster::from_template(default_template(), now_ms));
        monster.sanitize();
        if monster.battle_start_time <= 0 {
            monster.battle_start_time = now_ms;
        }

        let last_save = if player_data.last_save_timestamp > 0 {
            player_data.last_save_timestamp
        } else {
            now_ms
        };
        let idle_ms = now_ms - last_save;
        if idle_ms > settings.hold_time_ms() {
            info!(idle_ms, monster = %monster.name, "monster recovered while away");
            monster.restore_full();
        }

        let mut idle_timer = TimerSlot::new();
        idle_timer.arm(now_ms, settings.hold_time_ms());

        Self {
            settings,
            player: player_data,
            monster,
            input: InputAggregator::default(),
            combo: ComboTracker::new(),
            battle: BattleStats::default(),
            idle_timer,
            reroll: None,
        }
    }

    /// Stamp the save time and copy out everything that persists.
    pub fn snapshot(&mut self, now_ms: i64) -> SaveData {
        self.player.last_save_timestamp = now_ms;
        SaveData {
            settings: self.settings.clone(),
            player_data: self.player.clone(),
            active_monster: Some(self.monster.clone()),
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> &PlayerData {
        &self.player
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn combo(&self) -> &ComboState {
        self.combo.state()
    }

    pub fn bonus_multiplier(&self) -> u32 {
        self.combo.bonus_multiplier()
    }

    pub fn battle_stats(&self) -> &BattleStats {
        &self.battle
    }

    /// Time until the combo lapses, if one is pending.
    pub fn combo_time_remaining(&self, now_ms: i64) -> Option<i64> {
        self.combo.reset_timer().remaining_ms(now_ms)
    }

    pub fn idle_deadline(&self) -> Option<i64> {
        self.idle_timer.deadline()
    }

    /// Rerolls left for the open battle report, `None` when no report is open.
    pub fn rerolls_remaining(&self) -> Option<u32> {
        self.reroll.as_ref().map(RerollSession::remaining)
    }

    /// True before the player has picked a first opponent.
    pub fn awaiting_challenge(&self) -> bool {
        self.monster.id == default_template().id && self.monster.is_full_hp()
    }

    // ── Editor input ────────────────────────────────────────────

    pub fn on_key_down(&mut self, key: &KeyPress) -> Vec<EngineEvent> {
        if key.is_composing {
            return Vec::new();
        }
        self.input.key_down(key.is_repeat);
        if !self.settings.sound.is_enabled || key.has_modifier() {
            return Vec::new();
        }
        vec![EngineEvent::KeySound(KeySound::for_code(&key.code))]
    }

    pub fn on_key_up(&mut self) {
        self.input.key_up();
    }

    /// The active document changed; adopt its length without scoring it.
    pub fn on_document_switched(&mut self, current_len: usize, now_ms: i64) {
        self.input.rebase(current_len);
        self.idle_timer.arm(now_ms, self.settings.hold_time_ms());
    }

    /// The document now has `current_len` characters.
    pub fn on_text_changed(
        &mut self,
        current_len: usize,
        now_ms: i64,
        dice: &mut impl Dice,
    ) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let delta = self.input.measure(current_len);
        let hold_ms = self.settings.hold_time_ms();
        self.idle_timer.arm(now_ms, hold_ms);

        match self.combo.register(&delta, now_ms, hold_ms) {
            ComboOutcome::Counted {
                combo,
                flow_activated,
            } => {
                self.battle.record_combo(combo);
                if flow_activated {
                    info!(combo, "flow state activated");
                    events.push(EngineEvent::Notification(Notice::FlowActivated));
                }
                events.push(EngineEvent::ComboChanged {
                    count: combo,
                    is_flow: self.combo.is_flow(),
                });
            }
            ComboOutcome::Ignored(reason) => {
                debug!(?reason, net_change = delta.net_change, "input not counted toward combo");
            }
        }

        let units = delta.loot_units();
        if units > 0 {
            self.resolve_typing(units, now_ms, dice, &mut events);
        }
        events
    }

    fn resolve_typing(
        &mut self,
        units: u32,
        now_ms: i64,
        dice: &mut impl Dice,
        events: &mut Vec<EngineEvent>,
    ) {
        if self.monster.is_defeated() {
            return;
        }

        let multiplier = self.combo.bonus_multiplier();
        let roll = resolve_loot(units, multiplier, dice);
        if !roll.found_treasure() {
            return;
        }

        for drop in &roll.drops {
            self.player.treasure_tiers.add(drop.tier, 1);
            self.battle.record_drop(drop.tier, drop.damage);
            if let Some(info) = treasure_info(&self.player.current_theme, drop.tier) {
                events.push(EngineEvent::TreasureFound {
                    tier: drop.tier,
                    emoji: info.emoji,
                    name_key: info.name_key,
                    name: info.name,
                });
            }
        }

        let dealt = self.monster.take_damage(roll.total_damage());
        self.player.treasure_tiers.convert();
        debug!(
            units,
            multiplier,
            drops = roll.drops.len(),
            dealt,
            hp = self.monster.current_hp,
            "typing resolved"
        );
        events.push(EngineEvent::HpChanged {
            current: self.monster.current_hp,
            max: self.monster.max_hp,
        });

        if self.monster.is_defeated() {
            self.finish_battle(now_ms, dice, events);
        }
        events.push(EngineEvent::SaveRequested);
    }

    fn finish_battle(&mut self, now_ms: i64, dice: &mut impl Dice, events: &mut Vec<EngineEvent>) {
        let duration_secs = battle_duration_secs(self.monster.battle_start_time, now_ms);
        let title = generate_title(&self.monster, dice);
        self.player
            .unlocked_titles
            .push(title.clone().unlock(now_ms));

        // Victory bonus: the battle's haul is credited a second time
        for (tier, count) in &self.battle.treasures_earned {
            self.player.treasure_tiers.add(*tier, *count);
        }
        self.player.treasure_tiers.convert();

        let stats = std::mem::take(&mut self.battle);
        info!(
            monster = %self.monster.name,
            duration_secs,
            total_damage = stats.total_damage,
            max_combo = stats.max_combo,
            title = %title.title,
            "monster defeated"
        );

        events.push(EngineEvent::TitleUnlocked {
            title: title.title.clone(),
            star: title.star,
        });
        events.push(EngineEvent::MonsterDefeated(Box::new(BattleReport {
            monster: self.monster.clone(),
            total_damage: stats.total_damage,
            max_combo: stats.max_combo,
            treasures_earned: stats.treasures_earned,
            duration_secs,
            title,
            theme_id: self.player.current_theme.clone(),
        })));
        self.reroll = Some(RerollSession::new(self.monster.clone()));
    }

    // ── Timers ──────────────────────────────────────────────────

    /// Fire any timers whose deadline has passed.
    pub fn tick(&mut self, now_ms: i64) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        if let Some(reset) = self.combo.expire(now_ms) {
            if reset.flow_interrupted {
                info!(combo = reset.previous_combo, "flow state interrupted");
                events.push(EngineEvent::Notification(Notice::FlowInterrupted));
            }
            if reset.previous_combo > 0 {
                events.push(EngineEvent::ComboChanged {
                    count: 0,
                    is_flow: false,
                });
            }
        }

        if self.idle_timer.fire_if_due(now_ms) {
            self.regenerate(now_ms, &mut events);
        }
        events
    }

    fn regenerate(&mut self, now_ms: i64, events: &mut Vec<EngineEvent>) {
        if self.monster.is_defeated() || self.monster.is_full_hp() {
            self.idle_timer.arm(now_ms, self.settings.hold_time_ms());
            return;
        }
        self.monster.heal(IDLE_REGEN_AMOUNT);
        debug!(hp = self.monster.current_hp, "monster regenerating");
        events.push(EngineEvent::HpChanged {
            current: self.monster.current_hp,
            max: self.monster.max_hp,
        });
        events.push(EngineEvent::Notification(Notice::MonsterRegenerating {
            monster: self.monster.display_name(),
        }));
        self.idle_timer.arm(now_ms, IDLE_REGEN_INTERVAL_MS);
    }

    // ── Player actions ──────────────────────────────────────────

    /// Start a new battle. Invalid custom monsters are rejected untouched.
    pub fn select_monster(
        &mut self,
        choice: MonsterChoice,
        now_ms: i64,
    ) -> Result<Vec<EngineEvent>, MonsterError> {
        let monster = choice.into_monster(now_ms)?;
        info!(id = %monster.id, name = %monster.name, tier = monster.tier, "monster selected");
        self.player.current_theme = monster.theme.clone();
        self.monster = monster;
        self.battle.clear();
        self.reroll = None;
        Ok(vec![
            EngineEvent::HpChanged {
                current: self.monster.current_hp,
                max: self.monster.max_hp,
            },
            EngineEvent::SaveRequested,
        ])
    }

    /// Replace the title unlocked by the open battle report.
    ///
    /// Returns no events once the rerolls are spent or no report is open.
    pub fn reroll_title(&mut self, now_ms: i64, dice: &mut impl Dice) -> Vec<EngineEvent> {
        let Some(session) = self.reroll.as_mut() else {
            return Vec::new();
        };
        match session.reroll(&mut self.player.unlocked_titles, now_ms, dice) {
            Some(fresh) => {
                debug!(title = %fresh.title, remaining = session.remaining(), "title rerolled");
                vec![
                    EngineEvent::TitleUnlocked {
                        title: fresh.title,
                        star: fresh.star,
                    },
                    EngineEvent::SaveRequested,
                ]
            }
            None => Vec::new(),
        }
    }

    pub fn close_battle_report(&mut self) {
        self.reroll = None;
    }

    pub fn remove_title(&mut self, title: &str, unlocked_at: i64) -> Vec<EngineEvent> {
        if remove_title(&mut self.player.unlocked_titles, title, unlocked_at) {
            vec![EngineEvent::SaveRequested]
        } else {
            Vec::new()
        }
    }

    pub fn update_settings(&mut self, mut settings: Settings) -> Vec<EngineEvent> {
        settings.normalize();
        self.settings = settings;
        vec![EngineEvent::SaveRequested]
    }
}
