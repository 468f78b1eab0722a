//! Per-battle accumulators and the report shown when a monster falls.

use crate::monster::Monster;
use crate::titles::GeneratedTitle;
use std::collections::BTreeMap;

/// Totals for the battle in progress. Cleared on monster selection and after
/// each defeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleStats {
    pub total_damage: u64,
    pub max_combo: u32,
    /// Treasures earned this battle, keyed by tier.
    pub treasures_earned: BTreeMap<u8, u32>,
}

impl BattleStats {
    pub fn record_drop(&mut self, tier: u8, damage: u32) {
        *self.treasures_earned.entry(tier).or_insert(0) += 1;
        self.total_damage += damage as u64;
    }

    pub fn record_combo(&mut self, combo: u32) {
        self.max_combo = self.max_combo.max(combo);
    }

    pub fn treasures_total(&self) -> u32 {
        self.treasures_earned.values().sum()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the victory screen needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub monster: Monster,
    pub total_damage: u64,
    pub max_combo: u32,
    pub treasures_earned: BTreeMap<u8, u32>,
    pub duration_secs: u64,
    pub title: GeneratedTitle,
    /// Theme used to name the themed tiers in the report.
    pub theme_id: String,
}

impl BattleReport {
    /// `Xm Ys` style duration.
    pub fn duration_label(&self) -> String {
        format!("{}m {}s", self.duration_secs / 60, self.duration_secs % 60)
    }
}

/// Whole seconds between battle start and `now_ms`, zero if the clock went backwards.
pub fn battle_duration_secs(battle_start_ms: i64, now_ms: i64) -> u64 {
    (now_ms - battle_start_ms).max(0) as u64 / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_drop_accumulates() {
        let mut stats = BattleStats::default();
        stats.record_drop(1, 1);
        stats.record_drop(1, 1);
        stats.record_drop(3, 8);
        assert_eq!(stats.total_damage, 10);
        assert_eq!(stats.treasures_earned.get(&1), Some(&2));
        assert_eq!(stats.treasures_earned.get(&3), Some(&1));
        assert_eq!(stats.treasures_total(), 3);
    }

    #[test]
    fn test_max_combo_keeps_peak() {
        let mut stats = BattleStats::default();
        stats.record_combo(12);
        stats.record_combo(4);
        assert_eq!(stats.max_combo, 12);
        stats.clear();
        assert_eq!(stats, BattleStats::default());
    }

    #[test]
    fn test_duration_floors_to_seconds() {
        assert_eq!(battle_duration_secs(1_000, 62_999), 61);
        assert_eq!(battle_duration_secs(5_000, 1_000), 0);
    }
}
