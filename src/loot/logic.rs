use super::types::TIER_CONFIG;
use crate::dice::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasureDrop {
    pub tier: u8,
    pub damage: u32,
}

/// Outcome of rolling loot for one batch of typed characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LootRoll {
    pub drops: Vec<TreasureDrop>,
    pub units_rolled: u32,
}

impl LootRoll {
    pub fn found_treasure(&self) -> bool {
        !self.drops.is_empty()
    }

    pub fn total_damage(&self) -> u32 {
        self.drops
            .iter()
            .fold(0u32, |acc, d| acc.saturating_add(d.damage))
    }

    pub fn count_for(&self, tier: u8) -> u32 {
        self.drops.iter().filter(|d| d.tier == tier).count() as u32
    }
}

/// Roll one typed character against the drop table.
///
/// Tiers are checked from 1 upward with an independent roll each; the first
/// hit wins and no further tiers are checked for this character.
pub fn roll_unit(multiplier: u32, dice: &mut impl Dice) -> Option<TreasureDrop> {
    for config in TIER_CONFIG.iter() {
        if dice.roll() < config.effective_chance(multiplier) {
            return Some(TreasureDrop {
                tier: config.tier,
                damage: config.damage.roll(dice),
            });
        }
    }
    None
}

/// Roll every character of `change_amount` separately.
pub fn resolve_loot(change_amount: u32, multiplier: u32, dice: &mut impl Dice) -> LootRoll {
    let mut roll = LootRoll {
        drops: Vec::new(),
        units_rolled: change_amount,
    };
    for _ in 0..change_amount {
        if let Some(drop) = roll_unit(multiplier, dice) {
            roll.drops.push(drop);
        }
    }
    roll
}
