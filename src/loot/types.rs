use crate::dice::Dice;

/// Damage dealt by one treasure of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSpec {
    Fixed(u32),
    /// Inclusive `[min, max]`.
    Range(u32, u32),
}

impl DamageSpec {
    pub fn roll(&self, dice: &mut impl Dice) -> u32 {
        match *self {
            DamageSpec::Fixed(damage) => damage,
            DamageSpec::Range(min, max) => dice.between(min, max),
        }
    }

    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            DamageSpec::Fixed(damage) => (damage, damage),
            DamageSpec::Range(min, max) => (min, max.max(min)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierConfig {
    pub tier: u8,
    /// Base drop probability per typed character.
    pub chance: f64,
    pub damage: DamageSpec,
}

impl TierConfig {
    pub fn effective_chance(&self, multiplier: u32) -> f64 {
        self.chance * multiplier as f64
    }
}

/// Drop table, lowest tier first. Lower tiers are checked first and win ties.
pub const TIER_CONFIG: [TierConfig; 5] = [
    TierConfig {
        tier: 1,
        chance: 0.1,
        damage: DamageSpec::Fixed(1),
    },
    TierConfig {
        tier: 2,
        chance: 0.01,
        damage: DamageSpec::Range(3, 5),
    },
    TierConfig {
        tier: 3,
        chance: 0.001,
        damage: DamageSpec::Range(6, 10),
    },
    TierConfig {
        tier: 4,
        chance: 0.0001,
        damage: DamageSpec::Range(11, 20),
    },
    TierConfig {
        tier: 5,
        chance: 0.00005,
        damage: DamageSpec::Range(21, 50),
    },
];

pub fn tier_config(tier: u8) -> Option<&'static TierConfig> {
    TIER_CONFIG.iter().find(|c| c.tier == tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn test_table_is_ordered_and_rarer_upward() {
        for pair in TIER_CONFIG.windows(2) {
            assert_eq!(pair[1].tier, pair[0].tier + 1);
            assert!(pair[1].chance < pair[0].chance);
            assert!(pair[1].damage.bounds().0 > pair[0].damage.bounds().1);
        }
    }

    #[test]
    fn test_fixed_damage_consumes_no_roll() {
        let mut dice = ScriptedDice::new([0.5]);
        assert_eq!(DamageSpec::Fixed(1).roll(&mut dice), 1);
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_range_damage_inclusive() {
        let mut dice = ScriptedDice::new([0.0, 0.999]);
        let spec = DamageSpec::Range(3, 5);
        assert_eq!(spec.roll(&mut dice), 3);
        assert_eq!(spec.roll(&mut dice), 5);
    }

    #[test]
    fn test_effective_chance_scales_linearly() {
        let tier2 = tier_config(2).unwrap();
        assert!((tier2.effective_chance(3) - 0.03).abs() < 1e-12);
        assert!(tier_config(0).is_none());
        assert!(tier_config(6).is_none());
    }
}
