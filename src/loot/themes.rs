//! Treasure names per monster theme.
//!
//! Tiers 1 and 2 are themed; tiers 3-5 are the same everywhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasureInfo {
    /// Localization key, e.g. `treasurePotato`.
    pub name_key: &'static str,
    /// English display name.
    pub name: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub tier_1: TreasureInfo,
    pub tier_2: TreasureInfo,
}

const fn treasure(name_key: &'static str, name: &'static str, emoji: &'static str) -> TreasureInfo {
    TreasureInfo {
        name_key,
        name,
        emoji,
    }
}

pub const DEFAULT_THEME_ID: &str = "farming";

pub const THEMES: [Theme; 4] = [
    Theme {
        id: "farming",
        name: "Farming",
        tier_1: treasure("treasurePotato", "Potato", "🥔"),
        tier_2: treasure("treasurePapaya", "Papaya", "🥭"),
    },
    Theme {
        id: "mining",
        name: "Mining",
        tier_1: treasure("treasureStone", "Stone", "🪨"),
        tier_2: treasure("treasureCopper", "Copper", "🥉"),
    },
    Theme {
        id: "sea",
        name: "Deep Sea",
        tier_1: treasure("treasureFish", "Fish", "🐟"),
        tier_2: treasure("treasurePearl", "Pearl", "⚪"),
    },
    Theme {
        id: "cosmos",
        name: "Cosmos",
        tier_1: treasure("treasureStar", "Star", "⭐"),
        tier_2: treasure("treasureMoon", "Moon", "🌕"),
    },
];

const UNIVERSAL_TREASURES: [TreasureInfo; 3] = [
    treasure("treasureGoldKey", "Gold Key", "🔑"),
    treasure("treasureMoneyBag", "Money Bag", "💰"),
    treasure("treasureCrown", "Crown", "👑"),
];

/// Look up a theme, falling back to farming for unknown ids.
pub fn theme(id: &str) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or(&THEMES[0])
}

pub fn is_known_theme(id: &str) -> bool {
    THEMES.iter().any(|t| t.id == id)
}

pub fn treasure_info(theme_id: &str, tier: u8) -> Option<TreasureInfo> {
    match tier {
        1 => Some(theme(theme_id).tier_1),
        2 => Some(theme(theme_id).tier_2),
        3..=5 => Some(UNIVERSAL_TREASURES[(tier - 3) as usize]),
        _ => None,
    }
}
