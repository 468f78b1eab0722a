//! Tiered treasure drops and the damage they deal.

pub mod logic;
pub mod themes;
pub mod types;

pub use logic::{resolve_loot, roll_unit, LootRoll, TreasureDrop};
pub use themes::{theme, treasure_info, Theme, TreasureInfo, THEMES};
pub use types::{tier_config, DamageSpec, TierConfig, TIER_CONFIG};
