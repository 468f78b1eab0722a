use crate::loot::themes::DEFAULT_THEME_ID;
use crate::titles::Title;
use crate::treasure::TreasureLedger;
use serde::{Deserialize, Serialize};

/// Long-lived player progress, persisted under `playerData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerData {
    pub treasure_tiers: TreasureLedger,
    pub current_theme: String,
    /// Unix ms of the last save; zero when never saved.
    pub last_save_timestamp: i64,
    pub unlocked_titles: Vec<Title>,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            treasure_tiers: TreasureLedger::new(),
            current_theme: DEFAULT_THEME_ID.to_string(),
            last_save_timestamp: 0,
            unlocked_titles: Vec::new(),
        }
    }
}
