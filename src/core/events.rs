//! Events produced by the battle engine for the presentation layer.
//!
//! The engine never renders or plays anything itself; every observable
//! change comes back to the host as an [`EngineEvent`], in order.

use super::battle::BattleReport;
use super::input::KeySound;

/// Short messages for the notification banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FlowActivated,
    FlowInterrupted,
    MonsterRegenerating { monster: String },
}

impl Notice {
    /// Localization key for hosts with their own translation tables.
    pub fn key(&self) -> &'static str {
        match self {
            Notice::FlowActivated => "flowStateActivated",
            Notice::FlowInterrupted => "flowStateInterrupted",
            Notice::MonsterRegenerating { .. } => "monsterIsRegenerating",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::FlowActivated => "Flow state activated! Treasure chances boosted.".to_string(),
            Notice::FlowInterrupted => "Flow state interrupted.".to_string(),
            Notice::MonsterRegenerating { monster } => format!("{monster} is regenerating..."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HpChanged {
        current: u32,
        max: u32,
    },
    ComboChanged {
        count: u32,
        is_flow: bool,
    },
    TreasureFound {
        tier: u8,
        emoji: &'static str,
        name_key: &'static str,
        name: &'static str,
    },
    /// A new title was unlocked, or the latest one was rerolled.
    TitleUnlocked {
        title: String,
        star: u8,
    },
    MonsterDefeated(Box<BattleReport>),
    Notification(Notice),
    KeySound(KeySound),
    /// State changed in a way worth persisting.
    SaveRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_keys() {
        assert_eq!(Notice::FlowActivated.key(), "flowStateActivated");
        assert_eq!(Notice::FlowInterrupted.key(), "flowStateInterrupted");
        let regen = Notice::MonsterRegenerating {
            monster: "Kun".to_string(),
        };
        assert_eq!(regen.key(), "monsterIsRegenerating");
        assert!(regen.message().starts_with("Kun"));
    }
}
