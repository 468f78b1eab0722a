use serde::{Deserialize, Serialize};

/// A freshly rolled title before it is stamped into the player's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTitle {
    pub title: String,
    pub star: u8,
}

impl GeneratedTitle {
    pub fn unlock(self, now_ms: i64) -> Title {
        Title {
            title: self.title,
            star: self.star,
            unlocked_at: now_ms,
        }
    }
}

/// An unlocked title as stored in the save file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub title: String,
    pub star: u8,
    /// Zero in saves that predate unlock timestamps.
    #[serde(default)]
    pub unlocked_at: i64,
}
