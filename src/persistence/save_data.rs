use super::store::SaveError;
use crate::config::Settings;
use crate::core::player::PlayerData;
use crate::monster::Monster;
use crate::titles::Title;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The whole persisted blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub settings: Settings,
    pub player_data: PlayerData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_monster: Option<Monster>,
}

impl SaveData {
    /// Parse a save, recovering field by field.
    ///
    /// The text must be a JSON object. Each section is merged over its
    /// defaults one top-level field at a time: a missing or malformed field
    /// keeps its default and its siblings are kept. Unreadable title entries
    /// are dropped on their own. A monster without an id is treated as absent.
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(SaveError::NotAnObject);
        };
        Ok(Self {
            settings: section(&map, "settings")
                .map(|saved| merge_fields(Settings::default(), saved, "settings"))
                .unwrap_or_default(),
            player_data: section(&map, "playerData")
                .map(player_data)
                .unwrap_or_default(),
            active_monster: section(&map, "activeMonster").and_then(active_monster),
        })
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn section<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Object(fields)) => Some(fields),
        Some(_) => {
            tracing::warn!(section = key, "discarding save section that is not an object");
            None
        }
    }
}

/// Lay each saved field over the serialized `base`, rejecting fields that
/// stop the result from deserializing.
fn merge_fields<T>(base: T, saved: &Map<String, Value>, section: &str) -> T
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = match serde_json::to_value(&base) {
        Ok(Value::Object(fields)) => fields,
        _ => return base,
    };
    for (key, value) in saved {
        let previous = merged.insert(key.clone(), value.clone());
        if let Err(e) = serde_json::from_value::<T>(Value::Object(merged.clone())) {
            tracing::warn!(section, field = %key, error = %e, "discarding malformed save field");
            match previous {
                Some(old) => merged.insert(key.clone(), old),
                None => merged.remove(key),
            };
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or(base)
}

fn player_data(saved: &Map<String, Value>) -> PlayerData {
    let mut saved = saved.clone();
    if let Some(Value::Array(entries)) = saved.get_mut("unlockedTitles") {
        entries.retain(|entry| match serde_json::from_value::<Title>(entry.clone()) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed title");
                false
            }
        });
    }
    merge_fields(PlayerData::default(), &saved, "playerData")
}

fn active_monster(saved: &Map<String, Value>) -> Option<Monster> {
    let mut monster = merge_fields(Monster::default(), saved, "activeMonster");
    if monster.id.is_empty() {
        tracing::warn!("discarding saved monster without an id");
        return None;
    }
    // Unknown HP means an untouched monster
    if saved.get("currentHp").and_then(Value::as_u64).is_none() {
        monster.current_hp = monster.max_hp;
    }
    Some(monster)
}
