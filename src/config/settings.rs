//! Typed settings persisted under the `settings` key of the save file.
//!
//! Every struct is `#[serde(default)]`, so a save written by an older build
//! (or edited by hand) loads with the missing fields at their defaults.

use super::presets::EXPLOSION_PRESETS;
use crate::core::constants::MS_PER_MINUTE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoundSettings {
    pub is_enabled: bool,
    pub volume: f64,
    pub active_sound_pack_id: String,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            is_enabled: true,
            volume: 0.5,
            active_sound_pack_id: "cherry-mx-blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShakeSettings {
    pub enable: bool,
    pub intensity: u32,
    /// Milliseconds until the view settles after a shake.
    pub recover_time: u32,
}

impl Default for ShakeSettings {
    fn default() -> Self {
        Self {
            enable: false,
            intensity: 5,
            recover_time: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComboSettings {
    pub enable: bool,
    pub timeout: u32,
    pub show_exclamation: bool,
    pub precision_input: bool,
}

impl Default for ComboSettings {
    fn default() -> Self {
        Self {
            enable: true,
            timeout: 2_000,
            show_exclamation: true,
            precision_input: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowSettings {
    /// Minutes of silence before the combo resets and the monster starts healing.
    pub hold_time: f64,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self { hold_time: 5.0 }
    }
}

impl FlowSettings {
    pub const MIN_HOLD_TIME: f64 = 1.0;

    pub fn hold_time_ms(&self) -> i64 {
        (self.hold_time * MS_PER_MINUTE as f64).round() as i64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplosionOrder {
    #[default]
    Random,
    Sequential,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GifMode {
    #[default]
    Continue,
    Restart,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    #[default]
    Mask,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplosionSettings {
    pub enable: bool,
    pub max_explosions: u32,
    pub size: u32,
    pub frequency: u32,
    pub explosion_order: ExplosionOrder,
    pub gif_mode: GifMode,
    /// Milliseconds each explosion stays on screen.
    pub duration: u32,
    pub offset: f64,
    pub background_mode: BackgroundMode,
    pub image_list: Vec<String>,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self {
            enable: true,
            max_explosions: 3,
            size: 10,
            frequency: 1,
            explosion_order: ExplosionOrder::Random,
            gif_mode: GifMode::Continue,
            duration: 400,
            offset: 0.25,
            background_mode: BackgroundMode::Mask,
            image_list: Vec::new(),
        }
    }
}

/// A partial explosion config; `None` fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplosionOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_explosions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explosion_order: Option<ExplosionOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_mode: Option<GifMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_mode: Option<BackgroundMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_list: Option<Vec<String>>,
}

impl ExplosionOverride {
    /// Build explosion settings from this override over the defaults,
    /// keeping the caller's `enable` flag.
    pub fn resolve(&self, enable: bool) -> ExplosionSettings {
        let defaults = ExplosionSettings::default();
        ExplosionSettings {
            enable,
            max_explosions: self.max_explosions.unwrap_or(defaults.max_explosions),
            size: self.size.unwrap_or(defaults.size),
            frequency: self.frequency.unwrap_or(defaults.frequency),
            explosion_order: self.explosion_order.unwrap_or(defaults.explosion_order),
            gif_mode: self.gif_mode.unwrap_or(defaults.gif_mode),
            duration: self.duration.unwrap_or(defaults.duration),
            offset: self.offset.unwrap_or(defaults.offset),
            background_mode: self.background_mode.unwrap_or(defaults.background_mode),
            image_list: self.image_list.clone().unwrap_or(defaults.image_list),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sound: SoundSettings,
    pub shake_screen: ShakeSettings,
    pub combo: ComboSettings,
    pub flow: FlowSettings,
    pub explosion: ExplosionSettings,
    pub explosion_preset: usize,
    pub use_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_effect: Option<ExplosionOverride>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: SoundSettings::default(),
            shake_screen: ShakeSettings::default(),
            combo: ComboSettings::default(),
            flow: FlowSettings::default(),
            explosion: ExplosionSettings::default(),
            explosion_preset: 0,
            use_custom: false,
            custom_effect: Some(ExplosionOverride::default()),
        }
    }
}

impl Settings {
    pub fn hold_time_ms(&self) -> i64 {
        self.flow.hold_time_ms()
    }

    /// Clamp out-of-range values and rebuild the explosion block from the
    /// active preset (or the custom effect when `use_custom` is set).
    pub fn normalize(&mut self) {
        if !self.sound.volume.is_finite() {
            self.sound.volume = SoundSettings::default().volume;
        }
        self.sound.volume = self.sound.volume.clamp(0.0, 1.0);
        if !self.flow.hold_time.is_finite() || self.flow.hold_time < FlowSettings::MIN_HOLD_TIME {
            self.flow.hold_time = FlowSettings::MIN_HOLD_TIME;
        }
        self.apply_effect_source();
    }

    pub fn apply_effect_source(&mut self) {
        let enable = self.explosion.enable;
        if self.use_custom {
            if let Some(custom) = &self.custom_effect {
                self.explosion = custom.resolve(enable);
            }
        } else if let Some(preset) = EXPLOSION_PRESETS.get(self.explosion_preset) {
            self.explosion = preset.to_override().resolve(enable);
        }
    }

    /// Switch to another preset. Out-of-range indices are ignored.
    pub fn select_preset(&mut self, index: usize) -> bool {
        if index >= EXPLOSION_PRESETS.len() {
            return false;
        }
        self.explosion_preset = index;
        self.use_custom = false;
        self.apply_effect_source();
        true
    }
}
